// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Preview Data
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Geometry handed to plotting front-ends. Nothing here renders.
//!
//! Pixel coordinates are `(row, col)` = `(x / dx, y / dy)`, matching an
//! image slice indexed `[ix, iy]`.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Array3, Axis};
use phantom_types::error::{PhantomError, PhantomResult};
use phantom_types::state::{GridSpec, PlacementRequest};
use serde::Serialize;

use crate::catalog::PhantomDesign;
use crate::phantom::Phantom;
use crate::placement::compute_roi_centers;

/// Container marker on a 2D slice.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewMarker {
    /// "C{index:02}" in display order.
    pub label: String,
    pub row: f64,
    pub col: f64,
    /// Closed outline of the container wall, `(row, col)` pairs.
    pub outline: Vec<(f64, f64)>,
}

/// Container markers for a single slice of shape `(nx, ny)`.
///
/// The layout is centered on the slice (`floor(n/2)·d`) shifted by
/// `offset` [mm] and rotated by `rotation_deg`.
pub fn preview_markers_2d(
    design: &PhantomDesign,
    slice_shape: (usize, usize),
    spacing: (f64, f64),
    offset: (f64, f64),
    rotation_deg: f64,
    n_points: usize,
) -> PhantomResult<Vec<PreviewMarker>> {
    let (nx, ny) = slice_shape;
    let (dx, dy) = spacing;
    let grid = GridSpec::new([nx, ny, 1], [dx, dy, 1.0])?;
    if n_points < 2 {
        return Err(PhantomError::ConfigError(format!(
            "outline needs at least 2 points, got {n_points}"
        )));
    }

    let cx0 = dx * (nx / 2) as f64 + offset.0;
    let cy0 = dy * (ny / 2) as f64 + offset.1;
    let request = PlacementRequest::new(grid)
        .with_center(cx0, cy0)
        .with_center_z(0.0)
        .with_rotation_deg(rotation_deg);
    let centers = compute_roi_centers(design, &request)?;

    let rc = design.spec.rc;
    let theta = Array1::linspace(0.0, 2.0 * PI, n_points);
    let markers = centers
        .iter()
        .enumerate()
        .map(|(ci, c)| {
            let row = c.x / dx;
            let col = c.y / dy;
            let outline = theta
                .iter()
                .map(|t| (row + (rc / dx) * t.sin(), col + (rc / dy) * t.cos()))
                .collect();
            PreviewMarker {
                label: format!("C{ci:02}"),
                row,
                col,
                outline,
            }
        })
        .collect();
    Ok(markers)
}

/// The three planes through `voxel`: `[x-plane (ny, nz), y-plane (nx, nz), z-plane (nx, ny)]`.
pub fn orthogonal_slices<T: Clone>(
    volume: &Array3<T>,
    voxel: [usize; 3],
) -> PhantomResult<[Array2<T>; 3]> {
    let shape = volume.shape();
    if voxel.iter().zip(shape).any(|(&v, &n)| v >= n) {
        return Err(PhantomError::ConfigError(format!(
            "voxel {voxel:?} outside volume of shape {shape:?}"
        )));
    }
    Ok([
        volume.index_axis(Axis(0), voxel[0]).to_owned(),
        volume.index_axis(Axis(1), voxel[1]).to_owned(),
        volume.index_axis(Axis(2), voxel[2]).to_owned(),
    ])
}

/// Mask planes through one computed ROI's center voxel.
#[derive(Debug, Clone)]
pub struct RoiOverlay {
    pub label: String,
    pub voxel: [usize; 3],
    pub planes: [Array2<bool>; 3],
}

pub fn roi_overlay(phantom: &Phantom, index: usize) -> PhantomResult<RoiOverlay> {
    let mask = phantom.mask(index)?;
    let grid = phantom.grid()?;
    let center = phantom.cylinder(index)?.center;
    let voxel = grid.voxel_of(&center).ok_or_else(|| {
        PhantomError::ConfigError(format!(
            "ROI {index} center {center:?} lies outside the image grid"
        ))
    })?;
    Ok(RoiOverlay {
        label: phantom.roi(index)?.label.clone(),
        voxel,
        planes: orthogonal_slices(mask, voxel)?,
    })
}
