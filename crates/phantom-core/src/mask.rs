// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Cylinder Mask Generator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rasterisation of cylindrical ROIs onto a voxel grid.
//!
//! Voxel `[i, j, k]` sits at `(i·dx, j·dy, k·dz)`; there is no half-voxel
//! offset. A voxel is inside when it passes both the radial test
//! (distance² from the axis ≤ rd²) and the axial test (within ±ht/2).

use ndarray::Array3;
use phantom_types::error::PhantomResult;
use phantom_types::state::{CylinderAxis, CylinderRoi, GridSpec, VoxelMask};
use tracing::{debug, warn};

/// Boolean mask of `roi` over `grid`, shape `(nx, ny, nz)`.
pub fn generate_mask(roi: &CylinderRoi, grid: &GridSpec) -> PhantomResult<VoxelMask> {
    roi.validate()?;
    grid.validate()?;

    let xs = grid.axis_coords(CylinderAxis::X);
    let ys = grid.axis_coords(CylinderAxis::Y);
    let zs = grid.axis_coords(CylinderAxis::Z);

    let mask = Array3::from_shape_fn(grid.shape(), |(i, j, k)| roi.contains([xs[i], ys[j], zs[k]]));

    let count = mask_voxel_count(&mask);
    if count == 0 {
        warn!(
            cx = roi.center.x,
            cy = roi.center.y,
            cz = roi.center.z,
            "cylinder ROI does not intersect the grid"
        );
    } else {
        debug!(voxels = count, axis = ?roi.axis, "cylinder mask generated");
    }
    Ok(mask)
}

/// Number of voxels inside the mask.
pub fn mask_voxel_count(mask: &VoxelMask) -> usize {
    mask.iter().filter(|&&inside| inside).count()
}

/// 0/1 weights for numeric consumers (overlays, weighted sums).
pub fn mask_weights(mask: &VoxelMask) -> Array3<f32> {
    mask.mapv(|inside| if inside { 1.0 } else { 0.0 })
}
