// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Placement Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Container center placement for hexagonally packed phantoms.
//!
//! Computed order is: the central container, a ring of six at
//! `4·rc·cos(π/6)` from the center, then the remaining containers
//! alternating between `2·rc` (touching the center) and `4·rc`. The
//! computed sequence is then permuted into the phantom's display order.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, PI};

use phantom_types::constants::{HEX_RING1_COUNT, HEX_RING2_START};
use phantom_types::error::{PhantomError, PhantomResult};
use phantom_types::state::{PlacementRequest, RoiCenter};
use tracing::debug;

use crate::catalog::PhantomDesign;

/// Distance of first-ring containers from the central one.
pub fn ring1_offset(rc: f64) -> f64 {
    2.0 * (2.0 * rc * FRAC_PI_6.cos())
}

/// Global center of the layout: override where given, grid center elsewhere.
pub fn resolve_center(request: &PlacementRequest) -> RoiCenter {
    request.resolved_center()
}

/// Container centers in computed order.
///
/// All containers share the z of `center`; `rotation` is in radians.
pub fn hexagonal_layout(nc: usize, rc: f64, center: RoiCenter, rotation: f64) -> Vec<RoiCenter> {
    let at = |radius: f64, theta: f64| {
        RoiCenter::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
            center.z,
        )
    };

    let mut centers = Vec::with_capacity(nc);
    if nc == 0 {
        return centers;
    }
    centers.push(center);

    let r1 = ring1_offset(rc);
    for i in 1..nc.min(HEX_RING2_START) {
        let theta = rotation + FRAC_PI_2 + (i - 1) as f64 * FRAC_PI_3;
        centers.push(at(r1, theta));
    }

    for i in HEX_RING2_START..nc {
        let k = i - HEX_RING2_START;
        let step = (k / 2) as f64 * FRAC_PI_3;
        if k % 2 == 0 {
            centers.push(at(2.0 * rc, rotation + step));
        } else {
            centers.push(at(4.0 * rc, PI + rotation + step));
        }
    }

    debug_assert_eq!(centers.len(), nc);
    centers
}

/// Reorder computed centers so that `display[i] = computed[order[i]]`.
pub fn apply_display_order<T: Copy>(computed: &[T], order: &[usize]) -> PhantomResult<Vec<T>> {
    if computed.len() != order.len() {
        return Err(PhantomError::ConfigError(format!(
            "display order has {} entries for {} containers",
            order.len(),
            computed.len()
        )));
    }
    order
        .iter()
        .map(|&src| {
            computed
                .get(src)
                .copied()
                .ok_or(PhantomError::ContainerOutOfRange {
                    index: src,
                    nc: computed.len(),
                })
        })
        .collect()
}

/// Centers of every container of `design`, in display order.
pub fn compute_roi_centers(
    design: &PhantomDesign,
    request: &PlacementRequest,
) -> PhantomResult<Vec<RoiCenter>> {
    design.validate()?;
    let order = design.placement_order()?;
    request.grid.validate()?;
    if !request.rotation.is_finite() {
        return Err(PhantomError::ConfigError(format!(
            "placement rotation must be finite, got {}",
            request.rotation
        )));
    }

    let spec = &design.spec;
    if spec.nc < 1 + HEX_RING1_COUNT {
        return Err(PhantomError::ConfigError(format!(
            "{}: hexagonal layout needs at least {} containers, got {}",
            design.designation,
            1 + HEX_RING1_COUNT,
            spec.nc
        )));
    }
    if !spec.rc.is_finite() || spec.rc <= 0.0 {
        return Err(PhantomError::ConfigError(format!(
            "{}: container radius must be finite and > 0, got {}",
            design.designation, spec.rc
        )));
    }

    let center = resolve_center(request);
    if !center.is_finite() {
        return Err(PhantomError::ConfigError(format!(
            "{}: placement center must be finite, got {:?}",
            design.designation, center
        )));
    }
    debug!(
        designation = design.designation,
        nc = spec.nc,
        rc = spec.rc,
        cx = center.x,
        cy = center.y,
        cz = center.z,
        rotation = request.rotation,
        "placing containers"
    );

    let computed = hexagonal_layout(spec.nc, spec.rc, center, request.rotation);
    apply_display_order(&computed, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::lookup;
    use phantom_types::state::GridSpec;

    fn request_100() -> PlacementRequest {
        PlacementRequest::new(GridSpec::new([100, 100, 10], [1.0, 1.0, 1.0]).unwrap())
    }

    fn close(a: &RoiCenter, b: &RoiCenter) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_mk4_default_center() {
        let design = lookup("MP-Mk4").unwrap();
        let centers = compute_roi_centers(design, &request_100()).unwrap();
        assert_eq!(centers.len(), 19);
        // Computed container 0 is displayed at position 9 in both tables.
        assert!(close(&centers[9], &RoiCenter::new(50.0, 50.0, 5.0)));
    }

    #[test]
    fn test_first_ring_is_regular_hexagon() {
        let rc = 13.5;
        let c = RoiCenter::new(50.0, 50.0, 5.0);
        let layout = hexagonal_layout(19, rc, c, 0.3);
        let r1 = ring1_offset(rc);
        for i in 1..=6 {
            assert!((layout[i].distance(&c) - r1).abs() < 1e-9);
            let next = if i == 6 { 1 } else { i + 1 };
            // Regular hexagon: side length equals circumradius.
            assert!((layout[i].distance(&layout[next]) - r1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_near_ring_touches_center() {
        let rc = 13.5;
        let c = RoiCenter::new(0.0, 0.0, 0.0);
        let layout = hexagonal_layout(19, rc, c, 0.0);
        let near: Vec<_> = (7..19).step_by(2).map(|i| layout[i]).collect();
        assert_eq!(near.len(), 6);
        for (j, p) in near.iter().enumerate() {
            assert!((p.distance(&c) - 2.0 * rc).abs() < 1e-9);
            let q = near[(j + 1) % 6];
            assert!((p.distance(&q) - 2.0 * rc).abs() < 1e-9);
        }
        for i in (8..19).step_by(2) {
            assert!((layout[i].distance(&c) - 4.0 * rc).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_overlap() {
        let rc = 13.5;
        let layout = hexagonal_layout(19, rc, RoiCenter::new(0.0, 0.0, 0.0), 1.1);
        for i in 0..layout.len() {
            for j in (i + 1)..layout.len() {
                let d = layout[i].distance(&layout[j]);
                assert!(d >= 2.0 * rc - 1e-9, "containers {i} and {j} overlap: {d}");
            }
        }
    }

    #[test]
    fn test_zero_rotation_first_container_points_up() {
        let layout = hexagonal_layout(19, 1.0, RoiCenter::new(0.0, 0.0, 0.0), 0.0);
        assert!(layout[1].x.abs() < 1e-12);
        assert!((layout[1].y - ring1_offset(1.0)).abs() < 1e-12);
        assert!((layout[7].x - 2.0).abs() < 1e-12);
        assert!((layout[8].x + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_order_indexing() {
        let computed = [10, 11, 12, 13];
        let display = apply_display_order(&computed, &[2, 0, 3, 1]).unwrap();
        assert_eq!(display, vec![12, 10, 13, 11]);
    }

    #[test]
    fn test_display_order_rejects_mismatch() {
        assert!(apply_display_order(&[1, 2, 3], &[0, 1]).is_err());
        assert!(matches!(
            apply_display_order(&[1, 2], &[0, 5]),
            Err(PhantomError::ContainerOutOfRange { index: 5, nc: 2 })
        ));
    }

    #[test]
    fn test_override_and_rotation() {
        let design = lookup("MP-Mk5").unwrap();
        let req = request_100().with_center(30.0, 70.0).with_center_z(0.0);
        let centers = compute_roi_centers(design, &req).unwrap();
        assert!(close(&centers[9], &RoiCenter::new(30.0, 70.0, 0.0)));
        assert!(centers.iter().all(|c| c.z == 0.0));

        let rotated = compute_roi_centers(design, &req.with_rotation(2.0 * PI)).unwrap();
        for (a, b) in centers.iter().zip(&rotated) {
            assert!(a.distance(b) < 1e-9);
        }
    }

    #[test]
    fn test_design_without_layout_fails() {
        let design = lookup("MP-Mk1").unwrap();
        assert!(matches!(
            compute_roi_centers(design, &request_100()),
            Err(PhantomError::NoPlacementLayout(_))
        ));
    }

    #[test]
    fn test_deserialized_bad_grid_rejected() {
        let design = lookup("MP-Mk4").unwrap();
        let req: PlacementRequest = serde_json::from_str(
            r#"{"grid":{"extents":[100,0,10],"spacing":[-1.0,1.0,0.0]},
                "cx0":null,"cy0":null,"cz0":null,"rotation":0.0}"#,
        )
        .unwrap();
        assert!(matches!(
            compute_roi_centers(design, &req),
            Err(PhantomError::ConfigError(_))
        ));

        let mut req = request_100();
        req.grid.spacing[2] = 0.0;
        assert!(matches!(
            compute_roi_centers(design, &req),
            Err(PhantomError::ConfigError(_))
        ));
    }

    #[test]
    fn test_repeatable() {
        let design = lookup("MP-Mk4").unwrap();
        let req = request_100().with_rotation(0.7);
        let a = compute_roi_centers(design, &req).unwrap();
        let b = compute_roi_centers(design, &req).unwrap();
        assert_eq!(a, b);
    }
}
