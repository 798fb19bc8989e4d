// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array3};
use serde::{Deserialize, Serialize};

use crate::error::{PhantomError, PhantomResult};

/// Boolean voxel mask with the extents of the image grid, indexed `[ix, iy, iz]`.
pub type VoxelMask = Array3<bool>;

/// Image voxel grid: extents and per-axis spacing [mm/voxel].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub extents: [usize; 3],
    pub spacing: [f64; 3],
}

impl GridSpec {
    pub fn new(extents: [usize; 3], spacing: [f64; 3]) -> PhantomResult<Self> {
        for (axis, &n) in extents.iter().enumerate() {
            if n == 0 {
                return Err(PhantomError::ConfigError(format!(
                    "grid extent along axis {axis} must be > 0"
                )));
            }
        }
        for (axis, &d) in spacing.iter().enumerate() {
            if !d.is_finite() || d <= 0.0 {
                return Err(PhantomError::ConfigError(format!(
                    "voxel spacing along axis {axis} must be finite and > 0, got {d}"
                )));
            }
        }
        Ok(GridSpec { extents, spacing })
    }

    /// Re-check a grid that was deserialized or built field-by-field.
    pub fn validate(&self) -> PhantomResult<()> {
        Self::new(self.extents, self.spacing).map(|_| ())
    }

    /// Shape tuple for ndarray constructors.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.extents[0], self.extents[1], self.extents[2])
    }

    pub fn n_voxels(&self) -> usize {
        self.extents.iter().product()
    }

    /// Grid-centered default: `floor(n/2) * d` per axis.
    pub fn center(&self) -> RoiCenter {
        let c = |axis: usize| (self.extents[axis] / 2) as f64 * self.spacing[axis];
        RoiCenter::new(c(0), c(1), c(2))
    }

    /// Physical coordinate of every voxel along one axis. Voxel 0 sits at 0.0.
    pub fn axis_coords(&self, axis: CylinderAxis) -> Array1<f64> {
        let a = axis.index();
        let d = self.spacing[a];
        Array1::from_shape_fn(self.extents[a], |i| i as f64 * d)
    }

    /// Voxel containing a physical point (`floor(c / d)`), `None` outside the grid.
    pub fn voxel_of(&self, point: &RoiCenter) -> Option<[usize; 3]> {
        let p = point.to_array();
        let mut idx = [0usize; 3];
        for axis in 0..3 {
            let v = (p[axis] / self.spacing[axis]).floor();
            if !v.is_finite() || v < 0.0 || v >= self.extents[axis] as f64 {
                return None;
            }
            idx[axis] = v as usize;
        }
        Some(idx)
    }
}

/// Physical ROI / container center [mm].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiCenter {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RoiCenter {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        RoiCenter { x, y, z }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance(&self, other: &RoiCenter) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Principal direction of a cylinder's axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CylinderAxis {
    X,
    Y,
    /// Through-plane.
    #[default]
    Z,
}

impl CylinderAxis {
    pub fn index(self) -> usize {
        match self {
            CylinderAxis::X => 0,
            CylinderAxis::Y => 1,
            CylinderAxis::Z => 2,
        }
    }

    /// The two axes spanning the plane orthogonal to this one, ascending.
    pub fn in_plane(self) -> (usize, usize) {
        match self {
            CylinderAxis::X => (1, 2),
            CylinderAxis::Y => (0, 2),
            CylinderAxis::Z => (0, 1),
        }
    }
}

impl TryFrom<usize> for CylinderAxis {
    type Error = PhantomError;

    fn try_from(value: usize) -> PhantomResult<Self> {
        match value {
            0 => Ok(CylinderAxis::X),
            1 => Ok(CylinderAxis::Y),
            2 => Ok(CylinderAxis::Z),
            other => Err(PhantomError::ConfigError(format!(
                "cylinder axis must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// Cylindrical region of interest.
///
/// `ht` is the axial length: a point is inside when its axial coordinate lies
/// in `[c - ht/2, c + ht/2]` and its distance from the axis is at most `rd`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderRoi {
    pub center: RoiCenter,
    pub ht: f64,
    pub rd: f64,
    pub axis: CylinderAxis,
}

impl CylinderRoi {
    pub fn new(center: RoiCenter, ht: f64, rd: f64, axis: CylinderAxis) -> PhantomResult<Self> {
        let roi = CylinderRoi {
            center,
            ht,
            rd,
            axis,
        };
        roi.validate()?;
        Ok(roi)
    }

    /// Rejects degenerate or inverted cylinders.
    pub fn validate(&self) -> PhantomResult<()> {
        if !self.rd.is_finite() || self.rd <= 0.0 {
            return Err(PhantomError::ConfigError(format!(
                "ROI radius must be finite and > 0, got {}",
                self.rd
            )));
        }
        if !self.ht.is_finite() || self.ht <= 0.0 {
            return Err(PhantomError::ConfigError(format!(
                "ROI height must be finite and > 0, got {}",
                self.ht
            )));
        }
        if !self.center.is_finite() {
            return Err(PhantomError::ConfigError(format!(
                "ROI center must be finite, got {:?}",
                self.center
            )));
        }
        Ok(())
    }

    /// Inclusive containment test for a physical point.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        let c = self.center.to_array();
        let a = self.axis.index();
        let (u, v) = self.axis.in_plane();

        let du = point[u] - c[u];
        let dv = point[v] - c[v];
        let radial = du * du + dv * dv <= self.rd * self.rd;

        radial && point[a] >= c[a] - self.ht / 2.0 && point[a] <= c[a] + self.ht / 2.0
    }
}

/// Static container description of a phantom design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerSpec {
    /// Number of containers.
    pub nc: usize,
    /// Nominal container radius [mm].
    pub rc: f64,
    /// Nominal container half-height [mm].
    pub hc: f64,
    pub material: &'static str,
    pub shape: &'static str,
}

/// Runtime input to the placement solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub grid: GridSpec,
    pub cx0: Option<f64>,
    pub cy0: Option<f64>,
    pub cz0: Option<f64>,
    /// Global rotation offset [rad].
    pub rotation: f64,
}

impl PlacementRequest {
    pub fn new(grid: GridSpec) -> Self {
        PlacementRequest {
            grid,
            cx0: None,
            cy0: None,
            cz0: None,
            rotation: 0.0,
        }
    }

    pub fn with_center(mut self, cx0: f64, cy0: f64) -> Self {
        self.cx0 = Some(cx0);
        self.cy0 = Some(cy0);
        self
    }

    pub fn with_center_z(mut self, cz0: f64) -> Self {
        self.cz0 = Some(cz0);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_rotation_deg(self, degrees: f64) -> Self {
        self.with_rotation(degrees.to_radians())
    }

    /// Global center: override where given, grid center elsewhere.
    pub fn resolved_center(&self) -> RoiCenter {
        let default = self.grid.center();
        RoiCenter::new(
            self.cx0.unwrap_or(default.x),
            self.cy0.unwrap_or(default.y),
            self.cz0.unwrap_or(default.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_zero_extent() {
        assert!(GridSpec::new([10, 0, 10], [1.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_grid_rejects_bad_spacing() {
        assert!(GridSpec::new([10, 10, 10], [1.0, 0.0, 1.0]).is_err());
        assert!(GridSpec::new([10, 10, 10], [1.0, 1.0, -0.5]).is_err());
        assert!(GridSpec::new([10, 10, 10], [f64::NAN, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_validate_catches_deserialized_grid() {
        let bad: GridSpec =
            serde_json::from_str(r#"{"extents":[4,4,0],"spacing":[1.0,1.0,1.0]}"#).unwrap();
        assert!(matches!(bad.validate(), Err(PhantomError::ConfigError(_))));
        let ok = GridSpec::new([4, 4, 4], [1.0, 1.0, 1.0]).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_grid_center_floors_odd_extents() {
        let grid = GridSpec::new([101, 100, 11], [0.5, 1.0, 2.0]).unwrap();
        let c = grid.center();
        assert!((c.x - 25.0).abs() < 1e-12);
        assert!((c.y - 50.0).abs() < 1e-12);
        assert!((c.z - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_coords_zero_based() {
        let grid = GridSpec::new([4, 3, 2], [0.5, 2.0, 3.0]).unwrap();
        let xs = grid.axis_coords(CylinderAxis::X);
        assert_eq!(xs.len(), 4);
        assert_eq!(xs[0], 0.0);
        assert!((xs[3] - 1.5).abs() < 1e-12);
        let zs = grid.axis_coords(CylinderAxis::Z);
        assert!((zs[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_voxel_of_inside_and_outside() {
        let grid = GridSpec::new([10, 10, 10], [2.0, 2.0, 2.0]).unwrap();
        assert_eq!(grid.voxel_of(&RoiCenter::new(5.0, 0.0, 19.9)), Some([2, 0, 9]));
        assert_eq!(grid.voxel_of(&RoiCenter::new(-0.1, 0.0, 0.0)), None);
        assert_eq!(grid.voxel_of(&RoiCenter::new(0.0, 20.0, 0.0)), None);
    }

    #[test]
    fn test_axis_try_from() {
        assert_eq!(CylinderAxis::try_from(0).unwrap(), CylinderAxis::X);
        assert_eq!(CylinderAxis::try_from(2).unwrap(), CylinderAxis::Z);
        assert!(matches!(
            CylinderAxis::try_from(3),
            Err(PhantomError::ConfigError(_))
        ));
    }

    #[test]
    fn test_cylinder_rejects_degenerate() {
        let c = RoiCenter::new(0.0, 0.0, 0.0);
        assert!(CylinderRoi::new(c, 1.0, 0.0, CylinderAxis::Z).is_err());
        assert!(CylinderRoi::new(c, -1.0, 1.0, CylinderAxis::Z).is_err());
        assert!(CylinderRoi::new(c, 1.0, f64::INFINITY, CylinderAxis::Z).is_err());
        assert!(CylinderRoi::new(c, 1.0, 1.0, CylinderAxis::Z).is_ok());
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let roi =
            CylinderRoi::new(RoiCenter::new(5.0, 5.0, 5.0), 2.0, 2.0, CylinderAxis::Z).unwrap();
        assert!(roi.contains([5.0, 5.0, 5.0]));
        assert!(roi.contains([7.0, 5.0, 5.0]));
        assert!(!roi.contains([7.0 + 1e-9, 5.0, 5.0]));
        assert!(roi.contains([5.0, 5.0, 6.0]));
        assert!(!roi.contains([5.0, 5.0, 6.0 + 1e-9]));
    }

    #[test]
    fn test_contains_respects_axis() {
        let center = RoiCenter::new(5.0, 5.0, 5.0);
        let along_x = CylinderRoi::new(center, 6.0, 1.0, CylinderAxis::X).unwrap();
        assert!(along_x.contains([7.5, 5.0, 5.0]));
        assert!(!along_x.contains([5.0, 7.5, 5.0]));
        let along_y = CylinderRoi::new(center, 6.0, 1.0, CylinderAxis::Y).unwrap();
        assert!(along_y.contains([5.0, 7.5, 5.0]));
        assert!(!along_y.contains([5.0, 5.0, 7.5]));
    }

    #[test]
    fn test_placement_request_resolution() {
        let grid = GridSpec::new([100, 100, 10], [1.0, 1.0, 1.0]).unwrap();
        let req = PlacementRequest::new(grid);
        assert_eq!(req.resolved_center(), RoiCenter::new(50.0, 50.0, 5.0));

        let req = req.with_center(40.0, 60.0).with_center_z(0.0);
        assert_eq!(req.resolved_center(), RoiCenter::new(40.0, 60.0, 0.0));

        let req = req.with_rotation_deg(180.0);
        assert!((req.rotation - std::f64::consts::PI).abs() < 1e-12);
    }
}
