// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — ROI Statistics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Summary statistics of image values inside ROI masks.

use ndarray::Array3;
use phantom_types::error::{PhantomError, PhantomResult};
use phantom_types::state::VoxelMask;
use serde::Serialize;

use crate::phantom::Phantom;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

fn shape3(a: &[usize]) -> [usize; 3] {
    [a[0], a[1], a[2]]
}

pub fn roi_statistics(volume: &Array3<f64>, mask: &VoxelMask) -> PhantomResult<RoiStats> {
    if volume.shape() != mask.shape() {
        return Err(PhantomError::ShapeMismatch {
            expected: shape3(mask.shape()),
            found: shape3(volume.shape()),
        });
    }

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (&v, _) in volume.iter().zip(mask.iter()).filter(|(_, inside)| **inside) {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return Err(PhantomError::EmptyRoi(
            "mask selects no voxels".to_string(),
        ));
    }

    let mean = sum / count as f64;
    // Second pass keeps the variance stable for large offsets.
    let var = volume
        .iter()
        .zip(mask.iter())
        .filter(|(_, inside)| **inside)
        .map(|(&v, _)| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64;

    Ok(RoiStats {
        count,
        mean,
        std: var.sqrt(),
        min,
        max,
    })
}

/// Statistics for every container of a computed phantom, keyed by display label.
pub fn phantom_statistics(
    phantom: &Phantom,
    volume: &Array3<f64>,
) -> PhantomResult<Vec<(String, RoiStats)>> {
    let masks = phantom.masks()?;
    masks
        .into_iter()
        .zip(phantom.rois())
        .map(|(mask, roi)| {
            let stats = roi_statistics(volume, mask).map_err(|e| match e {
                PhantomError::EmptyRoi(_) => PhantomError::EmptyRoi(roi.label.clone()),
                other => other,
            })?;
            Ok((roi.label.clone(), stats))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phantom_types::config::RoiScales;
    use phantom_types::state::{GridSpec, PlacementRequest};

    #[test]
    fn test_stats_over_known_values() {
        let volume = Array3::from_shape_fn((2, 2, 1), |(i, j, _)| (i * 2 + j) as f64);
        let mut mask = VoxelMask::from_elem((2, 2, 1), false);
        mask[[0, 1, 0]] = true;
        mask[[1, 1, 0]] = true;
        let s = roi_statistics(&volume, &mask).unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert!((s.std - 1.0).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let volume = Array3::<f64>::zeros((2, 2, 2));
        let mask = VoxelMask::from_elem((2, 2, 3), true);
        assert!(matches!(
            roi_statistics(&volume, &mask),
            Err(PhantomError::ShapeMismatch {
                expected: [2, 2, 3],
                found: [2, 2, 2]
            })
        ));
    }

    #[test]
    fn test_empty_mask() {
        let volume = Array3::<f64>::zeros((2, 2, 2));
        let mask = VoxelMask::from_elem((2, 2, 2), false);
        assert!(matches!(
            roi_statistics(&volume, &mask),
            Err(PhantomError::EmptyRoi(_))
        ));
    }

    #[test]
    fn test_phantom_statistics_per_container() {
        let labels: Vec<String> = (0..19).map(|i| format!("s{i}")).collect();
        let mut phantom = Phantom::new("MP-Mk5", "st", &labels, RoiScales::default()).unwrap();
        let volume = Array3::from_elem((120, 120, 4), 7.5);
        assert!(matches!(
            phantom_statistics(&phantom, &volume),
            Err(PhantomError::MissingPrecondition(_))
        ));

        let grid = GridSpec::new([120, 120, 4], [1.0, 1.0, 1.0]).unwrap();
        phantom.compute_rois(&PlacementRequest::new(grid)).unwrap();
        let stats = phantom_statistics(&phantom, &volume).unwrap();
        assert_eq!(stats.len(), 19);
        assert_eq!(stats[0].0, "C00: s0");
        for (_, s) in &stats {
            assert!((s.mean - 7.5).abs() < 1e-12);
            assert!(s.std.abs() < 1e-12);
        }
    }
}
