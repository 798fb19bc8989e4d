// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Phantom Instance
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! A catalog design bound to one physical phantom and its sample labels.
//!
//! `compute_rois` places every container and rasterises its ROI; accessors
//! that depend on that result return `MissingPrecondition` until it has run.

use phantom_types::config::{PhantomConfig, RoiScales};
use phantom_types::error::{PhantomError, PhantomResult};
use phantom_types::state::{
    CylinderAxis, CylinderRoi, GridSpec, PlacementRequest, RoiCenter, VoxelMask,
};
use rayon::prelude::*;
use tracing::info;

use crate::catalog::{self, PhantomDesign};
use crate::mask::generate_mask;
use crate::placement;
use crate::store::PhantomStore;

/// Containers stand upright: their axes run along the through-plane direction.
const ROI_AXIS: CylinderAxis = CylinderAxis::Z;

/// Per-container ROI record.
#[derive(Debug, Clone)]
pub struct RoiInfo {
    /// Display label, "C{index:02}: {sample}".
    pub label: String,
    pub sample: String,
    pub ht: f64,
    pub rd: f64,
    pub center: Option<RoiCenter>,
    pub mask: Option<VoxelMask>,
}

#[derive(Debug, Clone)]
pub struct Phantom {
    design: &'static PhantomDesign,
    uid: String,
    scales: RoiScales,
    rois: Vec<RoiInfo>,
    grid: Option<GridSpec>,
}

impl Phantom {
    pub fn new(
        designation: &str,
        uid: &str,
        labels: &[String],
        scales: RoiScales,
    ) -> PhantomResult<Self> {
        let design = catalog::lookup(designation)?;
        design.validate()?;
        scales.validate()?;

        let nc = design.spec.nc;
        if labels.len() != nc {
            return Err(PhantomError::ConfigError(format!(
                "{designation} has {nc} containers but {} labels were given",
                labels.len()
            )));
        }

        let ht = design.spec.hc * scales.ht_scl;
        let rd = design.spec.rc * scales.rd_scl;
        let rois = labels
            .iter()
            .enumerate()
            .map(|(ci, sample)| RoiInfo {
                label: format!("C{ci:02}: {sample}"),
                sample: sample.clone(),
                ht,
                rd,
                center: None,
                mask: None,
            })
            .collect();

        Ok(Phantom {
            design,
            uid: uid.to_string(),
            scales,
            rois,
            grid: None,
        })
    }

    /// Resolve labels through the store, creating the record on first use.
    pub fn from_store<S: PhantomStore + ?Sized>(
        store: &mut S,
        designation: &str,
        uid: &str,
        labels: Option<&[String]>,
        scales: RoiScales,
    ) -> PhantomResult<Self> {
        // Fail on a bad designation before anything is persisted.
        let design = catalog::lookup(designation)?;
        if let Some(labels) = labels {
            if labels.len() != design.spec.nc {
                return Err(PhantomError::ConfigError(format!(
                    "{designation} has {} containers but {} labels were given",
                    design.spec.nc,
                    labels.len()
                )));
            }
        }
        let record = store.fetch_or_create(uid, labels)?;
        Self::new(designation, uid, &record.labels(), scales)
    }

    pub fn from_config<S: PhantomStore + ?Sized>(
        config: &PhantomConfig,
        store: &mut S,
    ) -> PhantomResult<Self> {
        config.validate()?;
        Self::from_store(
            store,
            &config.designation,
            &config.phantom_uid,
            config.container_labels.as_deref(),
            config.roi,
        )
    }

    pub fn design(&self) -> &'static PhantomDesign {
        self.design
    }

    pub fn designation(&self) -> &'static str {
        self.design.designation
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn nc(&self) -> usize {
        self.design.spec.nc
    }

    pub fn scales(&self) -> RoiScales {
        self.scales
    }

    pub fn rois(&self) -> &[RoiInfo] {
        &self.rois
    }

    pub fn roi(&self, index: usize) -> PhantomResult<&RoiInfo> {
        self.rois.get(index).ok_or(PhantomError::ContainerOutOfRange {
            index,
            nc: self.rois.len(),
        })
    }

    /// Container centers in display order. Does not modify the phantom.
    pub fn compute_roi_centers(&self, request: &PlacementRequest) -> PhantomResult<Vec<RoiCenter>> {
        placement::compute_roi_centers(self.design, request)
    }

    /// Place all containers and generate one mask per container.
    pub fn compute_rois(&mut self, request: &PlacementRequest) -> PhantomResult<()> {
        let centers = self.compute_roi_centers(request)?;
        let cylinders = self
            .rois
            .iter()
            .zip(&centers)
            .map(|(roi, &center)| CylinderRoi::new(center, roi.ht, roi.rd, ROI_AXIS))
            .collect::<PhantomResult<Vec<_>>>()?;

        let grid = request.grid;
        let masks = cylinders
            .par_iter()
            .map(|cyl| generate_mask(cyl, &grid))
            .collect::<PhantomResult<Vec<_>>>()?;

        for ((roi, center), mask) in self.rois.iter_mut().zip(centers).zip(masks) {
            roi.center = Some(center);
            roi.mask = Some(mask);
        }
        self.grid = Some(grid);

        info!(
            uid = %self.uid,
            designation = self.design.designation,
            containers = self.rois.len(),
            "computed phantom ROIs"
        );
        Ok(())
    }

    fn not_computed(&self) -> PhantomError {
        PhantomError::MissingPrecondition(format!(
            "ROIs of phantom {} not computed; call compute_rois first",
            self.uid
        ))
    }

    /// Grid the ROIs were computed on.
    pub fn grid(&self) -> PhantomResult<&GridSpec> {
        self.grid.as_ref().ok_or_else(|| self.not_computed())
    }

    pub fn cylinder(&self, index: usize) -> PhantomResult<CylinderRoi> {
        let roi = self.roi(index)?;
        let center = roi.center.ok_or_else(|| self.not_computed())?;
        Ok(CylinderRoi {
            center,
            ht: roi.ht,
            rd: roi.rd,
            axis: ROI_AXIS,
        })
    }

    pub fn centers(&self) -> PhantomResult<Vec<RoiCenter>> {
        self.rois
            .iter()
            .map(|r| r.center.ok_or_else(|| self.not_computed()))
            .collect()
    }

    pub fn mask(&self, index: usize) -> PhantomResult<&VoxelMask> {
        self.roi(index)?
            .mask
            .as_ref()
            .ok_or_else(|| self.not_computed())
    }

    pub fn masks(&self) -> PhantomResult<Vec<&VoxelMask>> {
        (0..self.rois.len()).map(|i| self.mask(i)).collect()
    }
}
