// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ROI_HT_SCL, DEFAULT_ROI_RD_SCL};
use crate::error::{PhantomError, PhantomResult};
use crate::logging::LogConfig;
use crate::state::{GridSpec, PlacementRequest};

/// Session configuration for one imaged phantom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhantomConfig {
    /// Catalog designation, e.g. "MP-Mk4".
    pub designation: String,
    pub phantom_uid: String,
    /// Sample labels in display order. When absent the store must already
    /// hold a record for `phantom_uid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_labels: Option<Vec<String>>,
    #[serde(default)]
    pub roi: RoiScales,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// ROI size relative to the nominal container dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiScales {
    #[serde(default = "default_rd_scl")]
    pub rd_scl: f64,
    #[serde(default = "default_ht_scl")]
    pub ht_scl: f64,
}

fn default_rd_scl() -> f64 {
    DEFAULT_ROI_RD_SCL
}
fn default_ht_scl() -> f64 {
    DEFAULT_ROI_HT_SCL
}

impl Default for RoiScales {
    fn default() -> Self {
        RoiScales {
            rd_scl: default_rd_scl(),
            ht_scl: default_ht_scl(),
        }
    }
}

impl RoiScales {
    pub fn validate(&self) -> PhantomResult<()> {
        if !self.rd_scl.is_finite() || self.rd_scl <= 0.0 {
            return Err(PhantomError::ConfigError(format!(
                "ROI radius scale must be finite and > 0, got {}",
                self.rd_scl
            )));
        }
        if !self.ht_scl.is_finite() || self.ht_scl <= 0.0 {
            return Err(PhantomError::ConfigError(format!(
                "ROI height scale must be finite and > 0, got {}",
                self.ht_scl
            )));
        }
        Ok(())
    }
}

/// Optional placement overrides. Each center component may be null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default)]
    pub center: [Option<f64>; 3],
    #[serde(default)]
    pub rotation_deg: f64,
}

impl PhantomConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> PhantomResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> PhantomResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PhantomResult<()> {
        if self.designation.trim().is_empty() {
            return Err(PhantomError::ConfigError(
                "designation must not be empty".to_string(),
            ));
        }
        if self.phantom_uid.trim().is_empty() {
            return Err(PhantomError::ConfigError(
                "phantom_uid must not be empty".to_string(),
            ));
        }
        self.roi.validate()?;
        self.logging.validate()?;
        if !self.placement.rotation_deg.is_finite() {
            return Err(PhantomError::ConfigError(format!(
                "rotation must be finite, got {}",
                self.placement.rotation_deg
            )));
        }
        if let Some(bad) = self.placement.center.iter().flatten().find(|c| !c.is_finite()) {
            return Err(PhantomError::ConfigError(format!(
                "center override must be finite, got {bad}"
            )));
        }
        Ok(())
    }

    /// Placement request for an acquired grid.
    pub fn placement_request(&self, grid: GridSpec) -> PlacementRequest {
        let [cx0, cy0, cz0] = self.placement.center;
        PlacementRequest {
            grid,
            cx0,
            cy0,
            cz0,
            rotation: self.placement.rotation_deg.to_radians(),
        }
    }
}
