// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Phantom Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Registry of physical phantom designs.
//!
//! Each entry pairs a designation with its container dimensions and, for
//! designs with a hexagonal layout, the display-order table.

use phantom_types::constants::{MK4_PLACEMENT_ORDER, MK5_PLACEMENT_ORDER};
use phantom_types::error::{PhantomError, PhantomResult};
use phantom_types::state::ContainerSpec;
use serde::Serialize;

/// One phantom design variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhantomDesign {
    pub designation: &'static str,
    pub spec: ContainerSpec,
    /// `None` for designs whose container layout was never characterised.
    pub placement_order: Option<&'static [usize]>,
}

/// 55.0 mm diameter, ruler measurement.
const MP_MK1: PhantomDesign = PhantomDesign {
    designation: "MP-Mk1",
    spec: ContainerSpec {
        nc: 8,
        rc: 55.0 / 2.0,
        hc: 50.8,
        material: "glass",
        shape: "cylinder",
    },
    placement_order: None,
};

/// 38.0 mm diameter, caliper measurement.
const MP_MK2: PhantomDesign = PhantomDesign {
    designation: "MP-Mk2",
    spec: ContainerSpec {
        nc: 24,
        rc: 38.0 / 2.0,
        hc: 20.0,
        material: "plastic (unknown)",
        shape: "cylinder",
    },
    placement_order: None,
};

/// Half-height is approximate.
const MP_MK4: PhantomDesign = PhantomDesign {
    designation: "MP-Mk4",
    spec: ContainerSpec {
        nc: 19,
        rc: 13.5,
        hc: 95.25 / 2.0,
        material: "glass",
        shape: "cylinder",
    },
    placement_order: Some(&MK4_PLACEMENT_ORDER),
};

const MP_MK5: PhantomDesign = PhantomDesign {
    designation: "MP-Mk5",
    spec: ContainerSpec {
        nc: 19,
        rc: 13.5,
        hc: 95.25 / 2.0,
        material: "HDPE",
        shape: "cylinder",
    },
    placement_order: Some(&MK5_PLACEMENT_ORDER),
};

static CATALOG: [PhantomDesign; 4] = [MP_MK1, MP_MK2, MP_MK4, MP_MK5];

/// All known designs.
pub fn designs() -> &'static [PhantomDesign] {
    &CATALOG
}

/// Resolve a designation string such as "MP-Mk4".
pub fn lookup(designation: &str) -> PhantomResult<&'static PhantomDesign> {
    CATALOG
        .iter()
        .find(|d| d.designation == designation)
        .ok_or_else(|| PhantomError::UnknownDesignation(designation.to_string()))
}

impl PhantomDesign {
    /// Display-order table; errors for designs without a layout.
    pub fn placement_order(&self) -> PhantomResult<&'static [usize]> {
        self.placement_order
            .ok_or_else(|| PhantomError::NoPlacementLayout(self.designation.to_string()))
    }

    /// The placement table must be a permutation of `0..nc`.
    pub fn validate(&self) -> PhantomResult<()> {
        let Some(order) = self.placement_order else {
            return Ok(());
        };
        let mismatch = || PhantomError::PlacementMismatch {
            designation: self.designation.to_string(),
            nc: self.spec.nc,
            table_len: order.len(),
        };
        if order.len() != self.spec.nc {
            return Err(mismatch());
        }
        let mut seen = vec![false; self.spec.nc];
        for &idx in order {
            if idx >= self.spec.nc || seen[idx] {
                return Err(mismatch());
            }
            seen[idx] = true;
        }
        Ok(())
    }
}
