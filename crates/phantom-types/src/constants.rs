// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Display order of the MP-Mk4 19-container hexagonal layout.
/// Entry `i` is the computed-order index shown as container `i`.
/// Empirical labeling of the physical phantom; do not re-derive.
pub const MK4_PLACEMENT_ORDER: [usize; 19] =
    [10, 4, 12, 3, 15, 17, 5, 8, 13, 0, 7, 14, 2, 11, 9, 6, 18, 1, 16];

/// Display order of the MP-Mk5 19-container hexagonal layout.
pub const MK5_PLACEMENT_ORDER: [usize; 19] =
    [14, 6, 16, 5, 7, 9, 1, 12, 17, 0, 11, 18, 4, 15, 13, 2, 10, 3, 8];

/// Default ROI radius as a fraction of the container radius.
pub const DEFAULT_ROI_RD_SCL: f64 = 0.25;

/// Default ROI axial length as a fraction of the container half-height.
pub const DEFAULT_ROI_HT_SCL: f64 = 0.5;

/// Containers in the first hexagonal ring.
pub const HEX_RING1_COUNT: usize = 6;

/// Computed-order index of the first second-ring container.
pub const HEX_RING2_START: usize = 1 + HEX_RING1_COUNT;
