//! Phantom geometry engine.
//!
//! Container placement, cylindrical ROI masks, and the catalog and
//! instance layers built on top of them.

pub mod catalog;
pub mod mask;
pub mod phantom;
pub mod placement;
pub mod preview;
pub mod stats;
pub mod store;
