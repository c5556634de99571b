//! Point-of-interest placement.
//!
//! [`PoiPlacer`] filters terrain triangles per category and rejection-samples
//! a spaced subset; [`PoiManager`] runs every category and turns accepted
//! triangles into [`Placement`]s for a [`StructureSpawner`].

mod category;
mod manager;
mod placer;

pub use category::{Dimensions, PoiCategory};
pub use manager::{Placement, PlacementReport, PoiManager, PoiTargets, StructureSpawner};
pub use placer::{PoiCandidate, PoiPlacer, SamplingStats};
