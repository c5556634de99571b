//! World assembly on top of `skerry-terrain`: the owning generator with
//! ground queries and regeneration, plus point-of-interest placement.

mod generator;
pub mod poi;

pub use generator::{TriangleInfo, WorldGenerator, point_in_triangle};
pub use poi::{
    Dimensions, Placement, PlacementReport, PoiCandidate, PoiCategory, PoiManager, PoiPlacer,
    PoiTargets, SamplingStats, StructureSpawner,
};
