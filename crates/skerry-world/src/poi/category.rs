//! Per-category acceptance rules, spacing, and footprint ranges.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kind of structure a placement site is chosen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    Town,
    Dungeon,
    Fishing,
    Forest,
}

/// Footprint of a placed structure in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

struct DimensionRanges {
    width: Range<f64>,
    height: Range<f64>,
    depth: Range<f64>,
}

impl PoiCategory {
    /// Placement order used by the manager.
    pub const ALL: [PoiCategory; 4] = [
        PoiCategory::Town,
        PoiCategory::Dungeon,
        PoiCategory::Fishing,
        PoiCategory::Forest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PoiCategory::Town => "town",
            PoiCategory::Dungeon => "dungeon",
            PoiCategory::Fishing => "fishing",
            PoiCategory::Forest => "forest",
        }
    }

    /// Whether a triangle with this upward normal component and average
    /// height can host the category.
    pub fn accepts(self, normal_y: f64, avg_height: f64) -> bool {
        match self {
            PoiCategory::Town => normal_y > 0.8 && avg_height > 50.0 && avg_height < 300.0,
            PoiCategory::Dungeon => normal_y > 0.5 && (avg_height < 40.0 || avg_height > 350.0),
            PoiCategory::Fishing => normal_y > 0.7 && (-2.0..=2.0).contains(&avg_height),
            PoiCategory::Forest => normal_y > 0.7 && avg_height > 20.0 && avg_height < 200.0,
        }
    }

    /// Minimum squared planar distance between two sites of this category.
    pub fn min_distance_sq(self) -> f64 {
        match self {
            PoiCategory::Town => 400.0,
            PoiCategory::Dungeon => 625.0,
            PoiCategory::Fishing => 100.0,
            PoiCategory::Forest => 225.0,
        }
    }

    /// Sites requested when the config does not say otherwise.
    pub fn default_target(self) -> usize {
        match self {
            PoiCategory::Town => 30,
            PoiCategory::Dungeon => 15,
            PoiCategory::Fishing => 50,
            PoiCategory::Forest => 0,
        }
    }

    fn dimension_ranges(self) -> DimensionRanges {
        match self {
            PoiCategory::Town => DimensionRanges {
                width: 12.0..24.0,
                height: 6.0..14.0,
                depth: 12.0..24.0,
            },
            PoiCategory::Dungeon => DimensionRanges {
                width: 8.0..16.0,
                height: 8.0..20.0,
                depth: 8.0..16.0,
            },
            PoiCategory::Fishing => DimensionRanges {
                width: 3.0..6.0,
                height: 1.0..2.5,
                depth: 3.0..6.0,
            },
            PoiCategory::Forest => DimensionRanges {
                width: 10.0..20.0,
                height: 12.0..30.0,
                depth: 10.0..20.0,
            },
        }
    }

    /// Draw a plausible footprint for one instance.
    pub fn random_dimensions<R: Rng>(self, rng: &mut R) -> Dimensions {
        let ranges = self.dimension_ranges();
        Dimensions {
            width: rng.random_range(ranges.width),
            height: rng.random_range(ranges.height),
            depth: rng.random_range(ranges.depth),
        }
    }
}
