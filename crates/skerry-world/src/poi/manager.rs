//! Orchestrates placement for every category and hands results to the
//! structure-spawning collaborator.

use glam::{DVec2, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use skerry_config::PoiSettings;
use skerry_terrain::Terrain;
use tracing::{debug, info, info_span};

use super::category::{Dimensions, PoiCategory};
use super::placer::PoiPlacer;

/// One accepted site, ready to be instantiated as a world structure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub category: PoiCategory,
    pub triangle_index: usize,
    /// Triangle planar center with the triangle's average height as `y`.
    pub center: DVec3,
    pub dimensions: Dimensions,
}

/// Receives placements and creates the corresponding world objects.
pub trait StructureSpawner {
    fn spawn(&mut self, placement: &Placement);
}

impl<F: FnMut(&Placement)> StructureSpawner for F {
    fn spawn(&mut self, placement: &Placement) {
        self(placement)
    }
}

/// Requested site count per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoiTargets {
    pub town: usize,
    pub dungeon: usize,
    pub fishing: usize,
    pub forest: usize,
}

impl PoiTargets {
    pub fn get(&self, category: PoiCategory) -> usize {
        match category {
            PoiCategory::Town => self.town,
            PoiCategory::Dungeon => self.dungeon,
            PoiCategory::Fishing => self.fishing,
            PoiCategory::Forest => self.forest,
        }
    }
}

impl Default for PoiTargets {
    fn default() -> Self {
        Self {
            town: PoiCategory::Town.default_target(),
            dungeon: PoiCategory::Dungeon.default_target(),
            fishing: PoiCategory::Fishing.default_target(),
            forest: PoiCategory::Forest.default_target(),
        }
    }
}

impl From<&PoiSettings> for PoiTargets {
    fn from(settings: &PoiSettings) -> Self {
        Self {
            town: settings.town_count,
            dungeon: settings.dungeon_count,
            fishing: settings.fishing_count,
            forest: settings.forest_count,
        }
    }
}

/// Every placement from one run, in category order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub placements: Vec<Placement>,
}

impl PlacementReport {
    pub fn by_category(&self, category: PoiCategory) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.category == category)
    }

    pub fn count(&self, category: PoiCategory) -> usize {
        self.by_category(category).count()
    }

    /// Planar `(x, z)` centers of one category, e.g. for map overlays.
    pub fn planar_centers(&self, category: PoiCategory) -> Vec<DVec2> {
        self.by_category(category)
            .map(|p| DVec2::new(p.center.x, p.center.z))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the report itself always serializes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Places every POI category on one terrain.
pub struct PoiManager<'a> {
    terrain: &'a Terrain,
    targets: PoiTargets,
}

impl<'a> PoiManager<'a> {
    pub fn new(terrain: &'a Terrain, targets: PoiTargets) -> Self {
        Self { terrain, targets }
    }

    pub fn targets(&self) -> &PoiTargets {
        &self.targets
    }

    /// Sample one category's sites and give each a random footprint.
    ///
    /// Returns an empty list when no triangle qualifies.
    pub fn generate_category<R: Rng>(
        &self,
        category: PoiCategory,
        rng: &mut R,
    ) -> Vec<Placement> {
        let target = self.targets.get(category);
        if target == 0 {
            return Vec::new();
        }

        let (candidates, stats) = PoiPlacer::new(self.terrain).find_locations_with_stats(
            target,
            |normal_y, avg_height| category.accepts(normal_y, avg_height),
            category.min_distance_sq(),
            rng,
        );
        debug!(
            category = category.name(),
            target,
            pool = stats.pool_size,
            rejected = stats.rejected,
            accepted = candidates.len(),
            "Category sampled"
        );

        candidates
            .into_iter()
            .filter_map(|candidate| {
                let triangle = self.terrain.triangle(candidate.triangle_index)?;
                Some(Placement {
                    category,
                    triangle_index: candidate.triangle_index,
                    center: DVec3::new(
                        candidate.center.x,
                        triangle.avg_height(),
                        candidate.center.y,
                    ),
                    dimensions: category.random_dimensions(rng),
                })
            })
            .collect()
    }

    /// Run every category in [`PoiCategory::ALL`] order.
    pub fn generate_all_pois<R: Rng>(&self, rng: &mut R) -> PlacementReport {
        let _span = info_span!("place_pois").entered();
        let mut placements = Vec::new();
        for category in PoiCategory::ALL {
            placements.extend(self.generate_category(category, rng));
        }

        let report = PlacementReport { placements };
        info!(
            towns = report.count(PoiCategory::Town),
            dungeons = report.count(PoiCategory::Dungeon),
            fishing = report.count(PoiCategory::Fishing),
            forests = report.count(PoiCategory::Forest),
            "POI placement complete"
        );
        report
    }

    /// Hand every placement in `report` to `spawner`, returning how many were sent.
    pub fn dispatch(report: &PlacementReport, spawner: &mut impl StructureSpawner) -> usize {
        for placement in &report.placements {
            spawner.spawn(placement);
        }
        report.len()
    }
}
