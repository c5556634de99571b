//! Rejection sampling of spaced placement sites over terrain triangles.

use glam::DVec2;
use rand::Rng;
use skerry_terrain::Terrain;
use tracing::trace;

/// A triangle picked as a placement site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoiCandidate {
    pub triangle_index: usize,
    /// Mean of the triangle's vertex `(x, z)`.
    pub center: DVec2,
}

/// Counters from one sampling run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplingStats {
    /// Triangles that passed the criteria.
    pub pool_size: usize,
    /// Candidates drawn from the pool.
    pub iterations: usize,
    /// Candidates dropped for being too close to an accepted site.
    pub rejected: usize,
}

/// Samples placement sites from a terrain's triangles.
pub struct PoiPlacer<'a> {
    terrain: &'a Terrain,
}

impl<'a> PoiPlacer<'a> {
    pub fn new(terrain: &'a Terrain) -> Self {
        Self { terrain }
    }

    /// Indices of triangles whose `(|normal.y|, average height)` pass `criteria`,
    /// in mesh order.
    pub fn candidate_pool(&self, criteria: impl Fn(f64, f64) -> bool) -> Vec<usize> {
        self.terrain
            .triangles()
            .iter()
            .enumerate()
            .filter(|(_, tri)| criteria(tri.normal.y.abs(), tri.avg_height()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick up to `count` triangles passing `criteria` whose centers are at
    /// least `min_distance_sq` (squared) apart.
    ///
    /// Fewer than `count` sites is a normal outcome on small or hostile terrain.
    pub fn find_locations<R: Rng>(
        &self,
        count: usize,
        criteria: impl Fn(f64, f64) -> bool,
        min_distance_sq: f64,
        rng: &mut R,
    ) -> Vec<PoiCandidate> {
        self.find_locations_with_stats(count, criteria, min_distance_sq, rng)
            .0
    }

    /// [`PoiPlacer::find_locations`] plus its sampling counters.
    ///
    /// Every drawn candidate leaves the pool whether or not it is accepted,
    /// so the loop runs at most `pool_size` times.
    pub fn find_locations_with_stats<R: Rng>(
        &self,
        count: usize,
        criteria: impl Fn(f64, f64) -> bool,
        min_distance_sq: f64,
        rng: &mut R,
    ) -> (Vec<PoiCandidate>, SamplingStats) {
        let mut pool = self.candidate_pool(criteria);
        let mut stats = SamplingStats {
            pool_size: pool.len(),
            ..Default::default()
        };
        let mut selected: Vec<PoiCandidate> = Vec::with_capacity(count.min(pool.len()));

        while selected.len() < count && !pool.is_empty() {
            stats.iterations += 1;
            let pick = rng.random_range(0..pool.len());
            // The pool stays in mesh order so a seeded RNG reproduces the same picks.
            let triangle_index = pool.remove(pick);
            let Some(triangle) = self.terrain.triangle(triangle_index) else {
                continue;
            };
            let center = triangle.planar_center();

            let too_close = selected
                .iter()
                .any(|s| s.center.distance_squared(center) < min_distance_sq);
            if too_close {
                stats.rejected += 1;
                continue;
            }

            selected.push(PoiCandidate {
                triangle_index,
                center,
            });
        }

        trace!(
            pool = stats.pool_size,
            iterations = stats.iterations,
            accepted = selected.len(),
            "Sampled placement sites"
        );
        (selected, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use skerry_terrain::BiomeClassifier;

    fn flat(resolution: u32, scale: f64, h: f64) -> Terrain {
        Terrain::from_height_fn(resolution, scale, 400.0, &BiomeClassifier::standard(), |_, _| h)
    }

    fn any(_: f64, _: f64) -> bool {
        true
    }

    #[test]
    fn test_pool_filters_by_criteria() {
        let terrain = Terrain::from_height_fn(
            4,
            1.0,
            400.0,
            &BiomeClassifier::standard(),
            |u, _| if u < 0.5 { 0.0 } else { 100.0 },
        );
        let placer = PoiPlacer::new(&terrain);
        let low = placer.candidate_pool(|_, h| h <= 0.0);
        assert!(!low.is_empty());
        for i in low {
            assert_eq!(terrain.triangles()[i].avg_height(), 0.0);
        }
        assert!(placer.candidate_pool(|ny, _| ny > 1.5).is_empty());
    }

    #[test]
    fn test_zero_spacing_takes_exactly_count() {
        let terrain = flat(4, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let found = PoiPlacer::new(&terrain).find_locations(10, any, 0.0, &mut rng);
        assert_eq!(found.len(), 10);
        let mut indices: Vec<usize> = found.iter().map(|c| c.triangle_index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 10, "a triangle is never picked twice");
    }

    #[test]
    fn test_count_zero_draws_nothing() {
        let terrain = flat(4, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (found, stats) =
            PoiPlacer::new(&terrain).find_locations_with_stats(0, any, 1.0, &mut rng);
        assert!(found.is_empty());
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.pool_size, 32);
    }

    #[test]
    fn test_huge_spacing_yields_single_site() {
        let terrain = flat(4, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (found, stats) =
            PoiPlacer::new(&terrain).find_locations_with_stats(10, any, 1e12, &mut rng);
        assert_eq!(found.len(), 1);
        assert_eq!(stats.iterations, stats.pool_size, "pool must drain");
        assert_eq!(stats.rejected, stats.pool_size - 1);
    }

    #[test]
    fn test_center_matches_triangle() {
        let terrain = flat(3, 2.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for candidate in PoiPlacer::new(&terrain).find_locations(5, any, 0.0, &mut rng) {
            let expected = terrain.triangles()[candidate.triangle_index].planar_center();
            assert_eq!(candidate.center, expected);
        }
    }

    #[test]
    fn test_same_rng_same_sites() {
        let terrain = flat(8, 4.0, 0.0);
        let placer = PoiPlacer::new(&terrain);
        let a = placer.find_locations(20, any, 64.0, &mut ChaCha8Rng::seed_from_u64(2));
        let b = placer.find_locations(20, any, 64.0, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(a, b);
    }
}
