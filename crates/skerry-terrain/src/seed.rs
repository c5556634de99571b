//! Deterministic seeding and verification utilities.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::terrain::Terrain;

/// Seeded RNG for point-of-interest sampling.
///
/// Using this instead of the thread RNG makes placement reproducible on
/// top of the already seed-determined height field.
pub fn placement_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Hash every vertex bit pattern and face of a terrain into a u64 digest.
///
/// Two builds from the same config must produce the same digest.
pub fn hash_terrain(terrain: &Terrain) -> u64 {
    let mut hasher = DefaultHasher::new();
    terrain.resolution().hash(&mut hasher);
    terrain.scale().to_bits().hash(&mut hasher);
    for v in terrain.vertices() {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
        v.z.to_bits().hash(&mut hasher);
    }
    terrain.faces().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeClassifier;
    use rand::RngCore;

    #[test]
    fn test_placement_rng_deterministic() {
        let mut a = placement_rng(42);
        let mut b = placement_rng(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_placement_rng_differs_by_seed() {
        assert_ne!(placement_rng(1).next_u64(), placement_rng(2).next_u64());
    }

    #[test]
    fn test_hash_detects_height_change() {
        let classifier = BiomeClassifier::standard();
        let a = Terrain::from_height_fn(4, 1.0, 400.0, &classifier, |u, v| u + v);
        let b = Terrain::from_height_fn(4, 1.0, 400.0, &classifier, |u, v| u + v);
        let c = Terrain::from_height_fn(4, 1.0, 400.0, &classifier, |u, v| u + v + 1e-9);
        assert_eq!(hash_terrain(&a), hash_terrain(&b));
        assert_ne!(hash_terrain(&a), hash_terrain(&c));
    }
}
