//! The world generator: owns the resolved config, the current terrain, and
//! the randomness source used for defaults and reseeding.

use glam::{DVec2, DVec3};
use rand::Rng;
use rand::rngs::ThreadRng;
use skerry_config::{ConfigError, SEED_RANGE, WorldConfig, WorldSettings};
use skerry_terrain::{Biome, BiomeClassifier, BiomeColor, Face, Terrain, hash_terrain};
use tracing::{debug, info, info_span};

/// Copy of one terrain triangle returned by [`WorldGenerator::triangle_at`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleInfo {
    pub face_index: usize,
    pub face: Face,
    pub vertices: [DVec3; 3],
    pub normal: DVec3,
    pub min_y: f64,
    pub max_y: f64,
    pub avg_y: f64,
    /// Classified against the fixed triangle reference height.
    pub biome: Biome,
    pub color: BiomeColor,
}

/// Generates and owns a single terrain.
///
/// `R` supplies every random draw the generator makes: unset config fields
/// at construction and fresh seeds on [`WorldGenerator::regenerate`]. Height
/// synthesis itself depends only on the resolved config.
pub struct WorldGenerator<R: Rng = ThreadRng> {
    config: WorldConfig,
    classifier: BiomeClassifier,
    terrain: Terrain,
    rng: R,
}

impl WorldGenerator<ThreadRng> {
    /// Resolve `settings` with the thread RNG and build the terrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an explicit setting is unusable.
    pub fn new(settings: &WorldSettings) -> Result<Self, ConfigError> {
        Self::with_rng(settings, rand::rng())
    }
}

impl<R: Rng> WorldGenerator<R> {
    /// Resolve `settings` with `rng` and build the terrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an explicit setting is unusable.
    pub fn with_rng(settings: &WorldSettings, mut rng: R) -> Result<Self, ConfigError> {
        let config = settings.resolve(&mut rng)?;
        Self::from_config(config, rng)
    }

    /// Build the terrain for an already resolved config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn from_config(config: WorldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = BiomeClassifier::standard();
        let terrain = build_terrain(&config, &classifier);
        Ok(Self {
            config,
            classifier,
            terrain,
            rng,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// The generator's RNG, for callers that want to continue its stream
    /// (e.g. POI placement).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Digest of the current terrain; equal configs give equal digests.
    pub fn terrain_hash(&self) -> u64 {
        hash_terrain(&self.terrain)
    }

    /// Find the triangle under world position `(x, z)`.
    ///
    /// Returns `None` if the point is outside the grid or no face contains
    /// it. Points on an edge or vertex count as inside, so the first face in
    /// mesh order wins on shared edges.
    pub fn triangle_at(&self, x: f64, z: f64) -> Option<TriangleInfo> {
        let res = f64::from(self.config.grid_resolution);
        let grid_x = libm::floor(x / self.config.base_world_scale + res / 2.0);
        let grid_z = libm::floor(z / self.config.base_world_scale + res / 2.0);
        // NaN fails `contains`, so non-finite queries miss.
        let cells = 0.0..res;
        if !cells.contains(&grid_x) || !cells.contains(&grid_z) {
            return None;
        }

        let point = DVec2::new(x, z);
        let (face_index, (face, triangle)) = self
            .terrain
            .faces()
            .iter()
            .zip(self.terrain.triangles())
            .enumerate()
            .find(|(_, (_, tri))| point_in_triangle(point, tri.vertices))?;

        let avg_y = triangle.avg_height();
        let biome = self.classifier.classify_triangle_height(avg_y);
        Some(TriangleInfo {
            face_index,
            face: *face,
            vertices: triangle.vertices,
            normal: triangle.normal,
            min_y: triangle.min_height(),
            max_y: triangle.max_height(),
            avg_y,
            biome: biome.biome,
            color: biome.color,
        })
    }

    /// Replace the terrain with one built from a freshly drawn seed.
    ///
    /// Every other config field is kept. The new seed always differs from
    /// the current one.
    pub fn regenerate(&mut self) -> &Terrain {
        let old_seed = self.config.seed;
        let mut new_seed = self.rng.random_range(SEED_RANGE);
        while new_seed == old_seed {
            new_seed = self.rng.random_range(SEED_RANGE);
        }

        self.config = self.config.with_seed(new_seed);
        self.terrain = build_terrain(&self.config, &self.classifier);
        info!(old_seed, new_seed, "World regenerated");
        &self.terrain
    }
}

fn build_terrain(config: &WorldConfig, classifier: &BiomeClassifier) -> Terrain {
    let _span = info_span!("generate_world", seed = config.seed).entered();
    let terrain = Terrain::generate(config, classifier);
    debug!(
        triangles = terrain.triangles().len(),
        "World terrain ready"
    );
    terrain
}

/// Three-edge-sign containment test in the xz plane.
///
/// A point is inside unless the edge signs mix strictly positive and
/// strictly negative values, so edges and vertices are inside for either
/// winding.
pub fn point_in_triangle(point: DVec2, [a, b, c]: [DVec3; 3]) -> bool {
    let a = DVec2::new(a.x, a.z);
    let b = DVec2::new(b.x, b.z);
    let c = DVec2::new(c.x, c.z);

    let d1 = edge_sign(point, a, b);
    let d2 = edge_sign(point, b, c);
    let d3 = edge_sign(point, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn edge_sign(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}
