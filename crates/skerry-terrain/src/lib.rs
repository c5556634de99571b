//! Procedural terrain: seeded gradient noise, landmass shaping, biome
//! classification, and grid mesh assembly.

mod biome;
mod gradient;
mod seed;
mod shaper;
mod terrain;

pub mod debug_viz;

pub use biome::{Biome, BiomeClassifier, BiomeColor, BiomeType, TRIANGLE_REFERENCE_HEIGHT};
pub use gradient::{GradientNoise, HEIGHT_BIAS, LACUNARITY};
pub use seed::{hash_terrain, placement_rng};
pub use shaper::{
    DETAIL_PASSES, HeightLayers, HeightShaper, IslandShaper, MASK_FALLOFF_EXPONENT, Shaper,
    TiledShaper, smoothstep,
};
pub use terrain::{Face, Terrain, Triangle};
