//! Landmass shaping: a mask strategy combined with layered noise.
//!
//! Both strategies share [`HeightLayers::final_height`]; they differ only in
//! how the landmass mask is computed from normalized `[-1, 1]` coordinates.

use skerry_config::{LandmassVariant, WorldConfig};

use crate::gradient::GradientNoise;

/// Exponent of the landmass falloff applied after each detail pass.
pub const MASK_FALLOFF_EXPONENT: f64 = 0.8;

/// Number of detail-then-falloff passes in [`HeightLayers::final_height`].
pub const DETAIL_PASSES: usize = 2;

const EDGE_OCTAVES: u32 = 3;
const BASE_OCTAVES: u32 = 6;
const VALLEY_OCTAVES: u32 = 4;
const DETAIL_OCTAVES: u32 = 5;
const DETAIL_PERSISTENCE: f64 = 0.7;
const DETAIL_WEIGHT: f64 = 0.075 * 5.0;
const BLOB_THRESHOLD: f64 = 0.05;

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to `[0, 1]`.
pub fn smoothstep(x: f64, edge0: f64, edge1: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Noise generators and shape parameters shared by every mask strategy.
#[derive(Clone, Debug)]
pub struct HeightLayers {
    base: GradientNoise,
    detail: GradientNoise,
    base_world_height: f64,
    transition_sharpness: f64,
    breakup_scale: f64,
    breakup_intensity: f64,
}

impl HeightLayers {
    /// Base noise is seeded with the world seed, detail noise with `seed + 1`.
    pub fn new(config: &WorldConfig) -> Self {
        let seed = u64::from(config.seed);
        Self {
            base: GradientNoise::new(seed),
            detail: GradientNoise::new(seed.wrapping_add(1)),
            base_world_height: config.base_world_height,
            transition_sharpness: config.transition_sharpness,
            breakup_scale: config.terrain_breakup_scale,
            breakup_intensity: config.terrain_breakup_intensity,
        }
    }

    /// Turn a raw landmass mask at `(nx, nz)` into a terrain height.
    ///
    /// The detail contribution and the `mask^0.8` falloff are each applied
    /// twice; visual calibration of the output depends on that.
    pub fn final_height(&self, nx: f64, nz: f64, mask: f64) -> f64 {
        let edge = self.detail.fractal_noise(
            nx * self.breakup_scale,
            nz * self.breakup_scale,
            EDGE_OCTAVES,
            0.5,
        ) * self.breakup_intensity;
        let mask = smoothstep(mask + edge, 0.0, self.transition_sharpness);

        if mask <= 0.0 {
            return 0.0;
        }

        let mut height = self.base.fractal_noise(nx, nz, BASE_OCTAVES, 0.5) * self.base_world_height;

        // Valley carving.
        height *= 1.0 - self.detail.fractal_noise(nx * 2.0, nz * 2.0, VALLEY_OCTAVES, 0.5) * 0.5;

        let falloff = libm::pow(mask, MASK_FALLOFF_EXPONENT);
        for _ in 0..DETAIL_PASSES {
            height += self.detail_contribution(nx, nz);
            height *= falloff;
        }

        (height / 100.0) * self.base_world_height
    }

    fn detail_contribution(&self, nx: f64, nz: f64) -> f64 {
        self.detail
            .fractal_noise(nx * 2.0, nz * 2.0, DETAIL_OCTAVES, DETAIL_PERSISTENCE)
            * self.base_world_height
            * DETAIL_WEIGHT
    }
}

/// A landmass mask strategy feeding [`HeightLayers::final_height`].
pub trait HeightShaper {
    /// Raw mask at normalized coordinates `(nx, nz)` in `[-1, 1]`.
    fn landmass_mask(&self, nx: f64, nz: f64) -> f64;

    /// Shared noise layers.
    fn layers(&self) -> &HeightLayers;

    /// Height at grid-normalized `(u, v)` in `[0, 1]`.
    fn height_at(&self, u: f64, v: f64) -> f64 {
        let nx = u * 2.0 - 1.0;
        let nz = v * 2.0 - 1.0;
        let mask = self.landmass_mask(nx, nz);
        self.layers().final_height(nx, nz, mask)
    }
}

/// Single roughly circular landmass: the mask falls off linearly with distance from center.
#[derive(Clone, Debug)]
pub struct IslandShaper {
    layers: HeightLayers,
    landmass_size: f64,
}

impl IslandShaper {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            layers: HeightLayers::new(config),
            landmass_size: config.landmass_size,
        }
    }
}

impl HeightShaper for IslandShaper {
    fn landmass_mask(&self, nx: f64, nz: f64) -> f64 {
        let dist = libm::sqrt(nx * nx + nz * nz);
        1.0 - dist / self.landmass_size
    }

    fn layers(&self) -> &HeightLayers {
        &self.layers
    }
}

/// Scattered blobs: the mask is a thresholded single-octave noise field.
///
/// The blob generator is seeded with `seed + 2` so it stays independent of
/// the base and detail layers.
#[derive(Clone, Debug)]
pub struct TiledShaper {
    layers: HeightLayers,
    blob: GradientNoise,
}

impl TiledShaper {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            layers: HeightLayers::new(config),
            blob: GradientNoise::new(u64::from(config.seed).wrapping_add(2)),
        }
    }
}

impl HeightShaper for TiledShaper {
    fn landmass_mask(&self, nx: f64, nz: f64) -> f64 {
        (self.blob.fractal_noise(nx * 0.5, nz * 0.5, 1, 0.5) - BLOB_THRESHOLD) * 2.0
    }

    fn layers(&self) -> &HeightLayers {
        &self.layers
    }
}

/// The shaper selected by a config's [`LandmassVariant`].
#[derive(Clone, Debug)]
pub enum Shaper {
    Island(IslandShaper),
    Tiled(TiledShaper),
}

impl Shaper {
    pub fn from_config(config: &WorldConfig) -> Self {
        match config.variant {
            LandmassVariant::Island => Shaper::Island(IslandShaper::new(config)),
            LandmassVariant::Tiled => Shaper::Tiled(TiledShaper::new(config)),
        }
    }

    pub fn variant(&self) -> LandmassVariant {
        match self {
            Shaper::Island(_) => LandmassVariant::Island,
            Shaper::Tiled(_) => LandmassVariant::Tiled,
        }
    }
}

impl HeightShaper for Shaper {
    fn landmass_mask(&self, nx: f64, nz: f64) -> f64 {
        match self {
            Shaper::Island(s) => s.landmass_mask(nx, nz),
            Shaper::Tiled(s) => s.landmass_mask(nx, nz),
        }
    }

    fn layers(&self) -> &HeightLayers {
        match self {
            Shaper::Island(s) => s.layers(),
            Shaper::Tiled(s) => s.layers(),
        }
    }
}
