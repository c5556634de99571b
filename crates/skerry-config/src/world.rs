//! World shape parameters: optional user settings and their resolved form.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Range that unset seeds are drawn from.
pub const SEED_RANGE: Range<u32> = 0..10_000;
/// Grid cells per side when unset.
pub const DEFAULT_GRID_RESOLUTION: u32 = 128;
/// Largest accepted grid resolution. Keeps mesh vertex indices well inside `u32`.
pub const MAX_GRID_RESOLUTION: u32 = 4096;
/// Height scale when unset.
pub const DEFAULT_BASE_WORLD_HEIGHT: f64 = 400.0;
/// World units per grid cell when unset.
pub const DEFAULT_BASE_WORLD_SCALE: f64 = 128.0;

const LANDMASS_SIZE_RANGE: Range<f64> = 0.8..0.9;
const TRANSITION_SHARPNESS_RANGE: Range<f64> = 0.7..1.1;
const BREAKUP_SCALE_RANGE: Range<f64> = 1.0..5.0;
const BREAKUP_INTENSITY_RANGE: Range<f64> = 0.2..0.8;

/// Landmass mask strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LandmassVariant {
    /// One roughly circular landmass centered on the grid.
    Island,
    /// Scattered blobs driven by an independent noise field.
    Tiled,
}

/// User-facing world settings. `None` fields are randomized on [`WorldSettings::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    /// Noise seed.
    pub seed: Option<u32>,
    /// Grid cells per side.
    pub grid_resolution: Option<u32>,
    /// Vertical scale applied to the shaped height field.
    pub base_world_height: Option<f64>,
    /// World units per grid cell.
    pub base_world_scale: Option<f64>,
    /// Island radius in normalized grid units.
    pub landmass_size: Option<f64>,
    /// Width of the coastline smoothstep.
    pub transition_sharpness: Option<f64>,
    /// Frequency of the coastline breakup noise.
    pub terrain_breakup_scale: Option<f64>,
    /// Strength of the coastline breakup noise.
    pub terrain_breakup_intensity: Option<f64>,
    /// Landmass mask strategy.
    pub variant: Option<LandmassVariant>,
}

/// Fully resolved world parameters driving one terrain build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    pub seed: u32,
    pub grid_resolution: u32,
    pub base_world_height: f64,
    pub base_world_scale: f64,
    pub landmass_size: f64,
    pub transition_sharpness: f64,
    pub terrain_breakup_scale: f64,
    pub terrain_breakup_intensity: f64,
    pub variant: LandmassVariant,
}

impl WorldSettings {
    /// Fill every unset field from `rng` and validate the result.
    ///
    /// Only absent fields consume randomness, in declaration order, so two
    /// resolutions with equally seeded RNGs agree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an explicit value is unusable.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> Result<WorldConfig, ConfigError> {
        let config = WorldConfig {
            seed: self.seed.unwrap_or_else(|| rng.random_range(SEED_RANGE)),
            grid_resolution: self.grid_resolution.unwrap_or(DEFAULT_GRID_RESOLUTION),
            base_world_height: self.base_world_height.unwrap_or(DEFAULT_BASE_WORLD_HEIGHT),
            base_world_scale: self.base_world_scale.unwrap_or(DEFAULT_BASE_WORLD_SCALE),
            landmass_size: self
                .landmass_size
                .unwrap_or_else(|| rng.random_range(LANDMASS_SIZE_RANGE)),
            transition_sharpness: self
                .transition_sharpness
                .unwrap_or_else(|| rng.random_range(TRANSITION_SHARPNESS_RANGE)),
            terrain_breakup_scale: self
                .terrain_breakup_scale
                .unwrap_or_else(|| rng.random_range(BREAKUP_SCALE_RANGE)),
            terrain_breakup_intensity: self
                .terrain_breakup_intensity
                .unwrap_or_else(|| rng.random_range(BREAKUP_INTENSITY_RANGE)),
            variant: self.variant.unwrap_or_else(|| {
                if rng.random_bool(0.5) {
                    LandmassVariant::Island
                } else {
                    LandmassVariant::Tiled
                }
            }),
        };
        config.validate()?;
        Ok(config)
    }
}

impl WorldConfig {
    /// Check the invariants terrain generation relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_resolution == 0 {
            return Err(invalid("grid_resolution", "must be greater than zero"));
        }
        if self.grid_resolution > MAX_GRID_RESOLUTION {
            return Err(invalid(
                "grid_resolution",
                format!(
                    "must be at most {MAX_GRID_RESOLUTION}, got {}",
                    self.grid_resolution
                ),
            ));
        }
        require_positive("base_world_height", self.base_world_height)?;
        require_positive("base_world_scale", self.base_world_scale)?;
        require_positive("landmass_size", self.landmass_size)?;
        require_positive("transition_sharpness", self.transition_sharpness)?;
        if !self.terrain_breakup_scale.is_finite() {
            return Err(invalid("terrain_breakup_scale", "must be finite"));
        }
        if !self.terrain_breakup_intensity.is_finite() {
            return Err(invalid("terrain_breakup_intensity", "must be finite"));
        }
        Ok(())
    }

    /// Copy of this config with a different seed.
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive finite number, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
