//! Configuration system for skerry world generation.
//!
//! World shape parameters persist to disk as RON. Any shape field left unset
//! is randomized when the settings are resolved into a [`WorldConfig`], so a
//! blank config file yields a fresh world on every run. CLI flags override
//! the loaded file via clap.

mod cli;
mod config;
mod error;
mod world;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, PoiSettings, default_config_dir};
pub use error::ConfigError;
pub use world::{
    DEFAULT_BASE_WORLD_HEIGHT, DEFAULT_BASE_WORLD_SCALE, DEFAULT_GRID_RESOLUTION, LandmassVariant,
    MAX_GRID_RESOLUTION, SEED_RANGE, WorldConfig, WorldSettings,
};
