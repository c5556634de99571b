//! Top-level configuration with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::world::WorldSettings;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain shape parameters.
    pub world: WorldSettings,
    /// Point-of-interest placement settings.
    pub poi: PoiSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Point-of-interest placement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoiSettings {
    /// Towns to place per world.
    pub town_count: usize,
    /// Dungeons to place per world.
    pub dungeon_count: usize,
    /// Fishing spots to place per world.
    pub fishing_count: usize,
    /// Forests to place per world. Zero leaves forests out.
    pub forest_count: usize,
    /// Seed for candidate sampling. `None` draws from the thread RNG, so
    /// placements differ between runs even on the same terrain.
    pub placement_seed: Option<u64>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for heightmap/biome images and placement dumps. `None` disables export.
    pub export_dir: Option<PathBuf>,
    /// Pixels per side of exported debug images.
    pub image_size: u32,
}

impl Default for PoiSettings {
    fn default() -> Self {
        Self {
            town_count: 30,
            dungeon_count: 15,
            fishing_count: 50,
            forest_count: 0,
            placement_seed: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            export_dir: None,
            image_size: 512,
        }
    }
}

/// Platform config directory for skerry, e.g. `~/.config/skerry` on Linux.
///
/// Falls back to the working directory when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("skerry"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::LandmassVariant;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("town_count: 30"));
        assert!(ron_str.contains("fishing_count: 50"));
    }

    #[test]
    fn test_config_roundtrip_with_world_overrides() {
        let mut config = Config::default();
        config.world.seed = Some(42);
        config.world.variant = Some(LandmassVariant::Tiled);
        config.poi.placement_seed = Some(7);

        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(world: (seed: Some(5)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, Some(5));
        assert_eq!(config.world.grid_resolution, None);
        assert_eq!(config.poi, PoiSettings::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(erosion_passes: 3)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.grid_resolution = Some(64);
        config.world.landmass_size = Some(0.85);
        config.poi.town_count = 12;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_or_create_picks_up_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        Config::load_or_create(dir.path()).unwrap();

        let path = dir.path().join(CONFIG_FILE);
        let edited = std::fs::read_to_string(&path)
            .unwrap()
            .replace("town_count: 30", "town_count: 4");
        std::fs::write(&path, edited).unwrap();

        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config.poi.town_count, 4);
        assert_eq!(config.poi.dungeon_count, 15);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
