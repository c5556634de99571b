//! `skerry`: generate a world, place points of interest, and optionally
//! export debug maps and placements.

mod export;

use std::process::ExitCode;

use clap::Parser;
use skerry_config::{CliArgs, Config, ConfigError, default_config_dir};
use skerry_terrain::{Biome, placement_rng};
use skerry_world::{
    Placement, PlacementReport, PoiManager, PoiTargets, StructureSpawner, WorldGenerator,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::export::ExportError;

/// Errors that abort a `skerry` run.
#[derive(Error, Debug)]
enum CliError {
    #[error("world configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to export debug artifacts: {0}")]
    Export(#[from] ExportError),
}

/// Logs each placement in place of a physics-backed spawner.
#[derive(Default)]
struct LoggingSpawner {
    spawned: usize,
}

impl StructureSpawner for LoggingSpawner {
    fn spawn(&mut self, placement: &Placement) {
        self.spawned += 1;
        debug!(
            category = placement.category.name(),
            x = placement.center.x,
            y = placement.center.y,
            z = placement.center.z,
            width = placement.dimensions.width,
            height = placement.dimensions.height,
            depth = placement.dimensions.depth,
            "Spawn structure"
        );
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    skerry_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), CliError> {
    let world = WorldGenerator::new(&config.world)?;
    let world_config = world.config();
    info!(
        seed = world_config.seed,
        variant = ?world_config.variant,
        resolution = world_config.grid_resolution,
        hash = format!("{:016x}", world.terrain_hash()),
        "World generated"
    );
    log_biome_coverage(&world);

    let manager = PoiManager::new(world.terrain(), PoiTargets::from(&config.poi));
    let report = place_pois(&manager, config.poi.placement_seed);

    let mut spawner = LoggingSpawner::default();
    PoiManager::dispatch(&report, &mut spawner);
    debug!(spawned = spawner.spawned, "Placements dispatched");

    if let Some(dir) = &config.debug.export_dir {
        export::export_all(dir, world.terrain(), &report, config.debug.image_size)?;
    }
    Ok(())
}

fn place_pois(manager: &PoiManager<'_>, placement_seed: Option<u64>) -> PlacementReport {
    match placement_seed {
        Some(seed) => manager.generate_all_pois(&mut placement_rng(seed)),
        None => manager.generate_all_pois(&mut rand::rng()),
    }
}

fn log_biome_coverage(world: &WorldGenerator) {
    let triangles = world.terrain().triangles();
    for biome in Biome::ALL {
        let count = triangles.iter().filter(|t| t.biome == biome).count();
        if count > 0 {
            debug!(biome = biome.name(), triangles = count, "Biome coverage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skerry_config::{LandmassVariant, WorldSettings};
    use tempfile::TempDir;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world = WorldSettings {
            seed: Some(42),
            grid_resolution: Some(16),
            base_world_scale: Some(8.0),
            variant: Some(LandmassVariant::Island),
            ..Default::default()
        };
        config.poi.placement_seed = Some(7);
        config
    }

    #[test]
    fn test_placement_seed_reproduces_report() {
        let config = small_config();
        let world = WorldGenerator::new(&config.world).unwrap();
        let manager = PoiManager::new(world.terrain(), PoiTargets::from(&config.poi));
        assert_eq!(place_pois(&manager, Some(7)), place_pois(&manager, Some(7)));
    }

    #[test]
    fn test_logging_spawner_counts() {
        let config = small_config();
        let world = WorldGenerator::new(&config.world).unwrap();
        let manager = PoiManager::new(world.terrain(), PoiTargets::from(&config.poi));
        let report = place_pois(&manager, Some(1));

        let mut spawner = LoggingSpawner::default();
        let sent = PoiManager::dispatch(&report, &mut spawner);
        assert_eq!(spawner.spawned, sent);
    }

    #[test]
    fn test_run_rejects_invalid_world() {
        let mut config = small_config();
        config.world.grid_resolution = Some(0);
        let err = run(&config).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
        assert!(err.to_string().contains("grid_resolution"));
    }

    #[test]
    fn test_run_exports_when_requested() {
        let dir = TempDir::new().unwrap();
        let mut config = small_config();
        config.debug.export_dir = Some(dir.path().to_path_buf());
        config.debug.image_size = 16;
        run(&config).unwrap();
        assert!(dir.path().join("placements.json").exists());
        assert!(dir.path().join("biomes.png").exists());
    }
}
