//! Command-line argument parsing for the skerry generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::world::LandmassVariant;

/// skerry command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "skerry", about = "Procedural island terrain and POI placement")]
pub struct CliArgs {
    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Grid cells per side.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Vertical scale of the height field.
    #[arg(long)]
    pub height: Option<f64>,

    /// World units per grid cell.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Island radius in normalized grid units.
    #[arg(long)]
    pub landmass_size: Option<f64>,

    /// Width of the coastline smoothstep.
    #[arg(long)]
    pub transition_sharpness: Option<f64>,

    /// Frequency of the coastline breakup noise.
    #[arg(long)]
    pub breakup_scale: Option<f64>,

    /// Strength of the coastline breakup noise.
    #[arg(long)]
    pub breakup_intensity: Option<f64>,

    /// Landmass mask strategy.
    #[arg(long, value_enum)]
    pub variant: Option<LandmassVariant>,

    /// Forests to place (zero disables the category).
    #[arg(long)]
    pub forest_count: Option<usize>,

    /// Seed for POI candidate sampling.
    #[arg(long)]
    pub placement_seed: Option<u64>,

    /// Directory to write debug images and placement JSON into.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(res) = args.resolution {
            self.world.grid_resolution = Some(res);
        }
        if let Some(h) = args.height {
            self.world.base_world_height = Some(h);
        }
        if let Some(s) = args.scale {
            self.world.base_world_scale = Some(s);
        }
        if let Some(size) = args.landmass_size {
            self.world.landmass_size = Some(size);
        }
        if let Some(sharpness) = args.transition_sharpness {
            self.world.transition_sharpness = Some(sharpness);
        }
        if let Some(scale) = args.breakup_scale {
            self.world.terrain_breakup_scale = Some(scale);
        }
        if let Some(intensity) = args.breakup_intensity {
            self.world.terrain_breakup_intensity = Some(intensity);
        }
        if let Some(variant) = args.variant {
            self.world.variant = Some(variant);
        }
        if let Some(count) = args.forest_count {
            self.poi.forest_count = count;
        }
        if let Some(seed) = args.placement_seed {
            self.poi.placement_seed = Some(seed);
        }
        if let Some(ref dir) = args.export_dir {
            self.debug.export_dir = Some(dir.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
