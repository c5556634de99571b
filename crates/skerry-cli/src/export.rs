//! Debug artifact export: PNG maps and placement JSON.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use skerry_terrain::Terrain;
use skerry_terrain::debug_viz::{
    DebugImage, overlay_markers, render_biome_debug, render_heightmap_debug,
};
use skerry_world::{PlacementReport, PoiCategory};
use thiserror::Error;
use tracing::info;

const HEIGHTMAP_FILE: &str = "heightmap.png";
const BIOME_FILE: &str = "biomes.png";
const PLACEMENTS_FILE: &str = "placements.json";
const MARKER_RADIUS: i64 = 2;

/// Errors that can occur while writing debug artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Files written by [`export_all`].
#[derive(Debug)]
pub struct ExportedFiles {
    pub heightmap: PathBuf,
    pub biomes: PathBuf,
    pub placements: PathBuf,
}

fn marker_color(category: PoiCategory) -> [u8; 3] {
    match category {
        PoiCategory::Town => [220, 40, 40],
        PoiCategory::Dungeon => [140, 40, 200],
        PoiCategory::Fishing => [40, 220, 230],
        PoiCategory::Forest => [10, 90, 20],
    }
}

/// Write the heightmap, the biome map with POI markers, and the placement
/// report into `dir`, creating it if needed.
pub fn export_all(
    dir: &Path,
    terrain: &Terrain,
    report: &PlacementReport,
    image_size: u32,
) -> Result<ExportedFiles, ExportError> {
    fs::create_dir_all(dir)?;

    let heightmap = dir.join(HEIGHTMAP_FILE);
    write_png(&heightmap, &render_heightmap_debug(terrain, image_size, image_size))?;

    let mut biome_map = render_biome_debug(terrain, image_size, image_size);
    for category in PoiCategory::ALL {
        overlay_markers(
            &mut biome_map,
            terrain,
            &report.planar_centers(category),
            marker_color(category),
            MARKER_RADIUS,
        );
    }
    let biomes = dir.join(BIOME_FILE);
    write_png(&biomes, &biome_map)?;

    let placements = dir.join(PLACEMENTS_FILE);
    fs::write(&placements, report.to_json()?)?;

    info!(dir = %dir.display(), placements = report.len(), "Exported debug artifacts");
    Ok(ExportedFiles {
        heightmap,
        biomes,
        placements,
    })
}

/// Encode an RGBA debug image as an 8-bit PNG.
pub fn write_png(path: &Path, image: &DebugImage) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.pixels)?;
    writer.finish()?;
    Ok(())
}
