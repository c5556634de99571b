//! Terrain debug visualization: 2D top-down images of generated terrain.
//!
//! Provides [`DebugImage`] and renderers for heightmaps, biome maps, and
//! point markers, used to eyeball a generated world without a renderer.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{height_to_color, overlay_markers, render_biome_debug, render_heightmap_debug};
