//! Top-down renderers: heightmap, biome map, and marker overlay.
//!
//! Pixel `x` runs along world +x and pixel `y` along world +z.

use glam::DVec2;

use super::image::DebugImage;
use crate::terrain::Terrain;

/// Render vertex heights as a color-coded elevation map.
///
/// Each pixel takes the nearest grid vertex. Heights are normalized against
/// the tallest vertex; zero-height vertices draw as ocean.
pub fn render_heightmap_debug(terrain: &Terrain, width: u32, height: u32) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let res = terrain.resolution();
    let max_height = terrain
        .vertices()
        .iter()
        .map(|v| v.y)
        .fold(0.0_f64, f64::max);

    for py in 0..height {
        for px in 0..width {
            let i = nearest_vertex(px, width, res);
            let j = nearest_vertex(py, height, res);
            let h = terrain.vertex_height(i, j).unwrap_or(0.0);

            let rgb = if h <= 0.0 {
                [20, 50, 140]
            } else {
                height_to_color(h / max_height)
            };
            image.put(px, py, rgb);
        }
    }

    image
}

/// Map a normalized land height in `(0, 1]` to an RGB color.
///
/// Color bands: beach → lowland green → highland brown → snow.
pub fn height_to_color(normalized: f64) -> [u8; 3] {
    let n = normalized.clamp(0.0, 1.0);
    if n < 0.02 {
        return [220, 200, 130];
    }
    if n < 0.55 {
        return ramp([30, 160, 30], [110, 120, 50], (n - 0.02) / 0.53);
    }
    if n < 0.8 {
        return ramp([110, 120, 50], [150, 70, 70], (n - 0.55) / 0.25);
    }
    ramp([200, 200, 200], [255, 255, 255], (n - 0.8) / 0.2)
}

fn ramp(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let mut out = [0; 3];
    for (k, channel) in out.iter_mut().enumerate() {
        let a = f64::from(from[k]);
        let b = f64::from(to[k]);
        *channel = (a + (b - a) * t).round() as u8;
    }
    out
}

/// Render each pixel with the biome color of the triangle beneath it.
pub fn render_biome_debug(terrain: &Terrain, width: u32, height: u32) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let res = terrain.resolution() as usize;
    if res == 0 {
        return image;
    }

    for py in 0..height {
        for px in 0..width {
            let gx = (px as f64 + 0.5) / width as f64 * res as f64;
            let gz = (py as f64 + 0.5) / height as f64 * res as f64;
            let i = (gx as usize).min(res - 1);
            let j = (gz as usize).min(res - 1);

            // Each cell is split along its anti-diagonal: the first face covers fx + fz <= 1.
            let fx = gx - i as f64;
            let fz = gz - j as f64;
            let face = 2 * (j * res + i) + usize::from(fx + fz > 1.0);

            if let Some(tri) = terrain.triangle(face) {
                image.put(px, py, tri.color.0);
            }
        }
    }

    image
}

/// Draw a filled square marker of `radius` pixels at each world-space `(x, z)` point.
pub fn overlay_markers(
    image: &mut DebugImage,
    terrain: &Terrain,
    points: &[DVec2],
    rgb: [u8; 3],
    radius: i64,
) {
    let half = terrain.half_extent();
    if half <= 0.0 {
        return;
    }
    for point in points {
        let cx = ((point.x + half) / (2.0 * half) * image.width as f64) as i64;
        let cy = ((point.y + half) / (2.0 * half) * image.height as f64) as i64;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                image.put_clipped(cx + dx, cy + dy, rgb);
            }
        }
    }
}

fn nearest_vertex(pixel: u32, extent: u32, resolution: u32) -> u32 {
    if extent <= 1 {
        return 0;
    }
    let t = pixel as f64 / (extent - 1) as f64;
    (t * resolution as f64).round() as u32
}
