//! Top-down RGBA raster used by the debug renderers.

use hashbrown::HashSet;

/// Opaque alpha for every pixel the renderers write.
const OPAQUE: u8 = 255;

/// Row-major RGBA raster; starts fully transparent black.
#[derive(Clone, Debug)]
pub struct DebugImage {
    pub width: u32,
    pub height: u32,
    /// `width * height` pixels of four bytes each.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Write an opaque color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    pub fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        let offset = self.offset(x, y);
        self.pixels[offset..offset + 4].copy_from_slice(&[r, g, b, OPAQUE]);
    }

    /// Like [`DebugImage::put`], but coordinates outside the image are ignored.
    pub fn put_clipped(&mut self, x: i64, y: i64, rgb: [u8; 3]) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y))
            && x < self.width
            && y < self.height
        {
            self.put(x, y, rgb);
        }
    }

    /// RGBA at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = self.offset(x, y);
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[offset..offset + 4]);
        out
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of distinct RGB values, alpha ignored.
    pub fn distinct_colors(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2]])
            .collect::<HashSet<_>>()
            .len()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }
}
