//! Indexed (paletted) images.

use std::collections::HashMap;

use image::{Rgb, RgbImage};

use crate::error::ToolError;
use crate::palette::Palette;

/// A grid of palette indices paired with the palette they refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    palette: Palette,
}

impl IndexedImage {
    /// Create a blank (all index 0) image.
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self { width, height, indices: vec![0; width as usize * height as usize], palette }
    }

    /// Wrap an existing row-major index buffer.
    pub fn from_parts(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, ToolError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(ToolError::Format(format!(
                "pixel buffer holds {} indices, {}x{} needs {}",
                indices.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, indices, palette })
    }

    /// Synthetic gradient used to preview a palette.
    ///
    /// Every 8x8 block shares one index; the 256 indices tile a 128x128 area
    /// as a 16x16 grid. Indices wrap past 255 for larger images.
    pub fn gradient(palette: &Palette, width: u32, height: u32) -> Self {
        let mut img = Self::new(width, height, palette.fill_to_full());
        for y in 0..height {
            for x in 0..width {
                img.set_index(x, y, gradient_index(x, y));
            }
        }
        img
    }

    /// Re-index an RGB image onto `palette` by exact color match.
    ///
    /// The first palette slot holding a color wins. Colors that appear nowhere
    /// in the palette are an error; no nearest-color search is attempted.
    pub fn remap_exact(source: &RgbImage, palette: &Palette) -> Result<Self, ToolError> {
        let full = palette.fill_to_full();
        let mut lookup: HashMap<Rgb<u8>, u8> = HashMap::new();
        for (i, &color) in full.colors().iter().enumerate() {
            lookup.entry(color).or_insert(i as u8);
        }

        let (width, height) = source.dimensions();
        let mut img = Self::new(width, height, full);
        for (x, y, pixel) in source.enumerate_pixels() {
            let index = lookup.get(pixel).copied().ok_or_else(|| {
                let [r, g, b] = pixel.0;
                ToolError::Format(format!(
                    "color #{:02x}{:02x}{:02x} at ({}, {}) is not in the palette",
                    r, g, b, x, y
                ))
            })?;
            img.set_index(x, y, index);
        }
        Ok(img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major index buffer.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Palette as stored, including any black padding.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette with the trailing black padding removed.
    pub fn trimmed_palette(&self) -> Palette {
        self.palette.trim()
    }

    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[self.offset(x, y)]
    }

    pub fn set_index(&mut self, x: u32, y: u32, index: u8) {
        let offset = self.offset(x, y);
        self.indices[offset] = index;
    }

    /// One row of indices.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.offset(0, y);
        &self.indices[start..start + self.width as usize]
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y as usize * self.width as usize + x as usize
    }
}

/// Index of the preview gradient at `(x, y)`.
pub fn gradient_index(x: u32, y: u32) -> u8 {
    (((x * 2) >> 4) + ((y * 2) & 0xf0)) as u8
}
