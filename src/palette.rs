//! Fixed-size indexed color tables.
//!
//! Every image this tool writes carries a full 256-entry palette. Palettes read
//! from files are often shorter, so they are padded with opaque black via
//! [`Palette::fill_to_full`], and the padding is removed again with
//! [`Palette::trim`] before a palette is printed.
//!
//! The two operations are not exact inverses: a palette that genuinely ends in
//! black loses those entries after `fill_to_full` followed by `trim`.

use image::Rgb;

/// Number of slots in a full palette.
pub const PALETTE_SIZE: usize = 256;

/// Padding color for unused palette slots.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// PICO-8 16-color palette.
/// Reference: https://lospec.com/palette-list/pico-8
pub const PICO8_COLORS: [Rgb<u8>; 16] = [
    Rgb([0, 0, 0]),
    Rgb([29, 43, 83]),
    Rgb([126, 37, 83]),
    Rgb([0, 135, 81]),
    Rgb([171, 82, 54]),
    Rgb([95, 87, 79]),
    Rgb([194, 195, 199]),
    Rgb([255, 241, 232]),
    Rgb([255, 0, 77]),
    Rgb([255, 163, 0]),
    Rgb([255, 236, 39]),
    Rgb([0, 228, 54]),
    Rgb([41, 173, 255]),
    Rgb([131, 118, 156]),
    Rgb([255, 119, 168]),
    Rgb([255, 204, 170]),
];

/// An ordered table of opaque RGB colors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb<u8>>) -> Self {
        Self { colors }
    }

    /// The built-in PICO-8 console palette (16 entries, not padded).
    pub fn pico8() -> Self {
        Self::new(PICO8_COLORS.to_vec())
    }

    /// Build a palette from a flat `RGBRGB...` buffer such as a PNG `PLTE`
    /// chunk or a GIF color table. A trailing partial triple is ignored.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        let colors = bytes.chunks_exact(3).map(|c| Rgb([c[0], c[1], c[2]])).collect();
        Self { colors }
    }

    /// Flatten to an `RGBRGB...` buffer.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.0).collect()
    }

    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, or black for slots past the end.
    pub fn get(&self, index: u8) -> Rgb<u8> {
        self.colors.get(index as usize).copied().unwrap_or(BLACK)
    }

    /// Pad with opaque black to exactly [`PALETTE_SIZE`] entries.
    ///
    /// Entries past 256 are dropped.
    pub fn fill_to_full(&self) -> Palette {
        let mut colors: Vec<Rgb<u8>> = self.colors.iter().copied().take(PALETTE_SIZE).collect();
        colors.resize(PALETTE_SIZE, BLACK);
        Palette { colors }
    }

    /// Drop the trailing run of exact-black entries.
    pub fn trim(&self) -> Palette {
        let end = self.colors.iter().rposition(|&c| c != BLACK).map_or(0, |i| i + 1);
        Palette { colors: self.colors[..end].to_vec() }
    }

    /// Pack an entry as `0xRRGGBB`.
    pub fn pack_rgb(color: Rgb<u8>) -> u32 {
        let [r, g, b] = color.0;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// Unpack the low 24 bits of `value` as `RRGGBB`.
    pub fn unpack_rgb(value: u32) -> Rgb<u8> {
        Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8])
    }
}

impl From<Vec<Rgb<u8>>> for Palette {
    fn from(colors: Vec<Rgb<u8>>) -> Self {
        Self::new(colors)
    }
}
