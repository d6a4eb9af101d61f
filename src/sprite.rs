//! PICO-8 and TAC-08 sprite sheet text.
//!
//! Both consoles store a 128x128 sheet as 128 lines of hex text:
//!
//! | format | section | per pixel | digits per row |
//! |--------|---------|-----------|----------------|
//! | PICO-8 | `__gfx__` | 4-bit index, one hex digit | 128 |
//! | TAC-08 | `__gfx8__` | 8-bit index, two hex digits | 256 |
//!
//! PICO-8 rows are written a byte at a time: the left pixel of each pair is
//! the high nibble and the right pixel the low nibble, so reading the digits
//! back left to right yields one pixel per digit. Indices above 15 lose their
//! high bits: `decode(encode(x)) == x & 0xf`.

use std::fmt::Write;

use crate::cart::Section;
use crate::error::ToolError;
use crate::indexed::IndexedImage;
use crate::palette::Palette;

/// Sprite sheet width in pixels.
pub const SHEET_WIDTH: u32 = 128;
/// Sprite sheet height in pixels.
pub const SHEET_HEIGHT: u32 = 128;

/// Console sprite sheet encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteFormat {
    /// 4 bits per pixel, `__gfx__`
    Pico8,
    /// 8 bits per pixel, `__gfx8__`
    Tac08,
}

impl SpriteFormat {
    /// Cart section holding this format.
    pub fn section(self) -> Section {
        match self {
            SpriteFormat::Pico8 => Section::Gfx,
            SpriteFormat::Tac08 => Section::Gfx8,
        }
    }

    /// Encode a 128x128 image into sheet rows (without the section marker).
    pub fn encode(self, image: &IndexedImage) -> Result<Vec<String>, ToolError> {
        check_sheet_size(image)?;
        let rows = (0..image.height()).map(|y| image.row(y));
        Ok(match self {
            SpriteFormat::Pico8 => rows.map(encode_pico8_row).collect(),
            SpriteFormat::Tac08 => rows.map(encode_tac08_row).collect(),
        })
    }

    /// Decode sheet rows into a 128x128 image under `palette`.
    ///
    /// Missing rows and short rows leave index 0; text past the sheet edge is
    /// ignored.
    pub fn decode<S: AsRef<str>>(
        self,
        lines: &[S],
        palette: Palette,
    ) -> Result<IndexedImage, ToolError> {
        let mut image = IndexedImage::new(SHEET_WIDTH, SHEET_HEIGHT, palette);
        for (y, line) in lines.iter().take(SHEET_HEIGHT as usize).enumerate() {
            let digits = line.as_ref().trim_end().as_bytes();
            match self {
                SpriteFormat::Pico8 => decode_pico8_row(&mut image, y, digits)?,
                SpriteFormat::Tac08 => decode_tac08_row(&mut image, y, digits)?,
            }
        }
        Ok(image)
    }

    /// Section marker followed by the encoded rows, newline terminated.
    pub fn render(self, image: &IndexedImage) -> Result<String, ToolError> {
        let rows = self.encode(image)?;
        let mut out = String::with_capacity((rows.len() + 1) * 257);
        out.push_str(self.section().marker());
        out.push('\n');
        for row in rows {
            out.push_str(&row);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Fail unless the image is exactly 128x128.
pub fn check_sheet_size(image: &IndexedImage) -> Result<(), ToolError> {
    let actual = image.dimensions();
    if actual != (SHEET_WIDTH, SHEET_HEIGHT) {
        return Err(ToolError::Size { expected: (SHEET_WIDTH, SHEET_HEIGHT), actual });
    }
    Ok(())
}

fn encode_pico8_row(row: &[u8]) -> String {
    let mut line = String::with_capacity(row.len());
    for pair in row.chunks(2) {
        let left = pair[0] & 0xf;
        let right = pair.get(1).map_or(0, |p| p & 0xf);
        let _ = write!(line, "{:02x}", (left << 4) | right);
    }
    line
}

fn encode_tac08_row(row: &[u8]) -> String {
    let mut line = String::with_capacity(row.len() * 2);
    for index in row {
        let _ = write!(line, "{:02x}", index);
    }
    line
}

fn decode_pico8_row(image: &mut IndexedImage, y: usize, digits: &[u8]) -> Result<(), ToolError> {
    for (x, &digit) in digits.iter().take(SHEET_WIDTH as usize).enumerate() {
        let index = hex_value(digit).ok_or_else(|| invalid_digit(y, x, digit))?;
        image.set_index(x as u32, y as u32, index);
    }
    Ok(())
}

fn decode_tac08_row(image: &mut IndexedImage, y: usize, digits: &[u8]) -> Result<(), ToolError> {
    for (x, pair) in digits.chunks(2).take(SHEET_WIDTH as usize).enumerate() {
        let &[hi, lo] = pair else {
            return Err(ToolError::SpriteRow {
                row: y + 1,
                message: format!("incomplete byte at column {}", x * 2 + 1),
            });
        };
        let hi = hex_value(hi).ok_or_else(|| invalid_digit(y, x * 2, hi))?;
        let lo = hex_value(lo).ok_or_else(|| invalid_digit(y, x * 2 + 1, lo))?;
        image.set_index(x as u32, y as u32, (hi << 4) | lo);
    }
    Ok(())
}

fn hex_value(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|v| v as u8)
}

fn invalid_digit(y: usize, x: usize, digit: u8) -> ToolError {
    ToolError::SpriteRow {
        row: y + 1,
        message: format!("invalid hex digit '{}' at column {}", char::from(digit), x + 1),
    }
}
