//! Hex palette files.
//!
//! One color per line, written as a hexadecimal `RRGGBB` value with an
//! optional `0x` prefix:
//!
//! ```text
//! 0x000000
//! 0x1d2b53
//! 7e2553
//! ```
//!
//! Line *i* becomes palette slot *i*. The result is always padded to a full
//! 256-entry palette.
//!
//! ```
//! use imgtool::hex_palette::parse_hex_palette;
//!
//! let palette = parse_hex_palette("0x000000\n0xff0000\n0x00ff00\n").unwrap();
//! assert_eq!(palette.len(), 256);
//! assert_eq!(palette.get(1), image::Rgb([255, 0, 0]));
//! ```

use std::io::BufRead;

use crate::error::ToolError;
use crate::palette::{Palette, PALETTE_SIZE};
use image::Rgb;

/// Parse hex palette text into a full 256-entry palette.
pub fn parse_hex_palette(text: &str) -> Result<Palette, ToolError> {
    parse_lines(text.lines().map(|l| Ok(l.to_string())))
}

/// Read a hex palette from any buffered reader.
///
/// I/O failures are attributed to `source_name` in the returned error. A line
/// that is not valid UTF-8 is a parse error for that line.
pub fn read_hex_palette<R: BufRead>(reader: R, source_name: &str) -> Result<Palette, ToolError> {
    parse_lines(reader.split(b'\n').enumerate().map(|(i, line)| {
        let bytes = line.map_err(|e| ToolError::io(source_name, e))?;
        String::from_utf8(bytes).map_err(|_| ToolError::Parse {
            line: i + 1,
            message: "line is not valid UTF-8".to_string(),
        })
    }))
}

fn parse_lines<I>(lines: I) -> Result<Palette, ToolError>
where
    I: Iterator<Item = Result<String, ToolError>>,
{
    let mut colors: Vec<Rgb<u8>> = Vec::new();

    for (i, line) in lines.enumerate() {
        let line = line?;
        if colors.len() == PALETTE_SIZE {
            return Err(ToolError::Format(format!(
                "hex palette has more than {} entries",
                PALETTE_SIZE
            )));
        }
        colors.push(parse_hex_color(&line, i + 1)?);
    }

    Ok(Palette::new(colors).fill_to_full())
}

/// Parse one `[0x]RRGGBB` line. Values wider than 24 bits keep their low 24 bits.
fn parse_hex_color(line: &str, line_no: usize) -> Result<Rgb<u8>, ToolError> {
    let trimmed = line.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // from_str_radix accepts a leading '+', which is not a hex digit
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_line(line_no, trimmed));
    }

    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid_line(line_no, trimmed))?;
    Ok(Palette::unpack_rgb(value))
}

fn invalid_line(line: usize, text: &str) -> ToolError {
    ToolError::Parse { line, message: format!("invalid hex color '{}'", text) }
}
