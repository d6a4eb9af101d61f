//! Loading images, palettes and carts from disk.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::cart::Cart;
use crate::codec::{self, ImageFormat};
use crate::error::ToolError;
use crate::hex_palette::read_hex_palette;
use crate::indexed::IndexedImage;
use crate::palette::Palette;

/// Check if a path names a hex palette file (.hex).
pub fn is_hex_palette(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("hex"))
}

/// Image format for `path`, or a format error naming the accepted extensions.
pub fn image_format(path: &Path) -> Result<ImageFormat, ToolError> {
    ImageFormat::from_path(path).ok_or_else(|| {
        ToolError::Format(format!(
            "unsupported image extension for '{}' (expected .png or .gif)",
            path.display()
        ))
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ToolError> {
    fs::read(path).map_err(|e| ToolError::io(path, e))
}

/// Load a paletted PNG/GIF, keeping its palette as stored in the file.
///
/// Fails with "Not a palettised image" for truecolor or grayscale files.
pub fn load_indexed_image(path: &Path) -> Result<IndexedImage, ToolError> {
    let format = image_format(path)?;
    let bytes = read_bytes(path)?;
    let image =
        codec::decode_indexed(&bytes, format).map_err(|e| ToolError::codec(path, e))?;
    debug!(
        "loaded {} {}x{} with {} palette entries",
        path.display(),
        image.width(),
        image.height(),
        image.palette().len()
    );
    Ok(image)
}

/// Load any supported image as RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, ToolError> {
    image_format(path)?;
    let bytes = read_bytes(path)?;
    codec::decode_rgb(&bytes).map_err(|e| ToolError::codec(path, e))
}

/// Load a palette from a `.hex` file or from a paletted `.png`/`.gif`.
///
/// Hex palettes come back padded to 256 entries; image palettes as stored.
pub fn load_palette(path: &Path) -> Result<Palette, ToolError> {
    if is_hex_palette(path) {
        let file = File::open(path).map_err(|e| ToolError::io(path, e))?;
        let palette = read_hex_palette(BufReader::new(file), &path.display().to_string())?;
        debug!("loaded hex palette {}", path.display());
        return Ok(palette);
    }

    match ImageFormat::from_path(path) {
        Some(_) => Ok(load_indexed_image(path)?.palette().clone()),
        None => Err(ToolError::Format(format!(
            "unsupported palette source '{}' (expected .hex, .png or .gif)",
            path.display()
        ))),
    }
}

/// Read and parse a `.p8` cart.
pub fn load_cart(path: &Path) -> Result<Cart, ToolError> {
    let file = File::open(path).map_err(|e| ToolError::io(path, e))?;
    let cart = Cart::read(BufReader::new(file)).map_err(|e| ToolError::io(path, e))?;
    debug!("loaded cart {} with {} sections", path.display(), cart.len());
    Ok(cart)
}
