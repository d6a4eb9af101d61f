//! Indexed PNG and GIF encoding/decoding.
//!
//! The `image` crate expands palettes to RGB on decode, so indexed data is read
//! and written directly with the `png` and `gif` crates. Every image written
//! here carries a full 256-entry palette at 8 bits per pixel.

use std::borrow::Cow;
use std::path::Path;

use image::RgbImage;

use crate::error::CodecError;
use crate::indexed::IndexedImage;
use crate::palette::Palette;

/// Image container, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Gif,
}

impl ImageFormat {
    /// Format for a `.png` or `.gif` path (case-insensitive), `None` otherwise.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
        }
    }
}

/// Decode an indexed image, keeping the file's palette as stored.
pub fn decode_indexed(bytes: &[u8], format: ImageFormat) -> Result<IndexedImage, CodecError> {
    match format {
        ImageFormat::Png => decode_png(bytes),
        ImageFormat::Gif => decode_gif(bytes),
    }
}

/// Encode an indexed image with its palette padded to 256 entries.
pub fn encode_indexed(image: &IndexedImage, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
    match format {
        ImageFormat::Png => encode_png(image),
        ImageFormat::Gif => encode_gif(image),
    }
}

/// Decode any supported image to RGB, expanding palettes and dropping alpha.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, CodecError> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Decode a PNG with color type Indexed. Sub-byte depths are unpacked to one
/// index per pixel.
pub fn decode_png(bytes: &[u8]) -> Result<IndexedImage, CodecError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let palette = match (reader.info().color_type, reader.info().palette.as_ref()) {
        (png::ColorType::Indexed, Some(plte)) => Palette::from_rgb_bytes(plte),
        _ => return Err(CodecError::NotPaletted),
    };

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let bits = frame.bit_depth as u8 as usize;
    let width = frame.width as usize;

    let mut indices = Vec::with_capacity(width * frame.height as usize);
    for row in buf.chunks(frame.line_size).take(frame.height as usize) {
        indices.extend(unpack_row(row, bits, width));
    }

    IndexedImage::from_parts(frame.width, frame.height, indices, palette)
        .map_err(|_| CodecError::Truncated)
}

/// Split a packed PNG scanline into indices, most significant bits first.
fn unpack_row(row: &[u8], bits: usize, width: usize) -> impl Iterator<Item = u8> + '_ {
    let per_byte = 8 / bits;
    let mask = ((1u16 << bits) - 1) as u8;
    (0..width).map(move |x| {
        let shift = 8 - bits * (x % per_byte + 1);
        (row[x / per_byte] >> shift) & mask
    })
}

/// Encode as an 8-bit indexed PNG.
pub fn encode_png(image: &IndexedImage) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(image.palette().fill_to_full().to_rgb_bytes());

        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.indices())?;
        writer.finish()?;
    }
    Ok(out)
}

/// Decode the first frame of a GIF onto its logical screen.
///
/// The frame's local color table takes precedence over the global one. Pixels
/// outside the frame rectangle are index 0.
pub fn decode_gif(bytes: &[u8]) -> Result<IndexedImage, CodecError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(bytes)?;

    let (width, height) = (decoder.width() as u32, decoder.height() as u32);
    let global = decoder.global_palette().map(<[u8]>::to_vec);
    let frame = decoder.read_next_frame()?.ok_or(CodecError::NoFrames)?;

    let palette = frame
        .palette
        .as_deref()
        .or(global.as_deref())
        .map(Palette::from_rgb_bytes)
        .ok_or(CodecError::NotPaletted)?;

    let mut image = IndexedImage::new(width, height, palette);
    let (frame_w, frame_h) = (frame.width as u32, frame.height as u32);
    let (left, top) = (frame.left as u32, frame.top as u32);
    for fy in 0..frame_h {
        for fx in 0..frame_w {
            let (x, y) = (left + fx, top + fy);
            if x >= width || y >= height {
                continue;
            }
            if let Some(&index) = frame.buffer.get((fy * frame_w + fx) as usize) {
                image.set_index(x, y, index);
            }
        }
    }
    Ok(image)
}

/// Encode as a single-frame GIF with a 256-entry global color table.
pub fn encode_gif(image: &IndexedImage) -> Result<Vec<u8>, CodecError> {
    let too_large = || CodecError::TooLarge {
        width: image.width(),
        height: image.height(),
        format: ImageFormat::Gif.name(),
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let palette = image.palette().fill_to_full().to_rgb_bytes();
    let mut out = Vec::new();
    {
        // The trailer is written when the encoder is dropped
        let mut encoder = gif::Encoder::new(&mut out, width, height, &palette)?;
        let frame = gif::Frame {
            width,
            height,
            buffer: Cow::Borrowed(image.indices()),
            ..gif::Frame::default()
        };
        encoder.write_frame(&frame)?;
    }
    Ok(out)
}
