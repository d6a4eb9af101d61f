//! Error types shared by the library and the CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the PNG/GIF byte codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file decodes, but does not store palette indices
    #[error("Not a palettised image")]
    NotPaletted,
    /// Pixel data shorter than the declared dimensions
    #[error("image data is shorter than its dimensions")]
    Truncated,
    /// GIF with no image frames
    #[error("GIF contains no frames")]
    NoFrames,
    /// Dimensions the encoder cannot represent
    #[error("image of {width}x{height} is too large for {format}")]
    TooLarge { width: u32, height: u32, format: &'static str },
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),
    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),
    #[error("GIF decode error: {0}")]
    GifDecode(#[from] gif::DecodingError),
    #[error("GIF encode error: {0}")]
    GifEncode(#[from] gif::EncodingError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Error type for every imgtool command.
#[derive(Debug, Error)]
pub enum ToolError {
    /// File open/create/read/write failure
    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Input is structurally unusable (wrong extension, too many entries, unmapped color)
    #[error("{0}")]
    Format(String),
    /// Codec failure while reading or writing a specific file
    #[error("{}: {source}", .path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    /// A text line could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A sprite sheet row could not be decoded; `row` counts from the section start
    #[error("sprite row {row}: {message}")]
    SpriteRow { row: usize, message: String },
    /// Image dimensions do not match a fixed-size requirement
    #[error("Input Image must be {}x{} (got {}x{})", .expected.0, .expected.1, .actual.0, .actual.1)]
    Size { expected: (u32, u32), actual: (u32, u32) },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ToolError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ToolError::Io { path: path.into(), source }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: CodecError) -> Self {
        ToolError::Codec { path: path.into(), source }
    }
}
