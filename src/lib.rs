//! imgtool - Library for PICO-8/TAC-08 palette and sprite sheet conversion
//!
//! This library provides functionality to:
//! - Load palettes from hex files and paletted PNG/GIF images
//! - Read and write indexed PNG/GIF images without losing palette indices
//! - Encode 128x128 images as PICO-8 `__gfx__` and TAC-08 `__gfx8__` text
//! - Parse `.p8` carts and extract their sprite sheets
//! - Export palettes as C, Lua, Go or hex source text

pub mod cart;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod hex_palette;
pub mod indexed;
pub mod output;
pub mod palette;
pub mod source;
pub mod sprite;

pub use error::{CodecError, ToolError};
pub use indexed::IndexedImage;
pub use palette::Palette;
