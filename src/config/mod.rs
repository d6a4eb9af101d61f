//! Configuration module for imgtool
//!
//! Provides types, discovery and loading for `imgtool.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, CONFIG_FILE_NAME};
pub use schema::*;
