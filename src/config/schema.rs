//! Configuration schema types for `imgtool.toml`
//!
//! Defines the structure and validation rules for imgtool configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted `defaults.gradient_size`
pub const MAX_GRADIENT_SIZE: u32 = 4096;

/// Default settings applied when a command argument is omitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Palette used by `img2idx` and `p8spr2img` when none is given.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default)]
    pub palette: Option<PathBuf>,
    /// Width and height of `pal2img` gradients
    #[serde(default = "default_gradient_size")]
    pub gradient_size: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            palette: None,
            gradient_size: default_gradient_size(),
        }
    }
}

fn default_gradient_size() -> u32 {
    128
}

/// Complete imgtool.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Default settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.gradient_size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "imgtool.toml: '{}' {}", self.field, self.message)
    }
}

impl ToolConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let size = self.defaults.gradient_size;
        if size == 0 || size > MAX_GRADIENT_SIZE {
            errors.push(ConfigValidationError {
                field: "defaults.gradient_size".to_string(),
                message: format!("must be between 1 and {}", MAX_GRADIENT_SIZE),
            });
        }

        if let Some(palette) = &self.defaults.palette {
            if palette.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: "defaults.palette".to_string(),
                    message: "must be a non-empty path".to_string(),
                });
            } else if !is_palette_path(palette) {
                errors.push(ConfigValidationError {
                    field: "defaults.palette".to_string(),
                    message: "must name a .hex, .png or .gif file".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn is_palette_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| matches!(e.as_str(), "hex" | "png" | "gif"))
}
