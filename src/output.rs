//! Indexed image and text output

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::codec;
use crate::error::ToolError;
use crate::indexed::IndexedImage;
use crate::source::image_format;

/// Create the parent directories of `path` if they don't exist.
fn ensure_parent(path: &Path) -> Result<(), ToolError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Save an indexed image as PNG or GIF, chosen by the path's extension.
///
/// The palette is padded to 256 entries. Any other extension is a format
/// error and nothing is written.
pub fn save_indexed(image: &IndexedImage, path: &Path) -> Result<(), ToolError> {
    let format = image_format(path)?;
    let bytes = codec::encode_indexed(image, format).map_err(|e| ToolError::codec(path, e))?;

    ensure_parent(path)?;
    fs::write(path, &bytes).map_err(|e| ToolError::io(path, e))?;
    debug!(
        "wrote {} {}x{} to {}",
        format.name(),
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Write text to `path`, or to stdout when no path is given.
pub fn write_text(path: Option<&Path>, text: &str) -> Result<(), ToolError> {
    match path {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, text).map_err(|e| ToolError::io(path, e))?;
            debug!("wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())
                .and_then(|_| lock.flush())
                .map_err(|e| ToolError::io("<stdout>", e))?;
        }
    }
    Ok(())
}
