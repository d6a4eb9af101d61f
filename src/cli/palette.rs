//! CLI dispatch for palette commands: `pal2img`, `img2idx` and `xpal*`.

use std::path::Path;
use std::process::ExitCode;

use log::info;

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::export::ExportFormat;
use crate::indexed::IndexedImage;
use crate::output::{save_indexed, write_text};
use crate::source::{load_palette, load_rgb_image};

use super::{finish, resolve_palette, ExportArgs};

/// Execute the pal2img command.
pub fn run_pal2img(palette: &Path, output: &Path, size: u32) -> ExitCode {
    finish(pal2img(palette, output, size))
}

fn pal2img(palette_path: &Path, output: &Path, size: u32) -> Result<(), ToolError> {
    let palette = load_palette(palette_path)?;
    let image = IndexedImage::gradient(&palette, size, size);
    save_indexed(&image, output)?;
    info!("wrote {}x{} gradient of {} to {}", size, size, palette_path.display(), output.display());
    Ok(())
}

/// Execute the img2idx command.
pub fn run_img2idx(
    input: &Path,
    output: &Path,
    palette: Option<&Path>,
    config: &ToolConfig,
) -> ExitCode {
    finish(img2idx(input, output, palette, config))
}

fn img2idx(
    input: &Path,
    output: &Path,
    palette: Option<&Path>,
    config: &ToolConfig,
) -> Result<(), ToolError> {
    let palette = resolve_palette(palette, config)?;
    let source = load_rgb_image(input)?;
    let image = IndexedImage::remap_exact(&source, &palette)
        .map_err(|e| ToolError::Format(format!("{}: {}", input.display(), e)))?;
    save_indexed(&image, output)?;
    info!("re-indexed {} into {}", input.display(), output.display());
    Ok(())
}

/// Execute one of the xpal* export commands.
pub fn run_export(args: &ExportArgs, format: ExportFormat) -> ExitCode {
    finish(export(&args.input, args.output.as_deref(), format))
}

fn export(input: &Path, output: Option<&Path>, format: ExportFormat) -> Result<(), ToolError> {
    let palette = load_palette(input)?.trim();
    write_text(output, &format.render(&palette))?;
    info!("exported {} palette entries from {}", palette.len(), input.display());
    Ok(())
}
