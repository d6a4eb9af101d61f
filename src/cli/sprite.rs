//! CLI dispatch for sprite sheet commands: `pico8`, `tac08` and `p8spr2img`.

use std::path::Path;
use std::process::ExitCode;

use log::info;

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::output::{save_indexed, write_text};
use crate::source::{load_cart, load_indexed_image};
use crate::sprite::SpriteFormat;

use super::{finish, resolve_palette, TextOutputArgs};

/// Execute the pico8 or tac08 command.
pub fn run_sheet(args: &TextOutputArgs, format: SpriteFormat) -> ExitCode {
    finish(sheet(&args.input, args.output.as_deref(), format))
}

fn sheet(input: &Path, output: Option<&Path>, format: SpriteFormat) -> Result<(), ToolError> {
    let image = load_indexed_image(input)?;
    let text = format.render(&image)?;
    write_text(output, &text)?;
    info!("encoded {} as {}", input.display(), format.section());
    Ok(())
}

/// Execute the p8spr2img command.
pub fn run_p8spr2img(
    cart: &Path,
    output: &Path,
    palette: Option<&Path>,
    config: &ToolConfig,
) -> ExitCode {
    finish(p8spr2img(cart, output, palette, config))
}

fn p8spr2img(
    cart_path: &Path,
    output: &Path,
    palette: Option<&Path>,
    config: &ToolConfig,
) -> Result<(), ToolError> {
    let palette = resolve_palette(palette, config)?;
    let cart = load_cart(cart_path)?;
    let image = cart.sprite_sheet(&palette)?;
    save_indexed(&image, output)?;
    info!("extracted sprite sheet of {} to {}", cart_path.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexed::IndexedImage;
    use crate::palette::Palette;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sheet_writes_gfx_section() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sheet.png");
        let out = dir.path().join("gfx.txt");
        let mut image = IndexedImage::new(128, 128, Palette::pico8());
        image.set_index(0, 0, 7);
        save_indexed(&image, &input).unwrap();

        sheet(&input, Some(&out), SpriteFormat::Pico8).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("__gfx__\n70"));
        assert_eq!(text.lines().count(), 129);
    }

    #[test]
    fn test_sheet_rejects_wrong_size() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("small.png");
        save_indexed(&IndexedImage::new(64, 64, Palette::pico8()), &input).unwrap();

        let err = sheet(&input, None, SpriteFormat::Tac08).unwrap_err();
        assert_eq!(err.to_string(), "Input Image must be 128x128 (got 64x64)");
    }

    #[test]
    fn test_p8spr2img_round_trip() {
        let dir = tempdir().unwrap();
        let cart = dir.path().join("game.p8");
        let out = dir.path().join("sprites.png");
        fs::write(&cart, "pico-8 cartridge\nversion 41\n__gfx__\n0123456789abcdef\n").unwrap();

        p8spr2img(&cart, &out, None, &ToolConfig::default()).unwrap();

        let image = load_indexed_image(&out).unwrap();
        assert_eq!(image.dimensions(), (128, 128));
        assert_eq!(image.row(0)[..16], (0..16).collect::<Vec<u8>>()[..]);
        assert_eq!(image.trimmed_palette(), Palette::pico8());
    }

    #[test]
    fn test_p8spr2img_without_gfx_is_blank() {
        let dir = tempdir().unwrap();
        let cart = dir.path().join("code.p8");
        let out = dir.path().join("blank.gif");
        fs::write(&cart, "pico-8 cartridge\n__lua__\nprint(1)\n").unwrap();

        p8spr2img(&cart, &out, None, &ToolConfig::default()).unwrap();

        let image = load_indexed_image(&out).unwrap();
        assert!(image.indices().iter().all(|&i| i == 0));
    }
}
