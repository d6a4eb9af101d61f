//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod palette;
mod sprite;

use clap::{Args, Parser, Subcommand};
use env_logger::{Env, Target};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, ToolConfig, MAX_GRADIENT_SIZE};
use crate::error::ToolError;
use crate::export::ExportFormat;
use crate::palette::Palette;
use crate::source::load_palette;
use crate::sprite::SpriteFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// imgtool - PICO-8/TAC-08 palette and sprite sheet converter
#[derive(Parser)]
#[command(name = "imgtool")]
#[command(about = "Convert palettes and sprite sheets between images, hex files and PICO-8/TAC-08 carts")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest imgtool.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input image and optional output file for the sprite sheet commands
#[derive(Args)]
pub struct TextOutputArgs {
    /// Paletted input image (.png or .gif)
    pub input: PathBuf,

    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Palette source and optional output file for the xpal* exports
#[derive(Args)]
pub struct ExportArgs {
    /// Palette source (.png, .gif or .hex)
    pub input: PathBuf,

    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a gradient image showing every palette entry
    #[command(name = "pal2img", visible_aliases = ["png", "gif"])]
    Pal2Img {
        /// Palette source (.hex, .png or .gif)
        palette: PathBuf,

        /// Output image (.png or .gif)
        output: PathBuf,

        /// Width and height of the image [default: config defaults.gradient_size]
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_GRADIENT_SIZE as i64))]
        size: Option<u32>,
    },

    /// Re-index an image onto a palette by exact color match
    #[command(name = "img2idx")]
    Img2Idx {
        /// Input image (.png or .gif, any color type)
        input: PathBuf,

        /// Output image (.png or .gif)
        output: PathBuf,

        /// Palette source [default: config defaults.palette, else PICO-8]
        palette: Option<PathBuf>,
    },

    /// Export an image palette as 0xRRGGBB lines
    #[command(name = "xpalhex")]
    XpalHex(ExportArgs),

    /// Export an image palette as a C array
    #[command(name = "xpalhexc")]
    XpalHexC(ExportArgs),

    /// Export an image palette as a Lua table
    #[command(name = "xpallua")]
    XpalLua(ExportArgs),

    /// Export an image palette as a Go color.Palette
    #[command(name = "xpalgo")]
    XpalGo(ExportArgs),

    /// Print a 128x128 image as a PICO-8 __gfx__ section
    #[command(name = "pico8")]
    Pico8(TextOutputArgs),

    /// Print a 128x128 image as a TAC-08 __gfx8__ section
    #[command(name = "tac08")]
    Tac08(TextOutputArgs),

    /// Extract the sprite sheet of a .p8 cart as an image
    #[command(name = "p8spr2img")]
    P8Spr2Img {
        /// PICO-8 cart (.p8)
        cart: PathBuf,

        /// Output image (.png or .gif)
        output: PathBuf,

        /// Palette source [default: config defaults.palette, else PICO-8]
        palette: Option<PathBuf>,
    },
}

/// Print an error and map a command result to an exit code.
pub(crate) fn finish(result: Result<(), ToolError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Palette from the argument, else the configured default, else PICO-8.
pub(crate) fn resolve_palette(arg: Option<&Path>, config: &ToolConfig) -> Result<Palette, ToolError> {
    match arg.or(config.defaults.palette.as_deref()) {
        Some(path) => load_palette(path),
        None => {
            debug!("no palette given, using PICO-8");
            Ok(Palette::pico8())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    // A logger may already be installed
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stderr)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_INVALID_ARGS } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return finish(Err(e.into())),
    };

    match cli.command {
        Commands::Pal2Img { palette, output, size } => {
            palette::run_pal2img(&palette, &output, size.unwrap_or(config.defaults.gradient_size))
        }
        Commands::Img2Idx { input, output, palette } => {
            palette::run_img2idx(&input, &output, palette.as_deref(), &config)
        }
        Commands::XpalHex(args) => palette::run_export(&args, ExportFormat::Hex),
        Commands::XpalHexC(args) => palette::run_export(&args, ExportFormat::C),
        Commands::XpalLua(args) => palette::run_export(&args, ExportFormat::Lua),
        Commands::XpalGo(args) => palette::run_export(&args, ExportFormat::Go),
        Commands::Pico8(args) => sprite::run_sheet(&args, SpriteFormat::Pico8),
        Commands::Tac08(args) => sprite::run_sheet(&args, SpriteFormat::Tac08),
        Commands::P8Spr2Img { cart, output, palette } => {
            sprite::run_p8spr2img(&cart, &output, palette.as_deref(), &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pal2img_aliases() {
        for name in ["pal2img", "png", "gif"] {
            let cli = Cli::try_parse_from(["imgtool", name, "pal.hex", "out.png"]).unwrap();
            assert!(matches!(cli.command, Commands::Pal2Img { size: None, .. }));
        }
    }

    #[test]
    fn test_size_range() {
        assert!(Cli::try_parse_from(["imgtool", "pal2img", "p.hex", "o.png", "--size", "0"]).is_err());
        let cli =
            Cli::try_parse_from(["imgtool", "pal2img", "p.hex", "o.png", "--size", "64"]).unwrap();
        assert!(matches!(cli.command, Commands::Pal2Img { size: Some(64), .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "imgtool", "xpalhex", "in.png", "-o", "out.txt", "-v", "--config", "c.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Commands::XpalHex(args) => assert_eq!(args.output, Some(PathBuf::from("out.txt"))),
            _ => panic!("expected xpalhex"),
        }
    }

    #[test]
    fn test_export_input_help_mentions_hex() {
        let help = |name: &str| {
            let command = Cli::command();
            let sub = command.find_subcommand(name).unwrap();
            let input = sub.get_arguments().find(|a| a.get_id() == "input").unwrap();
            input.get_help().map(|h| h.to_string()).unwrap_or_default()
        };
        for name in ["xpalhex", "xpalhexc", "xpallua", "xpalgo"] {
            assert!(help(name).contains(".hex"), "{} input help", name);
        }
        assert!(!help("pico8").contains(".hex"));
    }

    #[test]
    fn test_wrong_argument_count_is_usage_error() {
        let err = Cli::try_parse_from(["imgtool", "img2idx", "only-one.png"]).err().unwrap();
        assert!(err.use_stderr());
        assert!(Cli::try_parse_from(["imgtool", "bogus"]).is_err());
    }

    #[test]
    fn test_resolve_palette_defaults_to_pico8() {
        let palette = resolve_palette(None, &ToolConfig::default()).unwrap();
        assert_eq!(palette, Palette::pico8());
    }

    #[test]
    fn test_resolve_palette_prefers_argument() {
        let dir = tempfile::tempdir().unwrap();
        let arg = dir.path().join("arg.hex");
        std::fs::write(&arg, "0x112233\n").unwrap();

        let mut config = ToolConfig::default();
        config.defaults.palette = Some(dir.path().join("missing.hex"));

        let palette = resolve_palette(Some(&arg), &config).unwrap();
        assert_eq!(palette.get(0), image::Rgb([0x11, 0x22, 0x33]));

        assert!(matches!(resolve_palette(None, &config), Err(ToolError::Io { .. })));
    }
}
