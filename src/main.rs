//! imgtool - Command-line palette and sprite sheet converter for PICO-8 and TAC-08

use std::process::ExitCode;

use imgtool::cli;

fn main() -> ExitCode {
    cli::run()
}
