//! Sprite loader - command-line tool for fetching and rendering game sprites

use std::process::ExitCode;

use sprite_loader::cli;

fn main() -> ExitCode {
    cli::run()
}
