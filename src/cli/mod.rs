//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod status;

use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::loader::{load_config_with_overrides, CliOverrides};
use crate::config::SpritesConfig;
use crate::fetch::HttpFetcher;
use crate::loader::SpriteLoader;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Sprite loader - fetch game sprites from a server and render them
#[derive(Parser)]
#[command(name = "sprite-loader")]
#[command(about = "Fetch sprite metadata and images from a game server and render them to PNG")]
#[command(version)]
pub struct Cli {
    /// Path to sprites.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides server.base_url)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Keep successfully loaded images when some fail to load
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load all sprites and report what was found
    Status,
    /// Print the sprite type mapped to a level symbol
    Lookup {
        /// Level symbol (e.g. "P")
        symbol: String,
    },
    /// Render a single sprite type to PNG
    Render {
        /// Sprite type to draw (e.g. "platform")
        sprite_type: String,

        /// Output file or directory (default: {type}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the drawn sprite in pixels
        #[arg(long, default_value = "32")]
        width: u32,

        /// Height of the drawn sprite in pixels
        #[arg(long, default_value = "32")]
        height: u32,
    },
    /// Render a level layout (JSON grid or text rows) to PNG
    Level {
        /// Level file
        input: PathBuf,

        /// Output file or directory (default: {input}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tile size in pixels (overrides render.tile_size)
        #[arg(long)]
        tile: Option<u32>,
    },
}

/// Run the CLI and return the process exit code
pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let tile = match &cli.command {
        Commands::Level { tile, .. } => *tile,
        _ => None,
    };
    let overrides = CliOverrides {
        base_url: cli.base_url.clone(),
        lenient: Some(cli.lenient),
        tile_size: tile,
    };

    let config = match load_config_with_overrides(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Status => status::run_status(&config),
        Commands::Lookup { symbol } => status::run_lookup(&config, &symbol),
        Commands::Render {
            sprite_type,
            output,
            width,
            height,
        } => render::run_render(&config, &sprite_type, output.as_deref(), width, height),
        Commands::Level { input, output, .. } => {
            render::run_level(&config, &input, output.as_deref())
        }
    }
}

/// Build an HTTP-backed loader from the configuration.
pub(crate) fn build_loader(config: &SpritesConfig) -> Result<SpriteLoader<HttpFetcher>, ExitCode> {
    match HttpFetcher::new(&config.server.base_url) {
        Ok(fetcher) => Ok(SpriteLoader::new(fetcher, config.loader_options())),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
    }
}

/// Drive a future to completion on a current-thread runtime.
pub(crate) fn block_on<T>(future: impl Future<Output = T>) -> Result<T, ExitCode> {
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => Ok(runtime.block_on(future)),
        Err(e) => {
            eprintln!("Error: cannot start async runtime: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}
