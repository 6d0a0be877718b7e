//! Configuration loading and discovery for `sprites.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{PreloadModeConfig, SpritesConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "sprites.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprites.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override server base URL
    pub base_url: Option<String>,
    /// Force lenient image preloading
    pub lenient: Option<bool>,
    /// Override level tile size
    pub tile_size: Option<u32>,
}

/// Find sprites.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for sprites.toml
/// 2. Check XDG_CONFIG_HOME/sprite-loader/sprites.toml (or ~/.config/sprite-loader/sprites.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find sprites.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("sprite-loader").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sprites.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a sprites.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<SpritesConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(SpritesConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritesConfig, ConfigError> {
    log::debug!("Loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let config: SpritesConfig = toml::from_str(&contents)?;
    check(config)
}

/// Load configuration as [`load_config`] does, apply CLI overrides, and
/// validate the merged result.
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SpritesConfig, ConfigError> {
    let mut config = load_config(path)?;
    merge_cli_overrides(&mut config, overrides);
    check(config)
}

fn check(config: SpritesConfig) -> Result<SpritesConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(config: &mut SpritesConfig, overrides: &CliOverrides) {
    if let Some(ref base_url) = overrides.base_url {
        config.server.base_url = base_url.clone();
    }

    if let Some(true) = overrides.lenient {
        config.preload.mode = PreloadModeConfig::Lenient;
    }

    if let Some(tile_size) = overrides.tile_size {
        config.render.tile_size = tile_size;
    }
}
