//! Configuration schema types for `sprites.toml`
//!
//! Defines the structure and validation rules for sprite loader configuration.

use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::loader::{LoaderOptions, PreloadMode, DEFAULT_MAPPING_PATH, DEFAULT_SPRITES_PATH};

/// Image preload behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreloadModeConfig {
    /// One failed image fails the whole load
    #[default]
    Strict,
    /// Failed images are skipped with a warning
    Lenient,
}

impl From<PreloadModeConfig> for PreloadMode {
    fn from(mode: PreloadModeConfig) -> Self {
        match mode {
            PreloadModeConfig::Strict => PreloadMode::Strict,
            PreloadModeConfig::Lenient => PreloadMode::Lenient,
        }
    }
}

/// Sprite server section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL that endpoint paths and relative image URLs resolve against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_mapping_path")]
    pub mapping_path: String,
    #[serde(default = "default_sprites_path")]
    pub sprites_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mapping_path: default_mapping_path(),
            sprites_path: default_sprites_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_mapping_path() -> String {
    DEFAULT_MAPPING_PATH.to_string()
}

fn default_sprites_path() -> String {
    DEFAULT_SPRITES_PATH.to_string()
}

/// Image preload section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreloadConfig {
    #[serde(default)]
    pub mode: PreloadModeConfig,
}

/// Rendering section used by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Edge length of one level cell in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Canvas background as a hex color
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            background: default_background(),
        }
    }
}

fn default_tile_size() -> u32 {
    32
}

fn default_background() -> String {
    "#00000000".to_string()
}

/// Root configuration structure for `sprites.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritesConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.tile_size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprites.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritesConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.server.base_url.is_empty() {
            errors.push(ConfigValidationError {
                field: "server.base_url".to_string(),
                message: "must be a non-empty URL".to_string(),
            });
        }

        for (field, path) in [
            ("server.mapping_path", &self.server.mapping_path),
            ("server.sprites_path", &self.server.sprites_path),
        ] {
            if path.is_empty() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        if self.render.tile_size == 0 {
            errors.push(ConfigValidationError {
                field: "render.tile_size".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if let Err(e) = parse_color(&self.render.background) {
            errors.push(ConfigValidationError {
                field: "render.background".to_string(),
                message: format!("is not a valid color: {}", e),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Loader options described by this configuration.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            mapping_url: self.server.mapping_path.clone(),
            sprites_url: self.server.sprites_path.clone(),
            preload: self.preload.mode.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: SpritesConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.mapping_path, "/api/sprite-mapping/");
        assert_eq!(config.server.sprites_path, "/api/sprites/");
        assert_eq!(config.preload.mode, PreloadModeConfig::Strict);
        assert_eq!(config.render.tile_size, 32);
        assert!(config.is_valid());
    }

    #[test]
    fn test_parse_full_config() {
        let config: SpritesConfig = toml::from_str(
            r##"
[server]
base_url = "https://game.example.com"
sprites_path = "/api/v2/sprites/"

[preload]
mode = "lenient"

[render]
tile_size = 16
background = "#87CEEB"
"##,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://game.example.com");
        assert_eq!(config.server.mapping_path, "/api/sprite-mapping/");
        assert_eq!(config.server.sprites_path, "/api/v2/sprites/");
        assert_eq!(config.preload.mode, PreloadModeConfig::Lenient);
        assert_eq!(config.render.tile_size, 16);

        let options = config.loader_options();
        assert_eq!(options.sprites_url, "/api/v2/sprites/");
        assert_eq!(options.preload, PreloadMode::Lenient);
    }

    #[test]
    fn test_unknown_preload_mode_is_rejected() {
        let result: Result<SpritesConfig, _> = toml::from_str("[preload]\nmode = \"sometimes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SpritesConfig::default();
        config.server.base_url.clear();
        config.render.tile_size = 0;
        config.render.background = "blue".to_string();

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["server.base_url", "render.tile_size", "render.background"]);
        assert!(errors[1].to_string().contains("must be a positive integer"));
    }
}
