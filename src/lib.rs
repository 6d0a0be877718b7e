//! Sprite loader - fetch, cache and draw game sprites
//!
//! This library provides functionality to:
//! - Fetch a symbol-to-type mapping and a sprite list from a game server
//! - Preload sprite images concurrently into memory
//! - Draw sprites onto a surface, falling back to colored rectangles
//! - Render whole level layouts through the symbol mapping

pub mod cli;
pub mod color;
pub mod config;
pub mod fetch;
pub mod level;
pub mod loader;
pub mod models;
pub mod output;
pub mod surface;

pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use loader::{render_fallback, LoaderError, LoaderOptions, PreloadMode, SpriteLoader};
pub use surface::{Canvas, Rect, Surface};
