//! Configuration module for the sprite loader
//!
//! Provides types and parsing for `sprites.toml` configuration.

pub mod loader;
pub mod schema;

pub use schema::*;
