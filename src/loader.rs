//! Sprite loader: fetches sprite metadata, preloads images and draws sprites
//!
//! The loader runs in two phases. [`SpriteLoader::init`] fetches the
//! symbol mapping and the sprite list, groups records by type and preloads
//! every referenced image. Rendering ([`SpriteLoader::render_sprite`]) can be
//! called at any time and falls back to a solid rectangle whenever art is
//! missing, so a draw loop never has to care whether init succeeded.

use std::collections::HashMap;

use futures::future::{join_all, try_join_all};
use image::RgbaImage;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::color::fallback_color;
use crate::fetch::{FetchError, Fetcher};
use crate::models::{SpriteId, SpriteListResponse, SpriteMappingResponse, SpriteRecord};
use crate::surface::{Rect, Surface};

/// Default path of the symbol mapping endpoint
pub const DEFAULT_MAPPING_PATH: &str = "/api/sprite-mapping/";

/// Default path of the sprite list endpoint
pub const DEFAULT_SPRITES_PATH: &str = "/api/sprites/";

/// Error raised while initializing the loader
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A metadata request failed
    #[error("failed to fetch sprite metadata: {0}")]
    Fetch(#[from] FetchError),
    /// A metadata response was not the expected JSON shape
    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// An image request failed
    #[error("failed to fetch image for sprite {id}: {source}")]
    ImageFetch {
        id: SpriteId,
        #[source]
        source: FetchError,
    },
    /// Image bytes could not be decoded
    #[error("failed to decode image {url} for sprite {id}: {source}")]
    Decode {
        id: SpriteId,
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// How image preloading reacts to a failed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreloadMode {
    /// Any failed image fails the whole batch; nothing from the batch is kept
    #[default]
    Strict,
    /// Failed images are logged and skipped; the rest are kept
    Lenient,
}

/// Endpoints and preload behavior for a [`SpriteLoader`].
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub mapping_url: String,
    pub sprites_url: String,
    pub preload: PreloadMode,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            mapping_url: DEFAULT_MAPPING_PATH.to_string(),
            sprites_url: DEFAULT_SPRITES_PATH.to_string(),
            preload: PreloadMode::Strict,
        }
    }
}

/// Fetches, caches and draws sprites.
#[derive(Debug)]
pub struct SpriteLoader<F> {
    fetcher: F,
    options: LoaderOptions,
    mapping: HashMap<String, String>,
    sprites: HashMap<String, Vec<SpriteRecord>>,
    images: HashMap<SpriteId, RgbaImage>,
    loaded: bool,
}

impl<F: Fetcher> SpriteLoader<F> {
    /// Create an empty loader. Nothing is fetched until [`init`](Self::init).
    pub fn new(fetcher: F, options: LoaderOptions) -> Self {
        Self {
            fetcher,
            options,
            mapping: HashMap::new(),
            sprites: HashMap::new(),
            images: HashMap::new(),
            loaded: false,
        }
    }

    /// Fetch metadata and preload images, reporting success as a boolean.
    ///
    /// Failures are logged. State fetched before the failing step is kept;
    /// rendering copes with it through fallbacks.
    pub async fn init(&mut self) -> bool {
        match self.try_init().await {
            Ok(()) => {
                log::info!(
                    "Loaded {} sprite(s) across {} type(s), {} image(s)",
                    self.sprites.values().map(Vec::len).sum::<usize>(),
                    self.sprites.len(),
                    self.images.len()
                );
                true
            }
            Err(e) => {
                log::error!("Sprite loading failed: {}", e);
                false
            }
        }
    }

    /// Fetch metadata and preload images, returning the first error.
    ///
    /// Records are appended to existing groups, so calling this twice keeps
    /// the records of the first call at the front of each group.
    pub async fn try_init(&mut self) -> Result<(), LoaderError> {
        let mapping: SpriteMappingResponse = self.fetch_json(&self.options.mapping_url).await?;
        self.mapping = mapping.mapping;

        let list: SpriteListResponse = self.fetch_json(&self.options.sprites_url).await?;
        for record in list.sprites {
            self.sprites
                .entry(record.sprite_type.clone())
                .or_default()
                .push(record);
        }

        self.preload_images().await?;
        self.loaded = true;
        Ok(())
    }

    /// Fetch and decode every referenced image concurrently.
    pub async fn preload_images(&mut self) -> Result<(), LoaderError> {
        let pending: Vec<(SpriteId, String)> = self
            .sprites
            .values()
            .flatten()
            .filter_map(|record| record.image_url().map(|url| (record.id, url.to_string())))
            .collect();

        log::debug!("Preloading {} image(s)", pending.len());

        let loads = pending
            .iter()
            .map(|(id, url)| load_image(&self.fetcher, *id, url));

        let loaded = match self.options.preload {
            PreloadMode::Strict => try_join_all(loads).await?,
            PreloadMode::Lenient => join_all(loads)
                .await
                .into_iter()
                .filter_map(|result| match result {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Skipping sprite image: {}", e);
                        None
                    }
                })
                .collect(),
        };

        self.images.extend(loaded);
        Ok(())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoaderError> {
        let bytes = self.fetcher.fetch(url).await?;
        serde_json::from_slice(&bytes).map_err(|source| LoaderError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

impl<F> SpriteLoader<F> {
    /// Draw the sprite for `sprite_type` into `rect`.
    ///
    /// Uses the image of the first record of that type. Falls back to a
    /// colored rectangle when the loader is not initialized, the type has no
    /// records, or the first record has no loaded image.
    pub fn render_sprite<S: Surface + ?Sized>(&self, surface: &mut S, sprite_type: &str, rect: Rect) {
        match self.image_for_type(sprite_type) {
            Some(image) => surface.draw_image(image, rect),
            None => render_fallback(surface, sprite_type, rect),
        }
    }

    fn image_for_type(&self, sprite_type: &str) -> Option<&RgbaImage> {
        if !self.loaded {
            return None;
        }
        let first = self.sprites.get(sprite_type)?.first()?;
        self.images.get(&first.id)
    }

    /// Sprite type mapped to a level symbol, if any.
    pub fn sprite_type_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.mapping
            .get(symbol)
            .map(String::as_str)
            .filter(|sprite_type| !sprite_type.is_empty())
    }

    /// Whether a full init has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Records of `sprite_type` in server order.
    pub fn sprites_for_type(&self, sprite_type: &str) -> &[SpriteRecord] {
        self.sprites
            .get(sprite_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known sprite types, sorted.
    pub fn sprite_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.sprites.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Loaded image of a sprite record.
    pub fn image(&self, id: SpriteId) -> Option<&RgbaImage> {
        self.images.get(&id)
    }

    pub fn mapping(&self) -> &HashMap<String, String> {
        &self.mapping
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }
}

/// Fill `rect` with the fallback color of `sprite_type`.
pub fn render_fallback<S: Surface + ?Sized>(surface: &mut S, sprite_type: &str, rect: Rect) {
    surface.fill_rect(fallback_color(sprite_type), rect);
}

async fn load_image<F: Fetcher>(
    fetcher: &F,
    id: SpriteId,
    url: &str,
) -> Result<(SpriteId, RgbaImage), LoaderError> {
    let bytes = fetcher
        .fetch(url)
        .await
        .map_err(|source| LoaderError::ImageFetch { id, source })?;
    let image = image::load_from_memory(&bytes).map_err(|source| LoaderError::Decode {
        id,
        url: url.to_string(),
        source,
    })?;
    Ok((id, image.to_rgba8()))
}
