//! Fetching bytes from the sprite server
//!
//! The loader is generic over [`Fetcher`], so it can be driven by the
//! reqwest-backed [`HttpFetcher`] or by an in-memory fetcher in tests.

use reqwest::{Client, Url};
use thiserror::Error;

/// Error type for fetch failures
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed or resolved against the base URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Transport error (connection refused, TLS, body read)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Source of raw bytes addressed by URL.
///
/// URLs may be absolute or relative; how relative URLs are resolved is up to
/// the implementation.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP fetcher resolving relative URLs against a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the server at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a fetcher that reuses an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `url` against the base URL. Absolute URLs are returned as-is.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.base_url.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resolved = self.resolve(url)?;
        log::debug!("GET {}", resolved);

        let http_err = |source| FetchError::Http {
            url: resolved.to_string(),
            source,
        };
        let response = self
            .client
            .get(resolved.clone())
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: resolved.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(http_err)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let fetcher = HttpFetcher::new("http://localhost:8000").unwrap();
        let url = fetcher.resolve("/api/sprites/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/sprites/");
    }

    #[test]
    fn test_resolve_media_path_under_prefix() {
        let fetcher = HttpFetcher::new("http://example.com/game/").unwrap();
        let url = fetcher.resolve("media/sprites/a.png").unwrap();
        assert_eq!(url.as_str(), "http://example.com/game/media/sprites/a.png");
    }

    #[test]
    fn test_resolve_absolute_url_passes_through() {
        let fetcher = HttpFetcher::new("http://localhost:8000").unwrap();
        let url = fetcher.resolve("https://cdn.example.com/x.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/x.png");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpFetcher::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }
}
