//! HTTP client for IMDb
//!
//! This module provides a thin client that sends every request with a fixed
//! browser-like header set and a fixed timeout. Requests are never retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, ACCEPT_LANGUAGE, REFERER};
use url::Url;

use crate::error::{ImdbError, Result};

/// Base URL for IMDb
pub const IMDB_BASE_URL: &str = "https://www.imdb.com";

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate, br";

const DEFAULT_REFERER: &str = "https://www.imdb.com/";

/// Configuration for the IMDb client and scraper
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root that search and detail paths are resolved against
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// Pause before each detail-page request in milliseconds (default: 1000)
    pub detail_delay_ms: u64,
    /// Number of search listing entries considered (default: 5)
    pub max_results: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: IMDB_BASE_URL.to_string(),
            timeout_secs: 10,
            detail_delay_ms: 1000,
            max_results: 5,
        }
    }
}

impl ClientConfig {
    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }
}

/// HTTP client for IMDb
pub struct ImdbClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ImdbClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `ImdbError::InvalidUrl` - `base_url` is not an absolute URL
    /// - `ImdbError::HttpError` - the HTTP client cannot be built
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ImdbError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static(DEFAULT_ACCEPT_ENCODING),
        );
        headers.insert(REFERER, HeaderValue::from_static(DEFAULT_REFERER));

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Site root used to resolve relative links
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or absolute URL against the site root
    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch HTML content from a URL with a single GET.
    ///
    /// # Errors
    /// - `ImdbError::NotFound` - Server returned 404
    /// - `ImdbError::RateLimited` - Server returned 429
    /// - `ImdbError::HttpError` - Network error, timeout or any other non-2xx status
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ImdbError::NotFound(url.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ImdbError::RateLimited);
        }

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}
