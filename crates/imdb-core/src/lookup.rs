//! Main IMDb lookup API
//!
//! This module combines the HTTP client with the parsers into the two-stage
//! lookup: search by free-text name, then extract the first candidate's
//! detail page.

use std::time::Duration;

use tokio::time::sleep;

use crate::client::{ClientConfig, ImdbClient};
use crate::error::{ImdbError, Result};
use crate::parser::{parse_search_results, parse_series_detail};
use crate::types::{Lookup, SearchResult, SeriesRecord};

/// Main lookup API for IMDb TV series
///
/// # Example
/// ```no_run
/// use imdb_core::ImdbScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = ImdbScraper::new()?;
///
///     if let Some(lookup) = scraper.lookup_by_name("Breaking Bad").await? {
///         println!("{} - {}/10", lookup.record.title, lookup.record.rating);
///     }
///
///     Ok(())
/// }
/// ```
pub struct ImdbScraper {
    client: ImdbClient,
    detail_delay: Duration,
    max_results: usize,
}

impl ImdbScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = ImdbClient::with_config(&config)?;
        Ok(Self {
            client,
            detail_delay: config.detail_delay(),
            max_results: config.max_results,
        })
    }

    /// Search for TV titles by name.
    ///
    /// Sends one request restricted to TV-type titles and returns up to
    /// `max_results` candidates in page order. An empty vector means the
    /// site listed nothing.
    ///
    /// # Errors
    /// * `ImdbError::EmptyQuery` if query is empty or whitespace-only
    /// * any network, status or parse error from the request
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ImdbError::EmptyQuery);
        }

        let mut url = self.client.resolve("/find/")?;
        url.query_pairs_mut()
            .append_pair("q", trimmed)
            .append_pair("s", "tt")
            .append_pair("ttype", "tv");

        let html = self.client.fetch(&url).await?;
        let results = parse_search_results(&html, self.client.base_url(), self.max_results)?;

        tracing::info!(query = trimmed, count = results.len(), "search finished");
        Ok(results)
    }

    /// Fetch and parse a series detail page.
    ///
    /// Waits the configured delay first. Fields missing from the page become
    /// sentinel values; only a failed request is an error.
    pub async fn fetch_detail(&self, url: &str) -> Result<SeriesRecord> {
        let url = self.client.resolve(url)?;

        if !self.detail_delay.is_zero() {
            sleep(self.detail_delay).await;
        }

        let html = self.client.fetch(&url).await?;
        let record = parse_series_detail(&html, url.as_str())?;

        tracing::info!(title = %record.title, rating = %record.rating, "detail fetched");
        Ok(record)
    }

    /// Look a series up by name.
    ///
    /// Always takes the first search candidate; there is no disambiguation.
    ///
    /// # Returns
    /// * `Ok(None)` if the search listed no candidates
    /// * `Ok(Some(Lookup))` with all candidates and the first one's record
    pub async fn lookup_by_name(&self, name: &str) -> Result<Option<Lookup>> {
        let candidates = self.search(name).await?;

        let Some(first) = candidates.first() else {
            return Ok(None);
        };

        let record = self.fetch_detail(&first.url).await?;
        Ok(Some(Lookup { candidates, record }))
    }
}
