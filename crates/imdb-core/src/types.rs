//! Data types for the IMDb ratings library
//!
//! This module contains the records passed between the lookup client,
//! the spreadsheet store and the command-line driver.

use serde::{Deserialize, Serialize};

/// Placeholder for a rating or genre list that could not be located
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a title that could not be located
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Maximum number of genre tags kept in a record
pub const MAX_GENRES: usize = 3;

/// Search candidate from the IMDb find page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title as listed
    pub title: String,
    /// Absolute URL of the title's detail page
    pub url: String,
    /// IMDb identifier (e.g. `tt0903747`), if the link carried one
    pub title_id: Option<String>,
}

/// Detail record extracted from a series page
///
/// `url` is the de-duplication key used by the spreadsheet store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub title: String,
    /// Aggregate rating as shown on the page (e.g. "9.5"), or `N/A`
    pub rating: String,
    /// Up to three genres joined with ", ", or `N/A`
    pub genres: String,
    pub url: String,
}

impl SeriesRecord {
    /// Cells in spreadsheet column order.
    pub fn cells(&self) -> [&str; 4] {
        [&self.title, &self.rating, &self.genres, &self.url]
    }
}

/// Outcome of a name lookup: the candidates considered and the chosen record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lookup {
    /// Candidates in page order; the record is always taken from the first
    pub candidates: Vec<SearchResult>,
    pub record: SeriesRecord,
}

/// Join genre tags into the stored form.
///
/// Only the first [`MAX_GENRES`] tags are kept. An empty list yields `N/A`.
///
/// # Examples
/// ```
/// use imdb_core::types::join_genres;
///
/// let genres = vec!["Crime".to_string(), "Drama".to_string()];
/// assert_eq!(join_genres(&genres), "Crime, Drama");
/// assert_eq!(join_genres(&[]), "N/A");
/// ```
pub fn join_genres(genres: &[String]) -> String {
    if genres.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    genres
        .iter()
        .take(MAX_GENRES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
