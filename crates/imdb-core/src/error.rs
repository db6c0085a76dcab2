//! Error types for the IMDb ratings library
//!
//! This module defines all error types used throughout the library.
//! ImdbError implements Serialize so failures can be reported in JSON output.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for lookup and spreadsheet operations
#[derive(Error, Debug)]
pub enum ImdbError {
    /// HTTP request failed (network error, timeout or non-2xx status)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Search query was empty or whitespace-only
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Filesystem error while reading or replacing the spreadsheet
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Existing spreadsheet could not be read
    #[error("Failed to read spreadsheet: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    /// Existing spreadsheet holds content a rewrite would lose
    #[error("Spreadsheet content cannot be preserved: {0}")]
    Unpreservable(String),

    /// Spreadsheet could not be rendered
    #[error("Failed to write spreadsheet: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),
}

impl From<url::ParseError> for ImdbError {
    fn from(err: url::ParseError) -> Self {
        ImdbError::InvalidUrl(err.to_string())
    }
}

/// Serialize ImdbError as its display string
impl Serialize for ImdbError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, ImdbError>;
