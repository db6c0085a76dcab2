//! IMDb TV Series Ratings Core Library
//!
//! This crate looks up a TV series on IMDb by free-text name and keeps the
//! results in an `.xlsx` spreadsheet.
//!
//! # Features
//! - Search for TV titles by name (first five listing entries)
//! - Extract title, aggregate rating and up to three genres from a title page
//! - Append records to a spreadsheet, de-duplicated by URL
//! - Split comma-separated batch input

pub mod batch;
pub mod client;
pub mod error;
pub mod lookup;
pub mod parser;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, ImdbClient};
pub use error::{ImdbError, Result};
pub use lookup::ImdbScraper;
pub use store::{SaveOutcome, SeriesStore};
pub use types::{Lookup, SearchResult, SeriesRecord};
