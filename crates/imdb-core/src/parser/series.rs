//! Series detail parser for IMDb
//!
//! Parses HTML from a title page to extract the rating, title and genres.
//! Missing fields degrade to sentinel values instead of failing.

use scraper::Html;

use crate::error::Result;
use crate::types::{join_genres, SeriesRecord, NOT_AVAILABLE, UNKNOWN_TITLE};

use super::{extract_all_of, extract_first_of, selectors};

/// Parse a series record from IMDb title page HTML.
///
/// # Arguments
/// * `html` - Raw HTML content of the title page
/// * `url` - The page URL, stored as the record's de-duplication key
pub fn parse_series_detail(html: &str, url: &str) -> Result<SeriesRecord> {
    let document = Html::parse_document(html);

    let rating = extract_first_of(&document, selectors::RATING).unwrap_or_else(|| {
        tracing::warn!(url, "rating not found");
        NOT_AVAILABLE.to_string()
    });

    let title = extract_first_of(&document, selectors::TITLE).unwrap_or_else(|| {
        tracing::warn!(url, "title not found");
        UNKNOWN_TITLE.to_string()
    });

    let genres = join_genres(&extract_genres(&document));

    Ok(SeriesRecord {
        title,
        rating,
        genres,
        url: url.to_string(),
    })
}

fn extract_genres(document: &Html) -> Vec<String> {
    extract_all_of(document, selectors::GENRES)
}
