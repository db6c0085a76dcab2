//! HTML parsers for IMDb pages
//!
//! This module contains parsers for extracting data from IMDb HTML pages:
//! - `search`: Parse the find (search results) page
//! - `series`: Parse a title detail page
//!
//! All markup-dependent lookups go through [`extract_field`] and
//! [`extract_all`] with the selectors in [`selectors`], so a change in the
//! site's structure only touches that table.

pub mod search;
pub mod series;

use scraper::{Html, Selector};

// Re-export main parsing functions
pub use search::{extract_title_id, parse_search_results};
pub use series::parse_series_detail;

/// Selectors matching the markup IMDb currently serves.
pub mod selectors {
    /// One entry per search result
    pub const SEARCH_ITEM: &str = "li.ipc-metadata-list-summary-item";

    /// Title link inside a search entry
    pub const SEARCH_TITLE_LINK: &str = "a.ipc-metadata-list-summary-item__t";

    pub const RATING: &[&str] =
        &[r#"[data-testid="hero-rating-bar__aggregate-rating__score"] span:first-child"#];

    pub const TITLE: &[&str] = &[
        r#"h1[data-testid="hero__pageTitle"] span"#,
        r#"h1[data-testid="hero__pageTitle"]"#,
    ];

    pub const GENRES: &[&str] = &[
        r#"[data-testid="genres"] .ipc-chip__text"#,
        r#"[data-testid="interests"] .ipc-chip__text"#,
    ];
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector, error = ?e, "invalid selector");
            None
        }
    }
}

/// Text of the first element matching `selector`, trimmed.
///
/// Returns `None` when nothing matches, the text is blank, or the selector
/// itself is invalid.
///
/// # Examples
/// ```
/// use imdb_core::parser::extract_field;
/// use scraper::Html;
///
/// let doc = Html::parse_document("<h1><span> Dark </span></h1>");
/// assert_eq!(extract_field(&doc, "h1 span"), Some("Dark".to_string()));
/// assert_eq!(extract_field(&doc, "h2"), None);
/// ```
pub fn extract_field(document: &Html, selector: &str) -> Option<String> {
    let selector = parse_selector(selector)?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Texts of every element matching `selector`, trimmed, without blanks or duplicates.
pub fn extract_all(document: &Html, selector: &str) -> Vec<String> {
    let mut values = Vec::new();
    let Some(selector) = parse_selector(selector) else {
        return values;
    };

    for el in document.select(&selector) {
        let text = el.text().collect::<String>().trim().to_string();
        if !text.is_empty() && !values.contains(&text) {
            values.push(text);
        }
    }

    values
}

/// First value produced by any selector in the list.
pub(crate) fn extract_first_of(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| extract_field(document, selector))
}

/// All values for the first selector in the list that matches anything.
pub(crate) fn extract_all_of(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector in selectors {
        let values = extract_all(document, selector);
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}
