//! Search results parser for IMDb
//!
//! Parses HTML from the find page to extract candidate titles.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{ImdbError, Result};
use crate::types::SearchResult;

use super::selectors;

/// Extract the IMDb title identifier from a URL or path.
///
/// # Examples
/// ```
/// use imdb_core::parser::extract_title_id;
///
/// assert_eq!(
///     extract_title_id("/title/tt0903747/?ref_=fn_tt_tt_1"),
///     Some("tt0903747".to_string())
/// );
/// assert_eq!(extract_title_id("/name/nm0000001/"), None);
/// ```
pub fn extract_title_id(url: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"/title/(tt\d+)").ok()?;
    let caps = re.captures(url)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Parse search candidates from IMDb find page HTML.
///
/// Only the first `limit` listing entries are considered; entries without a
/// title link are skipped. Links are made absolute against `base`, and links
/// that carry a title id are rewritten to `{base}/title/{id}/`.
///
/// # Errors
/// Returns `ImdbError::ParseError` if a listing selector is invalid.
pub fn parse_search_results(html: &str, base: &Url, limit: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let item_selector = Selector::parse(selectors::SEARCH_ITEM)
        .map_err(|e| ImdbError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let link_selector = Selector::parse(selectors::SEARCH_TITLE_LINK)
        .map_err(|e| ImdbError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let mut results = Vec::new();

    for item in document.select(&item_selector).take(limit) {
        let Some(link) = item.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let path = href.split('?').next().unwrap_or(href);
        let title_id = extract_title_id(path);
        let joined = match &title_id {
            Some(id) => base.join(&format!("/title/{}/", id)),
            None => base.join(path),
        };

        match joined {
            Ok(url) => results.push(SearchResult {
                title,
                url: url.to_string(),
                title_id,
            }),
            Err(e) => tracing::warn!(href, error = %e, "skipping search entry with bad link"),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.imdb.com").unwrap()
    }

    fn item(href: &str, title: &str) -> String {
        format!(
            r#"<li class="ipc-metadata-list-summary-item">
                 <a class="ipc-metadata-list-summary-item__t" href="{href}">{title}</a>
               </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", items.concat())
    }

    #[test]
    fn test_extract_title_id_basic() {
        assert_eq!(extract_title_id("/title/tt0903747/"), Some("tt0903747".to_string()));
        assert_eq!(
            extract_title_id("https://www.imdb.com/title/tt2861424/episodes"),
            Some("tt2861424".to_string())
        );
    }

    #[test]
    fn test_extract_title_id_invalid() {
        assert_eq!(extract_title_id("/title/"), None);
        assert_eq!(extract_title_id("/title/ttabc/"), None);
        assert_eq!(extract_title_id(""), None);
    }

    #[test]
    fn test_parse_empty_html() {
        let results = parse_search_results("<html><body></body></html>", &base(), 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_strips_query_and_makes_absolute() {
        let html = page(&[item("/title/tt0903747/?ref_=fn_tt_tt_1", " Breaking Bad ")]);
        let results = parse_search_results(&html, &base(), 5).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Breaking Bad");
        assert_eq!(results[0].url, "https://www.imdb.com/title/tt0903747/");
        assert_eq!(results[0].title_id.as_deref(), Some("tt0903747"));
    }

    #[test]
    fn test_parse_keeps_page_order_and_limit() {
        let items: Vec<String> = (1..=7)
            .map(|i| item(&format!("/title/tt000000{i}/"), &format!("Show {i}")))
            .collect();
        let results = parse_search_results(&page(&items), &base(), 5).unwrap();

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Show 1", "Show 2", "Show 3", "Show 4", "Show 5"]);
    }

    #[test]
    fn test_parse_skips_entries_without_link() {
        let html = page(&[
            r#"<li class="ipc-metadata-list-summary-item"><span>No link</span></li>"#.to_string(),
            item("/title/tt0475784/", "Westworld"),
        ]);
        let results = parse_search_results(&html, &base(), 5).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Westworld");
    }

    #[test]
    fn test_link_without_title_id_is_joined_as_is() {
        let html = page(&[item("/list/ls000000001/?ref_=x", "A List")]);
        let results = parse_search_results(&html, &base(), 5).unwrap();

        assert_eq!(results[0].url, "https://www.imdb.com/list/ls000000001/");
        assert_eq!(results[0].title_id, None);
    }
}
