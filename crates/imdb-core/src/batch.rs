//! Batch input handling
//!
//! Splits a comma-separated list of series names into individual queries.

/// Split a comma-separated list into trimmed, non-empty names.
///
/// # Examples
/// ```
/// use imdb_core::batch::split_batch;
///
/// assert_eq!(split_batch("Foo, Bar"), vec!["Foo", "Bar"]);
/// assert_eq!(split_batch(" , Dark,,"), vec!["Dark"]);
/// ```
pub fn split_batch(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
