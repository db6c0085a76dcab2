//! Sequential lookup driver
//!
//! Each name is searched, fetched and (optionally) saved before the next one
//! starts, so a failure later in a batch never loses earlier rows.

use std::io::Write;

use imdb_core::types::NOT_AVAILABLE;
use imdb_core::{ImdbError, ImdbScraper, Lookup, SaveOutcome, SeriesRecord, SeriesStore};
use serde::Serialize;

use crate::cli::Cli;

const RULE_WIDTH: usize = 50;

/// Counts of what happened across all names
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Names that produced a record
    pub found: usize,
    /// Records appended to the spreadsheet
    pub saved: usize,
    /// Records skipped because their URL was already stored
    pub duplicates: usize,
    /// Names whose lookup or save failed
    pub failed: usize,
}

impl Summary {
    /// A run succeeds when some name produced a record and, if saving was
    /// requested, at least one record ended up in the spreadsheet.
    pub fn succeeded(&self, saving: bool) -> bool {
        if self.found == 0 {
            return false;
        }
        !saving || self.saved + self.duplicates > 0
    }
}

/// One line of `--json` output per name
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a SeriesRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<SaveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Problem<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Problem<'a> {
    Message(&'static str),
    Error(&'a ImdbError),
}

enum Failure<'a> {
    NoResults,
    Lookup(&'a ImdbError),
}

/// Run every lookup requested by `cli`, writing output to `out`.
///
/// Lookup and save failures are reported and counted, never returned.
///
/// # Errors
/// Only when the scraper cannot be built or `out` cannot be written.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<Summary> {
    let scraper = ImdbScraper::with_config(cli.client_config())
        .map_err(|e| anyhow::anyhow!("create scraper: {e}"))?;
    let store = cli.store();
    let mut summary = Summary::default();

    for name in cli.names() {
        if !cli.json {
            writeln!(out, "\nSearching IMDb for: '{}'...", name)?;
        }

        let lookup = match scraper.lookup_by_name(&name).await {
            Ok(Some(lookup)) => lookup,
            Ok(None) => {
                summary.failed += 1;
                tracing::warn!(name, "no search results");
                report_failure(out, cli.json, &name, Failure::NoResults)?;
                continue;
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(name, error = %e, "lookup failed");
                report_failure(out, cli.json, &name, Failure::Lookup(&e))?;
                continue;
            }
        };
        summary.found += 1;

        if !cli.json {
            print_candidates(out, &lookup)?;
            print_record(out, &lookup.record)?;
        }

        let saved = store.as_ref().map(|store| {
            let result = store.save(&lookup.record);
            match &result {
                Ok(SaveOutcome::Saved) => summary.saved += 1,
                Ok(SaveOutcome::AlreadyExists) => summary.duplicates += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(path = %store.path().display(), error = %e, "save failed");
                }
            }
            (store, result)
        });

        if cli.json {
            let (saved, error) = match &saved {
                Some((_, Ok(outcome))) => (Some(*outcome), None),
                Some((_, Err(e))) => (None, Some(Problem::Error(e))),
                None => (None, None),
            };
            let line = JsonLine {
                name: &name,
                record: Some(&lookup.record),
                saved,
                error,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else if let Some((store, result)) = &saved {
            print_save(out, store, &lookup.record, result)?;
        }
    }

    tracing::debug!(?summary, "run finished");
    Ok(summary)
}

fn report_failure<W: Write>(
    out: &mut W,
    json: bool,
    name: &str,
    failure: Failure<'_>,
) -> anyhow::Result<()> {
    if json {
        let error = match failure {
            Failure::NoResults => Problem::Message("No results found"),
            Failure::Lookup(e) => Problem::Error(e),
        };
        let line = JsonLine {
            name,
            record: None,
            saved: None,
            error: Some(error),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
        return Ok(());
    }

    match failure {
        Failure::NoResults => writeln!(out, "\n❌ No results found for '{}'", name)?,
        Failure::Lookup(e) => writeln!(
            out,
            "\n❌ Failed to get rating information for '{}': {}",
            name, e
        )?,
    }
    Ok(())
}

fn print_candidates<W: Write>(out: &mut W, lookup: &Lookup) -> std::io::Result<()> {
    writeln!(out, "\n🔍 Found {} results:", lookup.candidates.len())?;
    for (i, candidate) in lookup.candidates.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, candidate.title)?;
    }
    writeln!(out, "\nFetched rating for the first result.")
}

fn print_record<W: Write>(out: &mut W, record: &SeriesRecord) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let rating = if record.rating == NOT_AVAILABLE {
        record.rating.clone()
    } else {
        format!("{}/10", record.rating)
    };

    writeln!(out, "\n{rule}")?;
    writeln!(out, "📺 Title: {}", record.title)?;
    writeln!(out, "⭐ Rating: {}", rating)?;
    writeln!(out, "🎭 Genres: {}", record.genres)?;
    writeln!(out, "🔗 URL: {}", record.url)?;
    writeln!(out, "{rule}")
}

fn print_save<W: Write>(
    out: &mut W,
    store: &SeriesStore,
    record: &SeriesRecord,
    result: &imdb_core::Result<SaveOutcome>,
) -> std::io::Result<()> {
    match result {
        Ok(SaveOutcome::Saved) => writeln!(out, "💾 Saved to {}", store.path().display()),
        Ok(SaveOutcome::AlreadyExists) => writeln!(
            out,
            "ℹ️  '{}' is already in {}",
            record.title,
            store.path().display()
        ),
        Err(e) => writeln!(out, "❌ Failed to save '{}': {}", record.title, e),
    }
}
