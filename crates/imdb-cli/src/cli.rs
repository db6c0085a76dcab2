use std::path::PathBuf;

use clap::Parser;
use imdb_core::batch::split_batch;
use imdb_core::client::IMDB_BASE_URL;
use imdb_core::store::DEFAULT_FILE_NAME;
use imdb_core::{ClientConfig, SeriesStore};

#[derive(Debug, Parser)]
#[command(name = "imdb-ratings", author, version, about = "IMDb TV series rating checker")]
pub struct Cli {
    /// Name of the TV series to search (multiple words are joined with spaces).
    #[arg(required = true, num_args = 1..)]
    pub series: Vec<String>,

    /// Treat the input as a comma-separated list of series names.
    #[arg(short, long)]
    pub multiple: bool,

    /// Spreadsheet to append results to (implies --save).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the result of a single lookup (always on with --multiple).
    #[arg(short, long)]
    pub save: bool,

    /// Print each record as a JSON line instead of a framed summary.
    #[arg(long)]
    pub json: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Delay before each detail page request (politeness).
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    #[arg(long, env = "IMDB_BASE_URL", default_value = IMDB_BASE_URL, hide = true)]
    pub base_url: String,
}

impl Cli {
    /// Positional words joined into one query.
    pub fn query(&self) -> String {
        self.series.join(" ")
    }

    /// Series names to look up, in order.
    pub fn names(&self) -> Vec<String> {
        if self.multiple {
            split_batch(&self.query())
        } else {
            vec![self.query()]
        }
    }

    /// Whether results are written to a spreadsheet.
    pub fn saves(&self) -> bool {
        self.save || self.multiple || self.output.is_some()
    }

    /// Store to append to, when saving is enabled.
    pub fn store(&self) -> Option<SeriesStore> {
        if !self.saves() {
            return None;
        }
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
        Some(SeriesStore::new(path))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            detail_delay_ms: self.delay_ms,
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("imdb-ratings").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_words_are_joined() {
        let cli = parse(&["breaking", "bad"]);
        assert_eq!(cli.names(), vec!["breaking bad"]);
        assert!(!cli.saves());
        assert!(cli.store().is_none());
    }

    #[test]
    fn test_multiple_splits_on_commas() {
        let cli = parse(&["--multiple", "Foo,", "Bar"]);
        assert_eq!(cli.names(), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_multiple_saves_to_default_file() {
        let cli = parse(&["-m", "Foo, Bar"]);
        let store = cli.store().unwrap();
        assert_eq!(store.path(), std::path::Path::new(DEFAULT_FILE_NAME));
    }

    #[test]
    fn test_output_implies_save() {
        let cli = parse(&["-o", "shows.xlsx", "Dark"]);
        assert_eq!(
            cli.store().unwrap().path(),
            std::path::Path::new("shows.xlsx")
        );
    }

    #[test]
    fn test_save_flag_in_single_mode() {
        let cli = parse(&["--save", "Dark"]);
        assert!(cli.store().is_some());
    }

    #[test]
    fn test_series_is_required() {
        assert!(Cli::try_parse_from(["imdb-ratings"]).is_err());
    }

    #[test]
    fn test_client_config_overrides() {
        let cli = parse(&["--timeout-secs", "3", "--delay-ms", "0", "Dark"]);
        let config = cli.client_config();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.detail_delay_ms, 0);
        assert_eq!(config.max_results, 5);
    }
}
