//! IMDb TV Series Ratings command-line front end
//!
//! Parses arguments, runs each lookup in turn and prints a summary per
//! series. Results are appended to a spreadsheet when saving is enabled.

pub mod cli;
pub mod logging;
pub mod run;

pub use cli::Cli;
pub use run::{run, Summary};
