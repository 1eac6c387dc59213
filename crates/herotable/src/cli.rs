//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use herotable_seeker::PageSize;

use crate::output::OutputMode;

/// Search, sort and page through a character dataset.
///
/// The dataset is a JSON array of records. Without a path (or with `-`) it is
/// read from stdin.
#[derive(Debug, Parser)]
#[command(name = "herotable")]
#[command(version)]
#[command(about = "Search, sort and page through a character dataset")]
pub struct Cli {
    /// Dataset file (JSON array). Reads stdin when omitted or `-`.
    pub dataset: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "HEROTABLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Case-insensitive substring to match against the search field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Column to sort by, as a field path or a column title
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Rows per page, or `all`
    #[arg(long, value_name = "N|all")]
    pub page_size: Option<PageSize>,

    /// Page to show (1-based)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// Read table commands from stdin after showing the first page
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Dataset path, `None` meaning stdin.
    pub fn dataset_path(&self) -> Option<&PathBuf> {
        self.dataset.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
