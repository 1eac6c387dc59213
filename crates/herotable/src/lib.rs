//! The `herotable` command: load a character dataset, then search, sort and
//! page through it from the terminal.
//!
//! The table logic lives in [`herotable_seeker`]. This crate adds the
//! surfaces around it:
//!
//! - [`source`]: dataset from a file or piped stdin
//! - [`config`]: YAML settings with command-line overrides
//! - [`output`]: text table, JSON, YAML and CSV rendering
//! - [`repl`]: line commands mapped onto table events

pub mod cli;
pub mod config;
pub mod output;
pub mod repl;
pub mod source;

use anyhow::{Context, Result};
use herotable_seeker::{Record, Schema, SeekerError, Session, SortSpec};
use tracing::info;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use output::{OutputError, OutputMode, TableStyle};
pub use source::{DatasetSource, SourceError};

/// Builds the session for `records` from the merged settings and the
/// one-shot command-line requests (search term, starting page).
pub fn build_session(records: Vec<Record>, config: &Config, cli: &Cli) -> Result<Session> {
    let schema = Schema::heroes().search_on(config.search_field.clone());
    let sort = resolve_sort(&schema, &config.sort)?;
    let mut session = Session::new(records)
        .with_schema(schema)
        .with_sort(sort)
        .with_page_size(config.page_size)
        .with_window(config.window);

    if let Some(term) = &cli.search {
        session.set_search_term(term.as_str());
    }
    if let Some(page) = cli.page {
        session
            .go_to_page(page)
            .with_context(|| format!("cannot show page {page}"))?;
    }
    Ok(session)
}

/// Maps a sort column given as a title onto its field path.
///
/// Unknown names are kept as field paths; display-only columns are refused.
fn resolve_sort(schema: &Schema, sort: &SortSpec) -> Result<SortSpec, SeekerError> {
    match schema.find(&sort.column.to_string()) {
        Some(column) if !column.sortable => {
            Err(SeekerError::UnsortableColumn(sort.column.to_string()))
        }
        Some(column) => Ok(SortSpec::new(column.path.clone(), sort.dir)),
        None => Ok(sort.clone()),
    }
}

/// Loads the configuration named on the command line, if any, and applies
/// the flag overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!(path = %path.display(), "config loaded");
            config
        }
        None => Config::default(),
    };
    config.apply_cli(cli);
    Ok(config)
}
