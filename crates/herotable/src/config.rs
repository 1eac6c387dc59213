//! Table configuration: YAML file, then command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use herotable_seeker::{Dir, FieldPath, PageSize, SortSpec, DEFAULT_WINDOW};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

/// Widest a text-table cell gets before it is truncated.
pub const DEFAULT_MAX_CELL_WIDTH: usize = 28;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("max_cell_width must be at least 2, got {0}")]
    CellWidth(usize),
}

/// Settings for one table session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: PageSize,
    pub sort: SortSpec,
    pub search_field: FieldPath,
    pub window: usize,
    pub max_cell_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: PageSize::default(),
            sort: SortSpec::default(),
            search_field: FieldPath::parse("name"),
            window: DEFAULT_WINDOW,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }
}

impl Config {
    /// Reads a YAML config file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml(&text).map_err(|err| match err {
            ConfigError::Yaml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parses YAML config text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Config, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()
    }

    fn validate(self) -> Result<Config, ConfigError> {
        if self.max_cell_width < 2 {
            return Err(ConfigError::CellWidth(self.max_cell_width));
        }
        Ok(self)
    }

    /// Applies command-line flags on top of the file settings.
    ///
    /// `--desc` without `--sort` flips the configured column to descending.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(size) = cli.page_size {
            self.page_size = size;
        }
        if let Some(column) = &cli.sort {
            self.sort = SortSpec::asc(column.as_str());
        }
        if cli.desc {
            self.sort.dir = Dir::Desc;
        }
    }
}
