//! Where the dataset comes from: a file or piped stdin.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use herotable_seeker::{parse_dataset, Record, SeekerError};
use thiserror::Error;
use tracing::info;

/// Errors reading or parsing a dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("no dataset given and stdin is a terminal")]
    NoInput,

    #[error("invalid dataset in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: SeekerError,
    },
}

/// A place the raw dataset text can be read from.
pub trait DatasetSource {
    /// Human-readable name for messages.
    fn name(&self) -> String;

    /// Reads the whole dataset as text.
    fn read_text(&mut self) -> Result<String, SourceError>;
}

/// Dataset stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Reads from the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&mut self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            name: self.name(),
            source,
        })
    }
}

/// Dataset piped on stdin.
///
/// Refuses to block on an interactive terminal.
pub struct StdinSource<R: Read = io::Stdin> {
    reader: R,
    terminal: bool,
}

impl StdinSource<io::Stdin> {
    /// Reads the process's stdin.
    pub fn new() -> Self {
        let stdin = io::stdin();
        let terminal = stdin.is_terminal();
        StdinSource {
            reader: stdin,
            terminal,
        }
    }
}

impl Default for StdinSource<io::Stdin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> StdinSource<R> {
    /// Reads from `reader` as if it were piped stdin.
    pub fn with_reader(reader: R) -> Self {
        StdinSource {
            reader,
            terminal: false,
        }
    }
}

impl<R: Read> DatasetSource for StdinSource<R> {
    fn name(&self) -> String {
        "stdin".to_string()
    }

    fn read_text(&mut self) -> Result<String, SourceError> {
        if self.terminal {
            return Err(SourceError::NoInput);
        }
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .map_err(|source| SourceError::Read {
                name: "stdin".to_string(),
                source,
            })?;
        Ok(text)
    }
}

/// Picks the file source for `path`, or stdin when there is none.
pub fn source_for(path: Option<&Path>) -> Box<dyn DatasetSource> {
    match path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(StdinSource::new()),
    }
}

/// Reads and parses a dataset.
pub fn load_dataset(source: &mut dyn DatasetSource) -> Result<Vec<Record>, SourceError> {
    let text = source.read_text()?;
    let records = parse_dataset(&text).map_err(|source_err| SourceError::Parse {
        name: source.name(),
        source: source_err,
    })?;
    info!(source = %source.name(), records = records.len(), "dataset loaded");
    Ok(records)
}
