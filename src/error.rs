//! Error types.
//!
//! "No type could be determined" is never an error: the engine reports it
//! as `Ok(None)`.  Errors are reserved for collaborator failures (the
//! index is missing or unreadable) and for caller-contract violations at
//! the command boundary.

use thiserror::Error;

use crate::config::ConfigError;

/// A failure of the symbol index backing the collaborators.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("symbol index has not been loaded")]
    NotLoaded,
    #[error("symbol index is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read symbol index {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse symbol index: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;

/// A failure of the `deduce` command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The caller supplied an unusable combination of arguments.
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
