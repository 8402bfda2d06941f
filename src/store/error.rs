//! Error types for record store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving the record document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, creating, or replacing the document failed.
    #[error("cannot access record file '{}': {source}", path.display())]
    Io {
        /// The document path
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not a JSON array of records.
    #[error(
        "record file '{}' is not a valid record list: {source}\n  Suggestion: Fix or move the file aside; it was left untouched",
        path.display()
    )]
    Malformed {
        /// The document path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized (should not occur for well-formed records).
    #[error("cannot serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
