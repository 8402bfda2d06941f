//! Error types for catalog operations.

use thiserror::Error;

use crate::store::StoreError;

use super::dedup::DuplicateKey;

/// Errors returned by [`Catalog`](super::Catalog) operations.
///
/// Lookup failures never appear here: they are absorbed by the provider and
/// surface as a placeholder record or an empty candidate list.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Identifier or title was malformed or empty.
    #[error("invalid input '{input}': {reason}")]
    InvalidInput {
        /// The input as received
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// A record with the same identifier or title is already cataloged.
    #[error("book already cataloged ({key})")]
    DuplicateRecord {
        /// What collided
        key: DuplicateKey,
    },

    /// Removal index outside the current list.
    #[error("no book at position {index}; the shelf holds {len}")]
    NotFound {
        /// Requested position
        index: i64,
        /// List length at the time of the request
        len: usize,
    },

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Creates an `InvalidInput` error for an identifier of the wrong length.
    #[must_use]
    pub fn invalid_isbn(input: &str, digits: &str) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason: format!(
                "an ISBN has 10 or 13 digits, found {}",
                digits.len()
            ),
        }
    }

    /// Creates an `InvalidInput` error for a blank title.
    #[must_use]
    pub fn empty_title(input: &str) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason: "title is required".to_string(),
        }
    }
}
