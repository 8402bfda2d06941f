//! Duplicate detection across insertion paths.
//!
//! - identifier path: ISBN only
//! - manual path: case-insensitive trimmed title only
//! - search selection: ISBN when the candidate has one, otherwise title

use std::fmt;

use crate::book::BookRecord;

/// The value two records collided on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateKey {
    /// Same non-empty ISBN.
    Isbn(String),
    /// Same title, compared case-insensitively after trimming.
    Title(String),
}

impl DuplicateKey {
    /// Key used when adding a search candidate.
    #[must_use]
    pub fn for_candidate(candidate: &BookRecord) -> Self {
        let isbn = candidate.isbn.trim();
        if isbn.is_empty() {
            Self::Title(candidate.title.trim().to_string())
        } else {
            Self::Isbn(isbn.to_string())
        }
    }

    /// Returns true when `record` collides on this key.
    #[must_use]
    pub fn matches(&self, record: &BookRecord) -> bool {
        match self {
            Self::Isbn(isbn) => record.has_isbn(isbn),
            Self::Title(title) => record.has_title(title),
        }
    }

    /// Returns the first record in `records` colliding on this key.
    #[must_use]
    pub fn find_in<'a>(&self, records: &'a [BookRecord]) -> Option<&'a BookRecord> {
        records.iter().find(|record| self.matches(record))
    }
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isbn(isbn) => write!(f, "ISBN {isbn}"),
            Self::Title(title) => write!(f, "title '{title}'"),
        }
    }
}
