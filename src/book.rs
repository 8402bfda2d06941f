//! The book record persisted in the catalog.
//!
//! Field names are Rust-side English; the serialized keys keep the wire names
//! used by the browser frontend and by existing `livros.json` documents.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel author used whenever no author is known.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Title used when the metadata source returns a volume without one.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Prefix of the title given to identifier lookups that found nothing.
pub const ISBN_PLACEHOLDER_PREFIX: &str = "ISBN: ";

/// A single cataloged book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// ISBN-10 or ISBN-13 digits; empty when unknown.
    #[serde(default)]
    pub isbn: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    /// Never empty; defaults to [`UNKNOWN_AUTHOR`].
    #[serde(
        rename = "autores",
        default = "unknown_authors",
        deserialize_with = "deserialize_authors"
    )]
    pub authors: Vec<String>,
    #[serde(rename = "editora", default)]
    pub publisher: String,
    /// Free-form date as reported by the source (`"2015"`, `"2015-06-01"`, ...).
    #[serde(rename = "dataPublicacao", default)]
    pub published_date: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    /// Page count, 0 when unknown.
    #[serde(rename = "paginas", default)]
    pub page_count: u32,
    #[serde(rename = "capa", default)]
    pub cover_url: String,
    #[serde(rename = "categorias", default)]
    pub categories: Vec<String>,
    /// Set at creation when metadata lookup failed or was bypassed.
    #[serde(rename = "incompleto", default)]
    pub incomplete: bool,
    /// Insertion time. Search candidates carry none.
    #[serde(
        rename = "dataAdicionado",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub added_at: Option<DateTime<Utc>>,
}

impl BookRecord {
    /// Creates a complete (non-placeholder) record with the given title and
    /// every other field empty.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            isbn: String::new(),
            title: title.into(),
            authors: unknown_authors(),
            publisher: String::new(),
            published_date: String::new(),
            description: String::new(),
            page_count: 0,
            cover_url: String::new(),
            categories: Vec::new(),
            incomplete: false,
            added_at: None,
        }
    }

    /// Placeholder for an identifier lookup that found nothing.
    #[must_use]
    pub fn isbn_placeholder(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            incomplete: true,
            ..Self::new(format!("{ISBN_PLACEHOLDER_PREFIX}{isbn}"))
        }
    }

    /// Placeholder for a title the user entered by hand.
    #[must_use]
    pub fn manual_placeholder(title: &str) -> Self {
        Self {
            incomplete: true,
            ..Self::new(title)
        }
    }

    /// Stamps the insertion time, replacing any value the caller supplied.
    #[must_use]
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.added_at = Some(now);
        self
    }

    /// Returns true when this record has the given non-empty ISBN.
    #[must_use]
    pub fn has_isbn(&self, isbn: &str) -> bool {
        !isbn.is_empty() && self.isbn == isbn
    }

    /// Case-insensitive comparison of trimmed titles.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        fold_title(&self.title) == fold_title(title)
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.authors.join(", "))?;
        if !self.isbn.is_empty() {
            write!(f, " [{}]", self.isbn)?;
        }
        if self.incomplete {
            write!(f, " (incomplete)")?;
        }
        Ok(())
    }
}

fn fold_title(title: &str) -> String {
    title.trim().to_lowercase()
}

fn unknown_authors() -> Vec<String> {
    vec![UNKNOWN_AUTHOR.to_string()]
}

/// Treats `null`, a missing list, and an empty list alike.
fn deserialize_authors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let authors: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(authors
        .filter(|list| !list.is_empty())
        .unwrap_or_else(unknown_authors))
}
