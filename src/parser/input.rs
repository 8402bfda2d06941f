//! Classification of raw user input into a barcode or a title query.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::isbn::MIN_QUERY_CHARS;

/// Barcode scanners emit a bare run of 10 or 13 digits.
#[allow(clippy::expect_used)]
static BARCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{10}|\d{13})$").expect("barcode regex is valid") // Static pattern, safe to panic
});

/// What a piece of raw input looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Nothing but whitespace.
    Empty,
    /// 10 or 13 decimal digits, ready for an identifier lookup.
    Barcode(String),
    /// Free text long enough to search by title.
    TitleQuery(String),
    /// Free text too short to search yet; callers should wait for more input.
    Partial(String),
}

impl InputKind {
    /// Returns the trimmed text carried by the variant, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Barcode(value) | Self::TitleQuery(value) | Self::Partial(value) => Some(value),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Barcode(value) => write!(f, "barcode {value}"),
            Self::TitleQuery(value) => write!(f, "title query '{value}'"),
            Self::Partial(value) => write!(f, "partial input '{value}'"),
        }
    }
}

/// Classifies raw input.
///
/// Whitespace is trimmed first. A value made only of ASCII digits with exactly
/// 10 or 13 of them is a [`InputKind::Barcode`]; any other value longer than
/// two characters is a [`InputKind::TitleQuery`].
///
/// # Example
///
/// ```
/// use bookshelf_core::parser::{classify, InputKind};
///
/// assert_eq!(classify(" 9780134190440 "), InputKind::Barcode("9780134190440".into()));
/// assert_eq!(classify("Dune"), InputKind::TitleQuery("Dune".into()));
/// assert_eq!(classify("12345"), InputKind::TitleQuery("12345".into()));
/// assert_eq!(classify("Du"), InputKind::Partial("Du".into()));
/// assert_eq!(classify("   "), InputKind::Empty);
/// ```
#[must_use]
pub fn classify(raw: &str) -> InputKind {
    let trimmed = raw.trim();
    let kind = if trimmed.is_empty() {
        InputKind::Empty
    } else if BARCODE_PATTERN.is_match(trimmed) {
        InputKind::Barcode(trimmed.to_string())
    } else if trimmed.chars().count() >= MIN_QUERY_CHARS {
        InputKind::TitleQuery(trimmed.to_string())
    } else {
        InputKind::Partial(trimmed.to_string())
    };
    trace!(%kind, "classified input");
    kind
}
