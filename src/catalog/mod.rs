//! Reconciliation engine: lookup, dedup and fallback across insertion paths.
//!
//! Every operation reads a fresh snapshot from the [`RecordStore`], applies one
//! change, and writes the whole list back. Nothing is cached between calls, so
//! the engine itself is stateless. The only suspension point is the provider
//! call made by [`Catalog::add_by_identifier`] and [`Catalog::search`].
//!
//! # Insertion paths
//!
//! - [`Catalog::add_by_identifier`] - ISBN lookup, placeholder on a miss
//! - [`Catalog::search`] + [`Catalog::add_selected`] - title search, then pick
//! - [`Catalog::add_manual`] - bare title, always a placeholder
//!
//! New records go to the head of the list. Concurrent removals by position
//! are not coordinated; two overlapping requests can remove different books
//! than intended.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bookshelf_core::catalog::Catalog;
//! use bookshelf_core::provider::{DEFAULT_LOOKUP_TIMEOUT, GoogleBooksProvider};
//! use bookshelf_core::store::JsonFileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::new(
//!     Arc::new(JsonFileStore::new("livros.json")),
//!     Arc::new(GoogleBooksProvider::new(None, DEFAULT_LOOKUP_TIMEOUT)?),
//! );
//! let book = catalog.add_by_identifier("978-0-13-419044-0").await?;
//! assert!(book.incomplete);
//! # Ok(())
//! # }
//! ```

mod dedup;
mod error;

pub use dedup::DuplicateKey;
pub use error::CatalogError;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::book::BookRecord;
use crate::parser::{MIN_QUERY_CHARS, is_isbn_length, normalize_isbn};
use crate::provider::{DEFAULT_SEARCH_LIMIT, MetadataProvider};
use crate::store::RecordStore;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Outcome of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query shorter than the minimum; no lookup was made.
    TooShort,
    /// Ranked candidates, possibly empty.
    Candidates(Vec<BookRecord>),
}

impl SearchOutcome {
    /// Candidates found, empty for [`SearchOutcome::TooShort`].
    #[must_use]
    pub fn candidates(&self) -> &[BookRecord] {
        match self {
            Self::TooShort => &[],
            Self::Candidates(list) => list,
        }
    }

    /// Consumes the outcome, yielding owned candidates.
    #[must_use]
    pub fn into_candidates(self) -> Vec<BookRecord> {
        match self {
            Self::TooShort => Vec::new(),
            Self::Candidates(list) => list,
        }
    }

    /// True when a search ran and found nothing, so the caller should offer
    /// a manual entry.
    #[must_use]
    pub fn offers_manual_entry(&self) -> bool {
        matches!(self, Self::Candidates(list) if list.is_empty())
    }
}

/// The book catalog.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn MetadataProvider>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Creates a catalog over a store and a metadata provider.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { store, provider }
    }

    /// Returns every record, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the document cannot be read.
    pub fn list(&self) -> Result<Vec<BookRecord>> {
        Ok(self.store.load()?)
    }

    /// Adds a book by ISBN.
    ///
    /// Every non-digit character of `raw` is dropped first, so hyphenated and
    /// spaced forms are accepted. A lookup miss still inserts a placeholder
    /// record flagged as incomplete.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] unless 10 or 13 digits remain
    /// - [`CatalogError::DuplicateRecord`] if the ISBN is already cataloged
    /// - [`CatalogError::Store`] on load or save failure
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn add_by_identifier(&self, raw: &str) -> Result<BookRecord> {
        let isbn = normalize_isbn(raw);
        if !is_isbn_length(&isbn) {
            return Err(CatalogError::invalid_isbn(raw, &isbn));
        }

        let records = self.store.load()?;
        reject_duplicate(&records, DuplicateKey::Isbn(isbn.clone()))?;

        let record = match self.provider.lookup_by_identifier(&isbn).await {
            Some(found) => {
                debug!(isbn = %isbn, title = %found.title, "Identifier lookup hit");
                BookRecord {
                    isbn: isbn.clone(),
                    incomplete: false,
                    ..found
                }
            }
            None => {
                debug!(isbn = %isbn, "Identifier lookup missed, using placeholder");
                BookRecord::isbn_placeholder(&isbn)
            }
        };

        self.insert_at_head(records, record)
    }

    /// Searches the provider by title.
    ///
    /// Queries shorter than three characters after trimming return
    /// [`SearchOutcome::TooShort`] without a lookup. Lookup failures look the
    /// same as "no match".
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            debug!("Query too short to search");
            return SearchOutcome::TooShort;
        }

        let candidates = self
            .provider
            .lookup_by_text(query, DEFAULT_SEARCH_LIMIT)
            .await;
        debug!(count = candidates.len(), "Search returned candidates");
        SearchOutcome::Candidates(candidates)
    }

    /// Adds a candidate picked from [`Catalog::search`] results.
    ///
    /// A non-empty `isbn` is reduced to its digits, so the stored value is the
    /// one the identifier path compares against. The rest of the candidate is
    /// stored as given apart from `added_at`, which is always replaced with the
    /// current time.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if the title is blank
    /// - [`CatalogError::DuplicateRecord`] on an ISBN match, or on a title
    ///   match when the candidate has no ISBN
    /// - [`CatalogError::Store`] on load or save failure
    #[instrument(skip(self, candidate), fields(title = %candidate.title, isbn = %candidate.isbn))]
    pub fn add_selected(&self, mut candidate: BookRecord) -> Result<BookRecord> {
        if candidate.title.trim().is_empty() {
            return Err(CatalogError::empty_title(&candidate.title));
        }
        if !candidate.isbn.trim().is_empty() {
            candidate.isbn = normalize_isbn(&candidate.isbn);
        }

        let records = self.store.load()?;
        reject_duplicate(&records, DuplicateKey::for_candidate(&candidate))?;

        self.insert_at_head(records, candidate)
    }

    /// Adds a title typed by hand as an incomplete record.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if the title is blank
    /// - [`CatalogError::DuplicateRecord`] if any record has the same title,
    ///   ignoring case and surrounding whitespace
    /// - [`CatalogError::Store`] on load or save failure
    #[instrument(skip(self))]
    pub fn add_manual(&self, title: &str) -> Result<BookRecord> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::empty_title(title));
        }

        let records = self.store.load()?;
        reject_duplicate(&records, DuplicateKey::Title(trimmed.to_string()))?;

        self.insert_at_head(records, BookRecord::manual_placeholder(trimmed))
    }

    /// Removes the record at `index` in the current list and returns it.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if `index` is negative or past the end;
    ///   the store is left untouched
    /// - [`CatalogError::Store`] on load or save failure
    #[instrument(skip(self))]
    pub fn remove(&self, index: i64) -> Result<BookRecord> {
        let mut records = self.store.load()?;
        let len = records.len();
        let position = usize::try_from(index)
            .ok()
            .filter(|position| *position < len)
            .ok_or(CatalogError::NotFound { index, len })?;

        let removed = records.remove(position);
        self.store.save(&records)?;
        info!(index, title = %removed.title, remaining = records.len(), "Removed book");
        Ok(removed)
    }

    fn insert_at_head(&self, mut records: Vec<BookRecord>, record: BookRecord) -> Result<BookRecord> {
        let record = record.stamped(Utc::now());
        records.insert(0, record.clone());
        self.store.save(&records)?;
        info!(
            title = %record.title,
            isbn = %record.isbn,
            incomplete = record.incomplete,
            total = records.len(),
            "Added book"
        );
        Ok(record)
    }
}

fn reject_duplicate(records: &[BookRecord], key: DuplicateKey) -> Result<()> {
    if let Some(existing) = key.find_in(records) {
        debug!(%key, existing = %existing.title, "Rejected duplicate");
        return Err(CatalogError::DuplicateRecord { key });
    }
    Ok(())
}
