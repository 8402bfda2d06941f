//! External book-metadata providers.
//!
//! The reconciliation engine only sees [`MetadataProvider`], whose operations
//! distinguish "found" from "not found" and nothing else. Transport failures,
//! timeouts, bad statuses and malformed bodies are [`LookupError`]s that each
//! provider logs and converts to an empty result before returning.
//!
//! # Architecture
//!
//! - [`MetadataProvider`] - Async trait the engine depends on
//! - [`GoogleBooksProvider`] - Google Books volumes API implementation
//!
//! # Example
//!
//! ```no_run
//! use bookshelf_core::provider::{GoogleBooksProvider, MetadataProvider, DEFAULT_LOOKUP_TIMEOUT};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GoogleBooksProvider::new(std::env::var("APIKEY").ok(), DEFAULT_LOOKUP_TIMEOUT)?;
//! if let Some(book) = provider.lookup_by_identifier("9780134190440").await {
//!     println!("found {book}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod google_books;
mod http_client;

pub use error::LookupError;
pub use google_books::GoogleBooksProvider;
pub use http_client::{DEFAULT_LOOKUP_TIMEOUT, build_lookup_http_client};

use async_trait::async_trait;

use crate::book::BookRecord;

/// Number of candidates a title search asks for by default.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Source of book metadata.
///
/// # Object Safety
///
/// Uses `async_trait` so the engine can hold an `Arc<dyn MetadataProvider>`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the provider's name (e.g., `"google_books"`), for logging.
    fn name(&self) -> &str;

    /// Looks up one book by exact ISBN.
    ///
    /// Returns `None` when nothing matches or the lookup was unavailable. A
    /// returned record has `incomplete == false` and no `added_at`.
    async fn lookup_by_identifier(&self, isbn: &str) -> Option<BookRecord>;

    /// Searches by free text, returning at most `limit` ranked candidates.
    ///
    /// Candidates have `incomplete == false`, no `added_at`, and an empty
    /// `isbn` when the source has no identifier for that edition. An empty
    /// list covers both "no match" and "lookup unavailable".
    async fn lookup_by_text(&self, query: &str, limit: usize) -> Vec<BookRecord>;
}
