//! Bookshelf Core Library
//!
//! This library provides the core functionality for the bookshelf tool, a
//! personal book catalog fed by barcode scans, typed ISBNs and title searches
//! against the Google Books API, and persisted to a single JSON document.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`book`] - The persisted book record
//! - [`parser`] - Barcode-versus-title classification, ISBN normalization
//! - [`provider`] - External metadata lookup (Google Books)
//! - [`store`] - JSON file record store
//! - [`catalog`] - Reconciliation engine: lookup, dedup, placeholders, removal
//! - [`api`] - axum HTTP API and static frontend serving

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod book;
pub mod catalog;
pub mod parser;
pub mod provider;
pub mod store;
pub(crate) mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use api::{AppState, build_router};
pub use book::BookRecord;
pub use catalog::{Catalog, CatalogError, DuplicateKey, SearchOutcome};
pub use parser::{InputKind, classify};
pub use provider::{GoogleBooksProvider, LookupError, MetadataProvider};
pub use store::{JsonFileStore, RecordStore, StoreError};
