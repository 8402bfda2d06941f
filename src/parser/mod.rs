//! Input parsing: barcode-versus-title classification and ISBN normalization.
//!
//! # Example
//!
//! ```
//! use bookshelf_core::parser::{classify, InputKind};
//!
//! match classify("9780134190440") {
//!     InputKind::Barcode(isbn) => assert_eq!(isbn, "9780134190440"),
//!     other => panic!("unexpected {other}"),
//! }
//! ```

mod input;
mod isbn;

pub use input::{InputKind, classify};
pub use isbn::{MIN_QUERY_CHARS, is_isbn_length, normalize_isbn};
