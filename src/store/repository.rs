//! Repository seam for record persistence.
//!
//! The reconciliation engine depends on this trait rather than on the JSON
//! file directly, so each action goes through one load and at most one save.

use crate::book::BookRecord;

use super::Result;

/// Whole-list persistence contract.
///
/// Implementations own the stored representation. Callers never keep a
/// reference into it: every mutation is load, change in memory, save.
pub trait RecordStore: Send + Sync {
    /// Returns every record, most recent first.
    fn load(&self) -> Result<Vec<BookRecord>>;

    /// Replaces the stored list with `records`.
    fn save(&self, records: &[BookRecord]) -> Result<()>;
}
