//! Record store backed by a single JSON document.
//!
//! The document is an array of [`BookRecord`] objects, most recent first. It
//! is created as `[]` on first load, and every save replaces it atomically by
//! writing a sibling temporary file and renaming it over the original.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf_core::store::{JsonFileStore, RecordStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("livros.json");
//! let records = store.load()?;
//! println!("{} books on the shelf", records.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;

pub use error::StoreError;
pub use repository::RecordStore;

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::book::BookRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// File name used when no data file is configured.
pub const DEFAULT_DATA_FILE: &str = "livros.json";

/// [`RecordStore`] that keeps the whole list in one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `path`. Nothing touches the disk until the first load.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn create_empty(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&self.path, "[]").map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "Created empty record file");
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<BookRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.create_empty()?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let records: Vec<BookRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!(count = records.len(), "Loaded records");
        Ok(records)
    }

    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    fn save(&self, records: &[BookRecord]) -> Result<()> {
        let temp_path = self.temp_path();
        let file = fs::File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;

        let write_result = {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)
                .map_err(StoreError::from)
                .and_then(|()| writer.flush().map_err(|e| StoreError::io(&temp_path, e)))
        };
        if let Err(err) = write_result {
            // Drop the half-written temp file; the original stays intact.
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        debug!("Saved records");
        Ok(())
    }
}
