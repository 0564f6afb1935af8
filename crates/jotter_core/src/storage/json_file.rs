//! JSON file backend for note persistence.
//!
//! # Responsibility
//! - Read and write the backing file as one JSON array of note records.
//! - Emit `notes_load`/`notes_save` logging events with duration and status.
//!
//! # Invariants
//! - A missing backing file loads as an empty collection.
//! - Every save rewrites the whole file in place. The write is not atomic: a
//!   crash mid-write can leave a truncated file behind.
//! - Log lines carry counts and paths only, never note text.
//!
//! # See also
//! - DESIGN.md (save atomicity)

use super::{NoteStorage, StorageError, StorageResult};
use crate::model::note::NoteRecord;
use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Backing file name used when the caller does not pick one.
pub const DEFAULT_NOTES_FILE_NAME: &str = "notes.json";

/// Note storage backed by a single JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a backend for `path`. Nothing is read or created yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_NOTES_FILE_NAME)
    }
}

impl NoteStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<Vec<NoteRecord>> {
        let started_at = Instant::now();

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            // Why: first run has no file yet; that is an empty store, not an
            // error, and nothing is created until the first save.
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=notes_load module=storage status=ok count=0 missing_file=true path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                let err = StorageError::from(err);
                log_failure("notes_load", &self.path, started_at, &err);
                return Err(err);
            }
        };

        match serde_json::from_slice::<Vec<NoteRecord>>(&bytes) {
            Ok(records) => {
                info!(
                    "event=notes_load module=storage status=ok count={} duration_ms={} path={}",
                    records.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display()
                );
                Ok(records)
            }
            Err(err) => {
                let err = StorageError::from(err);
                log_failure("notes_load", &self.path, started_at, &err);
                Err(err)
            }
        }
    }

    fn save(&self, records: &[NoteRecord]) -> StorageResult<()> {
        let started_at = Instant::now();

        // Why: pretty output keeps the file readable and hand-editable.
        let result = serde_json::to_vec_pretty(records)
            .map_err(StorageError::from)
            .and_then(|bytes| std::fs::write(&self.path, bytes).map_err(StorageError::from));

        match result {
            Ok(()) => {
                info!(
                    "event=notes_save module=storage status=ok count={} duration_ms={} path={}",
                    records.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => {
                log_failure("notes_save", &self.path, started_at, &err);
                Err(err)
            }
        }
    }
}

fn log_failure(event: &str, path: &Path, started_at: Instant, err: &StorageError) {
    error!(
        "event={} module=storage status=error duration_ms={} error_code={} path={} error={}",
        event,
        started_at.elapsed().as_millis(),
        err.code(),
        path.display(),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::{JsonFileStorage, DEFAULT_NOTES_FILE_NAME};
    use std::path::Path;

    #[test]
    fn default_points_at_fixed_file_name() {
        let storage = JsonFileStorage::default();
        assert_eq!(storage.path(), Path::new(DEFAULT_NOTES_FILE_NAME));
    }
}
