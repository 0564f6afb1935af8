//! Note persistence boundary.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the note store.
//! - Keep file format details out of store logic.
//!
//! # Invariants
//! - `save` replaces the persisted collection in full; there are no partial
//!   writes.
//! - A backend that has never been saved to loads as an empty collection.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::note::{NoteId, NoteRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json_file;

pub use json_file::{JsonFileStorage, DEFAULT_NOTES_FILE_NAME};

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failure for note load/save.
#[derive(Debug)]
pub enum StorageError {
    /// Backing file could not be read or written.
    Io(std::io::Error),
    /// Backing file content is not a valid note array.
    Json(serde_json::Error),
    /// Backing file parsed but violates a store invariant.
    InvalidData(String),
}

impl StorageError {
    pub(crate) fn duplicate_id(id: NoteId) -> Self {
        Self::InvalidData(format!("duplicate note id `{id}` in backing file"))
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed notes file: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Whole-collection persistence contract for notes.
pub trait NoteStorage {
    /// Loads every persisted record in stored order.
    fn load(&self) -> StorageResult<Vec<NoteRecord>>;
    /// Replaces the persisted collection with `records`, in order.
    fn save(&self, records: &[NoteRecord]) -> StorageResult<()>;
}

impl<S: NoteStorage + ?Sized> NoteStorage for &S {
    fn load(&self) -> StorageResult<Vec<NoteRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[NoteRecord]) -> StorageResult<()> {
        (**self).save(records)
    }
}
