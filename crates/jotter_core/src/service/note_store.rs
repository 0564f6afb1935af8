//! Note store use-cases.
//!
//! # Responsibility
//! - Hold the ordered in-memory note collection for one backing storage.
//! - Provide create/list/find/view/update/delete entry points.
//! - Persist the full collection after every mutation.
//!
//! # Invariants
//! - Notes stay in insertion order; updates never reorder.
//! - Note ids are unique within the collection, checked on load and on create.
//! - Read-only operations never touch storage.
//! - Not-found operations leave memory and storage untouched.
//!
//! # See also
//! - DESIGN.md (id generation and failed-save decisions)

use crate::model::note::{generate_note_id, Note, NoteId, NoteRecord};
use crate::storage::{NoteStorage, StorageError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Target note does not exist.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Storage(StorageError),
}

impl StoreError {
    /// Whether this error only reports a missing note.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Ordered note collection over a whole-collection storage backend.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    notes: Vec<Note>,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Opens a store and loads every persisted note.
    ///
    /// # Errors
    /// - Any storage read or parse failure.
    /// - `StorageError::InvalidData` when two records share an id.
    pub fn open(storage: S) -> StoreResult<Self> {
        let records = storage.load()?;
        // Why: lookups stop at the first match, so a duplicate id would make
        // the second note unreachable; refuse the file instead.
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                warn!("event=store_open module=service status=error error_code=duplicate_id");
                return Err(StorageError::duplicate_id(record.id).into());
            }
        }

        let notes: Vec<Note> = records.into_iter().map(Note::from_record).collect();
        info!("event=store_open module=service status=ok count={}", notes.len());
        Ok(Self { storage, notes })
    }

    /// Writes the full collection to storage, replacing prior contents.
    pub fn save(&self) -> StoreResult<()> {
        let records: Vec<NoteRecord> = self.notes.iter().map(Note::serialize).collect();
        self.storage.save(&records)?;
        Ok(())
    }

    /// Creates a note at the end of the collection and persists.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StoreResult<&Note> {
        let id = self.unused_id();
        self.notes.push(Note::with_id(id, title, body));
        self.save()?;
        info!(
            "event=note_create module=service status=ok count={}",
            self.notes.len()
        );
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Iterates all notes in store order.
    pub fn list(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter()
    }

    /// Returns the first note with `id`, if any.
    pub fn find_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Returns the note for display, or `NotFound`.
    pub fn view(&self, id: NoteId) -> StoreResult<&Note> {
        self.find_by_id(id).ok_or(StoreError::NotFound(id))
    }

    /// Applies a partial update to one note and persists.
    ///
    /// Empty or absent values keep the current field.
    pub fn update(
        &mut self,
        id: NoteId,
        title: Option<&str>,
        body: Option<&str>,
    ) -> StoreResult<&Note> {
        let index = self.position(id)?;
        self.notes[index].update(title, body);
        self.save()?;
        info!("event=note_update module=service status=ok");
        Ok(&self.notes[index])
    }

    /// Removes the first note with `id`, persists, and returns it.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<Note> {
        let index = self.position(id)?;
        let removed = self.notes.remove(index);
        self.save()?;
        info!(
            "event=note_delete module=service status=ok count={}",
            self.notes.len()
        );
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn position(&self, id: NoteId) -> StoreResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id() == id)
            .ok_or_else(|| {
                info!("event=note_lookup module=service status=not_found");
                StoreError::NotFound(id)
            })
    }

    fn unused_id(&self) -> NoteId {
        // Why: random ids make collisions rare, not impossible; re-draw so
        // uniqueness holds for every note currently held.
        loop {
            let candidate = generate_note_id();
            if self.find_by_id(candidate).is_none() {
                return candidate;
            }
        }
    }
}
