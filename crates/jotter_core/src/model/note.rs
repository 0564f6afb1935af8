//! Note domain model.
//!
//! # Responsibility
//! - Define the in-memory note value and its persisted record shape.
//! - Own the update policy for title/body and the timestamp lifecycle.
//!
//! # Invariants
//! - `id` is fixed at construction and never changes afterwards.
//! - `created_at` is fixed at construction; `updated_at >= created_at` for
//!   notes built by this module.
//! - `update` never writes an empty title or body.

use crate::model::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one note, unique within its store.
///
/// Kept as a plain integer so the backing file stays human-editable.
pub type NoteId = u64;

/// Ids are capped at 53 bits so every JSON reader can represent them exactly.
pub const NOTE_ID_MAX: NoteId = (1 << 53) - 1;

/// Draws a fresh random note id from a v4 UUID.
///
/// Uniqueness against existing notes is enforced by the store, which
/// re-draws on collision.
pub fn generate_note_id() -> NoteId {
    // Why: the low half of a v4 UUID is random apart from the two variant
    // bits at its top, which the 53-bit mask drops.
    let uuid = Uuid::new_v4();
    let mut low = [0_u8; 8];
    low.copy_from_slice(&uuid.as_bytes()[8..]);
    u64::from_be_bytes(low) & NOTE_ID_MAX
}

/// Persisted representation of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One title/body note with identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: String,
    body: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Note {
    /// Creates a note with a freshly generated id.
    ///
    /// Empty title or body is accepted.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(generate_note_id(), title, body)
    }

    /// Creates a note with a caller-chosen id; both timestamps are set to now.
    pub fn with_id(id: NoteId, title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            title: title.into(),
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a note from its persisted record.
    ///
    /// Stored id and timestamps are authoritative and kept as-is.
    pub fn from_record(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// `None` and `Some("")` both mean "keep current". `updated_at` is
    /// refreshed even when neither field changes.
    pub fn update(&mut self, title: Option<&str>, body: Option<&str>) {
        if let Some(title) = title.filter(|value| !value.is_empty()) {
            self.title = title.to_string();
        }
        if let Some(body) = body.filter(|value| !value.is_empty()) {
            self.body = body.to_string();
        }
        // Why: a clock stepped backwards, or a loaded file written on a
        // skewed clock, must not move `updated_at` into the past.
        self.updated_at = Timestamp::now().max(self.updated_at);
    }

    /// Produces the persisted record for this note.
    pub fn serialize(&self) -> NoteRecord {
        NoteRecord {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_note_id, Note, NOTE_ID_MAX};

    #[test]
    fn generated_ids_fit_in_53_bits() {
        for _ in 0..64 {
            assert!(generate_note_id() <= NOTE_ID_MAX);
        }
    }

    #[test]
    fn update_with_empty_strings_keeps_fields() {
        let mut note = Note::with_id(7, "title", "body");
        note.update(Some(""), Some(""));
        assert_eq!(note.title(), "title");
        assert_eq!(note.body(), "body");
    }
}
