//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note value used by store logic.
//! - Own the timestamp type and its fixed text form.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that never changes.
//! - Timestamps are second resolution, local time.

pub mod note;
pub mod timestamp;
