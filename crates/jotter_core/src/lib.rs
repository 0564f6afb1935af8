//! Core domain logic for Jotter.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::JotterConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteRecord};
pub use model::timestamp::{Timestamp, TimestampParseError};
pub use service::note_store::{NoteStore, StoreError, StoreResult};
pub use storage::{JsonFileStorage, NoteStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
