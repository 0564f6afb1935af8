//! Constructor-level configuration.
//!
//! # Responsibility
//! - Hold the backing file path and logging settings for one process.
//! - Provide the fixed defaults used by the command prompt.
//!
//! # Invariants
//! - No environment variables or flags are consulted.
//! - `log_dir` from `resolve_default` is absolute.

use crate::logging::default_log_level;
use crate::storage::{JsonFileStorage, DEFAULT_NOTES_FILE_NAME};
use std::path::{Path, PathBuf};

/// Log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = ".jotter/logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JotterConfig {
    /// Backing file for the note store.
    pub notes_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl JotterConfig {
    /// Defaults with relative paths anchored at `base_dir`.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            notes_path: base_dir.join(defaults.notes_path),
            log_dir: base_dir.join(defaults.log_dir),
            ..defaults
        }
    }

    /// Defaults anchored at the current working directory.
    pub fn resolve_default() -> std::io::Result<Self> {
        Ok(Self::with_base_dir(&std::env::current_dir()?))
    }

    /// Storage backend for `notes_path`.
    pub fn storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(self.notes_path.clone())
    }
}
