//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage calls into use-case level APIs.
//! - Keep the command prompt decoupled from file format details.

pub mod note_store;
