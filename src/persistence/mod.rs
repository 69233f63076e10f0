//! Persistence of the note collection.
//!
//! The whole collection is the unit of storage: every [`NoteStore::load`]
//! reads all notes and every [`NoteStore::save`] replaces all of them.
//!
//! # Providers
//!
//! - [`FileStore`] - pretty-printed JSON array in a single file (default)
//! - [`MemoryStore`] - process-local copy, lost on exit

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::Note;

pub mod providers;

pub use providers::{FileStore, MemoryStore};

/// Errors that can occur while loading or saving the collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The notes file exists but could not be read.
    #[error("failed to read notes file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The notes file (or its temporary sibling) could not be written.
    #[error("failed to write notes file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The notes file does not hold a JSON array of notes.
    #[error("notes file {path} is not a valid note collection: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Storage backend for the note collection.
#[async_trait]
pub trait NoteStore: Send + Sync + std::fmt::Debug {
    /// Load the full collection. A store that was never written loads as empty.
    async fn load(&self) -> Result<Vec<Note>, StoreError>;

    /// Replace the persisted collection with `notes`.
    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;

    /// Short provider name for logs and health output.
    fn provider_name(&self) -> &'static str;
}
