//! In-memory provider.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Note;
use crate::persistence::{NoteStore, StoreError};

/// Keeps the collection in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RwLock::new(notes),
        }
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.read().await.clone())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        *self.notes.write().await = notes.to_vec();
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
