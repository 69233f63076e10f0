//! Note operations over an injected store.
//!
//! Every operation reloads the full collection. Mutations hold a write lock
//! across load, transform and save so that two requests in this process
//! cannot overwrite each other's changes. Reads take no lock.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use crate::domain::{NewNote, Note, NotePatch, note};
use crate::persistence::{NoteStore, StoreError};

#[derive(Clone, Debug)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    write_lock: Arc<Mutex<()>>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backing store's provider name.
    pub fn provider_name(&self) -> &'static str {
        self.store.provider_name()
    }

    /// Append a new note and persist the collection.
    #[instrument(skip(self, draft), fields(note_id = tracing::field::Empty))]
    pub async fn create(&self, draft: NewNote) -> Result<Note, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;

        let created = Note::new(draft);
        if let Some(id) = created.id() {
            tracing::Span::current().record("note_id", id);
        }
        notes.push(created.clone());
        self.store.save(&notes).await?;

        tracing::info!(name: "note.created", total = notes.len(), "Note created");
        Ok(created)
    }

    /// The whole collection in insertion order.
    pub async fn list(&self) -> Result<Vec<Note>, StoreError> {
        self.store.load().await
    }

    /// The first note with `id`, if any.
    pub async fn get(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let notes = self.store.load().await?;
        Ok(note::find(&notes, id).cloned())
    }

    /// Merge `patch` into the first note with `id`.
    ///
    /// Returns `None` without writing anything when no note matches.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;

        let Some(updated) = note::merge_into(&mut notes, id, patch) else {
            tracing::debug!("No note to update");
            return Ok(None);
        };
        self.store.save(&notes).await?;

        tracing::info!(name: "note.updated", "Note updated");
        Ok(Some(updated))
    }

    /// Remove every note with `id`, returning how many were removed.
    ///
    /// Nothing is written when the count is zero.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;

        let removed = note::remove_all(&mut notes, id);
        if removed == 0 {
            tracing::debug!("No note to delete");
            return Ok(0);
        }
        self.store.save(&notes).await?;

        tracing::info!(name: "note.deleted", removed, "Note deleted");
        Ok(removed)
    }
}
