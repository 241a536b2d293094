use crate::{
    error::StoreError,
    models::{NewNote, Note, NoteChanges, NoteId},
    repository::NoteStore,
};

use std::sync::Arc;

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    /// Number of documents the store reported as deleted
    Deleted(u64),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Inserts the note and returns it as read back from the store.
    pub async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let id = self.store.insert(note).await?;
        tracing::debug!("created note {}", id);

        self.store
            .find_by_id(&id)
            .await?
            .ok_or(StoreError::MissingAfterInsert(id))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.store.find_all().await
    }

    /// Unparseable ids are reported the same way as missing documents.
    pub async fn get_one_note(&self, raw_id: &str) -> Result<Option<Note>, StoreError> {
        let Some(id) = NoteId::parse(raw_id) else {
            tracing::debug!("'{}' is not a valid note id", raw_id);
            return Ok(None);
        };

        self.store.find_by_id(&id).await
    }

    /// Merges `changes` into the stored note.
    ///
    /// Returns `None` when the note does not exist, without writing. An empty
    /// change set returns the stored note as is, also without writing. A
    /// write that modified nothing still counts as success and the note is
    /// read back.
    pub async fn update_note(
        &self,
        raw_id: &str,
        changes: NoteChanges,
    ) -> Result<Option<Note>, StoreError> {
        let Some(id) = NoteId::parse(raw_id) else {
            return Ok(None);
        };

        let Some(current) = self.store.find_by_id(&id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            tracing::debug!("no fields to update on note {}", id);
            return Ok(Some(current));
        }

        let modified = self.store.set_fields(&id, &changes).await?;
        tracing::debug!("updated note {} ({} modified)", id, modified);

        self.store.find_by_id(&id).await
    }

    pub async fn delete_note(&self, raw_id: &str) -> Result<DeleteOutcome, StoreError> {
        let Some(id) = NoteId::parse(raw_id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        if self.store.find_by_id(&id).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let deleted = self.store.delete_by_id(&id).await?;
        tracing::debug!("deleted note {} ({} removed)", id, deleted);

        Ok(DeleteOutcome::Deleted(deleted))
    }
}
