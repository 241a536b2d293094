use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::{
    error::StoreError,
    models::{NewNote, Note, NoteChanges, NoteId},
};

use super::NoteStore;

/// In-process stand-in for the MongoDB collection.
///
/// Keeps insertion order and counts every write so tests can assert when the
/// service skipped one.
#[derive(Default)]
pub struct MemoryRepository {
    notes: Mutex<Vec<Note>>,
    writes: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn note_count(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

#[async_trait]
impl NoteStore for MemoryRepository {
    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let id = NoteId::from(ObjectId::new());
        self.notes.lock().unwrap().push(Note {
            id,
            title: note.title,
            body: note.body,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.iter().find(|note| note.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn set_fields(&self, id: &NoteId, changes: &NoteChanges) -> Result<u64, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut notes = self.notes.lock().unwrap();
        let Some(note) = notes.iter_mut().find(|note| note.id == *id) else {
            return Ok(0);
        };

        let before = note.clone();
        if let Some(title) = &changes.title {
            note.title.clone_from(title);
        }
        if let Some(body) = &changes.body {
            note.body.clone_from(body);
        }
        Ok(u64::from(*note != before))
    }

    async fn delete_by_id(&self, id: &NoteId) -> Result<u64, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|note| note.id != *id);
        Ok(u64::try_from(before - notes.len()).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Misbehaviour injected by [`FaultyRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Inserts report an id but the document never shows up.
    DropInserts,
    /// Listing the collection fails.
    FailListing,
    /// A merge write lands, then the document disappears before the re-read.
    VanishAfterUpdate,
    /// Deletes report zero removed documents and keep the note.
    DeleteNothing,
}

/// [`MemoryRepository`] with one injected fault, for the paths a healthy
/// store never takes.
pub struct FaultyRepository {
    inner: MemoryRepository,
    fault: Fault,
}

impl FaultyRepository {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryRepository::new(),
            fault,
        }
    }

    pub const fn inner(&self) -> &MemoryRepository {
        &self.inner
    }
}

#[async_trait]
impl NoteStore for FaultyRepository {
    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError> {
        if self.fault == Fault::DropInserts {
            self.inner.writes.fetch_add(1, Ordering::SeqCst);
            return Ok(NoteId::from(ObjectId::new()));
        }
        self.inner.insert(note).await
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        if self.fault == Fault::FailListing {
            return Err(StoreError::UnexpectedId("listing unavailable".to_string()));
        }
        self.inner.find_all().await
    }

    async fn set_fields(&self, id: &NoteId, changes: &NoteChanges) -> Result<u64, StoreError> {
        let modified = self.inner.set_fields(id, changes).await?;
        if self.fault == Fault::VanishAfterUpdate {
            self.inner.notes.lock().unwrap().retain(|note| note.id != *id);
        }
        Ok(modified)
    }

    async fn delete_by_id(&self, id: &NoteId) -> Result<u64, StoreError> {
        if self.fault == Fault::DeleteNothing {
            self.inner.writes.fetch_add(1, Ordering::SeqCst);
            return Ok(0);
        }
        self.inner.delete_by_id(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
