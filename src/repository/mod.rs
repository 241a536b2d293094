mod mongo;

#[cfg(test)]
pub mod memory;

pub use mongo::MongoRepository;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{NewNote, Note, NoteChanges, NoteId},
};

/// Primitive operations against the notes collection.
///
/// Every method is exactly one round trip to the store; composing them into
/// the create/update/delete semantics is the job of `NoteService`.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Inserts a document and returns the id the store assigned to it.
    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, StoreError>;

    /// Returns every document in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    /// Merges the present fields of `changes` into the document.
    /// Returns the number of documents actually modified.
    async fn set_fields(&self, id: &NoteId, changes: &NoteChanges) -> Result<u64, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete_by_id(&self, id: &NoteId) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
