use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Document, doc},
};

use crate::{
    config::StoreConfig,
    error::StoreError,
    models::{NewNote, Note, NoteChanges, NoteId},
};

use super::NoteStore;

pub struct MongoRepository {
    client: Client,
    database: String,
    collection: Collection<Note>,
}

impl MongoRepository {
    pub async fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let collection = client
            .database(&config.database)
            .collection::<Note>(&config.collection);

        tracing::info!(
            "Using collection '{}' of database '{}'",
            config.collection,
            config.database
        );

        Ok(Self {
            client,
            database: config.database.clone(),
            collection,
        })
    }

    /// Handle on the connection pool, used to close it on process exit.
    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

fn by_id(id: &NoteId) -> Document {
    let oid = *id.as_object_id();
    doc! { "_id": oid }
}

#[async_trait]
impl NoteStore for MongoRepository {
    async fn insert(&self, note: NewNote) -> Result<NoteId, StoreError> {
        let result = self
            .collection
            .clone_with_type::<NewNote>()
            .insert_one(note)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(NoteId::from)
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn set_fields(&self, id: &NoteId, changes: &NoteChanges) -> Result<u64, StoreError> {
        let result = self
            .collection
            .update_one(by_id(id), changes.to_set_document())
            .await?;

        Ok(result.modified_count)
    }

    async fn delete_by_id(&self, id: &NoteId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(by_id(id)).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
