//! MongoDB implementation of [`DocumentStore`].

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, oid::ObjectId};

use super::store::{DocumentStore, StoreError, StoreResult};

/// Document store backed by a MongoDB database
#[derive(Clone)]
pub struct MongoStore {
    database: mongodb::Database,
}

impl MongoStore {
    pub fn new(database: mongodb::Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

fn object_id(collection: &str, id: &Bson) -> StoreResult<ObjectId> {
    id.as_object_id()
        .ok_or_else(|| StoreError::UnexpectedIdentifier(collection.to_string()))
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let result = self.collection(collection).insert_one(document).await?;
        object_id(collection, &result.inserted_id)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<Vec<ObjectId>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.collection(collection).insert_many(documents).await?;

        // inserted_ids is keyed by the position of each input document
        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        ids.iter()
            .map(|(_, id)| object_id(collection, id))
            .collect()
    }

    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<u64> {
        let result = self.collection(collection).update_one(filter, update).await?;
        Ok(result.matched_count)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }
}
