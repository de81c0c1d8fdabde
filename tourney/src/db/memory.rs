//! In-memory implementation of [`DocumentStore`].
//!
//! Supports exactly what the tournament manager needs: top-level equality
//! filters plus the `$set` and `$addToSet` update operators.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use tokio::sync::RwLock;

use super::store::{DocumentStore, StoreError, StoreResult};

/// Process-local document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection (0 if it does not exist)
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

/// Missing fields compare equal to `null`, matching MongoDB query semantics.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key).unwrap_or(&Bson::Null) == expected)
}

fn with_identifier(document: Document) -> (ObjectId, Document) {
    if let Some(Bson::ObjectId(id)) = document.get("_id") {
        return (*id, document);
    }

    let id = ObjectId::new();
    let mut stored = doc! { "_id": id };
    stored.extend(document);
    (id, stored)
}

fn apply_update(document: &mut Document, update: &Document) -> StoreResult<()> {
    for (operator, fields) in update {
        let fields = fields
            .as_document()
            .ok_or_else(|| StoreError::UnsupportedOperator(operator.clone()))?;

        match operator.as_str() {
            "$set" => {
                for (key, value) in fields {
                    document.insert(key.clone(), value.clone());
                }
            }
            "$addToSet" => {
                for (key, value) in fields {
                    match document.get_mut(key) {
                        Some(Bson::Array(items)) => {
                            if !items.contains(value) {
                                items.push(value.clone());
                            }
                        }
                        None | Some(Bson::Null) => {
                            document.insert(key.clone(), Bson::Array(vec![value.clone()]));
                        }
                        Some(_) => {
                            return Err(StoreError::UnsupportedOperator(format!(
                                "$addToSet on non-array field {key}"
                            )));
                        }
                    }
                }
            }
            other => return Err(StoreError::UnsupportedOperator(other.to_string())),
        }
    }

    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let (id, stored) = with_identifier(document);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<Vec<ObjectId>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut collections = self.collections.write().await;
        let target = collections.entry(collection.to_string()).or_default();

        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            let (id, stored) = with_identifier(document);
            target.push(stored);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches(document, &filter))
                .cloned()
        }))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(0);
        };

        // Apply to a copy so a rejected operator leaves the document untouched
        let mut updated = document.clone();
        apply_update(&mut updated, &update)?;
        *document = updated;
        Ok(1)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
