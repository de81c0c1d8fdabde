//! Document store trait definitions for testability and dependency injection.
//!
//! The tournament manager only ever talks to a [`DocumentStore`], so the
//! MongoDB-backed store used in production and the in-memory store used in
//! tests are interchangeable.

use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};
use thiserror::Error;

/// Errors raised by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver error
    #[error("Database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// Document could not be encoded as BSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// Stored document did not match the expected shape
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] mongodb::bson::de::Error),

    /// Store did not hand back an ObjectId for an inserted document
    #[error("Store returned a non-ObjectId identifier for collection {0}")]
    UnexpectedIdentifier(String),

    /// Update document used an operator the backend does not support
    #[error("Unsupported update operator: {0}")]
    UnsupportedOperator(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal document store contract: insert, find and update-by-filter.
///
/// Filters are BSON documents matched by top-level field equality. Updates
/// are BSON documents using the `$set` and `$addToSet` operators.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document and return its generated identifier
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId>;

    /// Insert documents in order and return their generated identifiers
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<Vec<ObjectId>>;

    /// Find all documents matching the filter, in insertion order
    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>>;

    /// Find the first document matching the filter
    async fn find_one(&self, collection: &str, filter: Document)
    -> StoreResult<Option<Document>>;

    /// Apply an update to the first matching document, returning the match count
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<u64>;

    /// Names of the collections currently present in the store
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}
