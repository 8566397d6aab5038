//! Document store port
//!
//! A collection/document database with single-document writes, equality
//! queries, and atomic multi-document batches. Implementations publish a
//! [`DocumentChange`](crate::events::DocumentChange) for every document a
//! committed write touched.

use async_trait::async_trait;

use super::RepoResult;
use crate::document::{Collection, Document, FieldUpdate, Fields, Query, WriteBatch};
use crate::value_objects::DocumentId;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document
    async fn get(&self, collection: Collection, id: &DocumentId) -> RepoResult<Option<Document>>;

    /// Run a query
    async fn query(&self, query: &Query) -> RepoResult<Vec<Document>>;

    /// Insert a document under a freshly generated id
    async fn add(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId>;

    /// Create or overwrite a document
    async fn set(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()>;

    /// Apply field updates to an existing document and return the new version.
    ///
    /// Fails with `DocumentNotFound` when the document does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        updates: &[FieldUpdate],
    ) -> RepoResult<Document>;

    /// Delete a document. Deleting a missing document is a no-op.
    async fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()>;

    /// Apply every write in the batch atomically
    async fn commit(&self, batch: WriteBatch) -> RepoResult<()>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
