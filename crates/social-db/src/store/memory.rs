//! In-memory document store
//!
//! Used for development and tests. A single lock guards all collections,
//! which makes batches trivially atomic.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{
    apply_updates, Collection, Document, FieldUpdate, Fields, Query, WriteBatch, WriteOp,
};
use social_core::events::DocumentChange;
use social_core::traits::{ChangePublisher, DocumentStore, RepoResult};
use social_core::value_objects::DocumentId;
use social_core::DomainError;

use super::{noop_publisher, publish_changes};

type CollectionMap = BTreeMap<DocumentId, Fields>;

/// In-memory implementation of DocumentStore
#[derive(Clone)]
pub struct MemoryDocumentStore {
    data: Arc<RwLock<HashMap<Collection, CollectionMap>>>,
    publisher: Arc<dyn ChangePublisher>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    /// Create an empty store that publishes nowhere
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            publisher: noop_publisher(),
        }
    }

    /// Publish committed changes to the given publisher
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn ChangePublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: Collection) -> usize {
        self.data.read().get(&collection).map_or(0, BTreeMap::len)
    }

    /// Apply ops under the write lock, undoing everything on the first failure
    fn apply(&self, ops: Vec<WriteOp>) -> RepoResult<Vec<DocumentChange>> {
        let mut data = self.data.write();
        let mut undo: Vec<(Collection, DocumentId, Option<Fields>)> = Vec::with_capacity(ops.len());
        let mut changes = Vec::with_capacity(ops.len());

        for op in ops {
            match apply_op(&mut data, op, &mut undo) {
                Ok(Some(change)) => changes.push(change),
                Ok(None) => {}
                Err(e) => {
                    for (collection, id, previous) in undo.into_iter().rev() {
                        let docs = data.entry(collection).or_default();
                        match previous {
                            Some(fields) => {
                                docs.insert(id, fields);
                            }
                            None => {
                                docs.remove(&id);
                            }
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(changes)
    }

    async fn write(&self, ops: Vec<WriteOp>) -> RepoResult<Vec<DocumentChange>> {
        let changes = self.apply(ops)?;
        publish_changes(self.publisher.as_ref(), &changes).await;
        Ok(changes)
    }
}

fn apply_op(
    data: &mut HashMap<Collection, CollectionMap>,
    op: WriteOp,
    undo: &mut Vec<(Collection, DocumentId, Option<Fields>)>,
) -> RepoResult<Option<DocumentChange>> {
    match op {
        WriteOp::Set {
            collection,
            id,
            fields,
        } => {
            let previous = data
                .entry(collection)
                .or_default()
                .insert(id.clone(), fields.clone());
            undo.push((collection, id.clone(), previous.clone()));
            Ok(Some(DocumentChange::written(collection, id, previous, fields)))
        }
        WriteOp::Update {
            collection,
            id,
            updates,
        } => {
            let docs = data.entry(collection).or_default();
            let current = docs.get_mut(&id).ok_or_else(|| DomainError::DocumentNotFound {
                collection,
                id: id.to_string(),
            })?;
            let before = current.clone();
            apply_updates(current, &updates);
            let after = current.clone();
            undo.push((collection, id.clone(), Some(before.clone())));
            Ok(Some(DocumentChange::updated(collection, id, before, after)))
        }
        WriteOp::Delete { collection, id } => {
            let removed = data.entry(collection).or_default().remove(&id);
            Ok(removed.map(|before| {
                undo.push((collection, id.clone(), Some(before.clone())));
                DocumentChange::deleted(collection, id, before)
            }))
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &DocumentId) -> RepoResult<Option<Document>> {
        Ok(self
            .data
            .read()
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id.clone(), fields.clone())))
    }

    async fn query(&self, query: &Query) -> RepoResult<Vec<Document>> {
        let docs: Vec<Document> = self
            .data
            .read()
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| query.matches(fields))
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(query.apply(docs))
    }

    #[instrument(skip(self, fields))]
    async fn add(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId> {
        let id = DocumentId::generate();
        self.write(vec![WriteOp::Set {
            collection,
            id: id.clone(),
            fields,
        }])
        .await?;
        Ok(id)
    }

    #[instrument(skip(self, fields))]
    async fn set(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()> {
        self.write(vec![WriteOp::Set {
            collection,
            id: id.clone(),
            fields,
        }])
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        updates: &[FieldUpdate],
    ) -> RepoResult<Document> {
        let changes = self
            .write(vec![WriteOp::Update {
                collection,
                id: id.clone(),
                updates: updates.to_vec(),
            }])
            .await?;

        changes
            .into_iter()
            .next()
            .and_then(|c| c.after)
            .map(|fields| Document::new(id.clone(), fields))
            .ok_or_else(|| DomainError::InternalError("update produced no change".to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()> {
        self.write(vec![WriteOp::Delete {
            collection,
            id: id.clone(),
        }])
        .await?;
        Ok(())
    }

    #[instrument(skip(self, batch), fields(ops = batch.len()))]
    async fn commit(&self, batch: WriteBatch) -> RepoResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.write(batch.into_ops()).await?;
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
