use serde::{Deserialize, Serialize};

use super::{Collection, FieldUpdate, Fields};
use crate::value_objects::DocumentId;

/// One write inside an atomic batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteOp {
    /// Create or overwrite a document
    Set {
        collection: Collection,
        id: DocumentId,
        fields: Fields,
    },
    /// Update an existing document (the batch fails if it is missing)
    Update {
        collection: Collection,
        id: DocumentId,
        updates: Vec<FieldUpdate>,
    },
    /// Delete a document (missing documents are skipped)
    Delete {
        collection: Collection,
        id: DocumentId,
    },
}

impl WriteOp {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Set { collection, .. }
            | Self::Update { collection, .. }
            | Self::Delete { collection, .. } => *collection,
        }
    }

    pub fn id(&self) -> &DocumentId {
        match self {
            Self::Set { id, .. } | Self::Update { id, .. } | Self::Delete { id, .. } => id,
        }
    }
}

/// A set of writes committed atomically: all or none are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: Collection, id: DocumentId, fields: Fields) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection,
            id,
            fields,
        });
        self
    }

    pub fn update(
        &mut self,
        collection: Collection,
        id: DocumentId,
        updates: Vec<FieldUpdate>,
    ) -> &mut Self {
        self.ops.push(WriteOp::Update {
            collection,
            id,
            updates,
        });
        self
    }

    pub fn delete(&mut self, collection: Collection, id: DocumentId) -> &mut Self {
        self.ops.push(WriteOp::Delete { collection, id });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
