//! Document change events
//!
//! Every committed write produces one event per touched document. Events
//! are delivered to the trigger worker, which derives follow-up writes
//! from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{timestamp, Collection, Fields};
use crate::value_objects::DocumentId;

/// What happened to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A single document change with before/after snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChange {
    /// Unique per change, used to skip redelivered events
    pub event_id: String,
    pub collection: Collection,
    pub document_id: DocumentId,
    pub kind: ChangeKind,
    pub before: Option<Fields>,
    pub after: Option<Fields>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl DocumentChange {
    fn new(
        collection: Collection,
        document_id: DocumentId,
        kind: ChangeKind,
        before: Option<Fields>,
        after: Option<Fields>,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            collection,
            document_id,
            kind,
            before,
            after,
            timestamp: timestamp::now(),
        }
    }

    pub fn created(collection: Collection, document_id: DocumentId, after: Fields) -> Self {
        Self::new(collection, document_id, ChangeKind::Created, None, Some(after))
    }

    pub fn updated(
        collection: Collection,
        document_id: DocumentId,
        before: Fields,
        after: Fields,
    ) -> Self {
        Self::new(
            collection,
            document_id,
            ChangeKind::Updated,
            Some(before),
            Some(after),
        )
    }

    pub fn deleted(collection: Collection, document_id: DocumentId, before: Fields) -> Self {
        Self::new(collection, document_id, ChangeKind::Deleted, Some(before), None)
    }

    /// Change for a write of `after` over an optional previous version
    pub fn written(
        collection: Collection,
        document_id: DocumentId,
        before: Option<Fields>,
        after: Fields,
    ) -> Self {
        match before {
            Some(before) => Self::updated(collection, document_id, before, after),
            None => Self::created(collection, document_id, after),
        }
    }

    /// Event type name for logging, e.g. `LIKES_CREATED`
    pub fn event_type(&self) -> String {
        let kind = match self.kind {
            ChangeKind::Created => "CREATED",
            ChangeKind::Updated => "UPDATED",
            ChangeKind::Deleted => "DELETED",
        };
        format!("{}_{kind}", self.collection.name().to_uppercase())
    }

    /// Whether a field differs between the before and after snapshots
    pub fn field_changed(&self, field: &str) -> bool {
        let before = self.before.as_ref().and_then(|f| f.get(field));
        let after = self.after.as_ref().and_then(|f| f.get(field));
        before != after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_written_picks_kind() {
        let id = DocumentId::parse("alice").unwrap();
        let created = DocumentChange::written(Collection::Users, id.clone(), None, Fields::new());
        assert_eq!(created.kind, ChangeKind::Created);

        let updated =
            DocumentChange::written(Collection::Users, id, Some(Fields::new()), Fields::new());
        assert_eq!(updated.kind, ChangeKind::Updated);
        assert_ne!(created.event_id, updated.event_id);
    }

    #[test]
    fn test_event_type() {
        let change = DocumentChange::deleted(
            Collection::Likes,
            DocumentId::parse("l1").unwrap(),
            Fields::new(),
        );
        assert_eq!(change.event_type(), "LIKES_DELETED");
    }

    #[test]
    fn test_field_changed() {
        let change = DocumentChange::updated(
            Collection::Users,
            DocumentId::parse("alice").unwrap(),
            fields(json!({ "imageUrl": "a.png", "bio": "x" })),
            fields(json!({ "imageUrl": "b.png", "bio": "x" })),
        );
        assert!(change.field_changed("imageUrl"));
        assert!(!change.field_changed("bio"));
    }

    #[test]
    fn test_serialization() {
        let change = DocumentChange::created(
            Collection::Comments,
            DocumentId::parse("c1").unwrap(),
            fields(json!({ "postId": "p1" })),
        );
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "CREATED");
        assert_eq!(json["collection"], "comments");

        let back: DocumentChange = serde_json::from_value(json).unwrap();
        assert_eq!(back, change);
    }
}
