//! Redis Pub/Sub publisher.
//!
//! Publishes document changes to the channel of their collection.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use social_core::events::DocumentChange;
use social_core::traits::{ChangePublisher, RepoResult};
use social_core::DomainError;

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Envelope for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "LIKES_CREATED", "POSTS_DELETED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a document change
    pub fn from_change(change: &DocumentChange) -> Result<Self, serde_json::Error> {
        Ok(Self::new(change.event_type(), serde_json::to_value(change)?))
    }

    /// Decode the payload as a document change
    pub fn to_change(&self) -> Result<DocumentChange, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a document change to its collection channel
    pub async fn publish_change(&self, change: &DocumentChange) -> RedisResult<u32> {
        let event = PubSubEvent::from_change(change)?;
        self.publish(&PubSubChannel::documents(change.collection), &event)
            .await
    }
}

#[async_trait]
impl ChangePublisher for Publisher {
    async fn publish(&self, change: &DocumentChange) -> RepoResult<()> {
        self.publish_change(change)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::{Collection, DocumentId};

    #[test]
    fn test_event_serialization() {
        let event = PubSubEvent::new("POSTS_CREATED", serde_json::json!({"id": "p1"}));
        let json = event.to_json().unwrap();
        assert!(json.contains("POSTS_CREATED"));
        assert!(json.contains("\"id\":\"p1\""));
    }

    #[test]
    fn test_change_envelope() {
        let change = DocumentChange::deleted(
            Collection::Likes,
            DocumentId::parse("l1").unwrap(),
            serde_json::json!({ "postId": "p1", "userHandle": "bob" })
                .as_object()
                .cloned()
                .unwrap(),
        );

        let event = PubSubEvent::from_change(&change).unwrap();
        assert_eq!(event.event_type, "LIKES_DELETED");

        let decoded = event.to_change().unwrap();
        assert_eq!(decoded.event_id, change.event_id);
        assert_eq!(decoded.document_id, change.document_id);
        assert_eq!(decoded.before, change.before);
        assert!(decoded.after.is_none());
    }
}
