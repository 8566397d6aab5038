//! Notification entity - tells a post author about a like or comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Post;
use crate::document::timestamp;
use crate::value_objects::DocumentId;

/// What kind of interaction produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Like,
    Comment,
}

impl NotificationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity
///
/// The id is always the id of the like or comment that produced it, so
/// deleting the source can delete the notification without a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: DocumentId,
    pub recipient: String,
    pub sender: String,
    pub kind: NotificationType,
    pub read: bool,
    pub post_id: DocumentId,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build the notification for an interaction on a post.
    ///
    /// Returns `None` when the sender is the post's author.
    pub fn from_interaction(
        source_id: DocumentId,
        kind: NotificationType,
        post: &Post,
        sender: &str,
    ) -> Option<Self> {
        if post.is_author(sender) {
            return None;
        }

        Some(Self {
            id: source_id,
            recipient: post.user_handle.clone(),
            sender: sender.to_string(),
            kind,
            read: false,
            post_id: post.id.clone(),
            created_at: timestamp::now(),
        })
    }
}
