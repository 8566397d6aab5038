use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_core::document::timestamp;
use social_core::entities::NotificationType;

/// Stored form of a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDocument {
    pub recipient: String,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub read: bool,
    pub post_id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}
