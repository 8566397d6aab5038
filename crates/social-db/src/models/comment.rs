use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_core::document::timestamp;

/// Stored form of a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    pub post_id: String,
    pub user_handle: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,
}
