use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_core::document::timestamp;

/// Stored form of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub body: String,
    pub user_handle: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image: Option<String>,
}
