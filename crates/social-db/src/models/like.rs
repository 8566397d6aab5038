use serde::{Deserialize, Serialize};

/// Stored form of a like
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDocument {
    pub post_id: String,
    pub user_handle: String,
}
