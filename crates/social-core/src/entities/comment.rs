//! Comment entity

use chrono::{DateTime, Utc};

use crate::document::timestamp;
use crate::value_objects::DocumentId;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: DocumentId,
    pub post_id: DocumentId,
    pub user_handle: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub user_image: Option<String>,
}

impl Comment {
    pub fn new(
        post_id: DocumentId,
        user_handle: String,
        body: String,
        user_image: Option<String>,
    ) -> Self {
        Self {
            id: DocumentId::generate(),
            post_id,
            user_handle,
            body,
            created_at: timestamp::now(),
            user_image,
        }
    }
}
