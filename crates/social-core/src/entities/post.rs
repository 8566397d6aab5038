//! Post entity - a short text post with denormalized counters

use chrono::{DateTime, Utc};

use crate::document::timestamp;
use crate::value_objects::DocumentId;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: DocumentId,
    pub body: String,
    pub user_handle: String,
    pub created_at: DateTime<Utc>,
    /// Number of likes referencing this post
    pub like_count: i64,
    /// Number of comments referencing this post
    pub comment_count: i64,
    /// Author's image URL at the time of the last propagation
    pub user_image: Option<String>,
}

impl Post {
    /// Create a new Post with zeroed counters
    pub fn new(body: String, user_handle: String, user_image: Option<String>) -> Self {
        Self {
            id: DocumentId::generate(),
            body,
            user_handle,
            created_at: timestamp::now(),
            like_count: 0,
            comment_count: 0,
            user_image,
        }
    }

    /// Check if a user wrote this post
    #[inline]
    pub fn is_author(&self, handle: &str) -> bool {
        self.user_handle == handle
    }
}
