//! Like entity - one user's like on one post

use crate::value_objects::DocumentId;

/// Like entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: DocumentId,
    pub post_id: DocumentId,
    pub user_handle: String,
}

impl Like {
    pub fn new(post_id: DocumentId, user_handle: String) -> Self {
        Self {
            id: DocumentId::generate(),
            post_id,
            user_handle,
        }
    }
}
