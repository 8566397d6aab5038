//! Document-store implementation of CommentRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{Collection, Direction, Query};
use social_core::entities::Comment;
use social_core::traits::{CommentRepository, DocumentStore, RepoResult};
use social_core::value_objects::DocumentId;

use super::decode_all;
use crate::mappers::DocumentMapper;
use crate::models::field;

/// Document-store implementation of CommentRepository
#[derive(Clone)]
pub struct DocCommentRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocCommentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for DocCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Comment>> {
        let query = Query::new(Collection::Comments)
            .where_eq(field::POST_ID, post_id.as_str())
            .order_by(field::CREATED_AT, Direction::Desc);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, handle: &str) -> RepoResult<Vec<Comment>> {
        let query = Query::new(Collection::Comments).where_eq(field::USER_HANDLE, handle);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.store
            .set(Collection::Comments, &comment.id, comment.to_fields()?)
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        self.store.delete(Collection::Comments, id).await
    }
}
