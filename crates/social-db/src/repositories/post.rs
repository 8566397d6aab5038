//! Document-store implementation of PostRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{Collection, Direction, FieldUpdate, Query};
use social_core::entities::Post;
use social_core::traits::{DocumentStore, PostRepository, RepoResult};
use social_core::value_objects::DocumentId;
use social_core::DomainError;

use super::{decode_all, not_found_as};
use crate::mappers::DocumentMapper;
use crate::models::field;

/// Document-store implementation of PostRepository
#[derive(Clone)]
pub struct DocPostRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocPostRepository {
    /// Create a new DocPostRepository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn increment(&self, id: &DocumentId, counter: &str, delta: i64) -> RepoResult<Post> {
        let doc = self
            .store
            .update(
                Collection::Posts,
                id,
                &[FieldUpdate::increment(counter, delta)],
            )
            .await
            .map_err(|e| not_found_as(e, || DomainError::PostNotFound(id.to_string())))?;

        Post::from_document(&doc)
    }
}

#[async_trait]
impl PostRepository for DocPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &DocumentId) -> RepoResult<Option<Post>> {
        self.store
            .get(Collection::Posts, id)
            .await?
            .map(|doc| Post::from_document(&doc))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        let query = Query::new(Collection::Posts).order_by(field::CREATED_AT, Direction::Desc);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, handle: &str) -> RepoResult<Vec<Post>> {
        let query = Query::new(Collection::Posts)
            .where_eq(field::USER_HANDLE, handle)
            .order_by(field::CREATED_AT, Direction::Desc);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.store
            .set(Collection::Posts, &post.id, post.to_fields()?)
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        self.store.delete(Collection::Posts, id).await
    }

    #[instrument(skip(self))]
    async fn increment_likes(&self, id: &DocumentId, delta: i64) -> RepoResult<Post> {
        self.increment(id, field::LIKES, delta).await
    }

    #[instrument(skip(self))]
    async fn increment_comments(&self, id: &DocumentId, delta: i64) -> RepoResult<Post> {
        self.increment(id, field::COMMENTS, delta).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocPostRepository>();
    }
}
