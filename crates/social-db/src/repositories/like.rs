//! Document-store implementation of LikeRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{Collection, Query};
use social_core::entities::Like;
use social_core::traits::{DocumentStore, LikeRepository, RepoResult};
use social_core::value_objects::DocumentId;

use super::decode_all;
use crate::mappers::DocumentMapper;
use crate::models::field;

/// Document-store implementation of LikeRepository
#[derive(Clone)]
pub struct DocLikeRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocLikeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LikeRepository for DocLikeRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: &DocumentId, handle: &str) -> RepoResult<Option<Like>> {
        let query = Query::new(Collection::Likes)
            .where_eq(field::USER_HANDLE, handle)
            .where_eq(field::POST_ID, post_id.as_str())
            .limit(1);

        self.store
            .query(&query)
            .await?
            .first()
            .map(Like::from_document)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Like>> {
        let query = Query::new(Collection::Likes).where_eq(field::POST_ID, post_id.as_str());
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, handle: &str) -> RepoResult<Vec<Like>> {
        let query = Query::new(Collection::Likes).where_eq(field::USER_HANDLE, handle);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self, like), fields(like_id = %like.id, post_id = %like.post_id))]
    async fn create(&self, like: &Like) -> RepoResult<()> {
        self.store
            .set(Collection::Likes, &like.id, like.to_fields()?)
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        self.store.delete(Collection::Likes, id).await
    }
}
