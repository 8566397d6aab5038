//! Document-store implementation of NotificationRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{Collection, Direction, FieldUpdate, Query, WriteBatch};
use social_core::entities::Notification;
use social_core::traits::{DocumentStore, NotificationRepository, RepoResult};
use social_core::value_objects::DocumentId;

use super::decode_all;
use crate::mappers::DocumentMapper;
use crate::models::field;

/// Document-store implementation of NotificationRepository
#[derive(Clone)]
pub struct DocNotificationRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocNotificationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationRepository for DocNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &DocumentId) -> RepoResult<Option<Notification>> {
        self.store
            .get(Collection::Notifications, id)
            .await?
            .map(|doc| Notification::from_document(&doc))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Notification>> {
        let query =
            Query::new(Collection::Notifications).where_eq(field::POST_ID, post_id.as_str());
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(
        &self,
        handle: &str,
        limit: usize,
    ) -> RepoResult<Vec<Notification>> {
        let query = Query::new(Collection::Notifications)
            .where_eq(field::RECIPIENT, handle)
            .order_by(field::CREATED_AT, Direction::Desc)
            .limit(limit);
        decode_all(&self.store.query(&query).await?)
    }

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.store
            .set(
                Collection::Notifications,
                &notification.id,
                notification.to_fields()?,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        self.store.delete(Collection::Notifications, id).await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn mark_read(&self, ids: &[DocumentId]) -> RepoResult<()> {
        let mut batch = WriteBatch::new();
        for id in ids {
            batch.update(
                Collection::Notifications,
                id.clone(),
                vec![FieldUpdate::set(field::READ, true)],
            );
        }
        self.store.commit(batch).await
    }
}
