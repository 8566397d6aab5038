//! Trigger handlers
//!
//! Each handler reads the change snapshot it needs, loads related
//! documents and writes the derived state. Handlers return the number of
//! documents they wrote.

mod notifications;
mod post_cascade;
mod user_image;

pub use notifications::{delete_notification, notify_post_author};
pub use post_cascade::cascade_post_delete;
pub use user_image::propagate_user_image;

use std::sync::Arc;

use social_core::document::Document;
use social_core::events::DocumentChange;
use social_core::traits::DocumentStore;
use social_db::{
    DocCommentRepository, DocLikeRepository, DocNotificationRepository, DocPostRepository,
};

use crate::error::{TriggerError, TriggerResult};

/// Store access shared by all handlers
#[derive(Clone)]
pub struct TriggerContext {
    pub store: Arc<dyn DocumentStore>,
    pub posts: DocPostRepository,
    pub comments: DocCommentRepository,
    pub likes: DocLikeRepository,
    pub notifications: DocNotificationRepository,
}

impl TriggerContext {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            posts: DocPostRepository::new(store.clone()),
            comments: DocCommentRepository::new(store.clone()),
            likes: DocLikeRepository::new(store.clone()),
            notifications: DocNotificationRepository::new(store.clone()),
            store,
        }
    }
}

/// The document as it was before the change
fn before(change: &DocumentChange) -> TriggerResult<Document> {
    snapshot(change, change.before.as_ref(), "before")
}

/// The document as it is after the change
fn after(change: &DocumentChange) -> TriggerResult<Document> {
    snapshot(change, change.after.as_ref(), "after")
}

fn snapshot(
    change: &DocumentChange,
    fields: Option<&social_core::Fields>,
    name: &'static str,
) -> TriggerResult<Document> {
    fields
        .map(|fields| Document::new(change.document_id.clone(), fields.clone()))
        .ok_or_else(|| TriggerError::MissingSnapshot {
            event_type: change.event_type(),
            snapshot: name,
        })
}
