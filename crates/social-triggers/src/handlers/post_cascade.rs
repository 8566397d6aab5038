//! Remove everything that points at a deleted post.

use social_core::document::{Collection, WriteBatch};
use social_core::events::DocumentChange;
use social_core::traits::{CommentRepository, LikeRepository, NotificationRepository};
use tracing::{debug, info};

use super::TriggerContext;
use crate::error::TriggerResult;

/// Post deleted: delete its comments, likes and notifications in one batch
pub async fn cascade_post_delete(
    ctx: &TriggerContext,
    change: &DocumentChange,
) -> TriggerResult<usize> {
    let post_id = &change.document_id;

    let comments = ctx.comments.find_by_post(post_id).await?;
    let likes = ctx.likes.find_by_post(post_id).await?;
    let notifications = ctx.notifications.find_by_post(post_id).await?;

    let mut batch = WriteBatch::new();
    for comment in comments {
        batch.delete(Collection::Comments, comment.id);
    }
    for like in likes {
        batch.delete(Collection::Likes, like.id);
    }
    for notification in notifications {
        batch.delete(Collection::Notifications, notification.id);
    }

    if batch.is_empty() {
        debug!(post_id = %post_id, "Nothing references the deleted post");
        return Ok(0);
    }

    let deleted = batch.len();
    ctx.store.commit(batch).await?;
    info!(post_id = %post_id, documents = deleted, "Post dependents deleted");
    Ok(deleted)
}
