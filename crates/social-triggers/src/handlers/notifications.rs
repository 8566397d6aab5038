//! Notifications for likes and comments.
//!
//! A notification shares the id of the like or comment behind it, so it can
//! be written and deleted without a lookup.

use social_core::entities::{Comment, Like, Notification, NotificationType};
use social_core::events::DocumentChange;
use social_core::traits::{NotificationRepository, PostRepository};
use social_db::DocumentMapper;
use tracing::debug;

use super::{after, TriggerContext};
use crate::error::TriggerResult;

/// Like or comment created: notify the post's author unless they acted themselves
pub async fn notify_post_author(
    ctx: &TriggerContext,
    change: &DocumentChange,
    kind: NotificationType,
) -> TriggerResult<usize> {
    let doc = after(change)?;
    let (post_id, sender) = match kind {
        NotificationType::Like => {
            let like = Like::from_document(&doc)?;
            (like.post_id, like.user_handle)
        }
        NotificationType::Comment => {
            let comment = Comment::from_document(&doc)?;
            (comment.post_id, comment.user_handle)
        }
    };

    let Some(post) = ctx.posts.find_by_id(&post_id).await? else {
        debug!(post_id = %post_id, "Post is gone, no notification");
        return Ok(0);
    };

    let Some(notification) =
        Notification::from_interaction(change.document_id.clone(), kind, &post, &sender)
    else {
        debug!(sender = %sender, "Author interacted with own post, no notification");
        return Ok(0);
    };

    ctx.notifications.create(&notification).await?;
    debug!(
        notification_id = %notification.id,
        recipient = %notification.recipient,
        kind = %kind,
        "Notification created"
    );
    Ok(1)
}

/// Like or comment deleted: drop its notification (a missing one is fine)
pub async fn delete_notification(
    ctx: &TriggerContext,
    change: &DocumentChange,
) -> TriggerResult<usize> {
    ctx.notifications.delete(&change.document_id).await?;
    debug!(notification_id = %change.document_id, "Notification deleted");
    Ok(1)
}
