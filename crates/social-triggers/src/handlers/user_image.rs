//! Copy a changed profile image onto the user's posts and comments.

use social_core::document::{Collection, FieldUpdate, WriteBatch};
use social_core::entities::User;
use social_core::events::DocumentChange;
use social_core::traits::{CommentRepository, PostRepository};
use social_db::models::field;
use social_db::DocumentMapper;
use tracing::{debug, info};

use super::{after, before, TriggerContext};
use crate::error::TriggerResult;

/// User updated: if `imageUrl` changed, rewrite `userImage` everywhere in one batch
///
/// Posts and comments are looked up by the handle from before the update.
/// Anything created after the lookup keeps whatever image it was written with.
pub async fn propagate_user_image(
    ctx: &TriggerContext,
    change: &DocumentChange,
) -> TriggerResult<usize> {
    if !change.field_changed(field::IMAGE_URL) {
        return Ok(0);
    }

    let before = User::from_document(&before(change)?)?;
    let after = User::from_document(&after(change)?)?;

    let posts = ctx.posts.find_by_author(&before.handle).await?;
    let comments = ctx.comments.find_by_author(&before.handle).await?;

    let mut batch = WriteBatch::new();
    let image = || vec![FieldUpdate::set(field::USER_IMAGE, after.image_url.as_str())];
    for post in posts {
        batch.update(Collection::Posts, post.id, image());
    }
    for comment in comments {
        batch.update(Collection::Comments, comment.id, image());
    }

    if batch.is_empty() {
        debug!(handle = %before.handle, "No posts or comments to update");
        return Ok(0);
    }

    let written = batch.len();
    ctx.store.commit(batch).await?;
    info!(handle = %before.handle, documents = written, "User image propagated");
    Ok(written)
}
