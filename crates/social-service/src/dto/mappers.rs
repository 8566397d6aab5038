//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Comment, Like, Notification, Post, User};

use super::responses::{
    CommentResponse, LikeResponse, NotificationResponse, PostResponse, UserResponse,
};

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id.to_string(),
            body: post.body.clone(),
            user_handle: post.user_handle.clone(),
            created_at: post.created_at,
            comments: post.comment_count,
            likes: post.like_count,
            user_image: post.user_image.clone(),
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user_handle: comment.user_handle.clone(),
            body: comment.body.clone(),
            created_at: comment.created_at,
            user_image: comment.user_image.clone(),
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

impl From<&Like> for LikeResponse {
    fn from(like: &Like) -> Self {
        Self {
            like_id: like.id.to_string(),
            post_id: like.post_id.to_string(),
            user_handle: like.user_handle.clone(),
        }
    }
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self::from(&like)
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            notification_id: notification.id.to_string(),
            recipient: notification.recipient.clone(),
            sender: notification.sender.clone(),
            kind: notification.kind,
            read: notification.read,
            post_id: notification.post_id.to_string(),
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            handle: user.handle.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            image_url: user.image_url.clone(),
            bio: user.bio.clone(),
            website: user.website.clone(),
            location: user.location.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Convert a list of entities
pub fn map_all<T, R>(items: Vec<T>) -> Vec<R>
where
    R: From<T>,
{
    items.into_iter().map(R::from).collect()
}
