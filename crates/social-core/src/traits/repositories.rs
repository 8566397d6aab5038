//! Repository traits (ports) - typed access to the document collections
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation on top of a [`DocumentStore`](super::DocumentStore).

use async_trait::async_trait;

use crate::entities::{Comment, Like, Notification, Post, User, UserDetails};
use crate::error::DomainError;
use crate::value_objects::DocumentId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: &DocumentId) -> RepoResult<Option<Post>>;

    /// All posts, newest first
    async fn find_all(&self) -> RepoResult<Vec<Post>>;

    /// Posts written by a user, newest first
    async fn find_by_author(&self, handle: &str) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post (dependent records are left to the triggers)
    async fn delete(&self, id: &DocumentId) -> RepoResult<()>;

    /// Atomically add `delta` to the like counter and return the updated post
    async fn increment_likes(&self, id: &DocumentId, delta: i64) -> RepoResult<Post>;

    /// Atomically add `delta` to the comment counter and return the updated post
    async fn increment_comments(&self, id: &DocumentId, delta: i64) -> RepoResult<Post>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, newest first
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Comment>>;

    /// Comments written by a user
    async fn find_by_author(&self, handle: &str) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, id: &DocumentId) -> RepoResult<()>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// The like of a user on a post, if any
    async fn find(&self, post_id: &DocumentId, handle: &str) -> RepoResult<Option<Like>>;

    /// All likes on a post
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Like>>;

    /// All likes by a user
    async fn find_by_user(&self, handle: &str) -> RepoResult<Vec<Like>>;

    /// Create a new like
    async fn create(&self, like: &Like) -> RepoResult<()>;

    /// Delete a like
    async fn delete(&self, id: &DocumentId) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: &DocumentId) -> RepoResult<Option<Notification>>;

    /// Notifications about a post
    async fn find_by_post(&self, post_id: &DocumentId) -> RepoResult<Vec<Notification>>;

    /// Newest notifications addressed to a user
    async fn find_by_recipient(&self, handle: &str, limit: usize)
        -> RepoResult<Vec<Notification>>;

    /// Write a notification under its own id
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Delete a notification (missing is not an error)
    async fn delete(&self, id: &DocumentId) -> RepoResult<()>;

    /// Mark notifications read in one batch
    async fn mark_read(&self, ids: &[DocumentId]) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by handle
    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>>;

    /// Check if handle is already taken
    async fn handle_exists(&self, handle: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create the user document and its credentials together
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Look up `(handle, password_hash)` for a login email
    async fn find_credentials_by_email(&self, email: &str)
        -> RepoResult<Option<(String, String)>>;

    /// Merge profile details into the user document
    async fn update_details(&self, handle: &str, details: &UserDetails) -> RepoResult<()>;

    /// Replace the user's image URL
    async fn update_image(&self, handle: &str, image_url: &str) -> RepoResult<()>;
}
