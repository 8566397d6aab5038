//! Post service
//!
//! Handles posts, comments, likes and unlikes. Counter updates are a
//! second write after the like/comment record; notifications and cascades
//! are produced by the trigger worker from the resulting change events.

use social_core::entities::{Comment, Like, Post, User};
use social_core::{DocumentId, DomainError};
use tracing::{info, instrument};

use crate::dto::mappers::map_all;
use crate::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, MessageResponse, PostDetailResponse,
    PostResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

/// Ids that can't be document ids can't name an existing post
fn parse_post_id(raw: &str) -> ServiceResult<DocumentId> {
    DocumentId::parse(raw)
        .map_err(|_| ServiceError::from(DomainError::PostNotFound(raw.to_string())))
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All posts, newest first
    #[instrument(skip(self))]
    pub async fn get_all_posts(&self) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().find_all().await?;
        Ok(map_all(posts))
    }

    /// Create a post authored by `author`
    #[instrument(skip(self, author, request), fields(user_handle = %author.handle))]
    pub async fn create_post(
        &self,
        author: &User,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        if request.body.trim().is_empty() {
            return Err(ServiceError::invalid_field("body", "Body must not be empty"));
        }

        let post = Post::new(
            request.body,
            author.handle.clone(),
            Some(author.image_url.clone()),
        );
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, "Post created");

        Ok(PostResponse::from(post))
    }

    /// A post with its comments
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: &str) -> ServiceResult<PostDetailResponse> {
        let id = parse_post_id(post_id)?;
        let post = self
            .ctx
            .post_repo()
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;

        let comments = self.ctx.comment_repo().find_by_post(&id).await?;

        Ok(PostDetailResponse {
            post: PostResponse::from(post),
            comment_list: map_all(comments),
        })
    }

    /// Comment on a post: bump its comment count, then add the comment
    #[instrument(skip(self, author, request), fields(user_handle = %author.handle))]
    pub async fn add_comment(
        &self,
        author: &User,
        post_id: &str,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        if request.body.trim().is_empty() {
            return Err(ServiceError::invalid_field("comment", "Must not be empty"));
        }

        let id = parse_post_id(post_id)?;
        // Fails with PostNotFound when the post is missing
        self.ctx.post_repo().increment_comments(&id, 1).await?;

        let comment = Comment::new(
            id,
            author.handle.clone(),
            request.body,
            Some(author.image_url.clone()),
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %comment.post_id, "Comment added");

        Ok(CommentResponse::from(comment))
    }

    /// Like a post; at most one like per user and post
    #[instrument(skip(self))]
    pub async fn like_post(&self, handle: &str, post_id: &str) -> ServiceResult<PostResponse> {
        let id = self.require_post(post_id).await?;

        if self.ctx.like_repo().find(&id, handle).await?.is_some() {
            return Err(DomainError::AlreadyLiked.into());
        }

        let like = Like::new(id.clone(), handle.to_string());
        self.ctx.like_repo().create(&like).await?;
        let post = self.ctx.post_repo().increment_likes(&id, 1).await?;

        info!(like_id = %like.id, likes = post.like_count, "Post liked");

        Ok(PostResponse::from(post))
    }

    /// Remove the caller's like from a post
    #[instrument(skip(self))]
    pub async fn unlike_post(&self, handle: &str, post_id: &str) -> ServiceResult<PostResponse> {
        let id = self.require_post(post_id).await?;

        let like = self
            .ctx
            .like_repo()
            .find(&id, handle)
            .await?
            .ok_or(DomainError::NotLiked)?;

        self.ctx.like_repo().delete(&like.id).await?;
        let post = self.ctx.post_repo().increment_likes(&id, -1).await?;

        info!(like_id = %like.id, likes = post.like_count, "Post unliked");

        Ok(PostResponse::from(post))
    }

    /// Delete a post; only its author may
    #[instrument(skip(self))]
    pub async fn delete_post(&self, handle: &str, post_id: &str) -> ServiceResult<MessageResponse> {
        let id = parse_post_id(post_id)?;
        let post = self
            .ctx
            .post_repo()
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;

        if !post.is_author(handle) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().delete(&id).await?;

        info!(post_id = %id, "Post deleted");

        Ok(MessageResponse::new("Post deleted successfully"))
    }

    async fn require_post(&self, post_id: &str) -> ServiceResult<DocumentId> {
        let id = parse_post_id(post_id)?;
        match self.ctx.post_repo().find_by_id(&id).await? {
            Some(_) => Ok(id),
            None => Err(DomainError::PostNotFound(post_id.to_string()).into()),
        }
    }
}
