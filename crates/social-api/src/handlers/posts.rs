//! Post handlers
//!
//! Endpoints for posts, comments and likes.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, MessageResponse,
    PostDetailResponse, PostResponse, PostService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List all posts, newest first
///
/// GET /posts
pub async fn get_all_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.get_all_posts().await?;
    Ok(Json(posts))
}

/// Create a post
///
/// POST /post
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(&auth.user, request).await?;
    Ok(Json(post))
}

/// Get a post with its comments
///
/// GET /post/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostDetailResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(&post_id).await?;
    Ok(Json(post))
}

/// Comment on a post
///
/// POST /post/{post_id}/comment
pub async fn comment_on_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = PostService::new(state.service_context());
    let comment = service.add_comment(&auth.user, &post_id, request).await?;
    Ok(Json(comment))
}

/// Like a post
///
/// GET /post/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.like_post(auth.handle(), &post_id).await?;
    Ok(Json(post))
}

/// Remove the caller's like
///
/// GET /post/{post_id}/unlike
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.unlike_post(auth.handle(), &post_id).await?;
    Ok(Json(post))
}

/// Delete a post the caller wrote
///
/// DELETE /post/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let message = service.delete_post(auth.handle(), &post_id).await?;
    Ok(Json(message))
}
