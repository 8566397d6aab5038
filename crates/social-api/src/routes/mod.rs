//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, posts, users};
use crate::state::AppState;

/// Create the API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(post_routes()).merge(user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Post, comment and like routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::get_all_posts))
        .route("/post", post(posts::create_post))
        .route(
            "/post/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/post/:post_id/comment", post(posts::comment_on_post))
        .route("/post/:post_id/like", get(posts::like_post))
        .route("/post/:post_id/unlike", get(posts::unlike_post))
}

/// Account, profile and notification routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route("/user/image", post(users::upload_image))
        .route(
            "/user",
            get(users::get_authenticated_user).post(users::add_user_details),
        )
        .route("/user/:handle", get(users::get_user_details))
        .route("/notifications", post(users::mark_notifications_read))
}
