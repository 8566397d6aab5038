//! Response DTOs for API endpoints
//!
//! Field names are camelCase and timestamps use the fixed-precision
//! RFC 3339 form stored in documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use social_core::document::timestamp;
use social_core::entities::NotificationType;

// ============================================================================
// Common Response Types
// ============================================================================

/// `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "token": ... }` returned by signup and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: String,
    pub body: String,
    pub user_handle: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub comments: i64,
    pub likes: i64,
    pub user_image: Option<String>,
}

/// A post with its comments, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comment_list: Vec<CommentResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: String,
    pub post_id: String,
    pub user_handle: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub user_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub like_id: String,
    pub post_id: String,
    pub user_handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: String,
    pub recipient: String,
    pub sender: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub post_id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// User Responses
// ============================================================================

/// A user's profile document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub handle: String,
    pub email: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
}

/// Everything the signed-in user's client needs at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUserResponse {
    pub credentials: UserResponse,
    pub likes: Vec<LikeResponse>,
    pub notifications: Vec<NotificationResponse>,
}

/// Public user page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPageResponse {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Status of each dependency; `redis` is absent when Redis isn't used
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}

fn status(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = store_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: status(store_healthy),
                redis: redis_healthy.map(status),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
