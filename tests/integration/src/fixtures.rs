//! Test fixtures and data generators
//!
//! Response bodies are decoded with the service DTOs; only request bodies
//! and the error body are defined here.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub use social_service::{
    AuthenticatedUserResponse, CommentResponse, MessageResponse, NotificationResponse,
    PostDetailResponse, PostResponse, TokenResponse, UserPageResponse,
};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Signup request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub handle: String,
}

impl SignupRequest {
    pub fn unique(prefix: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{prefix}{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            confirm_password: "TestPass123!".to_string(),
            handle: format!("{prefix}{suffix}"),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// `{ "body": ... }` for posts and comments
#[derive(Debug, Serialize)]
pub struct BodyRequest {
    pub body: String,
}

impl BodyRequest {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

/// Image URL update
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub image_url: String,
}

/// Profile details
#[derive(Debug, Default, Serialize)]
pub struct DetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// A signed-up user and their token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub handle: String,
    pub token: String,
}
