//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs in the camelCase JSON shape clients expect
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, LoginRequest, SignupRequest, UploadImageRequest,
    UserDetailsRequest,
};

pub use responses::{
    AuthenticatedUserResponse, CommentResponse, HealthChecks, HealthResponse, LikeResponse,
    MessageResponse, NotificationResponse, PostDetailResponse, PostResponse, ReadinessResponse,
    TokenResponse, UserPageResponse, UserResponse,
};
