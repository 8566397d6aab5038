//! # social-service
//!
//! Application layer: the post and user use cases behind the HTTP routes,
//! request/response DTOs, and the service error type.

pub mod dto;
pub mod services;

pub use services::{
    PostService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};

pub use dto::{
    AuthenticatedUserResponse, CommentResponse, CreateCommentRequest, CreatePostRequest,
    HealthChecks, HealthResponse, LikeResponse, LoginRequest, MessageResponse,
    NotificationResponse, PostDetailResponse, PostResponse, ReadinessResponse, SignupRequest,
    TokenResponse, UploadImageRequest, UserDetailsRequest, UserPageResponse, UserResponse,
};
