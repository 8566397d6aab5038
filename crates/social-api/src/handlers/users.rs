//! User handlers
//!
//! Signup, login, profile and notification endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::{
    AuthenticatedUserResponse, LoginRequest, MessageResponse, SignupRequest, TokenResponse,
    UploadImageRequest, UserDetailsRequest, UserPageResponse, UserService,
};

use crate::extractors::{AuthUser, JsonBody, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<TokenResponse>>> {
    let service = UserService::new(state.service_context());
    let token = service.signup(request).await?;
    Ok(Created(Json(token)))
}

/// Log in
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = UserService::new(state.service_context());
    let token = service.login(request).await?;
    Ok(Json(token))
}

/// Set the caller's profile image
///
/// POST /user/image
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UploadImageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let message = service.upload_image(auth.handle(), request).await?;
    Ok(Json(message))
}

/// Set the caller's bio, website and location
///
/// POST /user
pub async fn add_user_details(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UserDetailsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let message = service.add_user_details(auth.handle(), request).await?;
    Ok(Json(message))
}

/// The caller's profile, likes and latest notifications
///
/// GET /user
pub async fn get_authenticated_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AuthenticatedUserResponse>> {
    let service = UserService::new(state.service_context());
    let details = service.get_authenticated_details(auth.handle()).await?;
    Ok(Json(details))
}

/// Public user page
///
/// GET /user/{handle}
pub async fn get_user_details(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> ApiResult<Json<UserPageResponse>> {
    let service = UserService::new(state.service_context());
    let page = service.get_user_details(&handle).await?;
    Ok(Json(page))
}

/// Mark notifications read
///
/// POST /notifications
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(ids): JsonBody<Vec<String>>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let message = service.mark_notifications_read(ids).await?;
    Ok(Json(message))
}
