//! User service
//!
//! Signup, login, profile updates and the read models for the signed-in
//! user and public user pages.

use social_core::entities::{User, UserDetails};
use social_core::{DocumentId, DomainError};
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

use crate::dto::mappers::map_all;
use crate::dto::{
    AuthenticatedUserResponse, LoginRequest, MessageResponse, SignupRequest, TokenResponse,
    UploadImageRequest, UserDetailsRequest, UserPageResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notifications returned with the signed-in user's details
pub const RECENT_NOTIFICATIONS: usize = 10;

const MUST_NOT_BE_EMPTY: &str = "Must not be empty";

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

/// First signup rule the request breaks, if any
fn validate_signup(request: &SignupRequest) -> ServiceResult<()> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(ServiceError::invalid_field("email", MUST_NOT_BE_EMPTY));
    }
    if !email.validate_email() {
        return Err(ServiceError::invalid_field(
            "email",
            "Must be a valid email address",
        ));
    }
    if request.password.is_empty() {
        return Err(ServiceError::invalid_field("password", MUST_NOT_BE_EMPTY));
    }
    if request.password != request.confirm_password {
        return Err(ServiceError::invalid_field(
            "confirmPassword",
            "Passwords must match",
        ));
    }
    let handle = request.handle.trim();
    if handle.is_empty() {
        return Err(ServiceError::invalid_field("handle", MUST_NOT_BE_EMPTY));
    }
    // Handles key the user documents
    DocumentId::parse(handle)
        .map_err(|e| ServiceError::invalid_field("handle", e.to_string()))?;
    Ok(())
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and return a token for them
    #[instrument(skip(self, request), fields(handle = %request.handle))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<TokenResponse> {
        validate_signup(&request)?;
        let handle = request.handle.trim().to_string();
        let email = request.email.trim().to_string();

        if self.ctx.user_repo().handle_exists(&handle).await? {
            return Err(DomainError::HandleTaken.into());
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailTaken.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = User::new(handle, email, self.ctx.default_image_url().to_string());
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(handle = %user.handle, "User signed up");

        self.token_for(&user.handle)
    }

    /// Log in with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        if request.email.trim().is_empty() {
            return Err(ServiceError::invalid_field("email", MUST_NOT_BE_EMPTY));
        }
        if request.password.is_empty() {
            return Err(ServiceError::invalid_field("password", MUST_NOT_BE_EMPTY));
        }

        let (handle, password_hash) = self
            .ctx
            .user_repo()
            .find_credentials_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                DomainError::WrongCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(handle = %handle, "Login failed: wrong password"))?;

        info!(handle = %handle, "User logged in");

        self.token_for(&handle)
    }

    /// Resolve a bearer token to the user it was issued for
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_token(token)?;

        // Tokens for users that no longer exist are as good as forged
        self.ctx
            .user_repo()
            .find_by_handle(claims.handle())
            .await?
            .ok_or_else(|| social_common::AppError::InvalidToken.into())
    }

    /// Point the user's profile at an already uploaded image
    #[instrument(skip(self, request))]
    pub async fn upload_image(
        &self,
        handle: &str,
        request: UploadImageRequest,
    ) -> ServiceResult<MessageResponse> {
        self.ctx
            .user_repo()
            .update_image(handle, &request.image_url)
            .await?;

        info!("User image updated");

        Ok(MessageResponse::new("Image uploaded successfully"))
    }

    /// Set bio, website and location; blank values are dropped
    #[instrument(skip(self, request))]
    pub async fn add_user_details(
        &self,
        handle: &str,
        request: UserDetailsRequest,
    ) -> ServiceResult<MessageResponse> {
        let details = UserDetails {
            bio: request.bio,
            website: request.website,
            location: request.location,
        }
        .normalize();

        self.ctx.user_repo().update_details(handle, &details).await?;

        Ok(MessageResponse::new("Details added successfully"))
    }

    /// Profile, likes and latest notifications of the signed-in user
    #[instrument(skip(self))]
    pub async fn get_authenticated_details(
        &self,
        handle: &str,
    ) -> ServiceResult<AuthenticatedUserResponse> {
        let user = self.require_user(handle).await?;
        let likes = self.ctx.like_repo().find_by_user(handle).await?;
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_recipient(handle, RECENT_NOTIFICATIONS)
            .await?;

        Ok(AuthenticatedUserResponse {
            credentials: UserResponse::from(user),
            likes: map_all(likes),
            notifications: map_all(notifications),
        })
    }

    /// Public profile with the user's posts, newest first
    #[instrument(skip(self))]
    pub async fn get_user_details(&self, handle: &str) -> ServiceResult<UserPageResponse> {
        let user = self.require_user(handle).await?;
        let posts = self.ctx.post_repo().find_by_author(handle).await?;

        Ok(UserPageResponse {
            user: UserResponse::from(user),
            posts: map_all(posts),
        })
    }

    /// Mark notifications read in one batch
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn mark_notifications_read(
        &self,
        ids: Vec<String>,
    ) -> ServiceResult<MessageResponse> {
        let ids = ids
            .iter()
            .map(|id| {
                DocumentId::parse(id).map_err(|_| {
                    ServiceError::invalid_field("notifications", format!("Invalid id: {id}"))
                })
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        self.ctx.notification_repo().mark_read(&ids).await?;

        Ok(MessageResponse::new("Notifications marked read"))
    }

    async fn require_user(&self, handle: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(handle.to_string()).into())
    }

    fn token_for(&self, handle: &str) -> ServiceResult<TokenResponse> {
        let token = self.ctx.jwt_service().generate_token(handle)?;
        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_common::JwtService;
    use social_core::entities::{Notification, NotificationType, Post};
    use social_core::traits::{NotificationRepository, PostRepository};
    use social_db::{DocNotificationRepository, DocPostRepository, MemoryDocumentStore};
    use std::sync::Arc;

    fn context() -> (ServiceContext, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let ctx = ServiceContext::from_store(
            store.clone(),
            Arc::new(JwtService::new("test-secret", 3600)),
        )
        .with_default_image_url("https://img.test/blank.png");
        (ctx, store)
    }

    fn signup_request(handle: &str, email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            handle: handle.to_string(),
        }
    }

    fn field_of(err: &ServiceError) -> Option<&'static str> {
        match err {
            ServiceError::InvalidField { field, .. } => Some(*field),
            ServiceError::Domain(e) => e.field(),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);

        let signup = service
            .signup(signup_request("amy", "amy@example.com"))
            .await
            .unwrap();
        let claims = ctx.jwt_service().validate_token(&signup.token).unwrap();
        assert_eq!(claims.handle(), "amy");

        let login = service
            .login(LoginRequest {
                email: "amy@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();
        let user = service.authenticate(&login.token).await.unwrap();
        assert_eq!(user.handle, "amy");
        assert_eq!(user.image_url, "https://img.test/blank.png");
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);

        let err = service.signup(signup_request("amy", "")).await.unwrap_err();
        assert_eq!(field_of(&err), Some("email"));

        let err = service
            .signup(signup_request("amy", "not-an-email"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Must be a valid email address");

        let mut mismatch = signup_request("amy", "amy@example.com");
        mismatch.confirm_password = "other".to_string();
        let err = service.signup(mismatch).await.unwrap_err();
        assert_eq!(field_of(&err), Some("confirmPassword"));

        let err = service
            .signup(signup_request("  ", "amy@example.com"))
            .await
            .unwrap_err();
        assert_eq!(field_of(&err), Some("handle"));

        let err = service
            .signup(signup_request("a/b", "amy@example.com"))
            .await
            .unwrap_err();
        assert_eq!(field_of(&err), Some("handle"));
    }

    #[tokio::test]
    async fn test_signup_duplicates() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);
        service
            .signup(signup_request("amy", "amy@example.com"))
            .await
            .unwrap();

        let err = service
            .signup(signup_request("amy", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(field_of(&err), Some("handle"));
        assert_eq!(err.to_string(), "This handle is already taken");

        let err = service
            .signup(signup_request("amy2", "amy@example.com"))
            .await
            .unwrap_err();
        assert_eq!(field_of(&err), Some("email"));
    }

    #[tokio::test]
    async fn test_login_wrong_credentials() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);
        service
            .signup(signup_request("amy", "amy@example.com"))
            .await
            .unwrap();

        for (email, password) in [("amy@example.com", "wrong"), ("nobody@example.com", "x")] {
            let err = service
                .login(LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), 403);
            assert_eq!(err.to_string(), "Wrong credentials, please try again");
        }

        let err = service
            .login(LoginRequest {
                email: String::new(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_tokens() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);

        let err = service.authenticate("garbage").await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        // Valid signature, but the user doesn't exist
        let token = ctx.jwt_service().generate_token("ghost").unwrap();
        let err = service.authenticate(&token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_details_and_image() {
        let (ctx, _) = context();
        let service = UserService::new(&ctx);
        service
            .signup(signup_request("amy", "amy@example.com"))
            .await
            .unwrap();

        service
            .add_user_details(
                "amy",
                UserDetailsRequest {
                    bio: Some(" hello ".to_string()),
                    website: Some("amy.dev".to_string()),
                    location: Some(String::new()),
                },
            )
            .await
            .unwrap();
        service
            .upload_image(
                "amy",
                UploadImageRequest {
                    image_url: "https://img.test/amy.png".to_string(),
                },
            )
            .await
            .unwrap();

        let page = service.get_user_details("amy").await.unwrap();
        assert_eq!(page.user.bio.as_deref(), Some("hello"));
        assert_eq!(page.user.website.as_deref(), Some("http://amy.dev"));
        assert_eq!(page.user.location, None);
        assert_eq!(page.user.image_url, "https://img.test/amy.png");
        assert!(page.posts.is_empty());

        let err = service.get_user_details("nobody").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_authenticated_details_and_mark_read() {
        let (ctx, store) = context();
        let service = UserService::new(&ctx);
        service
            .signup(signup_request("amy", "amy@example.com"))
            .await
            .unwrap();

        let post = Post::new("hi".to_string(), "amy".to_string(), None);
        DocPostRepository::new(store.clone()).create(&post).await.unwrap();
        let notifications = DocNotificationRepository::new(store);
        let source = DocumentId::generate();
        let notification =
            Notification::from_interaction(source.clone(), NotificationType::Like, &post, "bob")
                .unwrap();
        notifications.create(&notification).await.unwrap();

        let details = service.get_authenticated_details("amy").await.unwrap();
        assert_eq!(details.credentials.handle, "amy");
        assert_eq!(details.notifications.len(), 1);
        assert!(!details.notifications[0].read);

        service
            .mark_notifications_read(vec![source.to_string()])
            .await
            .unwrap();
        let details = service.get_authenticated_details("amy").await.unwrap();
        assert!(details.notifications[0].read);

        let err = service
            .mark_notifications_read(vec!["a/b".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
