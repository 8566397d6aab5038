//! Service context - dependency container for services
//!
//! Holds the document store, the repositories built on it, and the auth
//! helpers needed by services.

use std::sync::Arc;

use social_common::auth::{JwtService, PasswordService};
use social_core::traits::{
    CommentRepository, DocumentStore, LikeRepository, NotificationRepository, PostRepository,
    UserRepository,
};
use social_db::{
    DocCommentRepository, DocLikeRepository, DocNotificationRepository, DocPostRepository,
    DocUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Image URL given to users who have not uploaded one
pub const DEFAULT_IMAGE_URL: &str = "https://example.com/images/no-img.png";

/// Service context containing all dependencies
///
/// Cloning is cheap: every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn DocumentStore>,

    // Repositories
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,

    default_image_url: Arc<str>,
}

impl ServiceContext {
    /// Create a context with document-store repositories over `store`
    pub fn from_store(store: Arc<dyn DocumentStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            post_repo: Arc::new(DocPostRepository::new(store.clone())),
            comment_repo: Arc::new(DocCommentRepository::new(store.clone())),
            like_repo: Arc::new(DocLikeRepository::new(store.clone())),
            notification_repo: Arc::new(DocNotificationRepository::new(store.clone())),
            user_repo: Arc::new(DocUserRepository::new(store.clone())),
            store,
            jwt_service,
            password_service: PasswordService::new(),
            default_image_url: Arc::from(DEFAULT_IMAGE_URL),
        }
    }

    /// Override the image URL assigned at signup
    #[must_use]
    pub fn with_default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = Arc::from(url.into());
        self
    }

    /// Get the underlying document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    // === Repositories ===

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn default_image_url(&self) -> &str {
        &self.default_image_url
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("default_image_url", &self.default_image_url)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
///
/// Repositories that are not set default to document-store repositories
/// over the configured store.
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    default_image_url: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = Some(url.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the store or JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let store = self
            .store
            .ok_or_else(|| ServiceError::validation("store is required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;

        let mut ctx = ServiceContext::from_store(store, jwt_service);
        if let Some(repo) = self.post_repo {
            ctx.post_repo = repo;
        }
        if let Some(repo) = self.comment_repo {
            ctx.comment_repo = repo;
        }
        if let Some(repo) = self.like_repo {
            ctx.like_repo = repo;
        }
        if let Some(repo) = self.notification_repo {
            ctx.notification_repo = repo;
        }
        if let Some(repo) = self.user_repo {
            ctx.user_repo = repo;
        }
        if let Some(url) = self.default_image_url {
            ctx = ctx.with_default_image_url(url);
        }
        Ok(ctx)
    }
}
