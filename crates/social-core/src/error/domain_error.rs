//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::document::Collection;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found")]
    PostNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound { collection: Collection, id: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Unauthorized")]
    NotPostAuthor,

    #[error("Wrong credentials, please try again")]
    WrongCredentials,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Post already liked")]
    AlreadyLiked,

    #[error("Post already unliked")]
    NotLiked,

    #[error("This handle is already taken")]
    HandleTaken,

    #[error("Email is already in use")]
    EmailTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a field-specific validation failure
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",

            // Validation
            Self::ValidationError(_) | Self::InvalidField { .. } => "VALIDATION_ERROR",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::WrongCredentials => "WRONG_CREDENTIALS",

            // Business Rules
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::NotLiked => "NOT_LIKED",
            Self::HandleTaken => "HANDLE_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Field the error refers to, if it is tied to one request field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            Self::HandleTaken => Some("handle"),
            Self::EmailTaken => Some("email"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::UserNotFound(_) | Self::DocumentNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidField { .. })
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor | Self::WrongCredentials)
    }

    /// Check if this is a business rule violation (reported as a bad request)
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyLiked | Self::NotLiked | Self::HandleTaken | Self::EmailTaken
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::PostNotFound("abc".to_string()).code(),
            "POST_NOT_FOUND"
        );
        assert_eq!(DomainError::AlreadyLiked.code(), "ALREADY_LIKED");
        assert_eq!(
            DomainError::invalid_field("body", "Body must not be empty").code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::PostNotFound("x".to_string()).is_not_found());
        assert!(DomainError::DocumentNotFound {
            collection: Collection::Posts,
            id: "x".to_string()
        }
        .is_not_found());
        assert!(DomainError::NotPostAuthor.is_authorization());
        assert!(DomainError::NotLiked.is_rule_violation());
        assert!(!DomainError::AlreadyLiked.is_not_found());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::PostNotFound("abc".to_string()).to_string(),
            "Post not found"
        );
        assert_eq!(DomainError::NotPostAuthor.to_string(), "Unauthorized");
        assert_eq!(
            DomainError::DocumentNotFound {
                collection: Collection::Likes,
                id: "l1".to_string()
            }
            .to_string(),
            "Document not found: likes/l1"
        );
    }

    #[test]
    fn test_field() {
        let err = DomainError::invalid_field("comment", "Must not be empty");
        assert_eq!(err.field(), Some("comment"));
        assert_eq!(err.to_string(), "Must not be empty");
        assert_eq!(DomainError::HandleTaken.field(), Some("handle"));
        assert_eq!(DomainError::AlreadyLiked.field(), None);
    }
}
