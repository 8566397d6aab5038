//! Response types and error handling for API endpoints
//!
//! Every error leaves the server as
//! `{ "error": CODE, "message": text, "details": { field: text } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use social_common::{AppError, ErrorResponse};
use social_core::DomainError;
use social_service::ServiceError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing authorization header")]
    MissingAuth,
}

impl ApiError {
    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => AppError::status_code_for(e),
            Self::Validation(_) | Self::InvalidBody(_) => 400,
            Self::MissingAuth => 401,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
        }
    }

    fn into_body(self) -> ErrorResponse {
        match self {
            Self::App(e) => ErrorResponse::from(&e),
            Self::Service(e) => ErrorResponse::from(&AppError::from(e)),
            Self::Domain(e) => ErrorResponse::from(&AppError::Domain(e)),
            Self::Validation(errors) => {
                let details = field_messages(&errors);
                let message = details
                    .values()
                    .next()
                    .and_then(|v| v.as_str())
                    .unwrap_or("Invalid input")
                    .to_string();
                ErrorResponse::new("VALIDATION_ERROR", message)
                    .with_details(serde_json::Value::Object(details))
            }
            other => ErrorResponse::new(other.error_code(), other.to_string()),
        }
    }
}

/// First message per failing field
fn field_messages(errors: &ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map_or_else(|| format!("Invalid {field}"), ToString::to_string);
                (field.to_string(), serde_json::Value::String(message))
            })
        })
        .collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        (status, Json(self.into_body())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3, message = "Too long"))]
        body: String,
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(ApiError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::invalid_body("test").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::PostNotFound("p1".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ServiceError::from(DomainError::NotPostAuthor)).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AppError::InvalidToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::MissingAuth.error_code(), "MISSING_AUTHORIZATION");
        assert_eq!(ApiError::invalid_body("x").error_code(), "INVALID_BODY");
        assert_eq!(
            ApiError::from(DomainError::AlreadyLiked).error_code(),
            "ALREADY_LIKED"
        );
    }

    #[test]
    fn test_service_field_error_body() {
        let err = ApiError::from(ServiceError::invalid_field("comment", "Must not be empty"));
        let body = err.into_body();
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.message, "Must not be empty");
        assert_eq!(
            body.details,
            Some(serde_json::json!({ "comment": "Must not be empty" }))
        );
    }

    #[test]
    fn test_validation_errors_body() {
        let errors = Sample {
            body: "too long".to_string(),
        }
        .validate()
        .unwrap_err();

        let body = ApiError::from(errors).into_body();
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.message, "Too long");
        assert_eq!(body.details, Some(serde_json::json!({ "body": "Too long" })));
    }
}
