//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. The derive only
//! caps sizes and formats; emptiness rules live in the services so they can
//! report the field-specific messages clients rely on.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 2000, message = "Body must be at most 2000 characters"))]
    pub body: String,
}

/// Add comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub body: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(length(max = 32, message = "Handle must be at most 32 characters"))]
    pub handle: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Image URL update; the file itself is uploaded elsewhere
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    #[validate(url(message = "Must be a valid URL"))]
    pub image_url: String,
}

/// Profile details; blank values are dropped
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserDetailsRequest {
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 200, message = "Website must be at most 200 characters"))]
    pub website: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_deserialize() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"pw","confirmPassword":"pw","handle":"amy"}"#,
        )
        .unwrap();
        assert_eq!(request.confirm_password, "pw");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_signup_handle_too_long() {
        let request = SignupRequest {
            email: "a@b.co".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            handle: "h".repeat(33),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_post_body_too_long() {
        let request = CreatePostRequest {
            body: "a".repeat(2001),
        };
        assert!(request.validate().is_err());
        // Emptiness is checked by the service
        assert!(CreatePostRequest { body: String::new() }.validate().is_ok());
    }

    #[test]
    fn test_image_url_validation() {
        let ok: UploadImageRequest =
            serde_json::from_str(r#"{"imageUrl":"https://img.test/a.png"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let bad = UploadImageRequest {
            image_url: "not a url".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
