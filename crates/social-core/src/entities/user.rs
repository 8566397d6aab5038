//! User entity - public profile keyed by handle

use chrono::{DateTime, Utc};

use crate::document::timestamp;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub handle: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub image_url: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl User {
    /// Create a new User with the default image
    pub fn new(handle: String, email: String, image_url: String) -> Self {
        Self {
            handle,
            email,
            created_at: timestamp::now(),
            image_url,
            bio: None,
            website: None,
            location: None,
        }
    }
}

/// Optional profile details supplied by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetails {
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl UserDetails {
    /// Trim values, drop blank ones, and give a bare website an `http://` scheme
    pub fn normalize(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let website = clean(self.website).map(|w| {
            if w.starts_with("http://") || w.starts_with("https://") {
                w
            } else {
                format!("http://{w}")
            }
        });

        Self {
            bio: clean(self.bio),
            website,
            location: clean(self.location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.website.is_none() && self.location.is_none()
    }
}
