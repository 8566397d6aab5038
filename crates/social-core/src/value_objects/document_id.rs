//! Document ID - opaque identifier of a document inside a collection
//!
//! Generated ids are 20 alphanumeric characters. User documents are keyed
//! by handle instead, so any non-empty string without a path separator is
//! accepted when parsing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alphabet used for generated ids
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated ids
pub const GENERATED_ID_LEN: usize = 20;

/// Maximum accepted id length
pub const MAX_ID_LEN: usize = 1500;

/// Identifier of a document within its collection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a new random id
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..GENERATED_ID_LEN)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        Self(id)
    }

    /// Parse and validate an id coming from outside (paths, payloads)
    pub fn parse(s: &str) -> Result<Self, DocumentIdParseError> {
        if s.is_empty() {
            return Err(DocumentIdParseError::Empty);
        }
        if s.len() > MAX_ID_LEN {
            return Err(DocumentIdParseError::TooLong);
        }
        if s.contains('/') {
            return Err(DocumentIdParseError::PathSeparator);
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a DocumentId from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DocumentIdParseError {
    #[error("document id must not be empty")]
    Empty,

    #[error("document id is too long")]
    TooLong,

    #[error("document id must not contain '/'")]
    PathSeparator,
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = DocumentIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
