use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named collection of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Posts,
    Comments,
    Likes,
    Notifications,
    Users,
    Credentials,
}

impl Collection {
    /// Every collection, in a stable order
    pub const ALL: [Collection; 6] = [
        Self::Posts,
        Self::Comments,
        Self::Likes,
        Self::Notifications,
        Self::Users,
        Self::Credentials,
    ];

    /// Collection name as stored
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Likes => "likes",
            Self::Notifications => "notifications",
            Self::Users => "users",
            Self::Credentials => "credentials",
        }
    }

    /// Parse a stored collection name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
