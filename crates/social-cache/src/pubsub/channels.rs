//! Pub/Sub channel naming.

use social_core::Collection;

/// Prefix of the per-collection change channels
pub const DOCUMENTS_CHANNEL_PREFIX: &str = "documents";

/// A Redis Pub/Sub channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Changes to one collection (`documents:{collection}`)
    Documents(Collection),
    /// Any other channel name
    Custom(String),
}

impl PubSubChannel {
    /// Channel carrying changes of a collection
    #[must_use]
    pub fn documents(collection: Collection) -> Self {
        Self::Documents(collection)
    }

    /// One channel per collection
    #[must_use]
    pub fn all_documents() -> Vec<Self> {
        Collection::ALL.iter().copied().map(Self::Documents).collect()
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Documents(collection) => format!("{DOCUMENTS_CHANNEL_PREFIX}:{collection}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a Redis channel name; unknown names become `Custom`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        name.split_once(':')
            .filter(|(prefix, _)| *prefix == DOCUMENTS_CHANNEL_PREFIX)
            .and_then(|(_, collection)| collection.parse().ok())
            .map_or_else(|| Self::Custom(name.to_string()), Self::Documents)
    }

    /// Collection of a document channel
    #[must_use]
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Self::Documents(collection) => Some(*collection),
            Self::Custom(_) => None,
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
