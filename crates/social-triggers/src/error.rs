//! Trigger error types

use social_core::DomainError;
use thiserror::Error;

/// Trigger error type
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Store or domain failure while reading or writing
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The change lacks the snapshot this trigger reads
    #[error("{event_type} event has no {snapshot} snapshot")]
    MissingSnapshot {
        event_type: String,
        snapshot: &'static str,
    },

    /// Redis subscription failure
    #[error("Subscriber error: {0}")]
    Subscriber(#[from] social_cache::SubscriberError),

    /// Redis pool failure
    #[error("Cache error: {0}")]
    Cache(#[from] social_cache::RedisPoolError),

    /// Worker misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Health server failure
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Trigger result type
pub type TriggerResult<T> = Result<T, TriggerError>;
