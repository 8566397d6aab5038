//! Error handling utilities for repositories

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Replace a generic document-not-found error with a domain-specific one
pub fn not_found_as<F>(e: DomainError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e {
        DomainError::DocumentNotFound { .. } => on_missing(),
        other => other,
    }
}
