//! Axum extractors for request handling
//!
//! Custom extractors for authentication and JSON bodies.

mod auth;
mod validated;

pub use auth::AuthUser;
pub use validated::{JsonBody, ValidatedJson};
