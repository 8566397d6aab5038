//! Integration test utilities for the social API
//!
//! Servers run on an ephemeral port over the in-memory store with the
//! trigger worker embedded, so no external services are needed.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
