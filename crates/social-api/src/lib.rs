//! # social-api
//!
//! REST API server built with Axum framework.
//!
//! Routes map one-to-one onto [`PostService`](social_service::PostService)
//! and [`UserService`](social_service::UserService) calls. Depending on
//! configuration the server also runs the trigger worker in-process.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
