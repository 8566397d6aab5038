//! # social-db
//!
//! Storage layer: document stores and the repository implementations on top.
//!
//! ## Overview
//!
//! - [`PgDocumentStore`]: PostgreSQL JSONB-backed store (production)
//! - [`MemoryDocumentStore`]: in-process store (development and tests)
//! - Document models with camelCase serde, and entity mappers
//! - Repository implementations for every collection, over any store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use social_db::{create_pool, DatabaseConfig, DocPostRepository, PgDocumentStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     let store = PgDocumentStore::new(pool);
//!     store.ensure_schema().await?;
//!     let posts = DocPostRepository::new(Arc::new(store));
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use mappers::DocumentMapper;
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    DocCommentRepository, DocLikeRepository, DocNotificationRepository, DocPostRepository,
    DocUserRepository,
};
pub use store::{MemoryDocumentStore, NoopPublisher, PgDocumentStore};
