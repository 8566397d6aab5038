//! # social-core
//!
//! Domain layer containing entities, the document model, change events,
//! and the ports (traits) implemented by the storage and messaging crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod document;
pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use document::{
    Collection, Direction, Document, FieldUpdate, Fields, Filter, OrderBy, Query, WriteBatch,
    WriteOp,
};
pub use entities::{Comment, Like, Notification, NotificationType, Post, User, UserDetails};
pub use error::DomainError;
pub use events::{ChangeKind, DocumentChange};
pub use traits::{
    ChangePublisher, CommentRepository, DocumentStore, LikeRepository, NotificationRepository,
    PostRepository, RepoResult, UserRepository,
};
pub use value_objects::{DocumentId, DocumentIdParseError};
