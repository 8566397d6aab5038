//! Ports - interfaces implemented by the infrastructure crates

mod publisher;
mod repositories;
mod store;

pub use publisher::ChangePublisher;
pub use repositories::{
    CommentRepository, LikeRepository, NotificationRepository, PostRepository, RepoResult,
    UserRepository,
};
pub use store::DocumentStore;
