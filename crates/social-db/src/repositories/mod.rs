//! Repository implementations
//!
//! Typed implementations of the repository traits defined in social-core,
//! layered over any [`DocumentStore`](social_core::traits::DocumentStore).

mod comment;
mod error;
mod like;
mod notification;
mod post;
mod user;

pub use comment::DocCommentRepository;
pub use error::{map_db_error, not_found_as};
pub use like::DocLikeRepository;
pub use notification::DocNotificationRepository;
pub use post::DocPostRepository;
pub use user::DocUserRepository;

use social_core::document::Document;
use social_core::traits::RepoResult;

use crate::mappers::DocumentMapper;

/// Decode a list of documents into entities
pub(crate) fn decode_all<T: DocumentMapper>(docs: &[Document]) -> RepoResult<Vec<T>> {
    docs.iter().map(T::from_document).collect()
}
