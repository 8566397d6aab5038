//! Entity <-> document mappers
//!
//! [`DocumentMapper`] converts domain entities (social-core) into the
//! stored field map of their collection and back.

mod comment;
mod like;
mod notification;
mod post;
mod user;

use social_core::document::{Collection, Document, Fields};
use social_core::traits::RepoResult;
use social_core::value_objects::DocumentId;
use social_core::DomainError;

/// Conversion between an entity and its stored document
pub trait DocumentMapper: Sized {
    /// Collection the entity is stored in
    const COLLECTION: Collection;

    /// Decode an entity from a stored document
    fn from_document(doc: &Document) -> RepoResult<Self>;

    /// Encode the entity's fields (the id is stored separately)
    fn to_fields(&self) -> RepoResult<Fields>;
}

/// Decode a stored reference id (e.g. `postId`)
pub(crate) fn parse_ref(value: &str) -> RepoResult<DocumentId> {
    DocumentId::parse(value)
        .map_err(|e| DomainError::SerializationError(format!("invalid reference id: {e}")))
}
