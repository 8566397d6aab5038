//! Like entity <-> document mapper

use social_core::document::{to_fields, Collection, Document, Fields};
use social_core::entities::Like;
use social_core::traits::RepoResult;

use super::{parse_ref, DocumentMapper};
use crate::models::LikeDocument;

impl DocumentMapper for Like {
    const COLLECTION: Collection = Collection::Likes;

    fn from_document(doc: &Document) -> RepoResult<Self> {
        let model: LikeDocument = doc.decode()?;
        Ok(Like {
            id: doc.id.clone(),
            post_id: parse_ref(&model.post_id)?,
            user_handle: model.user_handle,
        })
    }

    fn to_fields(&self) -> RepoResult<Fields> {
        to_fields(&LikeDocument {
            post_id: self.post_id.to_string(),
            user_handle: self.user_handle.clone(),
        })
    }
}
