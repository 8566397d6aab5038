//! Comment entity <-> document mapper

use social_core::document::{to_fields, Collection, Document, Fields};
use social_core::entities::Comment;
use social_core::traits::RepoResult;

use super::{parse_ref, DocumentMapper};
use crate::models::CommentDocument;

impl DocumentMapper for Comment {
    const COLLECTION: Collection = Collection::Comments;

    fn from_document(doc: &Document) -> RepoResult<Self> {
        let model: CommentDocument = doc.decode()?;
        Ok(Comment {
            id: doc.id.clone(),
            post_id: parse_ref(&model.post_id)?,
            user_handle: model.user_handle,
            body: model.body,
            created_at: model.created_at,
            user_image: model.user_image,
        })
    }

    fn to_fields(&self) -> RepoResult<Fields> {
        to_fields(&CommentDocument {
            post_id: self.post_id.to_string(),
            user_handle: self.user_handle.clone(),
            body: self.body.clone(),
            created_at: self.created_at,
            user_image: self.user_image.clone(),
        })
    }
}
