//! Post entity <-> document mapper

use social_core::document::{to_fields, Collection, Document, Fields};
use social_core::entities::Post;
use social_core::traits::RepoResult;

use super::DocumentMapper;
use crate::models::PostDocument;

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            body: post.body.clone(),
            user_handle: post.user_handle.clone(),
            created_at: post.created_at,
            likes: post.like_count,
            comments: post.comment_count,
            user_image: post.user_image.clone(),
        }
    }
}

impl DocumentMapper for Post {
    const COLLECTION: Collection = Collection::Posts;

    fn from_document(doc: &Document) -> RepoResult<Self> {
        let model: PostDocument = doc.decode()?;
        Ok(Post {
            id: doc.id.clone(),
            body: model.body,
            user_handle: model.user_handle,
            created_at: model.created_at,
            like_count: model.likes,
            comment_count: model.comments,
            user_image: model.user_image,
        })
    }

    fn to_fields(&self) -> RepoResult<Fields> {
        to_fields(&PostDocument::from(self))
    }
}
