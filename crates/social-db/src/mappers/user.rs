//! User entity <-> document mapper

use social_core::document::{to_fields, Collection, Document, Fields};
use social_core::entities::User;
use social_core::traits::RepoResult;

use super::DocumentMapper;
use crate::models::UserDocument;

impl DocumentMapper for User {
    const COLLECTION: Collection = Collection::Users;

    fn from_document(doc: &Document) -> RepoResult<Self> {
        let model: UserDocument = doc.decode()?;
        Ok(User {
            handle: model.handle,
            email: model.email,
            created_at: model.created_at,
            image_url: model.image_url,
            bio: model.bio,
            website: model.website,
            location: model.location,
        })
    }

    fn to_fields(&self) -> RepoResult<Fields> {
        to_fields(&UserDocument {
            handle: self.handle.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            image_url: self.image_url.clone(),
            bio: self.bio.clone(),
            website: self.website.clone(),
            location: self.location.clone(),
        })
    }
}
