//! Notification entity <-> document mapper

use social_core::document::{to_fields, Collection, Document, Fields};
use social_core::entities::Notification;
use social_core::traits::RepoResult;

use super::{parse_ref, DocumentMapper};
use crate::models::NotificationDocument;

impl DocumentMapper for Notification {
    const COLLECTION: Collection = Collection::Notifications;

    fn from_document(doc: &Document) -> RepoResult<Self> {
        let model: NotificationDocument = doc.decode()?;
        Ok(Notification {
            id: doc.id.clone(),
            recipient: model.recipient,
            sender: model.sender,
            kind: model.kind,
            read: model.read,
            post_id: parse_ref(&model.post_id)?,
            created_at: model.created_at,
        })
    }

    fn to_fields(&self) -> RepoResult<Fields> {
        to_fields(&NotificationDocument {
            recipient: self.recipient.clone(),
            sender: self.sender.clone(),
            kind: self.kind,
            read: self.read,
            post_id: self.post_id.to_string(),
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::entities::{NotificationType, Post};

    #[test]
    fn test_type_field_name() {
        let post = Post::new("x".to_string(), "alice".to_string(), None);
        let n = Notification::from_interaction(
            social_core::DocumentId::generate(),
            NotificationType::Like,
            &post,
            "bob",
        )
        .unwrap();

        let fields = n.to_fields().unwrap();
        assert_eq!(fields["type"], "like");
        assert_eq!(fields["read"], false);
        assert_eq!(fields["postId"], post.id.as_str());
    }
}
