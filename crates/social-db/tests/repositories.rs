//! Repository tests against the in-memory store

use std::sync::Arc;

use social_core::entities::{Comment, Like, Notification, NotificationType, Post, User, UserDetails};
use social_core::traits::{
    CommentRepository, DocumentStore, LikeRepository, NotificationRepository, PostRepository,
    UserRepository,
};
use social_core::{Collection, DocumentId, DomainError};
use social_db::{
    DocCommentRepository, DocLikeRepository, DocNotificationRepository, DocPostRepository,
    DocUserRepository, MemoryDocumentStore,
};

fn store() -> Arc<dyn DocumentStore> {
    Arc::new(MemoryDocumentStore::new())
}

fn post_by(handle: &str) -> Post {
    Post::new(format!("post by {handle}"), handle.to_string(), None)
}

#[tokio::test]
async fn test_post_crud_and_counters() {
    let repo = DocPostRepository::new(store());
    let post = post_by("alice");
    repo.create(&post).await.unwrap();

    let found = repo.find_by_id(&post.id).await.unwrap().unwrap();
    assert_eq!(found, post);

    let liked = repo.increment_likes(&post.id, 1).await.unwrap();
    assert_eq!(liked.like_count, 1);
    let commented = repo.increment_comments(&post.id, 2).await.unwrap();
    assert_eq!(commented.comment_count, 2);
    assert_eq!(commented.like_count, 1);

    repo.delete(&post.id).await.unwrap();
    assert!(repo.find_by_id(&post.id).await.unwrap().is_none());

    let err = repo.increment_likes(&post.id, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::PostNotFound(_)));
}

#[tokio::test]
async fn test_posts_newest_first() {
    let repo = DocPostRepository::new(store());
    let mut older = post_by("alice");
    older.created_at -= chrono::Duration::seconds(10);
    let newer = post_by("bob");
    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all[0].id, newer.id);
    assert_eq!(all[1].id, older.id);

    let alices = repo.find_by_author("alice").await.unwrap();
    assert_eq!(alices.len(), 1);
}

#[tokio::test]
async fn test_like_lookup() {
    let repo = DocLikeRepository::new(store());
    let post_id = DocumentId::generate();
    let like = Like::new(post_id.clone(), "bob".to_string());
    repo.create(&like).await.unwrap();

    assert_eq!(repo.find(&post_id, "bob").await.unwrap(), Some(like.clone()));
    assert!(repo.find(&post_id, "carol").await.unwrap().is_none());
    assert_eq!(repo.find_by_user("bob").await.unwrap().len(), 1);

    repo.delete(&like.id).await.unwrap();
    assert!(repo.find_by_post(&post_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_comments_by_post() {
    let repo = DocCommentRepository::new(store());
    let post_id = DocumentId::generate();
    let c1 = Comment::new(post_id.clone(), "bob".to_string(), "one".to_string(), None);
    let c2 = Comment::new(DocumentId::generate(), "bob".to_string(), "two".to_string(), None);
    repo.create(&c1).await.unwrap();
    repo.create(&c2).await.unwrap();

    let on_post = repo.find_by_post(&post_id).await.unwrap();
    assert_eq!(on_post, vec![c1]);
    assert_eq!(repo.find_by_author("bob").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_notifications_mark_read() {
    let repo = DocNotificationRepository::new(store());
    let post = post_by("alice");
    let n = Notification::from_interaction(DocumentId::generate(), NotificationType::Like, &post, "bob")
        .unwrap();
    repo.create(&n).await.unwrap();

    let inbox = repo.find_by_recipient("alice", 10).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(!inbox[0].read);

    repo.mark_read(&[n.id.clone()]).await.unwrap();
    assert!(repo.find_by_id(&n.id).await.unwrap().unwrap().read);

    // Unknown id fails the whole batch
    let err = repo.mark_read(&[DocumentId::generate()]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_user_lifecycle() {
    let store = store();
    let repo = DocUserRepository::new(store.clone());
    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "default.png".to_string(),
    );
    repo.create(&user, "hash").await.unwrap();

    assert!(repo.handle_exists("alice").await.unwrap());
    assert!(!repo.handle_exists("a/b").await.unwrap());
    assert!(repo.email_exists("alice@example.com").await.unwrap());
    assert_eq!(
        repo.find_credentials_by_email("alice@example.com").await.unwrap(),
        Some(("alice".to_string(), "hash".to_string()))
    );

    // The password hash never lands in the public document
    let doc = store
        .get(Collection::Users, &DocumentId::parse("alice").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(doc.get("passwordHash").is_none());

    repo.update_details(
        "alice",
        &UserDetails {
            bio: Some("hi".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.update_image("alice", "new.png").await.unwrap();

    let found = repo.find_by_handle("alice").await.unwrap().unwrap();
    assert_eq!(found.bio.as_deref(), Some("hi"));
    assert_eq!(found.image_url, "new.png");

    let err = repo.update_image("nobody", "x.png").await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound(_)));
}
