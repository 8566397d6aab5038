//! API Integration Tests
//!
//! Each test starts its own server over the in-memory store with the
//! trigger worker embedded.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, eventually, fixtures::*, TestServer, TestUser,
};
use reqwest::StatusCode;

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

async fn me(server: &TestServer, user: &TestUser) -> AuthenticatedUserResponse {
    let response = server.get_auth("/user", &user.token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn post_detail(server: &TestServer, post_id: &str) -> PostDetailResponse {
    let response = server.get(&format!("/post/{post_id}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn error_body(response: reqwest::Response, status: StatusCode) -> ErrorBody {
    assert_json(response, status).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server().await;
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_redis() {
    let server = server().await;
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], "healthy");
    assert!(body["checks"].get("redis").is_none());
}

// ============================================================================
// Signup / Login Tests
// ============================================================================

#[tokio::test]
async fn test_signup_and_login() {
    let server = server().await;
    let request = SignupRequest::unique("amy");

    let response = server.post("/signup", &request).await.unwrap();
    let signup: TokenResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!signup.token.is_empty());

    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let login: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let user = TestUser {
        handle: request.handle.clone(),
        token: login.token,
    };
    let details = me(&server, &user).await;
    assert_eq!(details.credentials.handle, request.handle);
    assert_eq!(details.credentials.image_url, "https://img.test/no-img.png");
}

#[tokio::test]
async fn test_signup_handle_taken() {
    let server = server().await;
    let first = SignupRequest::unique("amy");
    server.post("/signup", &first).await.unwrap();

    let mut second = SignupRequest::unique("amy");
    second.handle = first.handle.clone();
    let response = server.post("/signup", &second).await.unwrap();

    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body.error, "HANDLE_TAKEN");
    assert_eq!(
        body.details,
        Some(serde_json::json!({ "handle": "This handle is already taken" }))
    );
}

#[tokio::test]
async fn test_signup_email_taken() {
    let server = server().await;
    let first = SignupRequest::unique("amy");
    server.post("/signup", &first).await.unwrap();

    let mut second = SignupRequest::unique("bob");
    second.email = first.email.clone();
    let response = server.post("/signup", &second).await.unwrap();

    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body.error, "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_signup_validation() {
    let server = server().await;

    let mut request = SignupRequest::unique("amy");
    request.email = "not-an-email".to_string();
    let response = server.post("/signup", &request).await.unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert!(body.details.unwrap().get("email").is_some());

    let mut request = SignupRequest::unique("amy");
    request.confirm_password = "different".to_string();
    let response = server.post("/signup", &request).await.unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(
        body.details,
        Some(serde_json::json!({ "confirmPassword": "Passwords must match" }))
    );
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = server().await;
    let request = SignupRequest::unique("amy");
    server.post("/signup", &request).await.unwrap();

    let mut login = LoginRequest::from_signup(&request);
    login.password = "WrongPass".to_string();
    let response = server.post("/login", &login).await.unwrap();

    let body = error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body.message, "Wrong credentials, please try again");
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_auth() {
    let server = server().await;
    let response = server.post("/post", &BodyRequest::new("hi")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth("/post", "not-a-token", &BodyRequest::new("hi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_post_blank_body() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();

    let response = server
        .post_auth("/post", &amy.token, &BodyRequest::new("   "))
        .await
        .unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
    assert_eq!(
        body.details,
        Some(serde_json::json!({ "body": "Body must not be empty" }))
    );
}

#[tokio::test]
async fn test_posts_listed_newest_first() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();

    let older = server.create_post(&amy, "older").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = server.create_post(&amy, "newer").await.unwrap();

    let response = server.get("/posts").await.unwrap();
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec![newer.post_id.as_str(), older.post_id.as_str()]);
    assert_eq!(posts[0].user_image.as_deref(), Some("https://img.test/no-img.png"));
}

#[tokio::test]
async fn test_get_missing_post() {
    let server = server().await;
    let response = server.get("/post/doesnotexist").await.unwrap();
    let body = error_body(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body.message, "Post not found");
}

#[tokio::test]
async fn test_like_twice_keeps_counter() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();
    let bob = server.signup("bob").await.unwrap();
    let post = server.create_post(&amy, "hello").await.unwrap();

    let path = format!("/post/{}/like", post.post_id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let liked: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.likes, 1);

    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body.message, "Post already liked");

    assert_eq!(post_detail(&server, &post.post_id).await.post.likes, 1);
}

#[tokio::test]
async fn test_unlike() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();
    let bob = server.signup("bob").await.unwrap();
    let post = server.create_post(&amy, "hello").await.unwrap();

    let unlike = format!("/post/{}/unlike", post.post_id);
    let response = server.get_auth(&unlike, &bob.token).await.unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body.message, "Post already unliked");

    let like = format!("/post/{}/like", post.post_id);
    server.get_auth(&like, &bob.token).await.unwrap();
    let response = server.get_auth(&unlike, &bob.token).await.unwrap();
    let unliked: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unliked.likes, 0);
}

#[tokio::test]
async fn test_like_missing_post() {
    let server = server().await;
    let bob = server.signup("bob").await.unwrap();
    let response = server
        .get_auth("/post/doesnotexist/like", &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_on_post() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();
    let bob = server.signup("bob").await.unwrap();
    let post = server.create_post(&amy, "hello").await.unwrap();
    let path = format!("/post/{}/comment", post.post_id);

    let response = server
        .post_auth(&path, &bob.token, &BodyRequest::new(""))
        .await
        .unwrap();
    let body = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(
        body.details,
        Some(serde_json::json!({ "comment": "Must not be empty" }))
    );

    let response = server
        .post_auth(&path, &bob.token, &BodyRequest::new("nice"))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comment.user_handle, bob.handle);

    let detail = post_detail(&server, &post.post_id).await;
    assert_eq!(detail.post.comments, 1);
    assert_eq!(detail.comment_list.len(), 1);
    assert_eq!(detail.comment_list[0].comment_id, comment.comment_id);
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let server = server().await;
    let bob = server.signup("bob").await.unwrap();
    let response = server
        .post_auth("/post/doesnotexist/comment", &bob.token, &BodyRequest::new("hi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Trigger Tests
// ============================================================================

#[tokio::test]
async fn test_notification_only_for_other_users() {
    let server = &server().await;
    let amy = &server.signup("amy").await.unwrap();
    let bob = &server.signup("bob").await.unwrap();
    let post = &server.create_post(&amy, "hello").await.unwrap();
    let like = format!("/post/{}/like", post.post_id);

    // Own like: no notification
    server.get_auth(&like, &amy.token).await.unwrap();
    server.get_auth(&like, &bob.token).await.unwrap();

    eventually(|| async move { Ok(!me(server, amy).await.notifications.is_empty()) })
        .await
        .unwrap();

    let notifications = me(server, amy).await.notifications;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].sender, bob.handle);
    assert_eq!(notifications[0].post_id, post.post_id);
    assert!(!notifications[0].read);
}

#[tokio::test]
async fn test_unlike_removes_notification() {
    let server = &server().await;
    let amy = &server.signup("amy").await.unwrap();
    let bob = &server.signup("bob").await.unwrap();
    let post = &server.create_post(&amy, "hello").await.unwrap();

    server
        .get_auth(&format!("/post/{}/like", post.post_id), &bob.token)
        .await
        .unwrap();
    eventually(|| async move { Ok(me(server, amy).await.notifications.len() == 1) })
        .await
        .unwrap();

    server
        .get_auth(&format!("/post/{}/unlike", post.post_id), &bob.token)
        .await
        .unwrap();
    eventually(|| async move { Ok(me(server, amy).await.notifications.is_empty()) })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mark_notifications_read() {
    let server = &server().await;
    let amy = &server.signup("amy").await.unwrap();
    let bob = &server.signup("bob").await.unwrap();
    let post = &server.create_post(&amy, "hello").await.unwrap();

    server
        .post_auth(
            &format!("/post/{}/comment", post.post_id),
            &bob.token,
            &BodyRequest::new("hi"),
        )
        .await
        .unwrap();
    eventually(|| async move { Ok(me(server, amy).await.notifications.len() == 1) })
        .await
        .unwrap();

    let ids: Vec<String> = me(server, amy)
        .await
        .notifications
        .into_iter()
        .map(|n| n.notification_id)
        .collect();
    let response = server
        .post_auth("/notifications", &amy.token, &ids)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Notifications marked read");

    assert!(me(server, amy).await.notifications.iter().all(|n| n.read));
}

#[tokio::test]
async fn test_delete_post_cascades() {
    let server = &server().await;
    let amy = &server.signup("amy").await.unwrap();
    let bob = &server.signup("bob").await.unwrap();
    let post = &server.create_post(&amy, "hello").await.unwrap();

    server
        .get_auth(&format!("/post/{}/like", post.post_id), &bob.token)
        .await
        .unwrap();
    server
        .post_auth(
            &format!("/post/{}/comment", post.post_id),
            &bob.token,
            &BodyRequest::new("hi"),
        )
        .await
        .unwrap();
    eventually(|| async move { Ok(me(server, amy).await.notifications.len() == 2) })
        .await
        .unwrap();

    let path = format!("/post/{}", post.post_id);
    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    let body = error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body.message, "Unauthorized");

    let response = server.delete_auth(&path, &amy.token).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Post deleted successfully");

    eventually(|| async move {
        let amy_me = me(server, amy).await;
        let bob_me = me(server, bob).await;
        Ok(amy_me.notifications.is_empty() && bob_me.likes.is_empty())
    })
    .await
    .unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_image_change_propagates() {
    let server = &server().await;
    let amy = &server.signup("amy").await.unwrap();
    let bob = &server.signup("bob").await.unwrap();
    let own = &server.create_post(&amy, "mine").await.unwrap();
    let other = &server.create_post(&bob, "theirs").await.unwrap();
    server
        .post_auth(
            &format!("/post/{}/comment", other.post_id),
            &amy.token,
            &BodyRequest::new("hi"),
        )
        .await
        .unwrap();

    let new_image = "https://img.test/amy-new.png";
    let response = server
        .post_auth(
            "/user/image",
            &amy.token,
            &ImageRequest {
                image_url: new_image.to_string(),
            },
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Image uploaded successfully");

    eventually(|| async move {
        let own = post_detail(server, &own.post_id).await;
        let other = post_detail(server, &other.post_id).await;
        Ok(own.post.user_image.as_deref() == Some(new_image)
            && other.comment_list[0].user_image.as_deref() == Some(new_image))
    })
    .await
    .unwrap();

    let other = post_detail(server, &other.post_id).await;
    assert_eq!(
        other.post.user_image.as_deref(),
        Some("https://img.test/no-img.png")
    );
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_user_details_and_page() {
    let server = server().await;
    let amy = server.signup("amy").await.unwrap();
    server.create_post(&amy, "hello").await.unwrap();

    let details = DetailsRequest {
        bio: Some("Hi there".to_string()),
        website: Some("example.com".to_string()),
        location: Some("   ".to_string()),
    };
    let response = server.post_auth("/user", &amy.token, &details).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Details added successfully");

    let response = server.get(&format!("/user/{}", amy.handle)).await.unwrap();
    let page: UserPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.user.bio.as_deref(), Some("Hi there"));
    assert_eq!(page.user.website.as_deref(), Some("http://example.com"));
    assert_eq!(page.user.location, None);
    assert_eq!(page.posts.len(), 1);
}

#[tokio::test]
async fn test_unknown_user_page() {
    let server = server().await;
    let response = server.get("/user/nobody").await.unwrap();
    let body = error_body(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body.message, "User not found");
}
