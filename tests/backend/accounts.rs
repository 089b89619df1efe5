//! Account endpoints and the creator leaderboard against the stub server.

use serde_json::json;
use upwall::sources::{ApiError, AuthApi, RegisterForm};

use crate::helpers::{StubServer, json};

#[tokio::test]
/// What: Login posts JSON credentials and returns token plus user.
async fn login_posts_credentials() {
    let server = StubServer::start(|_| {
        json(
            200,
            &json!({"token": "tok-1", "user": {"_id": "u1", "email": "a@b.c", "userName": "ann"}}),
        )
    })
    .await;

    let payload = server
        .client()
        .login("a@b.c", "hunter2")
        .await
        .expect("login");
    assert_eq!(payload.token, "tok-1");
    assert_eq!(payload.user.user_name, "ann");

    let reqs = server.requests();
    assert_eq!(reqs[0].method, "POST");
    assert_eq!(reqs[0].path, "/api/users/login");
    assert_eq!(
        reqs[0].body_json(),
        json!({"email": "a@b.c", "password": "hunter2"})
    );
    assert!(reqs[0].header("authorization").is_none());
}

#[tokio::test]
/// What: Rejected credentials surface the backend's message verbatim.
async fn login_rejection_carries_backend_message() {
    let server = StubServer::start(|_| json(401, &json!({"message": "Invalid email or password"}))).await;
    let err = server
        .client()
        .login("a@b.c", "wrong")
        .await
        .expect_err("rejected");
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}

#[tokio::test]
/// What: A success body without a token is malformed.
async fn login_without_token_is_malformed() {
    let server = StubServer::start(|_| json(200, &json!({"user": {"_id": "u1"}}))).await;
    let err = server
        .client()
        .login("a@b.c", "pw")
        .await
        .expect_err("no token");
    assert!(matches!(err, ApiError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
/// What: Registration sends the photo as a JPEG `profile` part alongside the text fields.
async fn register_sends_profile_photo() {
    let dir = tempfile::tempdir().expect("tempdir");
    let photo = dir.path().join("me.png");
    std::fs::write(&photo, b"FACE").expect("write photo");
    let server = StubServer::start(|_| {
        json(
            201,
            &json!({"token": "tok-2", "user": {"_id": "u2", "userName": "bob"}}),
        )
    })
    .await;

    let form = RegisterForm {
        email: "bob@b.c".into(),
        password: "pw".into(),
        user_name: "bob".into(),
        profile_photo: photo,
    };
    let payload = server.client().register(&form).await.expect("registered");
    assert_eq!(payload.user.id, "u2");

    let reqs = server.requests();
    assert_eq!(reqs[0].path, "/api/users/register");
    let body = reqs[0].body_text();
    assert!(body.contains("name=\"userName\""));
    assert!(body.contains("name=\"profile\"; filename=\"photo.jpg\""));
    assert!(body.contains("image/jpeg"));
    assert!(body.contains("FACE"));
}

#[tokio::test]
/// What: The profile is read from `{user:{...}}` with the bearer token.
async fn my_profile_reads_user_key() {
    let server = StubServer::start(|_| {
        json(200, &json!({"user": {"_id": "u1", "userName": "ann", "postCount": 3}}))
    })
    .await;

    let user = server.client().my_profile("tok-1").await.expect("profile");
    assert_eq!(user.id, "u1");
    assert_eq!(user.post_count, 3);
    let reqs = server.requests();
    assert_eq!(reqs[0].path, "/api/users/myProfile");
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
/// What: The leaderboard ranks uploaders by post count and drops users without uploads.
///
/// - Input: Five users, one with zero posts
/// - Output: Top four with uploads, ranks 1..=4, points `post_count * 50`
async fn leaderboard_ranks_top_creators() {
    let server = StubServer::start(|_| {
        json(
            200,
            &json!({"users": [
                {"_id": "a", "userName": "a", "postCount": 2},
                {"_id": "b", "userName": "b", "postCount": 9},
                {"_id": "c", "userName": "c", "postCount": 0},
                {"_id": "d", "userName": "d", "postCount": 5},
                {"_id": "e", "userName": "e", "postCount": 5},
                {"_id": "f", "userName": "f", "postCount": 1}
            ]}),
        )
    })
    .await;

    let board = server.client().leaderboard(4).await.expect("leaderboard");
    let rows: Vec<(usize, &str, u64)> = board
        .iter()
        .map(|e| (e.rank, e.user.id.as_str(), e.points))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "b", 450), (2, "d", 250), (3, "e", 250), (4, "a", 100)]
    );
    assert_eq!(server.paths(), vec!["/api/users/getUsers"]);
}
