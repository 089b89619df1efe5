//! End-to-end session flows: the real client, file-backed storage, and the stub backend.

use serde_json::json;
use upwall::session::{AuthStatus, AuthStore, FileStore, SecureStore, TOKEN_KEY, USER_KEY, WallpapersStore};

use crate::helpers::{Recorded, Reply, StubServer, json};

fn backend(req: &Recorded) -> Reply {
    match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/api/users/login") => json(
            200,
            &json!({"token": "tok-e2e", "user": {"_id": "u1", "userName": "ann"}}),
        ),
        ("GET", "/api/users/myProfile") => json(
            200,
            &json!({"user": {"_id": "u1", "userName": "ann", "postCount": 2}}),
        ),
        ("GET", "/api/wallpaper/getAllPosts") => json(
            200,
            &json!({"wallpapers": [
                {"_id": "p1", "title": "Phone Waves"},
                {"_id": "p2", "title": "Forest"}
            ]}),
        ),
        ("GET", "/api/wallpaper/myPost") => json(
            200,
            &json!({"posts": [{"_id": "p2", "title": "Forest"}, {"_id": "p3"}]}),
        ),
        ("DELETE", "/api/wallpaper/deletePost/p2") => json(200, &json!({"message": "deleted"})),
        _ => json(404, &json!({"message": "Not found"})),
    }
}

#[tokio::test]
/// What: Login persists the session, a fresh store restores it, and logout wipes storage.
///
/// - Input: Login against the stub, second store over the same directory, then logout
/// - Output: Restored user carries the refreshed profile; storage reads back empty afterwards
async fn login_restore_logout_round() {
    let server = StubServer::start(backend).await;
    let dir = tempfile::tempdir().expect("tempdir");

    let first = AuthStore::new(server.client(), FileStore::new(dir.path()));
    first.login("ann@x.y", "pw").await.expect("login");
    let snap = first.snapshot();
    assert_eq!(snap.status(), AuthStatus::Authenticated);
    assert_eq!(snap.user().map(|u| u.post_count), Some(2));
    assert_eq!(snap.token().map(|t| t.expose()), Some("tok-e2e"));

    let second = AuthStore::new(server.client(), FileStore::new(dir.path()));
    assert_eq!(second.snapshot().status(), AuthStatus::Unauthenticated);
    second.initialize().await;
    let restored = second.snapshot();
    assert!(restored.is_authenticated());
    assert!(!restored.is_loading());
    assert_eq!(restored.user().map(|u| u.id.as_str()), Some("u1"));

    second.logout().expect("logout");
    assert_eq!(second.snapshot().status(), AuthStatus::Unauthenticated);
    let storage = FileStore::new(dir.path());
    assert_eq!(storage.get(TOKEN_KEY).expect("read token"), None);
    assert_eq!(storage.get(USER_KEY).expect("read user"), None);
}

#[tokio::test]
/// What: Without a stored session the profile endpoint is never contacted.
async fn initialize_without_session_makes_no_requests() {
    let server = StubServer::start(backend).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let store = AuthStore::new(server.client(), FileStore::new(dir.path()));

    store.initialize().await;
    assert!(!store.is_authenticated());
    assert!(server.requests().is_empty());
}

#[tokio::test]
/// What: The wallpaper caches follow the session and drop deleted records everywhere.
///
/// - Input: Signed-in session, public listing with the deleted record, delete of `p2`
/// - Output: `p2` gone from both caches; sign-out clears the user's uploads
async fn wallpapers_follow_session_and_delete() {
    let server = StubServer::start(backend).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let auth = AuthStore::new(server.client(), FileStore::new(dir.path()));
    let wallpapers = WallpapersStore::new(server.client());
    let mut changes = wallpapers.subscribe();

    auth.login("ann@x.y", "pw").await.expect("login");
    wallpapers.refresh_all_wallpapers().await;
    wallpapers.sync_with_auth(&auth.snapshot()).await;
    assert_eq!(wallpapers.all().len(), 2);
    assert_eq!(wallpapers.user_wallpapers_count(), 2);
    assert!(!wallpapers.is_loading());
    assert!(changes.has_changed().expect("store alive"));
    changes.mark_unchanged();

    assert!(wallpapers.delete_wallpaper("p2", &auth.snapshot()).await);
    assert!(wallpapers.all().iter().all(|w| w.id != "p2"));
    assert!(wallpapers.mine().iter().all(|w| w.id != "p2"));
    assert!(changes.has_changed().expect("store alive"));

    auth.logout().expect("logout");
    wallpapers.sync_with_auth(&auth.snapshot()).await;
    assert_eq!(wallpapers.user_wallpapers_count(), 0);
    assert_eq!(wallpapers.all().len(), 1, "public listing survives sign-out");
}

#[tokio::test]
/// What: Cached records are served without a request; unknown ids go to the backend.
async fn get_wallpaper_prefers_cache() {
    let server = StubServer::start(backend).await;
    let wallpapers = WallpapersStore::new(server.client());
    wallpapers.refresh_all_wallpapers().await;
    let before = server.requests().len();

    let cached = wallpapers.get_wallpaper("p1").await.expect("cached");
    assert_eq!(cached.display_title(), "Phone Waves");
    assert_eq!(server.requests().len(), before);

    assert!(wallpapers.get_wallpaper("nope").await.is_none());
    assert!(server.requests().len() > before);
}
