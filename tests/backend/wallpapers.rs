//! Wallpaper endpoints exercised against the stub server.

use serde_json::json;
use upwall::config::Settings;
use upwall::sources::{ApiClient, ApiError, UploadForm, WALLPAPER_BY_ID_PATHS, WallpaperApi};
use upwall::state::DeviceSupport;

use crate::helpers::{StubServer, json, raw};

#[tokio::test]
/// What: A nested listing is unwrapped and the mobile filter drops landscape records.
///
/// - Input: `{data:{wallpapers:[Landscape Wide, Mobile Abstract]}}`
/// - Output: Only `w2` is returned
async fn listing_is_unwrapped_and_mobile_filtered() {
    let server = StubServer::start(|_| {
        json(
            200,
            &json!({"data": {"wallpapers": [
                {"_id": "w1", "category": "Landscape Wide"},
                {"_id": "w2", "category": "Mobile Abstract"}
            ]}}),
        )
    })
    .await;

    let list = server.client().all_wallpapers().await.expect("listing");
    let ids: Vec<&str> = list.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["w2"]);
    assert_eq!(server.paths(), vec!["/api/wallpaper/getAllPosts"]);
}

#[tokio::test]
/// What: Turning the mobile filter off returns the listing untouched.
///
/// - Input: Same listing as above, `mobile_filter = false`
/// - Output: Both records in backend order
async fn listing_without_mobile_filter_keeps_everything() {
    let server = StubServer::start(|_| {
        json(
            200,
            &json!({"success": true, "data": [
                {"_id": "w1", "category": "Landscape Wide"},
                {"_id": "w2", "category": "Mobile Abstract"}
            ]}),
        )
    })
    .await;
    let settings = Settings {
        mobile_filter: false,
        ..server.settings()
    };
    let client = ApiClient::new(&settings).expect("client builds");

    let list = client.all_wallpapers().await.expect("listing");
    let ids: Vec<&str> = list.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["w1", "w2"]);
}

#[tokio::test]
/// What: An unrecognised listing body is an empty list, not an error.
async fn unrecognised_listing_is_empty() {
    let server = StubServer::start(|_| json(200, &json!({"message": "nothing here"}))).await;
    let list = server.client().all_wallpapers().await.expect("listing");
    assert!(list.is_empty());
}

#[tokio::test]
/// What: The user's uploads are fetched with the bearer token.
async fn my_wallpapers_sends_bearer_token() {
    let server = StubServer::start(|_| {
        json(200, &json!({"posts": [{"_id": "m1", "title": "Desktop Dunes"}]}))
    })
    .await;

    let mine = server
        .client()
        .my_wallpapers("tok-123")
        .await
        .expect("my uploads");
    assert_eq!(mine.len(), 1, "own uploads are never mobile-filtered");
    let reqs = server.requests();
    assert_eq!(reqs[0].path, "/api/wallpaper/myPost");
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
/// What: The by-id lookup walks the candidate paths until one yields a record.
///
/// - Input: First path 404, second returns a body without a record, third wraps the record in `data`
/// - Output: Record from the third path; the fourth is never requested
async fn wallpaper_by_id_falls_through_candidates() {
    let server = StubServer::start(|req| match req.path.as_str() {
        "/api/wallpaper/getPost/abc" => json(404, &json!({"message": "Not found"})),
        "/api/wallpaper/abc" => json(200, &json!({"message": "ok"})),
        "/api/wallpapers/abc" => json(200, &json!({"data": {"_id": "abc", "title": "Found"}})),
        _ => json(500, &json!({})),
    })
    .await;

    let w = server.client().wallpaper_by_id("abc").await.expect("record");
    assert_eq!(w.id, "abc");
    assert_eq!(w.display_title(), "Found");
    assert_eq!(
        server.paths(),
        vec![
            "/api/wallpaper/getPost/abc",
            "/api/wallpaper/abc",
            "/api/wallpapers/abc"
        ]
    );
}

#[tokio::test]
/// What: Every candidate failing ends in `NotFound` after all paths were tried.
async fn wallpaper_by_id_not_found_after_all_paths() {
    let server = StubServer::start(|_| json(404, &json!({"message": "Not found"}))).await;

    let err = server
        .client()
        .wallpaper_by_id("zzz")
        .await
        .expect_err("missing record");
    assert_eq!(err, ApiError::NotFound("zzz".into()));
    let expected: Vec<String> = WALLPAPER_BY_ID_PATHS
        .iter()
        .map(|t| t.replace("{id}", "zzz"))
        .collect();
    assert_eq!(server.paths(), expected);
}

#[tokio::test]
/// What: Delete uses the DELETE verb with the bearer token and surfaces refusals.
async fn delete_uses_bearer_and_reports_refusal() {
    let server = StubServer::start(|req| {
        if req.path.ends_with("/w-ok") {
            json(200, &json!({"message": "Post deleted"}))
        } else {
            json(403, &json!({"message": "Not your wallpaper"}))
        }
    })
    .await;
    let client = server.client();

    client.delete_wallpaper("w-ok", "tok").await.expect("deleted");
    let err = client
        .delete_wallpaper("w-other", "tok")
        .await
        .expect_err("refused");
    assert_eq!(err.to_string(), "Not your wallpaper");

    let reqs = server.requests();
    assert_eq!(reqs[0].method, "DELETE");
    assert_eq!(reqs[0].path, "/api/wallpaper/deletePost/w-ok");
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
/// What: Error bodies without a message fall back to the status text.
///
/// - Input: HTML 500 page
/// - Output: `HTTP error! status: 500`
async fn non_json_error_uses_status_text() {
    let server = StubServer::start(|_| raw(500, "text/html", b"<h1>oops</h1>")).await;
    let err = server
        .client()
        .all_wallpapers()
        .await
        .expect_err("server error");
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "HTTP error! status: 500".into()
        }
    );
}

#[tokio::test]
/// What: A success body that is not JSON is reported as malformed.
async fn non_json_success_is_malformed() {
    let server = StubServer::start(|_| raw(200, "text/plain", b"definitely not json")).await;
    let err = server
        .client()
        .all_wallpapers()
        .await
        .expect_err("bad body");
    assert!(matches!(err, ApiError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
/// What: Upload sends a multipart form with JSON-encoded tags and the image part.
///
/// - Input: PNG file, two tags, desktop orientation
/// - Output: Created record from `{wallpaper:{...}}`; form fields present in the body
async fn upload_sends_multipart_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = dir.path().join("sky.png");
    std::fs::write(&image, b"PNGDATA").expect("write image");
    let server = StubServer::start(|_| {
        json(
            201,
            &json!({"wallpaper": {"_id": "new1", "title": "Blue Sky", "category": "Nature"}}),
        )
    })
    .await;

    let form = UploadForm {
        title: "Blue Sky".into(),
        description: "clear day".into(),
        category: "Nature".into(),
        tags: vec!["sky".into(), "blue".into()],
        device_support: DeviceSupport::Desktop,
        image_path: image,
    };
    let created = server
        .client()
        .upload_wallpaper(&form, "tok")
        .await
        .expect("uploaded");
    assert_eq!(created.id, "new1");

    let reqs = server.requests();
    let req = &reqs[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/wallpaper/createPost");
    assert_eq!(req.header("authorization"), Some("Bearer tok"));
    assert!(
        req.header("content-type")
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    );
    let body = req.body_text();
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("Blue Sky"));
    assert!(body.contains("name=\"deviceSupport\""));
    assert!(body.contains("Desktop"));
    assert!(body.contains(r#"["sky","blue"]"#));
    assert!(body.contains("name=\"wallpaperImage\"; filename=\"sky.png\""));
    assert!(body.contains("image/png"));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
/// What: Upload with an unreadable image fails locally without contacting the backend.
async fn upload_missing_file_is_local_error() {
    let server = StubServer::start(|_| json(201, &json!({}))).await;
    let form = UploadForm {
        title: "Ghost".into(),
        image_path: "/definitely/not/here.jpg".into(),
        ..UploadForm::default()
    };
    let err = server
        .client()
        .upload_wallpaper(&form, "tok")
        .await
        .expect_err("no file");
    assert!(matches!(err, ApiError::LocalFile { .. }), "got {err:?}");
    assert!(server.requests().is_empty());
}
