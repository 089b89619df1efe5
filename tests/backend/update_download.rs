//! Update check and image download against the stub server.

use serde_json::json;
use upwall::sources::{ApiError, check_for_updates, download_wallpaper};
use upwall::state::Wallpaper;

use crate::helpers::{StubServer, json, raw};

#[tokio::test]
/// What: A newer published version is flagged with its store link.
async fn newer_version_is_reported() {
    let server = StubServer::start(|_| {
        json(
            200,
            &json!({"data": {"latestVersion": "1.2.0", "downloadUrl": "https://store/upwall", "message": "New filters"}}),
        )
    })
    .await;

    let check = check_for_updates(&server.client(), "1.0.0", "android").await;
    assert!(check.has_update);
    assert_eq!(check.latest_version, "1.2.0");
    assert_eq!(check.current_version, "1.0.0");
    assert_eq!(check.store_url.as_deref(), Some("https://store/upwall"));
    assert_eq!(check.message.as_deref(), Some("New filters"));
    assert_eq!(
        server.paths(),
        vec!["/api/versioninfo/version?platform=android"]
    );
}

#[tokio::test]
/// What: Any failure reports "no update" with the current version.
///
/// - Input: HTTP 500
/// - Output: `has_update == false`, `latest_version == current`
async fn failed_check_is_no_update() {
    let server = StubServer::start(|_| json(500, &json!({"message": "down"}))).await;
    let check = check_for_updates(&server.client(), "1.0.0", "ios").await;
    assert!(!check.has_update);
    assert_eq!(check.latest_version, "1.0.0");
    assert!(check.store_url.is_none());
}

#[tokio::test]
/// What: The same or an older published version is not an update.
async fn same_version_is_not_an_update() {
    let server = StubServer::start(|_| json(200, &json!({"latestVersion": "1.0"}))).await;
    let check = check_for_updates(&server.client(), "1.0.0", "android").await;
    assert!(!check.has_update);
    assert_eq!(check.latest_version, "1.0");
}

#[tokio::test]
/// What: Downloading writes the image bytes under `upwalls_<id>_<secs>.jpg`.
async fn download_writes_image_file() {
    let server = StubServer::start(|req| {
        if req.path == "/img/w2.jpg" {
            raw(200, "image/jpeg", b"JPEGBYTES")
        } else {
            raw(404, "text/plain", b"")
        }
    })
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let target_dir = dir.path().join("nested").join("downloads");
    let wallpaper = Wallpaper {
        id: "w2".into(),
        image_url: Some(format!("{}/img/w2.jpg", server.base_url)),
        ..Wallpaper::default()
    };

    let saved = download_wallpaper(&server.client(), &wallpaper, &target_dir)
        .await
        .expect("downloaded");
    assert_eq!(saved.parent(), Some(target_dir.as_path()));
    let name = saved
        .file_name()
        .and_then(|n| n.to_str())
        .expect("file name");
    assert!(name.starts_with("upwalls_w2_"), "name was {name}");
    assert!(name.ends_with(".jpg"));
    assert_eq!(std::fs::read(&saved).expect("read back"), b"JPEGBYTES");
}

#[tokio::test]
/// What: A failed image fetch reports the status and writes nothing.
async fn download_failure_writes_nothing() {
    let server = StubServer::start(|_| raw(404, "text/plain", b"")).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let wallpaper = Wallpaper {
        id: "gone".into(),
        image_url: Some(format!("{}/img/gone.jpg", server.base_url)),
        ..Wallpaper::default()
    };

    let err = download_wallpaper(&server.client(), &wallpaper, dir.path())
        .await
        .expect_err("missing image");
    assert!(matches!(err, ApiError::Status { status: 404, .. }), "got {err:?}");
    assert_eq!(std::fs::read_dir(dir.path()).expect("list").count(), 0);
}
