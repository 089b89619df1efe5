//! Saving wallpaper images to the local download directory.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{ApiClient, ApiError, Result};
use crate::state::Wallpaper;

/// What: Build the file name a download is saved under.
///
/// Inputs:
/// - `id`: Wallpaper id.
/// - `unix_secs`: Download time in seconds since the epoch.
///
/// Output:
/// - `upwalls_<id>_<unix-seconds>.jpg`, with path separators in the id replaced.
#[must_use]
pub fn download_file_name(id: &str, unix_secs: i64) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("upwalls_{safe}_{unix_secs}.jpg")
}

/// What: Download a wallpaper's image into `dir`.
///
/// Inputs:
/// - `client`: Backend client; its connection pool is reused for the image host.
/// - `wallpaper`: Record whose image is saved.
/// - `dir`: Target directory, created when missing.
///
/// Output:
/// - Path of the written file.
///
/// # Errors
/// - `MissingImage` when the record has no image URL.
/// - `Transport`/`Status` when the image cannot be fetched.
/// - `LocalFile` when the directory or file cannot be written.
pub async fn download_wallpaper(client: &ApiClient, wallpaper: &Wallpaper, dir: &Path) -> Result<PathBuf> {
    let Some(url) = wallpaper.image_url() else {
        warn!(id = %wallpaper.id, "[Download] wallpaper has no image url");
        return Err(ApiError::MissingImage);
    };
    let resp = client.http().get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        warn!(id = %wallpaper.id, status = status.as_u16(), "[Download] image fetch failed");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: format!("HTTP error! status: {}", status.as_u16()),
        });
    }
    let bytes = resp.bytes().await?;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::local_file(dir, &e))?;
    let target = dir.join(download_file_name(&wallpaper.id, chrono::Utc::now().timestamp()));
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| ApiError::local_file(&target, &e))?;
    info!(id = %wallpaper.id, path = %target.display(), bytes = bytes.len(), "[Download] saved");
    Ok(target)
}
