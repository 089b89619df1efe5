//! Wallpaper endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::envelope::{ListKind, decode_list, decode_record};
use super::{ApiClient, ApiError, Result, UploadForm, WallpaperApi};
use crate::logic::filter_mobile_wallpapers;
use crate::state::Wallpaper;
use crate::util::percent_encode;

/// Path templates tried in order when fetching a single wallpaper; `{id}` is replaced.
pub const WALLPAPER_BY_ID_PATHS: [&str; 4] = [
    "/api/wallpaper/getPost/{id}",
    "/api/wallpaper/{id}",
    "/api/wallpapers/{id}",
    "/api/wallpaper/post/{id}",
];

impl WallpaperApi for ApiClient {
    async fn all_wallpapers(&self) -> Result<Vec<Wallpaper>> {
        let v = self
            .send_json(self.get("/api/wallpaper/getAllPosts", None), "getAllPosts")
            .await?;
        let list: Vec<Wallpaper> = decode_list(&v, ListKind::Wallpapers);
        debug!(count = list.len(), "[Wallpapers] public listing decoded");
        if self.mobile_filter() {
            Ok(filter_mobile_wallpapers(list))
        } else {
            Ok(list)
        }
    }

    async fn my_wallpapers(&self, token: &str) -> Result<Vec<Wallpaper>> {
        let v = self
            .send_json(self.get("/api/wallpaper/myPost", Some(token)), "myPost")
            .await?;
        Ok(decode_list(&v, ListKind::Wallpapers))
    }

    async fn wallpaper_by_id(&self, id: &str) -> Result<Wallpaper> {
        let encoded = percent_encode(id);
        for template in WALLPAPER_BY_ID_PATHS {
            let path = template.replace("{id}", &encoded);
            match self.send_json(self.get(&path, None), &path).await {
                Ok(v) => {
                    if let Some(w) = decode_record::<Wallpaper>(&v) {
                        debug!(id, path = %path, "[Wallpapers] record found");
                        return Ok(w);
                    }
                    debug!(id, path = %path, "[Wallpapers] response had no record, trying next path");
                }
                Err(e) => debug!(id, path = %path, error = %e, "[Wallpapers] path failed, trying next"),
            }
        }
        warn!(id, "[Wallpapers] all endpoints failed");
        Err(ApiError::NotFound(id.to_string()))
    }

    async fn delete_wallpaper(&self, id: &str, token: &str) -> Result<()> {
        let path = format!("/api/wallpaper/deletePost/{}", percent_encode(id));
        self.send_json(self.delete(&path, token), "deletePost").await?;
        info!(id, "[Wallpapers] deleted");
        Ok(())
    }

    async fn upload_wallpaper(&self, form: &UploadForm, token: &str) -> Result<Wallpaper> {
        if form.image_path.as_os_str().is_empty() {
            return Err(ApiError::MissingInput("Image"));
        }
        if form.title.trim().is_empty() {
            return Err(ApiError::MissingInput("Title"));
        }
        let bytes = tokio::fs::read(&form.image_path)
            .await
            .map_err(|e| ApiError::local_file(&form.image_path, &e))?;
        let (file_name, mime) = upload_file_meta(&form.image_path);
        let part = Part::bytes(bytes).file_name(file_name).mime_str(&mime)?;
        let tags = serde_json::to_string(&form.tags)?;
        let multipart = Form::new()
            .text("title", form.title.clone())
            .text("description", form.description.clone())
            .text("category", form.category.clone())
            .text("deviceSupport", form.device_support.as_form_value())
            .text("tags", tags)
            .part("wallpaperImage", part);
        let v = self
            .send_json(
                self.post("/api/wallpaper/createPost", Some(token)).multipart(multipart),
                "createPost",
            )
            .await?;
        let created = v
            .get("wallpaper")
            .and_then(|w| serde_json::from_value::<Wallpaper>(w.clone()).ok())
            .or_else(|| serde_json::from_value::<Wallpaper>(v.clone()).ok())
            .ok_or_else(|| ApiError::Malformed("upload response has no wallpaper".into()))?;
        info!(id = %created.id, title = created.display_title(), "[Wallpapers] uploaded");
        Ok(created)
    }
}

/// What: Derive the multipart file name and MIME type for an upload.
///
/// Output:
/// - `(file name, "image/<ext>")`. A path without a file name uploads as `upload.jpg`;
///   a name without extension is sent as `image/jpeg`.
fn upload_file_meta(path: &Path) -> (String, String) {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload.jpg")
        .to_string();
    let mime = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        .map_or_else(|| "image/jpeg".to_string(), |ext| format!("image/{ext}"));
    (file_name, mime)
}
