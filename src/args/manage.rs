//! Command-line management of the user's wallpapers: upload, download, delete.

use std::path::Path;

use super::Context;
use super::utils::{parse_device, parse_tags};
use crate::sources::{ApiError, UploadForm, WallpaperApi, download_wallpaper};

/// What: Upload an image as a new wallpaper and refresh the user's uploads.
///
/// Inputs:
/// - `args`: Supplies title, description, category, tags and device.
/// - `path`: Image file.
///
/// # Errors
/// - `NotAuthenticated` without a session; file or backend errors otherwise.
pub async fn handle_upload(ctx: &Context, args: &super::Args, path: &Path) -> Result<(), ApiError> {
    let auth = ctx.auth.snapshot();
    let token = auth
        .token()
        .filter(|_| auth.is_authenticated())
        .ok_or(ApiError::NotAuthenticated)?;
    let form = UploadForm {
        title: args.title.clone().unwrap_or_default(),
        description: args.description.clone(),
        category: args.category.clone().unwrap_or_default(),
        tags: parse_tags(&args.tags),
        device_support: parse_device(&args.device),
        image_path: path.to_path_buf(),
    };
    tracing::info!(path = %path.display(), title = %form.title, "Upload requested from CLI");
    let created = ctx.client().upload_wallpaper(&form, token.expose()).await?;
    println!("Uploaded {} ({})", created.display_title(), created.id);
    ctx.wallpapers.refresh_user_wallpapers(&auth).await;
    println!("You now have {} uploads", ctx.wallpapers.user_wallpapers_count());
    Ok(())
}

/// What: Save a wallpaper's image into the download directory.
///
/// # Errors
/// - `NotFound` for unknown ids, `MissingImage` without image URL, I/O or backend errors.
pub async fn handle_download(ctx: &Context, id: &str) -> Result<(), ApiError> {
    let wallpaper = ctx
        .wallpapers
        .get_wallpaper(id)
        .await
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
    let dir = ctx.settings.download_dir_or_default(&ctx.paths);
    let saved = download_wallpaper(ctx.client(), &wallpaper, &dir).await?;
    println!("Saved {}", saved.display());
    Ok(())
}

/// What: Delete one of the user's wallpapers.
///
/// # Errors
/// - `NotAuthenticated` without a session; a status error when the backend refuses.
pub async fn handle_delete(ctx: &Context, id: &str) -> Result<(), ApiError> {
    let auth = ctx.auth.snapshot();
    if !auth.is_authenticated() {
        return Err(ApiError::NotAuthenticated);
    }
    if ctx.wallpapers.delete_wallpaper(id, &auth).await {
        println!("Deleted {id}");
        Ok(())
    } else {
        Err(ApiError::Failed(format!("Failed to delete wallpaper {id}")))
    }
}
