//! Backend access: the reqwest client, response-shape normalisation, and endpoint calls.

use std::path::PathBuf;

use crate::state::{DeviceSupport, User, Wallpaper};

mod auth;
pub mod client;
pub mod download;
pub mod envelope;
mod users;
pub mod version;
mod wallpapers;

pub use client::ApiClient;
pub use download::{download_file_name, download_wallpaper};
pub use envelope::{ListEnvelope, ListKind, RecordEnvelope};
pub use version::{UpdateCheck, check_for_updates};
pub use wallpapers::WALLPAPER_BY_ID_PATHS;

/// Errors surfaced by backend calls. `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network failure or timeout before a response arrived.
    #[error("Network error. Please check your internet connection and try again. ({0})")]
    Transport(String),
    /// Non-success HTTP status; `message` comes from the body when the backend sent one.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-supplied message or `HTTP error! status: <code>`.
        message: String,
    },
    /// Body was not JSON or did not have any recognised shape.
    #[error("Unexpected response from server: {0}")]
    Malformed(String),
    /// The operation needs a session token and none is stored.
    #[error("Not authenticated")]
    NotAuthenticated,
    /// A required input was empty.
    #[error("{0} is required")]
    MissingInput(&'static str),
    /// The wallpaper has no resolvable image URL.
    #[error("This wallpaper has no image to download")]
    MissingImage,
    /// No endpoint returned the requested wallpaper.
    #[error("Wallpaper not found: {0}")]
    NotFound(String),
    /// A local file could not be read or written.
    #[error("Could not access {path}: {message}")]
    LocalFile {
        /// Offending path.
        path: PathBuf,
        /// OS error text.
        message: String,
    },
    /// The backend refused an operation without a usable message.
    #[error("{0}")]
    Failed(String),
    /// Secure storage failed.
    #[error("Secure storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Build a `LocalFile` error from an I/O failure.
    pub(crate) fn local_file(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::LocalFile {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// Result alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Token and user returned by login and registration.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthPayload {
    /// Bearer token.
    pub token: String,
    /// Account the token belongs to.
    pub user: User,
}

/// Registration form fields.
#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    /// Login e-mail.
    pub email: String,
    /// Plain password, sent once.
    pub password: String,
    /// Public display name.
    pub user_name: String,
    /// JPEG file sent as the `profile` part.
    pub profile_photo: PathBuf,
}

/// Upload form fields.
#[derive(Clone, Debug, Default)]
pub struct UploadForm {
    /// Wallpaper title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Tags, JSON-encoded into one form field.
    pub tags: Vec<String>,
    /// Target orientation.
    pub device_support: DeviceSupport,
    /// Image file sent as the `wallpaperImage` part.
    pub image_path: PathBuf,
}

/// Account endpoints used by the auth store.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// What: Exchange credentials for a session.
    ///
    /// # Errors
    /// - `Status` with the backend message on rejected credentials; `Transport`/`Malformed` otherwise.
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload>;

    /// What: Create an account and open a session.
    ///
    /// # Errors
    /// - `MissingInput` when no profile photo is given; backend errors as for `login`.
    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload>;

    /// What: Fetch the profile belonging to `token`.
    ///
    /// # Errors
    /// - Any transport, status, or shape failure.
    async fn my_profile(&self, token: &str) -> Result<User>;
}

/// Wallpaper endpoints used by the wallpapers store.
#[allow(async_fn_in_trait)]
pub trait WallpaperApi {
    /// What: Fetch the public listing.
    ///
    /// # Errors
    /// - Transport or status failures. Unrecognised bodies yield an empty list instead.
    async fn all_wallpapers(&self) -> Result<Vec<Wallpaper>>;

    /// What: Fetch the caller's uploads.
    ///
    /// # Errors
    /// - Transport or status failures.
    async fn my_wallpapers(&self, token: &str) -> Result<Vec<Wallpaper>>;

    /// What: Fetch one wallpaper by id.
    ///
    /// # Errors
    /// - `NotFound` when no candidate endpoint returned a record.
    async fn wallpaper_by_id(&self, id: &str) -> Result<Wallpaper>;

    /// What: Delete one of the caller's wallpapers.
    ///
    /// # Errors
    /// - Transport or status failures.
    async fn delete_wallpaper(&self, id: &str, token: &str) -> Result<()>;

    /// What: Upload a new wallpaper.
    ///
    /// # Errors
    /// - `LocalFile` when the image cannot be read; backend errors otherwise.
    async fn upload_wallpaper(&self, form: &UploadForm, token: &str) -> Result<Wallpaper>;
}
