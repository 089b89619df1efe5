//! Command-line argument parsing and handling.

pub mod account;
pub mod browse;
pub mod definition;
pub mod manage;
pub mod render;
pub mod update;
pub mod utils;

use tokio::sync::OnceCell;

use crate::config::{ConfigPaths, Settings};
use crate::session::{AuthStore, FileStore, WallpapersStore};
use crate::sources::{ApiClient, ApiError};

// Re-export commonly used items
pub use definition::{Args, process_args};
pub use utils::{apply_overrides, determine_log_level};

/// Everything a command handler needs, built once at startup.
pub struct Context {
    /// Effective settings.
    pub settings: Settings,
    /// Configuration directory layout.
    pub paths: ConfigPaths,
    /// Auth session backed by the on-disk session directory.
    pub auth: AuthStore<ApiClient, FileStore>,
    /// Wallpaper caches.
    pub wallpapers: WallpapersStore<ApiClient>,
    listing: OnceCell<()>,
}

impl Context {
    /// What: Build the HTTP client and both stores.
    ///
    /// # Errors
    /// - `Transport` when the HTTP client cannot be created.
    pub fn new(settings: Settings, paths: ConfigPaths) -> Result<Self, ApiError> {
        let client = ApiClient::new(&settings)?;
        let storage = FileStore::new(paths.session_dir());
        Ok(Self {
            auth: AuthStore::new(client.clone(), storage),
            wallpapers: WallpapersStore::new(client),
            settings,
            paths,
            listing: OnceCell::new(),
        })
    }

    /// Backend client shared by both stores.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        self.wallpapers.api()
    }

    /// Load the public listing once per process; later calls reuse the cache.
    pub async fn ensure_listing(&self) {
        self.listing
            .get_or_init(|| self.wallpapers.refresh_all_wallpapers())
            .await;
    }
}
