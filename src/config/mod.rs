//! Runtime configuration: directory layout and `settings.conf` loading.

mod parse;
mod paths;

use std::path::PathBuf;
use std::time::Duration;

pub use parse::parse_settings;
pub use paths::ConfigPaths;

/// Backend used when neither the config file nor the environment names one.
pub const DEFAULT_BACKEND_URL: &str = "https://upwall-fullstack-e9qy.onrender.com";

/// Environment variable overriding `backend_url`.
pub const BACKEND_URL_ENV: &str = "UPWALL_BACKEND_URL";

/// User-tunable settings read from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the REST backend, without trailing slash.
    pub backend_url: String,
    /// Platform reported to the version endpoint (`android` or `ios`).
    pub update_platform: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory receiving downloaded wallpapers; `None` uses `<config>/downloads`.
    pub download_dir: Option<PathBuf>,
    /// Number of creators shown on the leaderboard.
    pub leaderboard_size: usize,
    /// Hide wallpapers that look like desktop/landscape images in public listings.
    pub mobile_filter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            update_platform: "android".to_string(),
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            download_dir: None,
            leaderboard_size: 4,
            mobile_filter: true,
        }
    }
}

impl Settings {
    /// Connect timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// What: Resolve where downloads land.
    ///
    /// Inputs:
    /// - `paths`: Config layout providing the default location.
    ///
    /// Output:
    /// - The configured directory or `<config>/downloads`.
    #[must_use]
    pub fn download_dir_or_default(&self, paths: &ConfigPaths) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| paths.default_download_dir())
    }
}

/// What: Load settings for the given config layout.
///
/// Inputs:
/// - `paths`: Resolved configuration directories.
///
/// Output:
/// - `Settings` from `settings.conf`, with `UPWALL_BACKEND_URL` applied on top; defaults when missing.
///
/// Details:
/// - A missing or unreadable file is not an error; defaults are used and a debug line is logged.
#[must_use]
pub fn load(paths: &ConfigPaths) -> Settings {
    let mut settings = Settings::default();
    let file = paths.settings_file();
    match std::fs::read_to_string(&file) {
        Ok(content) => {
            parse_settings(&content, &mut settings);
            tracing::debug!(path = %file.display(), "[Config] settings loaded");
        }
        Err(e) => {
            tracing::debug!(path = %file.display(), error = %e, "[Config] no settings file, using defaults");
        }
    }
    if let Ok(url) = std::env::var(BACKEND_URL_ENV)
        && !url.trim().is_empty()
    {
        settings.backend_url = normalize_base_url(&url);
    }
    settings
}

/// Strip whitespace and trailing slashes from a base URL.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
