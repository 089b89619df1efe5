//! Domain records shared by the service layer, the session stores, and the CLI.
//!
//! Records are decoded leniently: the backend never fixed its field types, so
//! nulls fall back to defaults and several image field layouts are accepted.

pub mod types;

pub use types::{DeviceSupport, ImageAsset, ImageField, TrendingMode, User, Wallpaper};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// What: Serialize tests that mutate process-wide environment variables.
///
/// Output:
/// - A process-wide mutex shared by every environment-touching test.
#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
