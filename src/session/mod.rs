//! Session state: the auth store, the wallpaper caches, and secure storage.
//!
//! Both stores publish their state on `tokio::sync::watch` channels and never
//! hold a borrow across an `.await`.

pub mod auth;
pub mod storage;
pub mod wallpapers;

pub use auth::{AuthSnapshot, AuthStatus, AuthStore, AuthToken};
pub use storage::{FileStore, MemoryStore, SecureStore, TOKEN_KEY, USER_KEY};
pub use wallpapers::{WallpapersSnapshot, WallpapersStore};
