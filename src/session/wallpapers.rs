//! Wallpapers session store: the public listing and the signed-in user's uploads.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::auth::AuthSnapshot;
use crate::sources::WallpaperApi;
use crate::state::Wallpaper;

/// Published wallpaper caches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallpapersSnapshot {
    /// Public listing, already mobile-filtered by the client.
    pub all: Vec<Wallpaper>,
    /// The signed-in user's uploads.
    pub mine: Vec<Wallpaper>,
    /// Number of refreshes currently running.
    pub in_flight: usize,
}

impl WallpapersSnapshot {
    /// Whether any refresh is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// What: Owner of the wallpaper caches.
///
/// Details:
/// - Each refresh replaces its list in one update. Concurrent refreshes of the same list
///   are not deduplicated; whichever finishes last wins.
/// - Network failures are logged and turn into an empty list or `false`.
pub struct WallpapersStore<W> {
    api: W,
    state: watch::Sender<WallpapersSnapshot>,
}

impl<W: WallpaperApi> WallpapersStore<W> {
    /// Store with empty caches.
    #[must_use]
    pub fn new(api: W) -> Self {
        let (state, _) = watch::channel(WallpapersSnapshot::default());
        Self { api, state }
    }

    /// Receiver observing every cache change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WallpapersSnapshot> {
        self.state.subscribe()
    }

    /// Backend handle.
    #[must_use]
    pub const fn api(&self) -> &W {
        &self.api
    }

    /// Copy of the public listing.
    #[must_use]
    pub fn all(&self) -> Vec<Wallpaper> {
        self.state.borrow().all.clone()
    }

    /// Copy of the user's uploads.
    #[must_use]
    pub fn mine(&self) -> Vec<Wallpaper> {
        self.state.borrow().mine.clone()
    }

    /// Number of cached uploads of the signed-in user.
    #[must_use]
    pub fn user_wallpapers_count(&self) -> usize {
        self.state.borrow().mine.len()
    }

    /// Whether any refresh is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// What: Reload the public listing.
    ///
    /// Details:
    /// - Runs regardless of auth state. A failure empties the cache.
    pub async fn refresh_all_wallpapers(&self) {
        let loading = self.begin();
        let list = match self.api.all_wallpapers().await {
            Ok(list) => {
                info!(count = list.len(), "[Wallpapers] loaded public listing");
                list
            }
            Err(e) => {
                warn!(error = %e, "[Wallpapers] refreshing public listing failed");
                Vec::new()
            }
        };
        loading.finish(|s| s.all = list);
    }

    /// What: Reload the signed-in user's uploads.
    ///
    /// Inputs:
    /// - `auth`: Current auth state; nothing happens when it is not authenticated.
    pub async fn refresh_user_wallpapers(&self, auth: &AuthSnapshot) {
        let Some(token) = auth.token().filter(|_| auth.is_authenticated()) else {
            debug!("[Wallpapers] not authenticated, skipping user wallpapers");
            return;
        };
        let loading = self.begin();
        let list = match self.api.my_wallpapers(token.expose()).await {
            Ok(list) => {
                info!(count = list.len(), "[Wallpapers] loaded user wallpapers");
                list
            }
            Err(e) => {
                warn!(error = %e, "[Wallpapers] refreshing user wallpapers failed");
                Vec::new()
            }
        };
        loading.finish(|s| s.mine = list);
    }

    /// What: Follow an auth change.
    ///
    /// Output:
    /// - Signed out: "mine" is cleared. Signed in: "mine" is refreshed.
    pub async fn sync_with_auth(&self, auth: &AuthSnapshot) {
        if auth.is_authenticated() {
            self.refresh_user_wallpapers(auth).await;
        } else {
            self.state.send_if_modified(|s| {
                let changed = !s.mine.is_empty();
                s.mine.clear();
                changed
            });
        }
    }

    /// What: Look up one wallpaper.
    ///
    /// Output:
    /// - The cached record from the public listing when present, otherwise the backend's;
    ///   `None` when neither has it.
    pub async fn get_wallpaper(&self, id: &str) -> Option<Wallpaper> {
        let cached = self.state.borrow().all.iter().find(|w| w.id == id).cloned();
        if cached.is_some() {
            debug!(id, "[Wallpapers] served from cache");
            return cached;
        }
        match self.api.wallpaper_by_id(id).await {
            Ok(w) => Some(w),
            Err(e) => {
                warn!(id, error = %e, "[Wallpapers] fetching wallpaper failed");
                None
            }
        }
    }

    /// What: Delete a wallpaper on the backend and drop it from both caches.
    ///
    /// Output:
    /// - `true` when the backend accepted; both caches then no longer contain `id`.
    /// - `false` on failure or without a session; caches are untouched.
    pub async fn delete_wallpaper(&self, id: &str, auth: &AuthSnapshot) -> bool {
        let Some(token) = auth.token().filter(|_| auth.is_authenticated()) else {
            warn!(id, "[Wallpapers] delete requires a session");
            return false;
        };
        match self.api.delete_wallpaper(id, token.expose()).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.all.retain(|w| w.id != id);
                    s.mine.retain(|w| w.id != id);
                });
                true
            }
            Err(e) => {
                warn!(id, error = %e, "[Wallpapers] delete failed");
                false
            }
        }
    }

    fn begin(&self) -> InFlight<'_> {
        self.state.send_modify(|s| s.in_flight += 1);
        InFlight {
            state: &self.state,
            done: false,
        }
    }
}

/// One running refresh counted in `in_flight`.
///
/// The count is released by [`InFlight::finish`] or, when the refresh future is dropped
/// before completing, by `Drop`.
struct InFlight<'a> {
    state: &'a watch::Sender<WallpapersSnapshot>,
    done: bool,
}

impl InFlight<'_> {
    /// Apply the refresh result and release the count in a single update.
    fn finish(mut self, apply: impl FnOnce(&mut WallpapersSnapshot)) {
        self.state.send_modify(|s| {
            apply(s);
            s.in_flight = s.in_flight.saturating_sub(1);
        });
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            debug!("[Wallpapers] refresh cancelled");
            self.state.send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
        }
    }
}
