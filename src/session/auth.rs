//! Auth session store: current user and token, persisted through a [`SecureStore`].

use std::fmt;
use std::path::PathBuf;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::storage::{SecureStore, TOKEN_KEY, USER_KEY};
use crate::sources::{ApiError, AuthApi, AuthPayload, RegisterForm};
use crate::state::User;
use crate::util::secret_preview;

/// Bearer token held in memory that is wiped on drop and never printed.
#[derive(Clone)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// Where the session stands, for front ends deciding what to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    /// No session.
    Unauthenticated,
    /// A session operation is in progress.
    Loading,
    /// User and token are both present.
    Authenticated,
}

/// Published auth state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSnapshot {
    user: Option<User>,
    token: Option<AuthToken>,
    loading: bool,
}

impl AuthSnapshot {
    /// Snapshot for a signed-in session.
    #[must_use]
    pub const fn authenticated(user: User, token: AuthToken) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            loading: false,
        }
    }

    /// True iff both user and token are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Whether a session operation is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// `Loading` while an operation runs, otherwise derived from [`Self::is_authenticated`].
    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        if self.loading {
            AuthStatus::Loading
        } else if self.is_authenticated() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    }

    /// Current user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current token.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }
}

/// What: Owner of the auth session.
///
/// Details:
/// - Every change is published on a watch channel; [`AuthStore::subscribe`] hands out receivers.
/// - Operations never panic; backend and storage failures are logged and surfaced as
///   `Err` only where the caller asked for something (login, register).
pub struct AuthStore<A, S> {
    api: A,
    storage: S,
    state: watch::Sender<AuthSnapshot>,
}

impl<A: AuthApi, S: SecureStore> AuthStore<A, S> {
    /// Store starting unauthenticated; call [`AuthStore::initialize`] to rehydrate.
    #[must_use]
    pub fn new(api: A, storage: S) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());
        Self { api, storage, state }
    }

    /// Receiver observing every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Shorthand for `snapshot().is_authenticated()`.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Backend handle, for calls outside the session lifecycle.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// What: Rehydrate the session from storage and refresh the profile.
    ///
    /// Output:
    /// - State is authenticated with stored values when both token and user were persisted,
    ///   otherwise unauthenticated.
    ///
    /// Details:
    /// - A failed profile fetch keeps the stored user; it never signs the session out.
    pub async fn initialize(&self) {
        self.set_loading(true);
        let Some((token, user)) = self.read_persisted() else {
            debug!("[Auth] no stored session");
            self.state.send_replace(AuthSnapshot::default());
            return;
        };
        info!(user = %user.id, token = %secret_preview(token.expose()), "[Auth] restored stored session");
        self.state.send_replace(AuthSnapshot {
            user: Some(user),
            token: Some(token.clone()),
            loading: true,
        });
        self.refresh_profile(&token).await;
        self.set_loading(false);
    }

    /// What: Sign in with e-mail and password.
    ///
    /// # Errors
    /// - The backend error, with state left unauthenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.set_loading(true);
        match self.api.login(email, password).await {
            Ok(payload) => {
                self.open_session(payload).await;
                Ok(())
            }
            Err(e) => {
                warn!(email, error = %e, "[Auth] login failed");
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// What: Create an account and sign in.
    ///
    /// Inputs:
    /// - `profile_photo`: Path of the JPEG avatar; required.
    ///
    /// # Errors
    /// - `MissingInput` for an empty photo path, before any request; otherwise the backend error.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        user_name: &str,
        profile_photo: impl Into<PathBuf>,
    ) -> Result<(), ApiError> {
        let profile_photo = profile_photo.into();
        if profile_photo.as_os_str().is_empty() {
            return Err(ApiError::MissingInput("Profile photo"));
        }
        let form = RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            user_name: user_name.to_string(),
            profile_photo,
        };
        self.set_loading(true);
        match self.api.register(&form).await {
            Ok(payload) => {
                self.open_session(payload).await;
                Ok(())
            }
            Err(e) => {
                warn!(email, error = %e, "[Auth] registration failed");
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// What: End the session.
    ///
    /// Output:
    /// - `Err(ApiError::Storage)` when a stored key could not be removed.
    ///
    /// Details:
    /// - In-memory state is cleared even when storage fails, so the user is signed out
    ///   for this process either way.
    ///
    /// # Errors
    /// - Returns `ApiError::Storage` naming the first key that failed to delete.
    pub fn logout(&self) -> Result<(), ApiError> {
        let mut failure = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.delete(key) {
                warn!(key, error = %e, "[Auth] failed to clear stored session");
                failure.get_or_insert_with(|| ApiError::Storage(format!("{key}: {e}")));
            }
        }
        self.state.send_replace(AuthSnapshot::default());
        info!("[Auth] logged out");
        failure.map_or(Ok(()), Err)
    }

    /// What: Reload the profile using the persisted token.
    ///
    /// Details:
    /// - No stored token: nothing changes.
    /// - Profile fetch fails: user and token fall back to the stored values.
    pub async fn refresh_user(&self) {
        let Some(token) = self.read_token() else {
            debug!("[Auth] refresh skipped, no stored token");
            return;
        };
        match self.api.my_profile(token.expose()).await {
            Ok(user) => {
                self.persist_user(&user);
                self.state.send_modify(|s| {
                    s.user = Some(user);
                    s.token = Some(token);
                });
                debug!("[Auth] profile refreshed");
            }
            Err(e) => {
                warn!(error = %e, "[Auth] profile refresh failed, using stored data");
                let stored = self.read_user();
                self.state.send_modify(|s| {
                    if stored.is_some() {
                        s.user = stored;
                    }
                    if s.user.is_some() {
                        s.token = Some(token);
                    }
                });
            }
        }
    }

    async fn open_session(&self, payload: AuthPayload) {
        let token = AuthToken::new(payload.token);
        if let Err(e) = self.storage.set(TOKEN_KEY, token.expose()) {
            warn!(error = %e, "[Auth] failed to persist token");
        }
        self.persist_user(&payload.user);
        info!(user = %payload.user.id, "[Auth] session opened");
        self.state.send_replace(AuthSnapshot {
            user: Some(payload.user),
            token: Some(token.clone()),
            loading: true,
        });
        self.refresh_profile(&token).await;
        self.set_loading(false);
    }

    /// Best-effort profile fetch; replaces and persists the user on success.
    async fn refresh_profile(&self, token: &AuthToken) {
        match self.api.my_profile(token.expose()).await {
            Ok(user) => {
                self.persist_user(&user);
                self.state.send_modify(|s| s.user = Some(user));
                debug!("[Auth] profile updated");
            }
            Err(e) => warn!(error = %e, "[Auth] profile fetch failed, keeping current user"),
        }
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.loading != loading;
            s.loading = loading;
            changed
        });
    }

    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = self.storage.set(USER_KEY, &json) {
                    warn!(error = %e, "[Auth] failed to persist user");
                }
            }
            Err(e) => warn!(error = %e, "[Auth] failed to serialise user"),
        }
    }

    fn read_token(&self) -> Option<AuthToken> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(t)) if !t.trim().is_empty() => Some(AuthToken::new(t)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "[Auth] failed to read stored token");
                None
            }
        }
    }

    fn read_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "[Auth] failed to read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "[Auth] stored user is not valid JSON");
                None
            }
        }
    }

    /// Both halves of the stored session, or `None` when either is missing.
    fn read_persisted(&self) -> Option<(AuthToken, User)> {
        Some((self.read_token()?, self.read_user()?))
    }
}
