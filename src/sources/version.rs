//! Update check against the backend's published app version.

use serde_json::Value;
use tracing::{info, warn};

use super::{ApiClient, Result};
use crate::logic::is_update_available;
use crate::util::{percent_encode, ss};

/// Result of an update check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCheck {
    /// Whether `latest_version` is newer than `current_version`.
    pub has_update: bool,
    /// Version published by the backend, or the current one when the check failed.
    pub latest_version: String,
    /// Version of this build.
    pub current_version: String,
    /// Where to get the update.
    pub store_url: Option<String>,
    /// Release note or prompt text.
    pub message: Option<String>,
}

impl UpdateCheck {
    /// Result used whenever the check cannot complete.
    #[must_use]
    pub fn unavailable(current: &str) -> Self {
        Self {
            has_update: false,
            latest_version: current.to_string(),
            current_version: current.to_string(),
            store_url: None,
            message: None,
        }
    }
}

/// What: Ask the backend for the latest version on `platform`.
///
/// Inputs:
/// - `client`: Backend client.
/// - `current`: Version of this build.
/// - `platform`: Platform key, e.g. `android`.
///
/// Output:
/// - `UpdateCheck`; on any failure `has_update` is false and `latest_version == current`.
///
/// Details:
/// - The version info is read from `data` when present, else from the body itself.
pub async fn check_for_updates(client: &ApiClient, current: &str, platform: &str) -> UpdateCheck {
    match fetch_version_info(client, platform).await {
        Ok(v) => match interpret_version_info(&v, current) {
            Some(check) => {
                info!(
                    current,
                    latest = %check.latest_version,
                    has_update = check.has_update,
                    "[Update] version info received"
                );
                check
            }
            None => {
                warn!("[Update] version response has no latestVersion");
                UpdateCheck::unavailable(current)
            }
        },
        Err(e) => {
            warn!(error = %e, "[Update] update check failed");
            UpdateCheck::unavailable(current)
        }
    }
}

async fn fetch_version_info(client: &ApiClient, platform: &str) -> Result<Value> {
    let path = format!("/api/versioninfo/version?platform={}", percent_encode(platform));
    client.send_json(client.get(&path, None), "versioninfo").await
}

/// What: Turn a version response into an `UpdateCheck`.
///
/// Output:
/// - `None` when no non-empty `latestVersion` is found.
#[must_use]
pub fn interpret_version_info(v: &Value, current: &str) -> Option<UpdateCheck> {
    let info = match v.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => v,
    };
    let latest = ss(info, &["latestVersion"])?;
    Some(UpdateCheck {
        has_update: is_update_available(current, &latest),
        latest_version: latest,
        current_version: current.to_string(),
        store_url: ss(info, &["downloadUrl", "storeUrl"]),
        message: ss(info, &["message"]),
    })
}
