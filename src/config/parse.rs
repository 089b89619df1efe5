use std::path::PathBuf;

use super::{Settings, normalize_base_url};
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: Content of the settings file as a string.
/// - `settings`: Mutable reference to `Settings` to populate.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys are ignored with a debug line; invalid values keep the current value.
/// - Key aliases follow the spelling people tend to guess (`api_url`, `platform`, ...).
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "backend_url" | "api_url" | "server_url" => {
                if !val.is_empty() {
                    settings.backend_url = normalize_base_url(&val);
                }
            }
            "update_platform" | "platform" => {
                let lv = val.to_ascii_lowercase();
                if !lv.is_empty() {
                    settings.update_platform = lv;
                }
            }
            "connect_timeout_secs" | "connect_timeout" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.connect_timeout_secs = v;
                }
            }
            "request_timeout_secs" | "request_timeout" | "timeout" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.request_timeout_secs = v;
                }
            }
            "download_dir" | "downloads" => {
                settings.download_dir = if val.is_empty() {
                    None
                } else {
                    Some(expand_home(&val))
                };
            }
            "leaderboard_size" | "leaderboard_top" => {
                if let Ok(v) = val.parse::<usize>()
                    && v > 0
                {
                    settings.leaderboard_size = v;
                }
            }
            "mobile_filter" | "mobile_only" => {
                if let Some(b) = parse_bool(&val) {
                    settings.mobile_filter = b;
                }
            }
            other => {
                tracing::debug!(key = other, "[Config] ignoring unknown setting");
            }
        }
    }
}

/// Expand a leading `~/` against `$HOME`.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(raw)
}
