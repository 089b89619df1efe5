//! Small utility helpers for URL encoding, JSON extraction, and date formatting.
//!
//! The JSON helpers are deliberately forgiving: the backend does not pin its
//! field types, so every accessor tolerates missing keys and wrong types.

pub mod config;

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::Write;

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Extract the first non-empty string from a list of candidate keys.
///
/// Inputs:
/// - `v`: JSON value to extract from.
/// - `keys`: Candidate keys, tried in order.
///
/// Output:
/// - `Some(String)` for the first key that maps to a non-empty JSON string, `None` otherwise.
#[must_use]
pub fn ss(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(s) = v.get(*k).and_then(Value::as_str)
            && !s.is_empty()
        {
            return Some(s.to_owned());
        }
    }
    None
}

/// What: Interpret a single JSON value as an unsigned count.
///
/// Inputs:
/// - `n`: JSON value.
///
/// Output:
/// - `Some(u64)` for non-negative numbers (floats truncated) and numeric strings; `None` otherwise.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count_of(n: &Value) -> Option<u64> {
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    if let Some(i) = n.as_i64() {
        return u64::try_from(i).ok();
    }
    if let Some(f) = n.as_f64()
        && f.is_finite()
        && f >= 0.0
    {
        return Some(f as u64);
    }
    n.as_str().and_then(|s| s.trim().parse::<u64>().ok())
}

/// What: Parse a backend timestamp into a UTC date-time.
///
/// Inputs:
/// - `raw`: Timestamp text, usually RFC 3339 (`2025-01-31T10:00:00.000Z`).
///
/// Output:
/// - `Some(DateTime<Utc>)` when the text parses; `None` otherwise.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// What: Render an optional backend timestamp as a short date.
///
/// Inputs:
/// - `raw`: Optional timestamp text.
///
/// Output:
/// - `YYYY-MM-DD` when parseable, otherwise `"N/A"`.
#[must_use]
pub fn short_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map_or_else(|| "N/A".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

/// What: Produce a log-safe preview of a secret.
///
/// Inputs:
/// - `secret`: Secret text such as a bearer token.
///
/// Output:
/// - The first eight characters followed by `...`, or `***` for short secrets.
#[must_use]
pub fn secret_preview(secret: &str) -> String {
    if secret.chars().count() <= 12 {
        return "***".to_string();
    }
    let head: String = secret.chars().take(8).collect();
    format!("{head}...")
}
