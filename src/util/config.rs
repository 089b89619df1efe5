//! Configuration file parsing utilities.
//!
//! This module provides helpers for parsing `key = value` configuration files
//! with comment skipping and inline comment stripping.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character.
/// - Keys are lower-cased with `.`, `-` and spaces folded to `_`.
/// - The value has its inline comment removed and is trimmed.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (raw_key, raw_val) = trimmed.split_once('=')?;
    let key = raw_key
        .trim()
        .to_lowercase()
        .replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    let value = strip_inline_comment(raw_val.trim()).to_string();
    Some((key, value))
}

/// What: Remove a trailing inline comment from a configuration value.
///
/// Inputs:
/// - `s`: Raw value text.
///
/// Output:
/// - Comment-free and trimmed substring of the input.
///
/// Details:
/// - A comment starts at `#` or `//` only when preceded by whitespace, so
///   URLs such as `https://host/path#frag` survive untouched.
#[must_use]
pub fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    for i in 1..bytes.len() {
        if !bytes[i - 1].is_ascii_whitespace() {
            continue;
        }
        if bytes[i] == b'#' || s[i..].starts_with("//") {
            return s[..i].trim();
        }
    }
    s.trim()
}

/// What: Interpret a configuration value as a boolean.
///
/// Inputs:
/// - `val`: Raw value.
///
/// Output:
/// - `Some(bool)` for recognised spellings (`true/false`, `1/0`, `yes/no`, `on/off`); `None` otherwise.
#[must_use]
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
