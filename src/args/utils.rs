//! Shared utilities for argument processing.

use crate::config::{Settings, normalize_base_url};
use crate::state::DeviceSupport;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level`. `RUST_LOG`, when set, still wins at subscriber setup.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Apply command-line overrides on top of loaded settings.
///
/// Inputs:
/// - `settings`: Settings from `settings.conf` and the environment.
/// - `args`: Parsed command-line arguments.
pub fn apply_overrides(settings: &mut Settings, args: &crate::args::Args) {
    if let Some(url) = args.backend_url.as_deref()
        && !url.trim().is_empty()
    {
        settings.backend_url = normalize_base_url(url);
    }
}

/// What: Split a comma-separated tag list.
///
/// Output:
/// - Trimmed, non-empty tags in input order.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse `--device`, defaulting to mobile for unknown values.
#[must_use]
pub fn parse_device(raw: &str) -> DeviceSupport {
    DeviceSupport::from_config_key(raw).unwrap_or_else(|| {
        tracing::warn!(value = raw, "[Cli] unknown device, using mobile");
        DeviceSupport::Mobile
    })
}
