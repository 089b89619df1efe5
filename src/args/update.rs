//! Command-line update check.

use super::Context;
use crate::sources::check_for_updates;

/// What: Report whether a newer version is published for the configured platform.
///
/// Details:
/// - Never fails; an unreachable backend reports "up to date".
pub async fn handle_check_update(ctx: &Context) {
    let current = env!("CARGO_PKG_VERSION");
    let check = check_for_updates(ctx.client(), current, &ctx.settings.update_platform).await;
    if check.has_update {
        println!("Update available: {} -> {}", check.current_version, check.latest_version);
        if let Some(msg) = &check.message {
            println!("{msg}");
        }
        if let Some(url) = &check.store_url {
            println!("Get it at {url}");
        }
    } else {
        println!("upwall {} is up to date", check.current_version);
    }
}
