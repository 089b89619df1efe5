//! Plain-text rendering of records for terminal output.

use std::fmt::Write as _;

use crate::logic::{CategorySummary, LeaderboardEntry};
use crate::state::{User, Wallpaper};
use crate::util::short_date;

/// Placeholder printed when a wallpaper has no resolvable image.
pub const NO_IMAGE: &str = "(no image)";

/// One-line summary: id, title, category, image URL.
#[must_use]
pub fn wallpaper_line(w: &Wallpaper) -> String {
    format!(
        "{}  {}  [{}]  {}",
        w.id,
        w.display_title(),
        w.category_or_default(),
        w.image_url().unwrap_or(NO_IMAGE)
    )
}

/// What: Multi-line detail view of a wallpaper.
///
/// Output:
/// - Title, id, category, device, tags, likes, dates, description and image, one per line.
#[must_use]
pub fn wallpaper_details(w: &Wallpaper) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", w.display_title());
    let _ = writeln!(out, "  id:          {}", w.id);
    let _ = writeln!(out, "  category:    {}", w.category_or_default());
    if let Some(device) = w.device_support.as_deref() {
        let _ = writeln!(out, "  device:      {device}");
    }
    if !w.tags.is_empty() {
        let _ = writeln!(out, "  tags:        {}", w.tags.join(", "));
    }
    let _ = writeln!(out, "  likes:       {}", w.like_count());
    let _ = writeln!(out, "  created:     {}", short_date(w.created_at.as_deref()));
    if let Some(desc) = w.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "  description: {desc}");
    }
    let _ = write!(out, "  image:       {}", w.image_url().unwrap_or(NO_IMAGE));
    out
}

/// Profile block for `--whoami`.
#[must_use]
pub fn user_details(u: &User) -> String {
    let name = if u.user_name.is_empty() { "(no name)" } else { &u.user_name };
    let mut out = String::new();
    let _ = writeln!(out, "{name} <{}>", u.email);
    let _ = writeln!(out, "  id:      {}", u.id);
    let _ = writeln!(out, "  joined:  {}", short_date(u.created_at.as_deref()));
    let _ = write!(out, "  avatar:  {}", u.avatar_url().unwrap_or(NO_IMAGE));
    out
}

/// `name (count)` line for a category summary.
#[must_use]
pub fn category_line(c: &CategorySummary) -> String {
    let noun = if c.count == 1 { "wallpaper" } else { "wallpapers" };
    format!("{}  ({} {noun})", c.name, c.count)
}

/// `#rank name  posts  points` line for a leaderboard row.
#[must_use]
pub fn leaderboard_line(e: &LeaderboardEntry) -> String {
    let name = if e.user.user_name.is_empty() { &e.user.id } else { &e.user.user_name };
    format!(
        "#{}  {}  {} uploads  {} pts",
        e.rank, name, e.user.post_count, e.points
    )
}
