use rand::Rng;

use crate::state::{TrendingMode, Wallpaper};

/// What: Shuffle a slice in place with the Fisher–Yates algorithm.
///
/// Inputs:
/// - `items`: Slice to permute.
/// - `rng`: Random source.
///
/// Output:
/// - None; `items` is reordered uniformly at random.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// What: Produce a shuffled copy of the feed.
///
/// Inputs:
/// - `wallpapers`: Cached list, left untouched.
///
/// Output:
/// - New vector with the same records in random order.
#[must_use]
pub fn shuffled(wallpapers: &[Wallpaper]) -> Vec<Wallpaper> {
    let mut out = wallpapers.to_vec();
    fisher_yates(&mut out, &mut rand::rng());
    out
}

/// What: Order wallpapers for the trending view.
///
/// Inputs:
/// - `wallpapers`: Cached list, left untouched.
/// - `mode`: Selected ordering.
///
/// Output:
/// - New vector ordered per `mode`.
///
/// Details:
/// - `Popular` sorts by like count, `Recent` by `createdAt` (unparseable dates sort as oldest),
///   `TopRated` by number of likers, all descending. Sorts are stable so ties keep backend order.
/// - `All` returns a random permutation.
#[must_use]
pub fn trending(wallpapers: &[Wallpaper], mode: TrendingMode) -> Vec<Wallpaper> {
    let mut out = wallpapers.to_vec();
    match mode {
        TrendingMode::All => fisher_yates(&mut out, &mut rand::rng()),
        TrendingMode::Popular => out.sort_by_key(|w| std::cmp::Reverse(w.like_count())),
        TrendingMode::Recent => out.sort_by_key(|w| std::cmp::Reverse(created_millis(w))),
        TrendingMode::TopRated => out.sort_by_key(|w| std::cmp::Reverse(w.liked_by.len())),
    }
    out
}

/// Creation time in epoch milliseconds, 0 when missing or unparseable.
fn created_millis(w: &Wallpaper) -> i64 {
    w.created_at
        .as_deref()
        .and_then(crate::util::parse_timestamp)
        .map_or(0, |dt| dt.timestamp_millis())
}
