//! Command-line browsing: listings, details, trending, categories, leaderboard.

use futures::stream::{self, StreamExt};

use super::Context;
use super::render::{category_line, leaderboard_line, wallpaper_details, wallpaper_line};
use crate::logic::{group_by_category, in_category, search_categories, shuffled, trending};
use crate::sources::ApiError;
use crate::state::{TrendingMode, Wallpaper};

/// Concurrent lookups for `--show` with several ids.
const SHOW_CONCURRENCY: usize = 4;

fn print_list(list: &[Wallpaper], empty: &str) {
    if list.is_empty() {
        println!("{empty}");
        return;
    }
    for w in list {
        println!("{}", wallpaper_line(w));
    }
}

/// Print the public listing.
pub async fn handle_list(ctx: &Context) {
    ctx.ensure_listing().await;
    print_list(&ctx.wallpapers.all(), "No wallpapers found.");
}

/// What: Print the signed-in user's uploads.
///
/// # Errors
/// - `NotAuthenticated` without a stored session.
pub async fn handle_mine(ctx: &Context) -> Result<(), ApiError> {
    let auth = ctx.auth.snapshot();
    if !auth.is_authenticated() {
        return Err(ApiError::NotAuthenticated);
    }
    ctx.wallpapers.refresh_user_wallpapers(&auth).await;
    println!("{} uploads", ctx.wallpapers.user_wallpapers_count());
    print_list(&ctx.wallpapers.mine(), "You have not uploaded any wallpapers yet.");
    Ok(())
}

/// What: Print details for each requested id.
///
/// Details:
/// - Lookups run concurrently but print in the order given.
///
/// # Errors
/// - `NotFound` for the first id that could not be resolved, after printing the rest.
pub async fn handle_show(ctx: &Context, ids: &[String]) -> Result<(), ApiError> {
    let results: Vec<(&String, Option<Wallpaper>)> = stream::iter(ids)
        .map(|id| async move { (id, ctx.wallpapers.get_wallpaper(id).await) })
        .buffered(SHOW_CONCURRENCY)
        .collect()
        .await;
    let mut missing = None;
    for (id, found) in results {
        match found {
            Some(w) => println!("{}\n", wallpaper_details(&w)),
            None => {
                eprintln!("Wallpaper {id} not found");
                if missing.is_none() {
                    missing = Some(id.clone());
                }
            }
        }
    }
    missing.map_or(Ok(()), |id| Err(ApiError::NotFound(id)))
}

/// What: Print the public listing in a trending order.
///
/// # Errors
/// - `MissingInput` for an unknown mode.
pub async fn handle_trending(ctx: &Context, mode: &str) -> Result<(), ApiError> {
    let Some(mode) = TrendingMode::from_config_key(mode) else {
        eprintln!("Unknown trending mode {mode:?}; use all, popular, recent or top_rated");
        return Err(ApiError::MissingInput("A valid trending mode"));
    };
    ctx.ensure_listing().await;
    tracing::info!(mode = mode.as_config_key(), "Trending requested from CLI");
    print_list(&trending(&ctx.wallpapers.all(), mode), "No wallpapers found.");
    Ok(())
}

/// Print the public listing shuffled.
pub async fn handle_feed(ctx: &Context) {
    ctx.ensure_listing().await;
    print_list(&shuffled(&ctx.wallpapers.all()), "No wallpapers found.");
}

/// Print category summaries, filtered by `query` when it is not blank.
pub async fn handle_categories(ctx: &Context, query: &str) {
    ctx.ensure_listing().await;
    let groups = search_categories(group_by_category(&ctx.wallpapers.all()), query);
    if groups.is_empty() {
        println!("No categories found.");
    }
    for g in &groups {
        println!("{}", category_line(g));
    }
}

/// Print the wallpapers of one category.
pub async fn handle_category(ctx: &Context, name: &str) {
    ctx.ensure_listing().await;
    let all = ctx.wallpapers.all();
    let members: Vec<Wallpaper> = in_category(&all, name).into_iter().cloned().collect();
    print_list(&members, &format!("No wallpapers in {name}."));
}

/// What: Print the top creators.
///
/// # Errors
/// - Backend failures fetching the user list.
pub async fn handle_leaderboard(ctx: &Context) -> Result<(), ApiError> {
    let board = ctx.client().leaderboard(ctx.settings.leaderboard_size).await?;
    if board.is_empty() {
        println!("No creators yet.");
    }
    for entry in &board {
        println!("{}", leaderboard_line(entry));
    }
    Ok(())
}
