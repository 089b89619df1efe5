//! Backend integration tests run against a local stub HTTP server.
//!
//! Tests cover:
//! - Listing envelopes, the mobile filter, and by-id fallbacks
//! - Account endpoints and the creator leaderboard
//! - Update checks and image downloads

#[path = "backend/accounts.rs"]
mod accounts;
#[path = "backend/helpers.rs"]
mod helpers;
#[path = "backend/update_download.rs"]
mod update_download;
#[path = "backend/wallpapers.rs"]
mod wallpapers;
