//! Pure client-side rules: listing filters, orderings, ranking, and version comparison.

pub mod browse;
pub mod filter;
pub mod leaderboard;
pub mod sort;
pub mod version;

pub use browse::{CategorySummary, group_by_category, in_category, search_categories};
pub use filter::{MobileVerdict, classify_mobile, filter_mobile_wallpapers};
pub use leaderboard::{LeaderboardEntry, rank_creators};
pub use sort::{fisher_yates, shuffled, trending};
pub use version::{compare_versions, is_update_available};
