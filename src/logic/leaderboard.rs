use crate::state::User;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub rank: usize,
    /// Creator record.
    pub user: User,
    /// `post_count * 50`.
    pub points: u64,
}

/// What: Rank creators by upload count.
///
/// Inputs:
/// - `users`: Users as returned by the backend.
/// - `limit`: Maximum number of rows.
///
/// Output:
/// - Up to `limit` entries, highest `post_count` first; users without uploads are left out.
///
/// Details:
/// - The sort is stable, so creators with equal counts keep backend order.
#[must_use]
pub fn rank_creators(users: Vec<User>, limit: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<User> = users.into_iter().filter(|u| u.post_count > 0).collect();
    ranked.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, user)| LeaderboardEntry {
            rank: i + 1,
            points: user.points(),
            user,
        })
        .collect()
}
