//! User listing and the creator leaderboard built on it.

use tracing::debug;

use super::envelope::{ListKind, decode_list};
use super::{ApiClient, Result};
use crate::logic::{LeaderboardEntry, rank_creators};
use crate::state::User;

impl ApiClient {
    /// What: Fetch every registered user.
    ///
    /// Output:
    /// - Users from `{users:[...]}` or a bare array; empty for unrecognised bodies.
    ///
    /// # Errors
    /// - Transport or status failures.
    pub async fn users(&self) -> Result<Vec<User>> {
        let v = self
            .send_json(self.get("/api/users/getUsers", None), "getUsers")
            .await?;
        let users: Vec<User> = decode_list(&v, ListKind::Users);
        debug!(count = users.len(), "[Users] listing decoded");
        Ok(users)
    }

    /// What: Fetch users and rank the top creators.
    ///
    /// Inputs:
    /// - `size`: Number of leaderboard rows.
    ///
    /// # Errors
    /// - As for [`ApiClient::users`].
    pub async fn leaderboard(&self, size: usize) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank_creators(self.users().await?, size))
    }
}
