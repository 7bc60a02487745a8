use storage::repository::{self, ResultRepository};
use trivia_core::model::ResultRecord;

use crate::error::SessionError;

/// Read views over the persisted leaderboard store.
pub struct LeaderboardService;

impl LeaderboardService {
    /// All persisted attempts, best first: score descending, then
    /// percentage descending, then elapsed time ascending (fastest wins
    /// ties). Exact duplicates keep insertion order.
    ///
    /// An unwritten store yields an empty leaderboard, not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the store cannot be read.
    pub async fn leaderboard(
        results: &dyn ResultRepository,
    ) -> Result<Vec<ResultRecord>, SessionError> {
        let mut records = results.list_records().await?;
        sort_by_rank(&mut records);
        Ok(records)
    }

    /// Distinct participant names, in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the store cannot be read.
    pub async fn participants(
        results: &dyn ResultRepository,
    ) -> Result<Vec<String>, SessionError> {
        let records = results.list_records().await?;
        Ok(repository::distinct_participants(&records))
    }
}

// Stable sort, so records tied on all three keys keep insertion order.
fn sort_by_rank(records: &mut [ResultRecord]) {
    records.sort_by(|a, b| {
        b.score()
            .cmp(&a.score())
            .then_with(|| b.percentage().total_cmp(&a.percentage()))
            .then_with(|| a.elapsed_secs().cmp(&b.elapsed_secs()))
    });
}
