use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repositories::{GameRepository, RepositoryError};

/// Evict finished games input
pub struct EvictFinishedGamesInput {
    /// Finished games last touched at or before this instant go
    pub cutoff: DateTime<Utc>,
}

/// Periodic cleanup of games nobody will play again
pub struct EvictFinishedGames<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> EvictFinishedGames<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    /// Returns the number of games removed
    pub async fn execute(&self, input: EvictFinishedGamesInput) -> Result<usize, RepositoryError> {
        let removed = self.game_repo.remove_finished_before(input.cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, cutoff = %input.cutoff, "Evicted finished games");
        }
        Ok(removed)
    }
}
