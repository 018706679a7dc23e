use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repositories::{GameRepository, RepositoryError};

/// Delete game input
pub struct DeleteGameInput {
    pub game_id: Uuid,
}

/// Drop a game the client is done with
pub struct DeleteGame<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> DeleteGame<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: DeleteGameInput) -> Result<(), DeleteGameError> {
        match self.game_repo.delete(&input.game_id).await {
            Ok(()) => {
                tracing::info!(game_id = %input.game_id, "Game deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => Err(DeleteGameError::GameNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteGameError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
