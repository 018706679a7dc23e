use std::sync::Arc;

use uuid::Uuid;

use super::GameStateView;
use crate::domain::repositories::{GameRepository, GameSession, RepositoryError};
use crate::domain::services::{initialize_game_state, start_new_hand};
use crate::domain::value_objects::GameSettings;

/// Create game input
pub struct CreateGameInput {
    pub settings: GameSettings,
    pub seed: Option<u64>,
}

/// Create game output
pub struct CreateGameOutput {
    pub game_id: Uuid,
    pub view: GameStateView,
}

/// Create game use case: builds the game and deals its first hand
pub struct CreateGame<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> CreateGame<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: CreateGameInput) -> Result<CreateGameOutput, CreateGameError> {
        input
            .settings
            .validate()
            .map_err(|e| CreateGameError::InvalidSettings(e.to_string()))?;

        let mut rng = GameSession::rng_for(input.seed);
        let state = initialize_game_state(&input.settings, &mut rng);
        let state = start_new_hand(&state, &mut rng);

        let session = GameSession::with_rng(state, rng, input.seed);
        self.game_repo.create(&session).await?;

        tracing::info!(
            game_id = %session.id,
            difficulty = session.state.difficulty.as_str(),
            seed = ?input.seed,
            "Game created"
        );

        Ok(CreateGameOutput {
            game_id: session.id,
            view: GameStateView::from_state(session.id, &session.state),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreateGameError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
