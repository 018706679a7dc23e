use std::sync::Arc;

use uuid::Uuid;

use super::GameStateView;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::start_new_hand;

/// Start hand input
pub struct StartHandInput {
    pub game_id: Uuid,
}

/// Start hand output
pub struct StartHandOutput {
    pub view: GameStateView,
}

/// Deal the next hand once the previous one is over
pub struct StartHand<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> StartHand<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: StartHandInput) -> Result<StartHandOutput, StartHandError> {
        let view = self
            .game_repo
            .update(&input.game_id, |session| {
                if !session.state.game_in_progress {
                    return Err(StartHandError::GameOver);
                }
                if !session.state.hand_over {
                    return Err(StartHandError::HandInProgress);
                }
                session.state = start_new_hand(&session.state, &mut session.rng);
                session.touch();
                Ok(GameStateView::from_state(session.id, &session.state))
            })
            .await?
            .ok_or(StartHandError::GameNotFound)??;

        tracing::debug!(
            game_id = %input.game_id,
            hand = view.hand_number,
            "Hand dealt"
        );

        Ok(StartHandOutput { view })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartHandError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game is over")]
    GameOver,
    #[error("Current hand is not finished")]
    HandInProgress,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
