use std::sync::Arc;

use uuid::Uuid;

use super::GameStateView;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::resolve_trick_if_complete;
use crate::infrastructure::bot::take_computer_turn;

/// Computer turn input
pub struct ComputerTurnInput {
    pub game_id: Uuid,
}

/// Computer turn output
pub struct ComputerTurnOutput {
    /// False when the computer had nothing to do
    pub applied: bool,
    pub view: GameStateView,
}

/// Run one computer step with the session's random source
pub struct ComputerTurn<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> ComputerTurn<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(
        &self,
        input: ComputerTurnInput,
    ) -> Result<ComputerTurnOutput, ComputerTurnError> {
        let output = self
            .game_repo
            .update(&input.game_id, |session| {
                let next = take_computer_turn(&session.state, &mut session.rng);
                let next = resolve_trick_if_complete(&next).state;
                let applied = next != session.state;

                // The random source advanced even if nothing changed
                session.state = next;
                session.touch();
                ComputerTurnOutput {
                    applied,
                    view: GameStateView::from_state(session.id, &session.state),
                }
            })
            .await?
            .ok_or(ComputerTurnError::GameNotFound)?;

        tracing::debug!(
            game_id = %input.game_id,
            applied = output.applied,
            last = output.view.lore.last().map(String::as_str).unwrap_or_default(),
            "Computer turn"
        );

        Ok(output)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComputerTurnError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
