use std::sync::Arc;

use uuid::Uuid;

use super::GameStateView;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::{
    accept_call, advance_phase, call_estar_cantando, fold_hand, make_call, play_card,
    raise_call, reject_call, resolve_trick_if_complete,
};
use crate::domain::value_objects::{CallType, GameState, Side};

/// Action taken by the human player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play { card_index: usize },
    Call(CallType),
    Accept,
    Reject,
    Advance,
    Fold,
    EstarCantando,
}

impl PlayerCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerCommand::Play { .. } => "play",
            PlayerCommand::Call(_) => "call",
            PlayerCommand::Accept => "accept",
            PlayerCommand::Reject => "reject",
            PlayerCommand::Advance => "advance",
            PlayerCommand::Fold => "fold",
            PlayerCommand::EstarCantando => "estarCantando",
        }
    }
}

/// Apply a player command, then settle the trick if both cards are down
pub fn apply_player_command(state: &GameState, command: PlayerCommand) -> GameState {
    let next = match command {
        PlayerCommand::Play { card_index } => play_card(state, card_index),
        PlayerCommand::Call(call) if state.responder() == Some(Side::Player) => {
            raise_call(state, call, Side::Player)
        }
        PlayerCommand::Call(call) => make_call(state, call, Side::Player),
        PlayerCommand::Accept => accept_call(state, Side::Player),
        PlayerCommand::Reject => reject_call(state, Side::Player),
        PlayerCommand::Advance => advance_phase(state),
        PlayerCommand::Fold => fold_hand(state, Side::Player),
        PlayerCommand::EstarCantando => call_estar_cantando(state, Side::Player),
    };
    resolve_trick_if_complete(&next).state
}

/// Player action input
pub struct PlayerActionInput {
    pub game_id: Uuid,
    pub command: PlayerCommand,
}

/// Player action output
pub struct PlayerActionOutput {
    /// False when the engine ignored the action
    pub applied: bool,
    pub view: GameStateView,
}

/// Player action use case
pub struct PlayerAction<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> PlayerAction<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(
        &self,
        input: PlayerActionInput,
    ) -> Result<PlayerActionOutput, PlayerActionError> {
        let command = input.command;
        let output = self
            .game_repo
            .update(&input.game_id, |session| {
                let next = apply_player_command(&session.state, command);
                let applied = next != session.state;
                if applied {
                    session.state = next;
                    session.touch();
                }
                PlayerActionOutput {
                    applied,
                    view: GameStateView::from_state(session.id, &session.state),
                }
            })
            .await?
            .ok_or(PlayerActionError::GameNotFound)?;

        tracing::debug!(
            game_id = %input.game_id,
            action = command.as_str(),
            applied = output.applied,
            "Player action"
        );

        Ok(output)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlayerActionError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
