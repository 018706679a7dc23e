use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Card;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::is_call_legal;
use crate::domain::value_objects::{
    CallType, Difficulty, EnvidoLevel, GameState, PendingCall, Phase, Pot, Side, TrickRecord,
    TrickTally, TrucoLevel,
};

const ALL_CALLS: [CallType; 8] = [
    CallType::Flor,
    CallType::Envido,
    CallType::RealEnvido,
    CallType::FaltaEnvido,
    CallType::Truco,
    CallType::Retruco,
    CallType::ValeNueve,
    CallType::ValeJuego,
];

/// Get game state input
pub struct GetGameStateInput {
    pub game_id: Uuid,
}

/// Game state view (what the player can see)
///
/// The computer's cards, envido points and traits stay hidden; its hand is
/// revealed once the hand is over.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub game_id: Uuid,
    pub player_hand: Vec<Card>,
    pub computer_hand_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_hand: Option<Vec<Card>>,
    pub vira: Option<Card>,
    pub perico: Option<Card>,
    pub player_score: u8,
    pub computer_score: u8,
    pub current_round: u8,
    pub player_card: Option<Card>,
    pub computer_card: Option<Card>,
    pub rounds_won: TrickTally,
    pub trick_history: Vec<TrickRecord>,
    pub current_phase: Phase,
    pub current_truco_level: TrucoLevel,
    pub current_envido_level: EnvidoLevel,
    pub last_call: Option<PendingCall>,
    pub waiting_for_response: bool,
    pub truco_pending_offer: Option<Pot>,
    pub truco_accepted_pot: Pot,
    pub player_envido_points: u8,
    pub player_has_flor: bool,
    pub mano_is_player: bool,
    pub is_player_turn: bool,
    pub hand_number: u32,
    pub hand_over: bool,
    pub hand_winner: Option<Side>,
    pub game_in_progress: bool,
    pub winner: Option<Side>,
    pub difficulty: Difficulty,
    pub opponent_archetype: String,
    pub avatar: Option<String>,
    pub sound_effects_enabled: bool,
    /// Calls the player may sing right now
    pub legal_calls: Vec<CallType>,
    pub lore: Vec<String>,
}

impl GameStateView {
    pub fn from_state(game_id: Uuid, state: &GameState) -> Self {
        let legal_calls = ALL_CALLS
            .iter()
            .copied()
            .filter(|&call| is_call_legal(state, call, Side::Player))
            .collect();

        Self {
            game_id,
            player_hand: state.player_hand.to_vec(),
            computer_hand_size: state.computer_hand.len(),
            computer_hand: state.hand_over.then(|| state.computer_hand.to_vec()),
            vira: state.vira,
            perico: state.perico,
            player_score: state.player_score,
            computer_score: state.computer_score,
            current_round: state.current_round,
            player_card: state.player_card,
            computer_card: state.computer_card,
            rounds_won: state.rounds_won,
            trick_history: state.trick_history.clone(),
            current_phase: state.current_phase,
            current_truco_level: state.current_truco_level,
            current_envido_level: state.current_envido_level,
            last_call: state.last_call,
            waiting_for_response: state.waiting_for_response,
            truco_pending_offer: state.truco_pending_offer,
            truco_accepted_pot: state.truco_accepted_pot,
            player_envido_points: state.player_envido_points,
            player_has_flor: state.player_has_flor,
            mano_is_player: state.mano_is_player,
            is_player_turn: state.is_player_turn,
            hand_number: state.hand_number,
            hand_over: state.hand_over,
            hand_winner: state.hand_winner,
            game_in_progress: state.game_in_progress,
            winner: state.winner,
            difficulty: state.difficulty,
            opponent_archetype: state.ai_personality.archetype.clone(),
            avatar: state.avatar.clone(),
            sound_effects_enabled: state.sound_effects_enabled,
            legal_calls,
            lore: state.lore.iter().cloned().collect(),
        }
    }
}

/// Get game state output
pub struct GetGameStateOutput {
    pub view: GameStateView,
}

/// Get game state use case
pub struct GetGameState<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> GetGameState<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(
        &self,
        input: GetGameStateInput,
    ) -> Result<GetGameStateOutput, GetGameStateError> {
        let session = self
            .game_repo
            .find_by_id(&input.game_id)
            .await?
            .ok_or(GetGameStateError::GameNotFound)?;

        Ok(GetGameStateOutput {
            view: GameStateView::from_state(session.id, &session.state),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetGameStateError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
