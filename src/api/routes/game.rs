use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::application::game::{
    ComputerTurn, ComputerTurnError, ComputerTurnInput, CreateGame, CreateGameError,
    CreateGameInput, DeleteGame, DeleteGameError, DeleteGameInput, GameStateView, GetGameState,
    GetGameStateError, GetGameStateInput, PlayerAction, PlayerActionError, PlayerActionInput,
    PlayerCommand, StartHand, StartHandError, StartHandInput,
};
use crate::domain::entities::OpponentProfile;
use crate::domain::value_objects::{CallType, Difficulty, GameSettings};

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub difficulty: Option<String>,
    pub avatar: Option<String>,
    pub archetype: Option<String>,
    pub opponent: Option<OpponentProfile>,
    pub seed: Option<u64>,
    pub sound_effects_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub action_type: String,
    pub card_index: Option<usize>,
    pub call: Option<String>,
}

impl ActionRequest {
    fn to_command(&self) -> Result<PlayerCommand, String> {
        match self.action_type.as_str() {
            "play" => self
                .card_index
                .map(|card_index| PlayerCommand::Play { card_index })
                .ok_or_else(|| "cardIndex is required for play".to_string()),
            "call" => {
                let name = self
                    .call
                    .as_deref()
                    .ok_or_else(|| "call is required for call".to_string())?;
                CallType::from_str(name)
                    .map(PlayerCommand::Call)
                    .ok_or_else(|| format!("Unknown call: {}", name))
            }
            "accept" => Ok(PlayerCommand::Accept),
            "reject" => Ok(PlayerCommand::Reject),
            "advance" => Ok(PlayerCommand::Advance),
            "fold" => Ok(PlayerCommand::Fold),
            "estarCantando" => Ok(PlayerCommand::EstarCantando),
            other => Err(format!("Unknown action type: {}", other)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub success: bool,
    pub game_id: Uuid,
    pub game: GameStateView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    pub game: GameStateView,
}

#[derive(Debug, Serialize)]
pub struct DeleteGameResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
            details: None,
        }),
    )
}

fn parse_game_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        let (status, mut body) = api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", "Invalid game id");
        body.0.details = Some(e.to_string());
        (status, body)
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/game - Create a game and deal the first hand
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let difficulty = match request.difficulty.as_deref() {
        Some(name) => Difficulty::from_str(name).ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                format!("Unknown difficulty: {}", name),
            )
        })?,
        None => state.config.default_difficulty,
    };

    let settings = GameSettings {
        difficulty,
        avatar: request.avatar,
        archetype: request.archetype,
        opponent: request.opponent,
        sound_effects_enabled: request.sound_effects_enabled.unwrap_or(false),
    };

    let use_case = CreateGame::new(state.game_repo.clone());
    let result = use_case
        .execute(CreateGameInput {
            settings,
            seed: request.seed.or(state.config.seed),
        })
        .await
        .map_err(|e| match e {
            CreateGameError::InvalidSettings(_) => {
                api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", e)
            }
            CreateGameError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "CREATE_GAME_ERROR", e)
            }
        })?;

    Ok(Json(CreateGameResponse {
        success: true,
        game_id: result.game_id,
        game: result.view,
    }))
}

/// GET /api/game/:gameId/state - Player view of the game
pub async fn get_game_state(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let use_case = GetGameState::new(state.game_repo.clone());
    let result = use_case
        .execute(GetGameStateInput { game_id })
        .await
        .map_err(|e| match e {
            GetGameStateError::GameNotFound => {
                api_error(StatusCode::NOT_FOUND, "GAME_NOT_FOUND", e)
            }
            GetGameStateError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "GET_STATE_ERROR", e)
            }
        })?;

    Ok(Json(GameResponse {
        success: true,
        applied: None,
        game: result.view,
    }))
}

/// POST /api/game/:gameId/hand - Deal the next hand
pub async fn start_hand(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let use_case = StartHand::new(state.game_repo.clone());
    let result = use_case
        .execute(StartHandInput { game_id })
        .await
        .map_err(|e| match e {
            StartHandError::GameNotFound => api_error(StatusCode::NOT_FOUND, "GAME_NOT_FOUND", e),
            StartHandError::GameOver => api_error(StatusCode::CONFLICT, "GAME_OVER", e),
            StartHandError::HandInProgress => {
                api_error(StatusCode::CONFLICT, "HAND_IN_PROGRESS", e)
            }
            StartHandError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "START_HAND_ERROR", e)
            }
        })?;

    Ok(Json(GameResponse {
        success: true,
        applied: Some(true),
        game: result.view,
    }))
}

/// POST /api/game/:gameId/action - Human player action
pub async fn player_action(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let command = request
        .to_command()
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg))?;

    let use_case = PlayerAction::new(state.game_repo.clone());
    let result = use_case
        .execute(PlayerActionInput { game_id, command })
        .await
        .map_err(|e| match e {
            PlayerActionError::GameNotFound => {
                api_error(StatusCode::NOT_FOUND, "GAME_NOT_FOUND", e)
            }
            PlayerActionError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "ACTION_ERROR", e)
            }
        })?;

    Ok(Json(GameResponse {
        success: true,
        applied: Some(result.applied),
        game: result.view,
    }))
}

/// POST /api/game/:gameId/computer - Run one computer step
pub async fn computer_turn(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let use_case = ComputerTurn::new(state.game_repo.clone());
    let result = use_case
        .execute(ComputerTurnInput { game_id })
        .await
        .map_err(|e| match e {
            ComputerTurnError::GameNotFound => {
                api_error(StatusCode::NOT_FOUND, "GAME_NOT_FOUND", e)
            }
            ComputerTurnError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "COMPUTER_TURN_ERROR", e)
            }
        })?;

    Ok(Json(GameResponse {
        success: true,
        applied: Some(result.applied),
        game: result.view,
    }))
}

/// DELETE /api/game/:gameId - Drop a game
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<DeleteGameResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let use_case = DeleteGame::new(state.game_repo.clone());
    use_case
        .execute(DeleteGameInput { game_id })
        .await
        .map_err(|e| match e {
            DeleteGameError::GameNotFound => api_error(StatusCode::NOT_FOUND, "GAME_NOT_FOUND", e),
            DeleteGameError::Repository(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "DELETE_GAME_ERROR", e)
            }
        })?;

    Ok(Json(DeleteGameResponse { success: true }))
}
