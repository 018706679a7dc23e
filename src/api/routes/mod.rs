pub mod game;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::api::AppState;

/// Create the main API router
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/game", create_game_router(state.clone()))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

/// Create game router
fn create_game_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(game::create_game))
        .route("/:gameId", delete(game::delete_game))
        .route("/:gameId/state", get(game::get_game_state))
        .route("/:gameId/hand", post(game::start_hand))
        .route("/:gameId/action", post(game::player_action))
        .route("/:gameId/computer", post(game::computer_turn))
        .with_state(state)
}
