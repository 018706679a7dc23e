use std::sync::Arc;

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::database::repositories::InMemoryGameRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,

    /// Running games
    pub game_repo: Arc<InMemoryGameRepository>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        tracing::info!(
            port = config.port,
            difficulty = config.default_difficulty.as_str(),
            seeded = config.seed.is_some(),
            "Initializing application state"
        );
        Self {
            config,
            game_repo: Arc::new(InMemoryGameRepository::new()),
        }
    }
}
