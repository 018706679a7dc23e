use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::domain::value_objects::GameState;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A running game: the rules state plus the random source that drives it
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    pub state: GameState,
    pub rng: ChaCha8Rng,
    pub seed: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    /// Random source for a session: seeded when asked, from OS entropy otherwise.
    /// A seed makes every deal and AI decision reproducible.
    pub fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
        match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Wrap a state with the random source that produced it
    pub fn with_rng(state: GameState, rng: ChaCha8Rng, seed: Option<u64>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            state,
            rng,
            seed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Game session repository trait
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Find a session by ID
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<GameSession>, RepositoryError>;

    /// Store a new session
    async fn create(&self, session: &GameSession) -> Result<(), RepositoryError>;

    /// Run `apply` on the stored session with exclusive access, so two requests
    /// on the same game cannot interleave. `None` when the id is unknown.
    async fn update<F, T>(&self, id: &Uuid, apply: F) -> Result<Option<T>, RepositoryError>
    where
        F: FnOnce(&mut GameSession) -> T + Send,
        T: Send;

    /// Delete session
    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError>;

    /// Drop finished games last touched at or before `cutoff`. Returns how many went.
    async fn remove_finished_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, RepositoryError>;

    /// Number of stored sessions
    async fn count(&self) -> Result<usize, RepositoryError>;
}
