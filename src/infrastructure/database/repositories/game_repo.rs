use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repositories::{GameRepository, GameSession, RepositoryError};

/// In-memory implementation of GameRepository
pub struct InMemoryGameRepository {
    sessions: RwLock<HashMap<Uuid, GameSession>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<GameSession>, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn create(&self, session: &GameSession) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::AlreadyExists(session.id.to_string()));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn update<F, T>(&self, id: &Uuid, apply: F) -> Result<Option<T>, RepositoryError>
    where
        F: FnOnce(&mut GameSession) -> T + Send,
        T: Send,
    {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(id).map(apply))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn remove_finished_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.state.game_in_progress || s.updated_at > cutoff);
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AiPersonality;
    use crate::domain::value_objects::{Difficulty, GameState};
    use tokio_test::block_on;

    fn session() -> GameSession {
        GameSession::with_rng(
            GameState::new(Difficulty::Easy, AiPersonality::default()),
            GameSession::rng_for(Some(42)),
            Some(42),
        )
    }

    #[test]
    fn test_create_find_delete() {
        let repo = InMemoryGameRepository::new();
        let session = session();

        block_on(repo.create(&session)).unwrap();
        assert!(matches!(
            block_on(repo.create(&session)),
            Err(RepositoryError::AlreadyExists(_))
        ));

        let found = block_on(repo.find_by_id(&session.id)).unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(block_on(repo.count()).unwrap(), 1);

        block_on(repo.delete(&session.id)).unwrap();
        assert!(block_on(repo.find_by_id(&session.id)).unwrap().is_none());
        assert!(matches!(
            block_on(repo.delete(&session.id)),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_in_place() {
        let repo = InMemoryGameRepository::new();
        let session = session();
        block_on(repo.create(&session)).unwrap();

        let score = block_on(repo.update(&session.id, |s| {
            s.state.player_score = 7;
            s.state.player_score
        }))
        .unwrap();
        assert_eq!(score, Some(7));

        let found = block_on(repo.find_by_id(&session.id)).unwrap().unwrap();
        assert_eq!(found.state.player_score, 7);

        let missing = block_on(repo.update(&Uuid::new_v4(), |_| ())).unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        let repo = std::sync::Arc::new(InMemoryGameRepository::new());
        let session = session();
        repo.create(&session).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                let id = session.id;
                tokio::spawn(async move { repo.update(&id, |s| s.state.computer_score += 1).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let found = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(found.state.computer_score, 20);
    }

    #[test]
    fn test_remove_finished_before() {
        let repo = InMemoryGameRepository::new();
        let running = session();
        let mut finished = session();
        finished.state.game_in_progress = false;
        block_on(repo.create(&running)).unwrap();
        block_on(repo.create(&finished)).unwrap();

        let long_ago = finished.updated_at - chrono::Duration::hours(1);
        assert_eq!(block_on(repo.remove_finished_before(long_ago)).unwrap(), 0);

        let removed = block_on(repo.remove_finished_before(Utc::now())).unwrap();
        assert_eq!(removed, 1);
        assert!(block_on(repo.find_by_id(&finished.id)).unwrap().is_none());
        assert!(block_on(repo.find_by_id(&running.id)).unwrap().is_some());
    }
}
