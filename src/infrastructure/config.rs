//! Runtime configuration read from the environment (and `.env` via dotenvy)

use crate::domain::value_objects::Difficulty;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 9999;

/// Seconds a finished game is kept before the sweeper drops it
pub const DEFAULT_FINISHED_GAME_TTL_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Difficulty used when a new game does not name one
    pub default_difficulty: Difficulty,
    /// Fixed seed for every new game; useful for reproducing a session
    pub seed: Option<u64>,
    /// Finished games idle for longer than this are evicted
    pub finished_game_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_difficulty: Difficulty::default(),
            seed: None,
            finished_game_ttl_secs: DEFAULT_FINISHED_GAME_TTL_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let default_difficulty = lookup("TRUCO_DEFAULT_DIFFICULTY")
            .as_deref()
            .and_then(Difficulty::from_str)
            .unwrap_or(defaults.default_difficulty);

        let seed = lookup("TRUCO_SEED").and_then(|s| s.parse().ok());

        let finished_game_ttl_secs = lookup("TRUCO_FINISHED_GAME_TTL_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.finished_game_ttl_secs);

        Self {
            port,
            default_difficulty,
            seed,
            finished_game_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.port, 9999);
        assert_eq!(config.default_difficulty, Difficulty::Medium);
        assert_eq!(config.seed, None);
        assert_eq!(config.finished_game_ttl_secs, 600);
    }

    #[test]
    fn test_reads_values() {
        let config = config(&[
            ("PORT", "8080"),
            ("TRUCO_DEFAULT_DIFFICULTY", "master"),
            ("TRUCO_SEED", "123"),
            ("TRUCO_FINISHED_GAME_TTL_SECS", "30"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_difficulty, Difficulty::Master);
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.finished_game_ttl_secs, 30);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config(&[("PORT", "not-a-port"), ("TRUCO_DEFAULT_DIFFICULTY", "legend")]);
        assert_eq!(config.port, 9999);
        assert_eq!(config.default_difficulty, Difficulty::Medium);
    }
}
