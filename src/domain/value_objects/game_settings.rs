use serde::{Deserialize, Serialize};

use crate::domain::entities::OpponentProfile;

/// Points needed to win a game
pub const TARGET_SCORE: u8 = 24;

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Master,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        }
    }

    /// Parse a difficulty name. "intermediate" is the opponent-profile alias of medium.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "intermediate" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }

    /// Starting probability that the computer accepts a call
    pub fn base_acceptance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 0.35,
            Difficulty::Master => 0.2,
        }
    }
}

/// Game configuration chosen before the first deal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Avatar identifier, passed through to the UI
    #[serde(default)]
    pub avatar: Option<String>,
    /// Named archetype for the computer personality
    #[serde(default)]
    pub archetype: Option<String>,
    /// Opponent profile; takes precedence over `archetype`
    #[serde(default)]
    pub opponent: Option<OpponentProfile>,
    /// Sound flag forwarded to the UI. Never affects the rules.
    #[serde(default)]
    pub sound_effects_enabled: bool,
}

impl GameSettings {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Difficulty actually used: an opponent profile may carry its own tier
    pub fn effective_difficulty(&self) -> Difficulty {
        self.opponent
            .as_ref()
            .and_then(|o| o.difficulty.as_deref())
            .and_then(Difficulty::from_str)
            .unwrap_or(self.difficulty)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(opponent) = &self.opponent {
            let traits = [
                opponent.agresividad,
                opponent.riesgo,
                opponent.blufeo,
                opponent.consistencia,
            ];
            if traits.iter().any(|&t| !(1..=10).contains(&t)) {
                return Err("Opponent traits must be between 1 and 10");
            }
            if let Some(d) = opponent.difficulty.as_deref() {
                if Difficulty::from_str(d).is_none() {
                    return Err("Unknown opponent difficulty");
                }
            }
        }
        Ok(())
    }
}
