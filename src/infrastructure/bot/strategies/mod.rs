//! Bot strategies module
//!
//! One card-selection strategy per difficulty tier.

mod easy_bot;
mod hard_bot;
mod master_bot;
mod medium_bot;

pub use easy_bot::*;
pub use hard_bot::*;
pub use master_bot::*;
pub use medium_bot::*;

use rand::RngCore;

use crate::domain::value_objects::{Difficulty, GameState};

/// Bot strategy trait
pub trait BotStrategy: Send + Sync {
    /// Tier this strategy plays at
    fn difficulty(&self) -> Difficulty;

    /// Pick the index of the computer card to play this trick
    fn select_card(&self, state: &GameState, rng: &mut dyn RngCore) -> usize;
}

/// Strategy for a difficulty tier
pub fn strategy_for(difficulty: Difficulty) -> Box<dyn BotStrategy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyBotStrategy::new()),
        Difficulty::Medium => Box::new(MediumBotStrategy::new()),
        Difficulty::Hard => Box::new(HardBotStrategy::new()),
        Difficulty::Master => Box::new(MasterBotStrategy::new()),
    }
}

/// Probability from a 1..=10 trait, scaled by `factor`
pub(crate) fn trait_chance(value: u8, factor: f64) -> f64 {
    (value as f64 / 10.0 * factor).clamp(0.0, 1.0)
}
