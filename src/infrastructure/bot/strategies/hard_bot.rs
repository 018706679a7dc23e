//! Hard bot strategy
//!
//! Wins tricks as cheaply as possible but sometimes overplays to intimidate.

use rand::{Rng, RngCore};

use super::{trait_chance, BotStrategy};
use crate::domain::value_objects::{Difficulty, GameState, Side};
use crate::infrastructure::bot::hand_analyzer::{
    indices_by_rank, middle, tying_indices, winning_indices,
};

/// Highest bluff probability, reached at intimidacion 10
pub const HARD_MAX_BLUFF: f64 = 0.5;

/// Hard difficulty bot strategy
pub struct HardBotStrategy;

impl HardBotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for HardBotStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn select_card(&self, state: &GameState, rng: &mut dyn RngCore) -> usize {
        let personality = &state.ai_personality;
        let sorted = indices_by_rank(state, Side::Computer);
        let (Some(&weakest), Some(&best)) = (sorted.first(), sorted.last()) else {
            return 0;
        };

        if let Some(target) = state.player_card {
            let winners = winning_indices(state, Side::Computer, &target);
            if let (Some(&cheapest), Some(&strongest)) = (winners.first(), winners.last()) {
                let bluff = trait_chance(personality.intimidacion, HARD_MAX_BLUFF);
                return if rng.gen_bool(bluff) { strongest } else { cheapest };
            }

            // Nothing wins: save cards or fight for a parda
            if rng.gen_bool(trait_chance(personality.calculo, 1.0)) {
                return weakest;
            }
            return tying_indices(state, Side::Computer, &target)
                .first()
                .copied()
                .or_else(|| middle(&sorted))
                .unwrap_or(weakest);
        }

        let middling = middle(&sorted).unwrap_or(weakest);
        if state.current_round <= 1 {
            return middling;
        }
        if rng.gen_bool(trait_chance(personality.agresividad, 1.0)) {
            best
        } else {
            middling
        }
    }
}
