//! Master bot strategy
//!
//! Reads the trick count of the hand and blends all four traits.

use rand::{Rng, RngCore};

use super::{trait_chance, BotStrategy};
use crate::domain::value_objects::{Difficulty, GameState, Side};
use crate::infrastructure::bot::hand_analyzer::{indices_by_rank, middle, winning_indices};

/// Highest bluff probability, reached at intimidacion 10
pub const MASTER_MAX_BLUFF: f64 = 0.67;

/// Master difficulty bot strategy
pub struct MasterBotStrategy;

impl MasterBotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MasterBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for MasterBotStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Master
    }

    fn select_card(&self, state: &GameState, rng: &mut dyn RngCore) -> usize {
        let p = &state.ai_personality;
        let sorted = indices_by_rank(state, Side::Computer);
        let (Some(&weakest), Some(&best)) = (sorted.first(), sorted.last()) else {
            return 0;
        };
        let middling = middle(&sorted).unwrap_or(weakest);

        if let Some(target) = state.player_card {
            let winners = winning_indices(state, Side::Computer, &target);
            if let (Some(&cheapest), Some(&strongest)) = (winners.first(), winners.last()) {
                // Overplaying only makes sense with a spare winner
                let bluff = trait_chance(p.intimidacion, MASTER_MAX_BLUFF);
                if winners.len() >= 2 && rng.gen_bool(bluff) {
                    return strongest;
                }
                return cheapest;
            }

            let gamble = (p.calculo as f64 * p.adaptabilidad as f64 / 100.0).clamp(0.0, 1.0);
            return if rng.gen_bool(gamble) { best } else { weakest };
        }

        if state.current_round <= 1 {
            return if rng.gen_bool(trait_chance(p.calculo, 1.0)) {
                middling
            } else {
                best
            };
        }

        let tally = state.rounds_won;
        if tally.computer > tally.player {
            if rng.gen_bool(trait_chance(p.agresividad, 1.0)) {
                best
            } else {
                weakest
            }
        } else if rng.gen_bool(trait_chance(p.adaptabilidad, 1.0)) {
            best
        } else {
            middling
        }
    }
}
