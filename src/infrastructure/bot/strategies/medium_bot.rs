//! Medium bot strategy
//!
//! Beats the visible card when it can, otherwise throws away its weakest card.

use rand::{Rng, RngCore};

use super::{trait_chance, BotStrategy};
use crate::domain::value_objects::{Difficulty, GameState, Side};
use crate::infrastructure::bot::hand_analyzer::{indices_by_rank, middle, winning_indices};

/// Medium difficulty bot strategy
pub struct MediumBotStrategy;

impl MediumBotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MediumBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for MediumBotStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn select_card(&self, state: &GameState, rng: &mut dyn RngCore) -> usize {
        let personality = &state.ai_personality;
        let sorted = indices_by_rank(state, Side::Computer);
        let Some(&weakest) = sorted.first() else {
            return 0;
        };

        if let Some(target) = state.player_card {
            let winners = winning_indices(state, Side::Computer, &target);
            return match winners.last() {
                None => weakest,
                Some(&strongest) => {
                    if rng.gen_bool(trait_chance(personality.agresividad, 1.0)) {
                        strongest
                    } else {
                        middle(&winners).unwrap_or(strongest)
                    }
                }
            };
        }

        if rng.gen_bool(trait_chance(personality.calculo, 1.0)) {
            middle(&sorted).unwrap_or(weakest)
        } else {
            rng.gen_range(0..sorted.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{c, table};
    use super::*;
    use crate::domain::entities::{AiPersonality, Suit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_medium_sacrifices_weakest_without_winner() {
        let state = table(
            Difficulty::Medium,
            AiPersonality::default(),
            &[c(Suit::Oros, 3), c(Suit::Oros, 12), c(Suit::Bastos, 4)],
            Some(c(Suit::Espadas, 1)),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..20 {
            assert_eq!(MediumBotStrategy::new().select_card(&state, &mut rng), 2);
        }
    }

    #[test]
    fn test_medium_aggressive_plays_strongest_winner() {
        let personality = AiPersonality::new(10, 5, 5, 5, "Agresivo");
        let state = table(
            Difficulty::Medium,
            personality,
            &[c(Suit::Oros, 3), c(Suit::Espadas, 1), c(Suit::Bastos, 4)],
            Some(c(Suit::Oros, 12)),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..20 {
            assert_eq!(MediumBotStrategy::new().select_card(&state, &mut rng), 1);
        }
    }

    #[test]
    fn test_medium_opening_with_full_calculo_plays_middle() {
        let personality = AiPersonality::new(5, 5, 10, 5, "Calculador");
        let state = table(
            Difficulty::Medium,
            personality,
            &[c(Suit::Oros, 3), c(Suit::Espadas, 1), c(Suit::Bastos, 4)],
            None,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(MediumBotStrategy::new().select_card(&state, &mut rng), 0);
    }
}
