//! Easy bot strategy
//!
//! Plays a uniformly random card.

use rand::{Rng, RngCore};

use super::BotStrategy;
use crate::domain::value_objects::{Difficulty, GameState};

/// Easy difficulty bot strategy
pub struct EasyBotStrategy;

impl EasyBotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EasyBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for EasyBotStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn select_card(&self, state: &GameState, rng: &mut dyn RngCore) -> usize {
        let len = state.computer_hand.len();
        if len == 0 {
            return 0;
        }
        rng.gen_range(0..len)
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
    fn test_easy_bot_picks_every_index() {
        let state = table(
            Difficulty::Easy,
            AiPersonality::default(),
            &[c(Suit::Oros, 3), c(Suit::Espadas, 1), c(Suit::Bastos, 4)],
            None,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let bot = EasyBotStrategy::new();
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[bot.select_card(&state, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
