//! Computer player - runs one step of the computer's side of the table

use rand::RngCore;
use tracing::debug;

use super::response::{decide_ai_call, decide_ai_reply, AiReply};
use super::strategies::strategy_for;
use crate::domain::services::{
    accept_call, advance_phase, call_estar_cantando, is_call_legal, make_call, play_card_for,
    raise_call, reject_call, ESTAR_CANTANDO_SCORE,
};
use crate::domain::value_objects::{CallType, GameState, Phase, Side};

/// Index of the card the computer's strategy picks, always within the hand
pub fn select_best_card_for_ai(state: &GameState, rng: &mut dyn RngCore) -> usize {
    let len = state.computer_hand.len();
    if len == 0 {
        return 0;
    }
    let index = strategy_for(state.difficulty).select_card(state, rng);
    debug!(index, difficulty = state.difficulty.as_str(), "computer picks card");
    index.min(len - 1)
}

/// The computer plays the card its strategy picks
pub fn computer_play_card(state: &GameState, rng: &mut dyn RngCore) -> GameState {
    if state.turn() != Side::Computer || state.computer_hand.is_empty() {
        return state.clone();
    }
    let index = select_best_card_for_ai(state, rng);
    play_card_for(state, Side::Computer, index)
}

/// One computer step. Answers a pending call, declares Estar Cantando, sings a
/// call, or plays a card after skipping the betting windows it passes on.
/// Returns the state unchanged when the computer has nothing to do.
pub fn take_computer_turn(state: &GameState, rng: &mut dyn RngCore) -> GameState {
    if !state.hand_active() {
        return state.clone();
    }

    if state.waiting_for_response {
        let Some(pending) = state.last_call else {
            return state.clone();
        };
        if state.responder() != Some(Side::Computer) {
            return state.clone();
        }
        return match decide_ai_reply(pending.call, state, rng) {
            AiReply::Accept => accept_call(state, Side::Computer),
            AiReply::Reject => reject_call(state, Side::Computer),
            AiReply::Raise(call) => raise_call(state, call, Side::Computer),
        };
    }

    // Flor is sung whenever the computer holds one, turn or not
    if state.current_phase == Phase::Flor && is_call_legal(state, CallType::Flor, Side::Computer)
    {
        return make_call(state, CallType::Flor, Side::Computer);
    }

    if state.turn() != Side::Computer {
        return state.clone();
    }

    if state.computer_score == ESTAR_CANTANDO_SCORE {
        return call_estar_cantando(state, Side::Computer);
    }

    let mut current = state.clone();
    loop {
        if let Some(call) = decide_ai_call(&current, rng) {
            return make_call(&current, call, Side::Computer);
        }
        if matches!(current.current_phase, Phase::Flor | Phase::Envido) {
            current = advance_phase(&current);
            continue;
        }
        return computer_play_card(&current, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AiPersonality, Card, Suit};
    use crate::domain::services::{call_envido, call_truco};
    use crate::domain::value_objects::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(suit: Suit, value: u8) -> Card {
        Card::new(suit, value)
    }

    /// Weak computer hand so it never wants to sing
    fn table(phase: Phase) -> GameState {
        let personality = AiPersonality::new(1, 1, 5, 5, "x");
        let mut state = GameState::new(Difficulty::Medium, personality);
        state.hand_over = false;
        state.hand_number = 1;
        state.current_phase = phase;
        state.vira = Some(c(Suit::Copas, 6));
        state.perico = Some(c(Suit::Copas, 5));
        state.computer_hand = [c(Suit::Oros, 4), c(Suit::Bastos, 5), c(Suit::Espadas, 6)]
            .into_iter()
            .collect();
        state.player_hand = [c(Suit::Oros, 7), c(Suit::Bastos, 12), c(Suit::Espadas, 2)]
            .into_iter()
            .collect();
        state.computer_envido_points = 26;
        state.player_envido_points = 27;
        state.set_turn(Side::Computer);
        state.mano_is_player = false;
        state
    }

    #[test]
    fn test_computer_skips_betting_and_plays() {
        let state = table(Phase::Envido);
        let mut played = 0;
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let next = take_computer_turn(&state, &mut rng);
            if next.waiting_for_response {
                // A rare bluff call
                continue;
            }
            played += 1;
            assert!(next.current_phase >= Phase::Truco);
            assert!(next.computer_card.is_some());
            assert_eq!(next.computer_hand.len(), 2);
            assert!(next.is_player_turn);
        }
        assert!(played >= 15);
    }

    #[test]
    fn test_computer_answers_pending_call() {
        let mut state = table(Phase::Envido);
        state.set_turn(Side::Player);
        let state = call_envido(&state, CallType::Envido, Side::Player);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let next = take_computer_turn(&state, &mut rng);
        assert!(!next.waiting_for_response);
        // Accepted: 27 beats 26 for two points. Rejected: one point.
        assert!(next.player_score == 1 || next.player_score == 2);
        assert_eq!(next.computer_score, 0);
    }

    #[test]
    fn test_computer_does_not_answer_own_call() {
        let state = table(Phase::Truco);
        let state = call_truco(&state, CallType::Truco, Side::Computer);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let next = take_computer_turn(&state, &mut rng);
        assert!(next.waiting_for_response);
        assert_eq!(next.lore.len(), state.lore.len());
    }

    #[test]
    fn test_computer_declares_estar_cantando() {
        let mut state = table(Phase::Truco);
        state.computer_score = 23;
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let next = take_computer_turn(&state, &mut rng);
        assert_eq!(next.computer_score, 24);
        assert_eq!(next.winner, Some(Side::Computer));
    }

    #[test]
    fn test_computer_sings_flor_out_of_turn() {
        let mut state = table(Phase::Flor);
        state.set_turn(Side::Player);
        state.computer_has_flor = true;
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let next = take_computer_turn(&state, &mut rng);
        assert!(next.flor_called);
        assert_eq!(next.computer_score, 3);
    }

    #[test]
    fn test_waits_for_player_turn() {
        let mut state = table(Phase::Truco);
        state.set_turn(Side::Player);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let next = take_computer_turn(&state, &mut rng);
        assert_eq!(next.computer_hand.len(), 3);
    }

    #[test]
    fn test_select_best_card_in_range() {
        let state = table(Phase::Truco);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            assert!(select_best_card_for_ai(&state, &mut rng) < 3);
        }
    }
}
