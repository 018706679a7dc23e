//! Hand service - Core game flow for Truco
//!
//! Deals hands, sequences the three tricks, pays out the hand and detects the
//! end of the game. Every function returns a new `GameState`.

use rand::Rng;
use tracing::{debug, info};

use super::deck_service::{
    calculate_envido_points, compare_cards, get_perico_card, has_flor, shuffle_deck,
};
use super::personality_service::{
    convert_opponent_to_personality, generate_personality_from_archetype,
    generate_random_personality,
};
use crate::domain::entities::Card;
use crate::domain::value_objects::{
    GameSettings, GameState, Hand, Phase, Pot, RoundWinner, Side, TrickRecord, TrickTally,
    HAND_SIZE, MAX_ROUNDS, TARGET_SCORE, TRICKS_TO_WIN,
};

/// Result of applying a trick outcome
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub state: GameState,
    pub hand_ended: bool,
    pub game_ended: bool,
}

/// Build a fresh game: zero scores, a new AI personality, no hand dealt yet
pub fn initialize_game_state<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> GameState {
    let personality = match (&settings.opponent, &settings.archetype) {
        (Some(opponent), _) => convert_opponent_to_personality(opponent),
        (None, Some(archetype)) => generate_personality_from_archetype(archetype, rng),
        (None, None) => generate_random_personality(rng),
    };
    let difficulty = settings.effective_difficulty();

    let mut state = GameState::new(difficulty, personality);
    state.avatar = settings.avatar.clone();
    state.sound_effects_enabled = settings.sound_effects_enabled;
    state.push_lore(format!(
        "Nueva partida contra {} ({})",
        state.ai_personality.archetype,
        difficulty.as_str()
    ));

    info!(
        difficulty = difficulty.as_str(),
        archetype = %state.ai_personality.archetype,
        "game initialized"
    );
    state
}

/// Shuffle a fresh deck and deal the next hand
pub fn start_new_hand<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    let deck = shuffle_deck(rng);
    deal_from_deck(state, &deck)
}

/// Deal 3 cards to the player, 3 to the computer and reveal the 7th as vira.
///
/// Pure in the deck order, which keeps hands reproducible in tests.
pub fn deal_from_deck(state: &GameState, deck: &[Card]) -> GameState {
    if !state.game_in_progress || deck.len() < HAND_SIZE * 2 + 1 {
        return state.clone();
    }

    let mut next = state.clone();
    let player_hand: Hand = deck[..HAND_SIZE].iter().copied().collect();
    let computer_hand: Hand = deck[HAND_SIZE..HAND_SIZE * 2].iter().copied().collect();
    let vira = deck[HAND_SIZE * 2];
    let perico = get_perico_card(&vira);

    next.player_envido_points = calculate_envido_points(&player_hand, &vira);
    next.computer_envido_points = calculate_envido_points(&computer_hand, &vira);
    next.player_has_flor = has_flor(&player_hand, &vira);
    next.computer_has_flor = has_flor(&computer_hand, &vira);
    next.player_hand = player_hand;
    next.computer_hand = computer_hand;
    next.vira = Some(vira);
    next.perico = Some(perico);

    // Player is Mano in the first hand, then it alternates
    next.mano_is_player = if state.hand_number == 0 {
        true
    } else {
        !state.mano_is_player
    };
    next.hand_number = state.hand_number + 1;
    next.is_player_turn = next.mano_is_player;

    next.current_round = 1;
    next.player_card = None;
    next.computer_card = None;
    next.rounds_won = TrickTally::default();
    next.trick_history.clear();

    next.current_phase = if next.player_has_flor || next.computer_has_flor {
        Phase::Flor
    } else {
        Phase::Envido
    };
    next.current_truco_level = Default::default();
    next.current_envido_level = Default::default();
    next.last_call = None;
    next.waiting_for_response = false;
    next.truco_pending_offer = None;
    next.truco_accepted_pot = Pot::default();
    next.last_truco_caller = None;
    next.flor_called = false;

    next.hand_over = false;
    next.hand_winner = None;
    next.is_processing_action = false;

    next.push_lore(format!(
        "--- Mano {}: vira {}, perico {} ---",
        next.hand_number, vira, perico
    ));
    debug!(
        hand = next.hand_number,
        mano = next.mano().as_str(),
        "hand dealt"
    );
    next
}

/// The player plays the card at `index`
pub fn play_card(state: &GameState, index: usize) -> GameState {
    play_card_for(state, Side::Player, index)
}

/// Move a card from `side`'s hand to the table and pass the turn
pub fn play_card_for(state: &GameState, side: Side, index: usize) -> GameState {
    let can_play = state.hand_active()
        && !state.waiting_for_response
        && state.turn() == side
        && matches!(state.current_phase, Phase::Truco | Phase::Playing)
        && state.played_card(side).is_none()
        && index < state.hand(side).len();
    if !can_play {
        debug!(side = side.as_str(), index, "play ignored");
        return state.clone();
    }

    let mut next = state.clone();
    let card = next.hand_mut(side).remove(index);
    next.set_played_card(side, Some(card));
    next.push_lore(format!("{} juega {}", side.label(), card));
    next.set_turn(side.opponent());
    next
}

/// Decide the current trick. Missing cards fall back to a tie without changes.
pub fn evaluate_round(state: &GameState) -> (RoundWinner, GameState) {
    let (Some(player_card), Some(computer_card), Some(vira)) =
        (state.player_card, state.computer_card, state.vira)
    else {
        return (RoundWinner::Tie, state.clone());
    };

    let winner = match compare_cards(&player_card, &computer_card, &vira) {
        std::cmp::Ordering::Greater => RoundWinner::Player,
        std::cmp::Ordering::Less => RoundWinner::Computer,
        std::cmp::Ordering::Equal => RoundWinner::Tie,
    };

    let mut next = state.clone();
    let message = match winner.side() {
        Some(side) => format!(
            "Ronda {}: {} contra {}. Gana {}",
            state.current_round,
            player_card,
            computer_card,
            side.label()
        ),
        None => format!(
            "Ronda {}: {} contra {}. Parda",
            state.current_round, player_card, computer_card
        ),
    };
    next.push_lore(message);
    (winner, next)
}

/// Record a trick outcome and either close the hand or move to the next trick
pub fn apply_round_result(state: &GameState, winner: RoundWinner) -> RoundResult {
    let (Some(player_card), Some(computer_card)) = (state.player_card, state.computer_card) else {
        return RoundResult {
            state: state.clone(),
            hand_ended: state.hand_over,
            game_ended: !state.game_in_progress,
        };
    };
    if !state.hand_active() {
        return RoundResult {
            state: state.clone(),
            hand_ended: true,
            game_ended: !state.game_in_progress,
        };
    }

    let mut next = state.clone();
    next.trick_history.push(TrickRecord {
        round: state.current_round,
        player_card,
        computer_card,
        winner,
    });
    if let Some(side) = winner.side() {
        next.rounds_won.increment(side);
    }

    let hand_decided = [Side::Player, Side::Computer]
        .into_iter()
        .find(|&s| next.rounds_won.get(s) >= TRICKS_TO_WIN);
    let last_trick = state.current_round >= MAX_ROUNDS;

    if hand_decided.is_some() || last_trick {
        // After the third trick the majority takes it; still level means nobody does
        let hand_winner = hand_decided.or_else(|| next.rounds_won.leader());
        next.player_card = None;
        next.computer_card = None;
        let next = match hand_winner {
            Some(side) => end_hand(&next, side).0,
            None => {
                let mut drawn = next;
                drawn.hand_over = true;
                drawn.hand_winner = None;
                drawn.push_lore("Mano empatada: nadie suma puntos");
                drawn
            }
        };
        let game_ended = !next.game_in_progress;
        return RoundResult {
            state: next,
            hand_ended: true,
            game_ended,
        };
    }

    next.current_round += 1;
    next.player_card = None;
    next.computer_card = None;
    next.is_processing_action = false;
    // Trick winner leads the next one; the Mano leads after a parda
    let leader = winner.side().unwrap_or_else(|| next.mano());
    next.set_turn(leader);

    RoundResult {
        state: next,
        hand_ended: false,
        game_ended: false,
    }
}

/// Evaluate and apply the trick once both cards are on the table
pub fn resolve_trick_if_complete(state: &GameState) -> RoundResult {
    if state.player_card.is_none() || state.computer_card.is_none() {
        return RoundResult {
            state: state.clone(),
            hand_ended: state.hand_over,
            game_ended: !state.game_in_progress,
        };
    }
    let (winner, evaluated) = evaluate_round(state);
    apply_round_result(&evaluated, winner)
}

/// Pay the hand to `winner`. Returns the new state and the points added.
pub fn end_hand(state: &GameState, winner: Side) -> (GameState, u8) {
    if !state.hand_active() {
        return (state.clone(), 0);
    }

    let mut next = state.clone();
    let points_added = match next.truco_accepted_pot {
        Pot::Game => {
            next.set_score(winner, TARGET_SCORE);
            TARGET_SCORE
        }
        Pot::Points(points) => {
            next.add_score(winner, points);
            points
        }
    };

    next.hand_over = true;
    next.hand_winner = Some(winner);
    next.push_lore(format!("{} gana la mano (+{})", winner.label(), points_added));
    info!(
        winner = winner.as_str(),
        points = points_added,
        player_score = next.player_score,
        computer_score = next.computer_score,
        "hand finished"
    );
    conclude_if_game_over(&mut next);
    (next, points_added)
}

/// First side to reach the target score
pub fn check_game_end(state: &GameState) -> Option<Side> {
    if state.player_score >= TARGET_SCORE {
        Some(Side::Player)
    } else if state.computer_score >= TARGET_SCORE {
        Some(Side::Computer)
    } else {
        None
    }
}

/// Close the game in place once a side has reached the target
pub(crate) fn conclude_if_game_over(state: &mut GameState) {
    if state.winner.is_some() {
        return;
    }
    if let Some(winner) = check_game_end(state) {
        state.game_in_progress = false;
        state.winner = Some(winner);
        state.hand_over = true;
        state.waiting_for_response = false;
        state.last_call = None;
        state.push_lore(format!("¡{} gana la partida!", winner.label()));
        info!(
            winner = winner.as_str(),
            player_score = state.player_score,
            computer_score = state.computer_score,
            "game finished"
        );
    }
}
