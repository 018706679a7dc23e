//! Betting service - Flor, Envido and Truco call ladders
//!
//! A finite state machine keyed by the hand phase and the two level counters.
//! Illegal calls are not errors: they return the state unchanged, so callers
//! can attempt any action without checking legality first.

use tracing::debug;

use super::hand_service::conclude_if_game_over;
use crate::domain::value_objects::{
    CallFamily, CallType, EnvidoLevel, GameState, PendingCall, Phase, Pot, Side, TrucoLevel,
    TARGET_SCORE,
};

/// Paid to a Flor nobody can answer, or to the caller of a refused Flor
pub const FLOR_POINTS: u8 = 3;
/// Paid to the best Flor when both sides hold one
pub const CONTRAFLOR_POINTS: u8 = 6;
/// Paid to the caller of a refused Envido-family call
pub const ENVIDO_REJECT_POINTS: u8 = 1;
/// Paid to the opponent of a side that goes to the deck
pub const FOLD_POINTS: u8 = 2;
/// Score at which Estar Cantando may be declared
pub const ESTAR_CANTANDO_SCORE: u8 = TARGET_SCORE - 1;

/// Sing any call. Dispatches on the call family.
pub fn make_call(state: &GameState, call: CallType, caller: Side) -> GameState {
    match call.family() {
        CallFamily::Flor => call_flor(state, caller),
        CallFamily::Envido => call_envido(state, call, caller),
        CallFamily::Truco => call_truco(state, call, caller),
    }
}

/// Whether `make_call` would change the state
pub fn is_call_legal(state: &GameState, call: CallType, caller: Side) -> bool {
    match call.family() {
        CallFamily::Flor => flor_allowed(state, caller),
        CallFamily::Envido => envido_allowed(state, call, caller),
        CallFamily::Truco => truco_allowed(state, call, caller),
    }
}

/// Answer a pending call with the next step of the same family.
/// Only the responder may raise; anything else is ignored.
pub fn raise_call(state: &GameState, call: CallType, side: Side) -> GameState {
    let same_family = state
        .last_call
        .map(|pending| pending.call.family() == call.family())
        .unwrap_or(false);
    if state.responder() != Some(side) || !same_family {
        debug!(call = ?call, side = side.as_str(), "raise ignored");
        return state.clone();
    }
    make_call(state, call, side)
}

fn flor_allowed(state: &GameState, caller: Side) -> bool {
    state.hand_active()
        && state.current_phase == Phase::Flor
        && !state.waiting_for_response
        && !state.flor_called
        && state.has_flor(caller)
}

/// Envido ladder: Envido 0→1, RealEnvido 1→2, FaltaEnvido 1|2→3.
/// Falta is terminal: a Falta over a pending Falta is ignored.
fn envido_step_allowed(level: EnvidoLevel, call: CallType) -> bool {
    matches!(
        (level, call),
        (EnvidoLevel::None, CallType::Envido)
            | (EnvidoLevel::Envido, CallType::RealEnvido)
            | (EnvidoLevel::Envido, CallType::FaltaEnvido)
            | (EnvidoLevel::RealEnvido, CallType::FaltaEnvido)
    )
}

fn envido_allowed(state: &GameState, call: CallType, caller: Side) -> bool {
    if !state.hand_active() || !envido_step_allowed(state.current_envido_level, call) {
        return false;
    }
    if state.waiting_for_response {
        // Only the responder may raise a pending Envido-family call
        return state.responder() == Some(caller)
            && state.last_call.map(|c| c.call.family()) == Some(CallFamily::Envido);
    }
    state.current_phase == Phase::Envido
}

fn truco_allowed(state: &GameState, call: CallType, caller: Side) -> bool {
    if !state.hand_active() {
        return false;
    }
    let Some(level) = call.truco_level() else {
        return false;
    };

    if state.waiting_for_response {
        let Some(pending) = state.last_call else {
            return false;
        };
        return state.responder() == Some(caller)
            && pending.call.family() == CallFamily::Truco
            && pending.call.truco_level().and_then(|l| l.next()) == Some(level);
    }

    let trick_complete = state.player_card.is_some() && state.computer_card.is_some();
    // Truco may be sung on your turn at any point once the Flor window is closed
    matches!(
        state.current_phase,
        Phase::Envido | Phase::Truco | Phase::Playing
    ) && !trick_complete
        && state.turn() == caller
        && state.current_truco_level.next() == Some(level)
        && state.last_truco_caller != Some(caller)
}

/// Sing Flor. Pays at once when the opponent has no Flor to answer with.
pub fn call_flor(state: &GameState, caller: Side) -> GameState {
    if !flor_allowed(state, caller) {
        debug!(caller = caller.as_str(), "flor ignored: not allowed now");
        return state.clone();
    }

    let mut next = state.clone();
    next.flor_called = true;
    next.push_lore(format!("{} canta Flor", caller.label()));

    if next.has_flor(caller.opponent()) {
        next.last_call = Some(PendingCall {
            call: CallType::Flor,
            caller,
        });
        next.waiting_for_response = true;
    } else {
        next.add_score(caller, FLOR_POINTS);
        next.push_lore(format!("{} gana {} puntos de Flor", caller.label(), FLOR_POINTS));
        next.current_phase = Phase::Envido;
        conclude_if_game_over(&mut next);
    }
    next
}

/// Sing Envido, RealEnvido or FaltaEnvido, or raise a pending one as responder
pub fn call_envido(state: &GameState, call: CallType, caller: Side) -> GameState {
    if call.family() != CallFamily::Envido || !envido_allowed(state, call, caller) {
        debug!(call = ?call, caller = caller.as_str(), "envido call ignored");
        return state.clone();
    }
    let Some(level) = call.envido_level() else {
        return state.clone();
    };

    let mut next = state.clone();
    let raising = next.waiting_for_response;
    next.current_envido_level = level;
    next.last_call = Some(PendingCall { call, caller });
    next.waiting_for_response = true;
    if raising {
        next.push_lore(format!("{} sube: {}", caller.label(), call.label()));
    } else {
        next.push_lore(format!("{} canta {}", caller.label(), call.label()));
    }
    next
}

/// Sing the next step of the Truco ladder. As responder this also accepts the
/// pending offer before raising it.
pub fn call_truco(state: &GameState, call: CallType, caller: Side) -> GameState {
    if call.family() != CallFamily::Truco || !truco_allowed(state, call, caller) {
        debug!(call = ?call, caller = caller.as_str(), "truco call ignored");
        return state.clone();
    }
    let Some(level) = call.truco_level() else {
        return state.clone();
    };

    let mut next = state.clone();
    if next.waiting_for_response {
        // Raising implies accepting what was offered
        if let Some(pending) = next.last_call {
            lock_truco_offer(&mut next, pending);
        }
        next.push_lore(format!("{} quiere y sube: {}", caller.label(), call.label()));
    } else {
        if next.current_phase == Phase::Envido {
            next.current_phase = Phase::Truco;
        }
        next.push_lore(format!("{} canta {}", caller.label(), call.label()));
    }

    next.last_call = Some(PendingCall { call, caller });
    next.truco_pending_offer = Some(level.offer());
    next.waiting_for_response = true;
    next
}

fn lock_truco_offer(state: &mut GameState, pending: PendingCall) {
    if let Some(level) = pending.call.truco_level() {
        state.current_truco_level = level;
        state.truco_accepted_pot = state.truco_pending_offer.unwrap_or(level.offer());
        state.last_truco_caller = Some(pending.caller);
    }
    state.truco_pending_offer = None;
}

/// Accept the pending call. Envido resolves immediately; Truco locks the pot.
pub fn accept_call(state: &GameState, responder: Side) -> GameState {
    let Some(pending) = state.last_call else {
        return state.clone();
    };
    if !state.waiting_for_response || state.responder() != Some(responder) || state.hand_over {
        debug!(responder = responder.as_str(), "accept ignored: nothing to answer");
        return state.clone();
    }

    let mut next = state.clone();
    next.waiting_for_response = false;
    next.last_call = None;
    next.push_lore(format!("{}: ¡Quiero! ({})", responder.label(), pending.call.label()));

    match pending.call.family() {
        CallFamily::Flor => {
            let winner = envido_winner(&next);
            next.add_score(winner, CONTRAFLOR_POINTS);
            next.push_lore(format!(
                "Flor: {} gana con {} contra {} (+{})",
                winner.label(),
                next.envido_points(winner),
                next.envido_points(winner.opponent()),
                CONTRAFLOR_POINTS
            ));
            next.current_phase = Phase::Envido;
            conclude_if_game_over(&mut next);
            next
        }
        CallFamily::Envido => resolve_envido(&next),
        CallFamily::Truco => {
            lock_truco_offer(&mut next, pending);
            if next.current_truco_level == TrucoLevel::ValeJuego {
                next.current_phase = Phase::Playing;
            }
            next
        }
    }
}

/// Refuse the pending call; the caller collects the documented points
pub fn reject_call(state: &GameState, responder: Side) -> GameState {
    let Some(pending) = state.last_call else {
        return state.clone();
    };
    if !state.waiting_for_response || state.responder() != Some(responder) || state.hand_over {
        debug!(responder = responder.as_str(), "reject ignored: nothing to answer");
        return state.clone();
    }

    let mut next = state.clone();
    let caller = pending.caller;
    let points = match pending.call.family() {
        CallFamily::Truco => next.truco_accepted_pot.points().unwrap_or(1),
        CallFamily::Envido => ENVIDO_REJECT_POINTS,
        CallFamily::Flor => FLOR_POINTS,
    };

    next.add_score(caller, points);
    next.push_lore(format!(
        "{}: No quiero ({}). {} gana {} punto(s)",
        responder.label(),
        pending.call.label(),
        caller.label(),
        points
    ));

    match pending.call.family() {
        CallFamily::Truco => {
            next.hand_over = true;
            next.hand_winner = Some(caller);
            next.truco_accepted_pot = Pot::default();
            next.last_truco_caller = None;
        }
        CallFamily::Envido => next.current_phase = Phase::Truco,
        CallFamily::Flor => next.current_phase = Phase::Envido,
    }

    next.current_truco_level = TrucoLevel::None;
    next.current_envido_level = EnvidoLevel::None;
    next.truco_pending_offer = None;
    next.last_call = None;
    next.waiting_for_response = false;
    conclude_if_game_over(&mut next);
    next
}

/// Side holding the better Envido; the Mano takes ties
fn envido_winner(state: &GameState) -> Side {
    let player = state.player_envido_points;
    let computer = state.computer_envido_points;
    match player.cmp(&computer) {
        std::cmp::Ordering::Greater => Side::Player,
        std::cmp::Ordering::Less => Side::Computer,
        std::cmp::Ordering::Equal => state.mano(),
    }
}

/// Points at stake for an accepted Envido at `level`
pub fn envido_stake(state: &GameState, level: EnvidoLevel) -> u8 {
    match level {
        EnvidoLevel::None => 0,
        EnvidoLevel::Envido => 2,
        EnvidoLevel::RealEnvido => 4,
        EnvidoLevel::FaltaEnvido => {
            let leader = state.player_score.max(state.computer_score);
            TARGET_SCORE.saturating_sub(leader).max(1)
        }
    }
}

/// Compare both Envido totals and pay the winner. Always moves on to Truco.
pub fn resolve_envido(state: &GameState) -> GameState {
    if state.current_envido_level == EnvidoLevel::None {
        return state.clone();
    }

    let mut next = state.clone();
    let winner = envido_winner(&next);
    let points = envido_stake(&next, next.current_envido_level);
    next.add_score(winner, points);
    next.push_lore(format!(
        "Envido: {} gana con {} contra {} (+{})",
        winner.label(),
        next.envido_points(winner),
        next.envido_points(winner.opponent()),
        points
    ));

    next.current_envido_level = EnvidoLevel::None;
    next.last_call = None;
    next.waiting_for_response = false;
    next.current_phase = Phase::Truco;
    conclude_if_game_over(&mut next);
    next
}

/// "Estar Cantando": a side at 23 declares the winning point on its turn
pub fn call_estar_cantando(state: &GameState, side: Side) -> GameState {
    if !state.game_in_progress
        || state.score(side) != ESTAR_CANTANDO_SCORE
        || state.turn() != side
        || state.waiting_for_response
    {
        debug!(side = side.as_str(), "estar cantando ignored");
        return state.clone();
    }

    let mut next = state.clone();
    next.set_score(side, TARGET_SCORE);
    next.push_lore(format!("{} está cantando y llega a {}", side.label(), TARGET_SCORE));
    conclude_if_game_over(&mut next);
    next
}

/// "Me voy al mazo": forfeit the hand, the opponent scores 2
pub fn fold_hand(state: &GameState, side: Side) -> GameState {
    if !state.hand_active() {
        return state.clone();
    }

    let mut next = state.clone();
    let opponent = side.opponent();
    next.add_score(opponent, FOLD_POINTS);
    next.push_lore(format!(
        "{} se va al mazo. {} gana {} puntos",
        side.label(),
        opponent.label(),
        FOLD_POINTS
    ));
    next.last_call = None;
    next.waiting_for_response = false;
    next.truco_pending_offer = None;
    next.hand_over = true;
    next.hand_winner = Some(opponent);
    conclude_if_game_over(&mut next);
    next
}

/// Skip the current betting window when nobody wants to sing
pub fn advance_phase(state: &GameState) -> GameState {
    if !state.hand_active() || state.waiting_for_response || state.current_phase == Phase::Playing
    {
        return state.clone();
    }
    let mut next = state.clone();
    next.current_phase = next.current_phase.next();
    debug!(phase = next.current_phase.as_str(), "phase advanced");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AiPersonality, Card, Suit};
    use crate::domain::value_objects::Difficulty;

    /// Active hand in the given phase, player is Mano and on turn
    fn hand_in(phase: Phase) -> GameState {
        let mut state = GameState::new(Difficulty::Medium, AiPersonality::default());
        state.hand_over = false;
        state.hand_number = 1;
        state.current_phase = phase;
        state.vira = Some(Card::new(Suit::Bastos, 5));
        state.perico = Some(Card::new(Suit::Bastos, 4));
        state
    }

    #[test]
    fn test_truco_rejected_pays_one_and_resets() {
        let state = hand_in(Phase::Truco);
        let state = call_truco(&state, CallType::Truco, Side::Player);
        assert!(state.waiting_for_response);
        assert_eq!(state.truco_pending_offer, Some(Pot::Points(3)));

        let state = reject_call(&state, Side::Computer);
        assert_eq!(state.player_score, 1);
        assert_eq!(state.computer_score, 0);
        assert_eq!(state.current_truco_level, TrucoLevel::None);
        assert!(!state.waiting_for_response);
        assert!(state.last_call.is_none());
        assert!(state.hand_over);
        assert_eq!(state.hand_winner, Some(Side::Player));
    }

    #[test]
    fn test_truco_accept_locks_pot() {
        let state = hand_in(Phase::Truco);
        let state = call_truco(&state, CallType::Truco, Side::Player);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.current_truco_level, TrucoLevel::Truco);
        assert_eq!(state.truco_accepted_pot, Pot::Points(3));
        assert!(!state.waiting_for_response);
        assert_eq!(state.last_truco_caller, Some(Side::Player));
    }

    #[test]
    fn test_truco_must_climb_one_step() {
        let state = hand_in(Phase::Truco);
        let skipped = call_truco(&state, CallType::Retruco, Side::Player);
        assert!(!skipped.waiting_for_response);
        assert!(skipped.last_call.is_none());
    }

    #[test]
    fn test_truco_requires_turn() {
        let state = hand_in(Phase::Truco);
        let ignored = call_truco(&state, CallType::Truco, Side::Computer);
        assert!(!ignored.waiting_for_response);
    }

    #[test]
    fn test_truco_after_betting_windows_closed() {
        let state = advance_phase(&hand_in(Phase::Truco));
        assert_eq!(state.current_phase, Phase::Playing);
        assert!(state.is_player_turn);

        let state = call_truco(&state, CallType::Truco, Side::Player);
        assert!(state.waiting_for_response);
        assert_eq!(
            state.last_call,
            Some(PendingCall {
                call: CallType::Truco,
                caller: Side::Player
            })
        );
        assert_eq!(state.current_phase, Phase::Playing);
    }

    #[test]
    fn test_truco_mid_trick_with_opponent_card_down() {
        let mut state = hand_in(Phase::Playing);
        state.mano_is_player = false;
        state.computer_card = Some(Card::new(Suit::Oros, 6));
        state.set_turn(Side::Player);

        let state = call_truco(&state, CallType::Truco, Side::Player);
        assert!(state.waiting_for_response);
        assert_eq!(state.truco_pending_offer, Some(Pot::Points(3)));
        assert_eq!(state.responder(), Some(Side::Computer));
    }

    #[test]
    fn test_truco_blocked_once_both_cards_are_down() {
        let mut state = hand_in(Phase::Playing);
        state.player_card = Some(Card::new(Suit::Copas, 7));
        state.computer_card = Some(Card::new(Suit::Oros, 6));
        state.set_turn(Side::Player);

        assert!(!is_call_legal(&state, CallType::Truco, Side::Player));
        let ignored = call_truco(&state, CallType::Truco, Side::Player);
        assert!(!ignored.waiting_for_response);
        assert!(ignored.last_call.is_none());
    }

    #[test]
    fn test_falta_envido_is_terminal() {
        let state = hand_in(Phase::Envido);
        let state = call_envido(&state, CallType::Envido, Side::Player);
        let state = call_envido(&state, CallType::FaltaEnvido, Side::Computer);
        assert_eq!(state.current_envido_level, EnvidoLevel::FaltaEnvido);
        let again = call_envido(&state, CallType::FaltaEnvido, Side::Player);
        assert_eq!(again, state);
    }

    #[test]
    fn test_cannot_raise_own_accepted_truco() {
        let state = hand_in(Phase::Truco);
        let state = call_truco(&state, CallType::Truco, Side::Player);
        let state = accept_call(&state, Side::Computer);
        let again = call_truco(&state, CallType::Retruco, Side::Player);
        assert!(!again.waiting_for_response);

        let mut computer_turn = state.clone();
        computer_turn.set_turn(Side::Computer);
        let raised = call_truco(&computer_turn, CallType::Retruco, Side::Computer);
        assert!(raised.waiting_for_response);
        assert_eq!(raised.truco_pending_offer, Some(Pot::Points(6)));
    }

    #[test]
    fn test_responder_raise_accepts_pending_offer() {
        let state = hand_in(Phase::Truco);
        let state = call_truco(&state, CallType::Truco, Side::Player);
        let state = call_truco(&state, CallType::Retruco, Side::Computer);
        assert!(state.waiting_for_response);
        assert_eq!(state.current_truco_level, TrucoLevel::Truco);
        assert_eq!(state.truco_accepted_pot, Pot::Points(3));
        assert_eq!(state.responder(), Some(Side::Player));

        // Refusing the retruco pays the already accepted truco
        let state = reject_call(&state, Side::Player);
        assert_eq!(state.computer_score, 3);
        assert_eq!(state.player_score, 0);
    }

    #[test]
    fn test_raise_call_needs_pending_same_family() {
        let state = hand_in(Phase::Envido);
        let not_waiting = raise_call(&state, CallType::Truco, Side::Player);
        assert!(!not_waiting.waiting_for_response);

        let state = call_envido(&state, CallType::Envido, Side::Player);
        let wrong_family = raise_call(&state, CallType::Truco, Side::Computer);
        assert_eq!(wrong_family.last_call, state.last_call);

        let raised = raise_call(&state, CallType::RealEnvido, Side::Computer);
        assert_eq!(raised.current_envido_level, EnvidoLevel::RealEnvido);
    }

    #[test]
    fn test_rejecting_vale_juego_pays_nine() {
        let mut state = hand_in(Phase::Truco);
        state.current_truco_level = TrucoLevel::ValeNueve;
        state.truco_accepted_pot = Pot::Points(9);
        state.last_truco_caller = Some(Side::Computer);

        let state = call_truco(&state, CallType::ValeJuego, Side::Player);
        assert_eq!(state.truco_pending_offer, Some(Pot::Game));
        let state = reject_call(&state, Side::Computer);
        assert_eq!(state.player_score, 9);
    }

    #[test]
    fn test_vale_juego_accept_sets_game_pot() {
        let mut state = hand_in(Phase::Truco);
        state.current_truco_level = TrucoLevel::ValeNueve;
        state.truco_accepted_pot = Pot::Points(9);
        state.last_truco_caller = Some(Side::Computer);

        let state = call_truco(&state, CallType::ValeJuego, Side::Player);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.truco_accepted_pot, Pot::Game);
        assert_eq!(state.current_truco_level, TrucoLevel::ValeJuego);
        assert_eq!(state.current_phase, Phase::Playing);
    }

    #[test]
    fn test_truco_during_envido_closes_envido() {
        let state = hand_in(Phase::Envido);
        let state = call_truco(&state, CallType::Truco, Side::Player);
        assert_eq!(state.current_phase, Phase::Truco);
        let state = accept_call(&state, Side::Computer);
        let envido = call_envido(&state, CallType::Envido, Side::Player);
        assert!(!envido.waiting_for_response);
    }

    #[test]
    fn test_envido_accept_resolves_immediately() {
        let mut state = hand_in(Phase::Envido);
        state.player_envido_points = 33;
        state.computer_envido_points = 20;

        let state = call_envido(&state, CallType::Envido, Side::Player);
        assert_eq!(state.current_envido_level, EnvidoLevel::Envido);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.player_score, 2);
        assert_eq!(state.computer_score, 0);
        assert_eq!(state.current_phase, Phase::Truco);
        assert!(!state.waiting_for_response);
        assert!(state.last_lore().unwrap_or_default().contains("Jugador"));
    }

    #[test]
    fn test_envido_tie_goes_to_mano() {
        let mut state = hand_in(Phase::Envido);
        state.mano_is_player = false;
        state.player_envido_points = 27;
        state.computer_envido_points = 27;

        let state = call_envido(&state, CallType::Envido, Side::Player);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.computer_score, 2);
        assert_eq!(state.player_score, 0);
    }

    #[test]
    fn test_envido_rejected_pays_one() {
        let state = hand_in(Phase::Envido);
        let state = call_envido(&state, CallType::Envido, Side::Computer);
        let state = reject_call(&state, Side::Player);
        assert_eq!(state.computer_score, 1);
        assert_eq!(state.player_score, 0);
        assert_eq!(state.current_phase, Phase::Truco);
        assert_eq!(state.current_envido_level, EnvidoLevel::None);
        assert!(!state.hand_over);
    }

    #[test]
    fn test_real_envido_only_as_raise() {
        let state = hand_in(Phase::Envido);
        let direct = call_envido(&state, CallType::RealEnvido, Side::Player);
        assert!(!direct.waiting_for_response);
        let falta = call_envido(&state, CallType::FaltaEnvido, Side::Player);
        assert!(!falta.waiting_for_response);

        let mut state = call_envido(&state, CallType::Envido, Side::Player);
        state.player_envido_points = 31;
        state.computer_envido_points = 25;

        // Caller cannot raise its own call
        let own = call_envido(&state, CallType::RealEnvido, Side::Player);
        assert_eq!(own.current_envido_level, EnvidoLevel::Envido);

        let raised = call_envido(&state, CallType::RealEnvido, Side::Computer);
        assert_eq!(raised.current_envido_level, EnvidoLevel::RealEnvido);
        assert_eq!(raised.responder(), Some(Side::Player));

        let resolved = accept_call(&raised, Side::Player);
        assert_eq!(resolved.player_score, 4);
    }

    #[test]
    fn test_falta_envido_pays_what_leader_lacks() {
        let mut state = hand_in(Phase::Envido);
        state.player_score = 10;
        state.computer_score = 18;
        state.player_envido_points = 30;
        state.computer_envido_points = 21;

        let state = call_envido(&state, CallType::Envido, Side::Computer);
        let state = call_envido(&state, CallType::FaltaEnvido, Side::Player);
        assert_eq!(state.current_envido_level, EnvidoLevel::FaltaEnvido);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.player_score, 16);

        // Falta is never worth less than one point
        let mut near_end = hand_in(Phase::Envido);
        near_end.computer_score = 30;
        assert_eq!(envido_stake(&near_end, EnvidoLevel::FaltaEnvido), 1);
    }

    #[test]
    fn test_flor_without_answer_pays_three() {
        let mut state = hand_in(Phase::Flor);
        state.player_has_flor = true;

        let state = call_flor(&state, Side::Player);
        assert_eq!(state.player_score, 3);
        assert!(state.flor_called);
        assert_eq!(state.current_phase, Phase::Envido);

        // Only once per hand
        let mut again = state.clone();
        again.current_phase = Phase::Flor;
        let again = call_flor(&again, Side::Player);
        assert_eq!(again.player_score, 3);
    }

    #[test]
    fn test_flor_requires_flor_in_hand() {
        let state = hand_in(Phase::Flor);
        let ignored = call_flor(&state, Side::Player);
        assert!(!ignored.flor_called);
        assert_eq!(ignored.player_score, 0);
    }

    #[test]
    fn test_flor_against_flor() {
        let mut state = hand_in(Phase::Flor);
        state.player_has_flor = true;
        state.computer_has_flor = true;
        state.player_envido_points = 26;
        state.computer_envido_points = 32;

        let called = call_flor(&state, Side::Player);
        assert!(called.waiting_for_response);
        assert_eq!(called.responder(), Some(Side::Computer));

        let rejected = reject_call(&called, Side::Computer);
        assert_eq!(rejected.player_score, FLOR_POINTS);
        assert_eq!(rejected.current_phase, Phase::Envido);

        let accepted = accept_call(&called, Side::Computer);
        assert_eq!(accepted.computer_score, CONTRAFLOR_POINTS);
        assert_eq!(accepted.current_phase, Phase::Envido);
        assert!(!accepted.waiting_for_response);
    }

    #[test]
    fn test_waiting_blocks_other_actions() {
        let state = hand_in(Phase::Envido);
        let state = call_envido(&state, CallType::Envido, Side::Player);
        let truco = call_truco(&state, CallType::Truco, Side::Player);
        assert_eq!(truco.last_call, state.last_call);
        let advanced = advance_phase(&state);
        assert_eq!(advanced.current_phase, Phase::Envido);
        let own_accept = accept_call(&state, Side::Player);
        assert!(own_accept.waiting_for_response);
    }

    #[test]
    fn test_fold_pays_two() {
        let state = hand_in(Phase::Truco);
        let folded = fold_hand(&state, Side::Player);
        assert_eq!(folded.computer_score, 2);
        assert_eq!(folded.player_score, 0);
        assert!(folded.hand_over);
        assert_eq!(folded.hand_winner, Some(Side::Computer));

        // A finished hand cannot be folded again
        let twice = fold_hand(&folded, Side::Player);
        assert_eq!(twice.computer_score, 2);
    }

    #[test]
    fn test_estar_cantando() {
        let mut state = hand_in(Phase::Truco);
        state.player_score = 23;
        let state = call_estar_cantando(&state, Side::Player);
        assert_eq!(state.player_score, 24);
        assert!(!state.game_in_progress);
        assert_eq!(state.winner, Some(Side::Player));
    }

    #[test]
    fn test_estar_cantando_requires_exactly_23() {
        let mut state = hand_in(Phase::Truco);
        state.player_score = 22;
        let ignored = call_estar_cantando(&state, Side::Player);
        assert_eq!(ignored.player_score, 22);
        assert!(ignored.game_in_progress);

        state.player_score = 23;
        state.set_turn(Side::Computer);
        let not_turn = call_estar_cantando(&state, Side::Player);
        assert_eq!(not_turn.player_score, 23);
    }

    #[test]
    fn test_advance_phase_walks_forward() {
        let state = hand_in(Phase::Flor);
        let state = advance_phase(&state);
        assert_eq!(state.current_phase, Phase::Envido);
        let state = advance_phase(&state);
        assert_eq!(state.current_phase, Phase::Truco);
        let state = advance_phase(&state);
        assert_eq!(state.current_phase, Phase::Playing);
        let state = advance_phase(&state);
        assert_eq!(state.current_phase, Phase::Playing);
    }

    #[test]
    fn test_envido_payout_can_end_game() {
        let mut state = hand_in(Phase::Envido);
        state.computer_score = 23;
        state.computer_envido_points = 31;
        state.player_envido_points = 20;
        let state = call_envido(&state, CallType::Envido, Side::Player);
        let state = accept_call(&state, Side::Computer);
        assert_eq!(state.computer_score, 25);
        assert!(!state.game_in_progress);
        assert_eq!(state.winner, Some(Side::Computer));
    }
}
