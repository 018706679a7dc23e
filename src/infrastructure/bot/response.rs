//! Betting decisions for the computer: answering calls and singing its own

use rand::{Rng, RngCore};
use tracing::debug;

use super::hand_analyzer::{envido_strength, hand_strength, truco_strength};
use crate::domain::entities::AiPersonality;
use crate::domain::services::is_call_legal;
use crate::domain::value_objects::{CallFamily, CallType, EnvidoLevel, GameState, Phase, Side};

/// Bounds applied to the acceptance probability
pub const MIN_ACCEPTANCE: f64 = 0.1;
pub const MAX_ACCEPTANCE: f64 = 0.9;

/// Hand strength (0..=100) from which the computer raises instead of accepting
const RAISE_STRENGTH: f64 = 75.0;

/// Answer to a call aimed at the computer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiReply {
    Accept,
    Reject,
    Raise(CallType),
}

/// Probability that the computer answers "quiero" to whatever it was sung.
/// The same card-power measure applies to every call family.
pub fn acceptance_probability(state: &GameState) -> f64 {
    let p: &AiPersonality = &state.ai_personality;
    let trait_delta = |value: u8| value as f64 - 5.0;

    let mut probability = state.difficulty.base_acceptance()
        + 0.04 * trait_delta(p.agresividad)
        - 0.02 * trait_delta(p.intimidacion)
        + 0.03 * trait_delta(p.calculo);

    match state.computer_score.cmp(&state.player_score) {
        std::cmp::Ordering::Less => probability += 0.1,
        std::cmp::Ordering::Greater => probability -= 0.1,
        std::cmp::Ordering::Equal => {}
    }

    probability += (truco_strength(state, Side::Computer) - 50.0) / 100.0;

    if state.current_round > 1 {
        probability += 0.01 * p.adaptabilidad as f64;
    }

    probability.clamp(MIN_ACCEPTANCE, MAX_ACCEPTANCE)
}

/// Accept (true) or reject (false) `call`
pub fn get_ai_response(call: CallType, state: &GameState, rng: &mut dyn RngCore) -> bool {
    let probability = acceptance_probability(state);
    let accepted = rng.gen::<f64>() < probability;
    debug!(call = ?call, probability, accepted, "computer answers call");
    accepted
}

/// Next call of the same family the computer could answer with
fn raise_option(call: CallType, state: &GameState) -> Option<CallType> {
    let raise = match call.family() {
        CallFamily::Flor => None,
        CallFamily::Envido => match state.current_envido_level {
            EnvidoLevel::Envido => Some(CallType::RealEnvido),
            EnvidoLevel::RealEnvido => Some(CallType::FaltaEnvido),
            _ => None,
        },
        CallFamily::Truco => call
            .truco_level()
            .and_then(|level| level.next())
            .and_then(CallType::for_truco_level),
    }?;
    is_call_legal(state, raise, Side::Computer).then_some(raise)
}

/// Accept, reject or raise the call the player is waiting on
pub fn decide_ai_reply(call: CallType, state: &GameState, rng: &mut dyn RngCore) -> AiReply {
    if let Some(raise) = raise_option(call, state) {
        let strength = hand_strength(state, Side::Computer, call);
        let aggression = state.ai_personality.agresividad as f64 / 10.0;
        if strength >= RAISE_STRENGTH && rng.gen_bool(aggression) {
            debug!(call = ?call, raise = ?raise, strength, "computer raises");
            return AiReply::Raise(raise);
        }
    }

    if get_ai_response(call, state, rng) {
        AiReply::Accept
    } else {
        AiReply::Reject
    }
}

/// Call the computer wants to sing now, if any
pub fn decide_ai_call(state: &GameState, rng: &mut dyn RngCore) -> Option<CallType> {
    if !state.hand_active() || state.waiting_for_response {
        return None;
    }
    let p = &state.ai_personality;

    match state.current_phase {
        Phase::Flor => is_call_legal(state, CallType::Flor, Side::Computer).then_some(CallType::Flor),
        Phase::Envido => {
            if !is_call_legal(state, CallType::Envido, Side::Computer) {
                return None;
            }
            // 27 points for a balanced personality, lower for aggressive ones
            let threshold = 27.0 - (p.agresividad as f64 - 5.0) * 0.5;
            let points = state.computer_envido_points as f64;
            let bluff = p.intimidacion as f64 / 10.0 * 0.15;
            (points >= threshold || rng.gen_bool(bluff)).then_some(CallType::Envido)
        }
        Phase::Truco | Phase::Playing => {
            let call = state
                .current_truco_level
                .next()
                .and_then(CallType::for_truco_level)?;
            if !is_call_legal(state, call, Side::Computer) {
                return None;
            }
            let threshold = 70.0 - (p.agresividad as f64 - 5.0) * 3.0;
            let strength = truco_strength(state, Side::Computer);
            let bluff = p.intimidacion as f64 / 10.0 * 0.1;
            let sing = strength >= threshold || rng.gen_bool(bluff);
            if sing {
                debug!(call = ?call, strength, envido = envido_strength(state, Side::Computer), "computer sings");
            }
            sing.then_some(call)
        }
    }
}
