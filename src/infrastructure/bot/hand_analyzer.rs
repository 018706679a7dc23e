//! Hand analyzer - read-only measurements of the computer's cards

use crate::domain::entities::Card;
use crate::domain::services::{get_card_truco_rank, MAX_ENVIDO, MIN_ENVIDO, PERICO_RANK};
use crate::domain::value_objects::{CallFamily, CallType, GameState, Side};

/// Trick rank of each card in `side`'s hand, in hand order
pub fn hand_ranks(state: &GameState, side: Side) -> Vec<u8> {
    match state.vira {
        Some(vira) => state
            .hand(side)
            .iter()
            .map(|c| get_card_truco_rank(c, &vira))
            .collect(),
        None => state.hand(side).iter().map(Card::base_power).collect(),
    }
}

/// Total trick power over the best possible power, 0..=100.
///
/// The ceiling is the perico rank for every card held. A real hand never gets
/// there since the vira is not dealt to anyone (three cards top out at 43 of 48),
/// so 100 is an upper bound rather than a reachable value.
pub fn truco_strength(state: &GameState, side: Side) -> f64 {
    let ranks = hand_ranks(state, side);
    if ranks.is_empty() {
        return 0.0;
    }
    let total: u32 = ranks.iter().map(|&r| r as u32).sum();
    let max = PERICO_RANK as u32 * ranks.len() as u32;
    total as f64 / max as f64 * 100.0
}

/// Envido points scaled onto 0..=100
pub fn envido_strength(state: &GameState, side: Side) -> f64 {
    let points = state.envido_points(side).clamp(MIN_ENVIDO, MAX_ENVIDO);
    (points - MIN_ENVIDO) as f64 / (MAX_ENVIDO - MIN_ENVIDO) as f64 * 100.0
}

/// Strength relevant to `call`: envido points for Flor/Envido, trick power otherwise.
/// Drives raises; acceptance always uses `truco_strength`.
pub fn hand_strength(state: &GameState, side: Side, call: CallType) -> f64 {
    match call.family() {
        CallFamily::Flor | CallFamily::Envido => envido_strength(state, side),
        CallFamily::Truco => truco_strength(state, side),
    }
}

/// Hand indices ordered from weakest to strongest
pub fn indices_by_rank(state: &GameState, side: Side) -> Vec<usize> {
    let ranks = hand_ranks(state, side);
    let mut indices: Vec<usize> = (0..ranks.len()).collect();
    indices.sort_by_key(|&i| ranks[i]);
    indices
}

/// Cards strictly above `target`, weakest first
pub fn winning_indices(state: &GameState, side: Side, target: &Card) -> Vec<usize> {
    let Some(vira) = state.vira else {
        return Vec::new();
    };
    let target_rank = get_card_truco_rank(target, &vira);
    let ranks = hand_ranks(state, side);
    indices_by_rank(state, side)
        .into_iter()
        .filter(|&i| ranks[i] > target_rank)
        .collect()
}

/// Cards of exactly the same rank as `target`
pub fn tying_indices(state: &GameState, side: Side, target: &Card) -> Vec<usize> {
    let Some(vira) = state.vira else {
        return Vec::new();
    };
    let target_rank = get_card_truco_rank(target, &vira);
    let ranks = hand_ranks(state, side);
    (0..ranks.len()).filter(|&i| ranks[i] == target_rank).collect()
}

/// Middle element of a weakest-first list
pub fn middle(sorted: &[usize]) -> Option<usize> {
    if sorted.is_empty() {
        None
    } else {
        Some(sorted[(sorted.len() - 1) / 2])
    }
}
