//! Deck service - shuffling, Envido/Flor scoring and the Vira/Perico trump rule
//!
//! All functions are pure. The vira is revealed at deal time and the perico is
//! derived from it; both stay fixed for the three tricks of a hand.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::{reference_deck, Card, Suit, CARD_VALUES, MAX_BASE_POWER};

/// Trick rank of the perico, above every other card
pub const PERICO_RANK: u8 = MAX_BASE_POWER + 2;
/// Trick rank of the vira itself
pub const VIRA_RANK: u8 = MAX_BASE_POWER + 1;

/// Envido base added when two cards share a suit
pub const ENVIDO_BASE: u8 = 20;
pub const MIN_ENVIDO: u8 = 20;
pub const MAX_ENVIDO: u8 = 33;

/// Return the 40-card deck in uniform random order
pub fn shuffle_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = reference_deck();
    deck.shuffle(rng);
    deck
}

/// Perico for a given vira: same suit, next lower nominal value, wrapping to the
/// highest value of the suit when the vira is the lowest.
pub fn get_perico_card(vira: &Card) -> Card {
    let value = CARD_VALUES
        .iter()
        .copied()
        .filter(|&v| v < vira.value)
        .max()
        .or_else(|| CARD_VALUES.iter().copied().max())
        .unwrap_or(vira.value);
    Card::new(vira.suit, value)
}

#[inline]
pub fn is_perico(card: &Card, vira: &Card) -> bool {
    *card == get_perico_card(vira)
}

/// Whether `card` counts as belonging to `suit` under the trump rule.
/// The perico is wild and joins any suit.
pub fn matches_suit(card: &Card, suit: Suit, vira: &Card) -> bool {
    card.suit == suit || is_perico(card, vira)
}

/// Effective trick rank for the hand played under `vira`
pub fn get_card_truco_rank(card: &Card, vira: &Card) -> u8 {
    if is_perico(card, vira) {
        PERICO_RANK
    } else if card == vira {
        VIRA_RANK
    } else {
        card.base_power()
    }
}

/// Compare two cards for a trick. `Equal` means parda.
pub fn compare_cards(a: &Card, b: &Card, vira: &Card) -> Ordering {
    get_card_truco_rank(a, vira).cmp(&get_card_truco_rank(b, vira))
}

/// Envido points for a hand: 20 plus the two best envido values in one suit,
/// or 20 plus the best single value when no suit pairs up. Result in 20..=33.
pub fn calculate_envido_points(hand: &[Card], vira: &Card) -> u8 {
    let mut best: Option<u8> = None;

    for suit in Suit::all() {
        let mut values: Vec<u8> = hand
            .iter()
            .filter(|c| matches_suit(c, suit, vira))
            .map(|c| c.envido_value())
            .collect();
        if values.len() < 2 {
            continue;
        }
        values.sort_unstable_by(|a, b| b.cmp(a));
        let points = ENVIDO_BASE + values[0] + values[1];
        best = Some(best.map_or(points, |b| b.max(points)));
    }

    let points = best.unwrap_or_else(|| {
        ENVIDO_BASE + hand.iter().map(Card::envido_value).max().unwrap_or(0)
    });

    points.clamp(MIN_ENVIDO, MAX_ENVIDO)
}

/// Flor: all three cards resolve to one effective suit
pub fn has_flor(hand: &[Card], vira: &Card) -> bool {
    if hand.len() != 3 {
        return false;
    }
    Suit::all()
        .into_iter()
        .any(|suit| hand.iter().all(|c| matches_suit(c, suit, vira)))
}
