//! Spanish 40-card deck used by Truco.
//!
//! Cards are plain `Copy` values. The deck never changes, only its order.

use serde::{Deserialize, Serialize};

/// Nominal values present in a Spanish deck without 8s and 9s
pub const CARD_VALUES: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 10, 11, 12];

/// Number of cards in the reference deck
pub const DECK_SIZE: usize = 40;

/// Highest base power (Espada 1)
pub const MAX_BASE_POWER: u8 = 14;

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Espadas,
    Bastos,
    Oros,
    Copas,
}

impl Suit {
    pub fn all() -> [Suit; 4] {
        [Suit::Espadas, Suit::Bastos, Suit::Oros, Suit::Copas]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Espadas => "espadas",
            Suit::Bastos => "bastos",
            Suit::Oros => "oros",
            Suit::Copas => "copas",
        }
    }
}

/// A single card: suit plus nominal value (1-7, 10=Sota, 11=Caballo, 12=Rey)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub suit: Suit,
    pub value: u8,
}

impl Card {
    pub const fn new(suit: Suit, value: u8) -> Self {
        Self { suit, value }
    }

    pub fn is_figure(&self) -> bool {
        self.value >= 10
    }

    /// Value counted for Envido: face value, figures count 0
    pub fn envido_value(&self) -> u8 {
        if self.is_figure() {
            0
        } else {
            self.value
        }
    }

    /// Trick rank ignoring the vira.
    ///
    /// Espada 1 > Basto 1 > Espada 7 > Oro 7 > 3s > 2s > Copa/Oro 1 > 12 > 11 > 10 > 7 > 6 > 5 > 4
    pub fn base_power(&self) -> u8 {
        match (self.suit, self.value) {
            (Suit::Espadas, 1) => 14,
            (Suit::Bastos, 1) => 13,
            (Suit::Espadas, 7) => 12,
            (Suit::Oros, 7) => 11,
            (_, 3) => 10,
            (_, 2) => 9,
            (_, 1) => 8,
            (_, 12) => 7,
            (_, 11) => 6,
            (_, 10) => 5,
            (_, 7) => 4,
            (_, 6) => 3,
            (_, 5) => 2,
            (_, 4) => 1,
            _ => 0,
        }
    }

    /// Human readable name, e.g. "7 de espadas" or "Rey de copas"
    pub fn name(&self) -> String {
        let value = match self.value {
            1 => "As".to_string(),
            10 => "Sota".to_string(),
            11 => "Caballo".to_string(),
            12 => "Rey".to_string(),
            v => v.to_string(),
        };
        format!("{} de {}", value, self.suit.as_str())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// The 40-card reference deck in suit-major order
pub fn reference_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::all() {
        for value in CARD_VALUES {
            cards.push(Card::new(suit, value));
        }
    }
    cards
}
