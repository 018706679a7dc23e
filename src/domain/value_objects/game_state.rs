//! GameState - Snapshot of one Truco game between the player and the computer
//!
//! Every rule transition takes a `&GameState` and returns a new value, so the
//! type is `Clone` and cheap enough to copy on each action.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Difficulty;
use crate::domain::entities::{AiPersonality, Card};

/// Cards dealt to each side
pub const HAND_SIZE: usize = 3;
/// Tricks per hand
pub const MAX_ROUNDS: u8 = 3;
/// Tricks needed to take a hand
pub const TRICKS_TO_WIN: u8 = 2;
/// Lore entries kept
pub const LORE_CAPACITY: usize = 50;

pub type Hand = SmallVec<[Card; HAND_SIZE]>;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Computer => "computer",
        }
    }

    /// Name used in lore messages
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "Jugador",
            Side::Computer => "Computadora",
        }
    }
}

/// Betting phase of the current hand. Only moves forward until the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Flor,
    Envido,
    Truco,
    Playing,
}

impl Phase {
    pub fn next(&self) -> Phase {
        match self {
            Phase::Flor => Phase::Envido,
            Phase::Envido => Phase::Truco,
            Phase::Truco | Phase::Playing => Phase::Playing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Flor => "flor",
            Phase::Envido => "envido",
            Phase::Truco => "truco",
            Phase::Playing => "playing",
        }
    }
}

/// Value at stake in the truco ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pot {
    Points(u8),
    /// Vale Juego: the hand decides the whole game
    Game,
}

impl Default for Pot {
    fn default() -> Self {
        Pot::Points(1)
    }
}

impl Pot {
    /// Points paid out when the pot is settled without the game sentinel
    pub fn points(&self) -> Option<u8> {
        match self {
            Pot::Points(p) => Some(*p),
            Pot::Game => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrucoLevel {
    None,
    Truco,
    Retruco,
    ValeNueve,
    ValeJuego,
}

impl Default for TrucoLevel {
    fn default() -> Self {
        TrucoLevel::None
    }
}

impl TrucoLevel {
    pub fn next(&self) -> Option<TrucoLevel> {
        match self {
            TrucoLevel::None => Some(TrucoLevel::Truco),
            TrucoLevel::Truco => Some(TrucoLevel::Retruco),
            TrucoLevel::Retruco => Some(TrucoLevel::ValeNueve),
            TrucoLevel::ValeNueve => Some(TrucoLevel::ValeJuego),
            TrucoLevel::ValeJuego => None,
        }
    }

    /// Pot offered by a call reaching this level
    pub fn offer(&self) -> Pot {
        match self {
            TrucoLevel::None => Pot::Points(1),
            TrucoLevel::Truco => Pot::Points(3),
            TrucoLevel::Retruco => Pot::Points(6),
            TrucoLevel::ValeNueve => Pot::Points(9),
            TrucoLevel::ValeJuego => Pot::Game,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvidoLevel {
    None,
    Envido,
    RealEnvido,
    FaltaEnvido,
}

impl Default for EnvidoLevel {
    fn default() -> Self {
        EnvidoLevel::None
    }
}


/// Family a call belongs to; decides how accept and reject settle it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFamily {
    Flor,
    Envido,
    Truco,
}

/// Every call a side can sing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallType {
    Flor,
    Envido,
    RealEnvido,
    FaltaEnvido,
    Truco,
    Retruco,
    ValeNueve,
    ValeJuego,
}

impl CallType {
    pub fn family(&self) -> CallFamily {
        match self {
            CallType::Flor => CallFamily::Flor,
            CallType::Envido | CallType::RealEnvido | CallType::FaltaEnvido => CallFamily::Envido,
            CallType::Truco | CallType::Retruco | CallType::ValeNueve | CallType::ValeJuego => {
                CallFamily::Truco
            }
        }
    }

    /// Truco tier reached when this call is accepted
    pub fn truco_level(&self) -> Option<TrucoLevel> {
        match self {
            CallType::Truco => Some(TrucoLevel::Truco),
            CallType::Retruco => Some(TrucoLevel::Retruco),
            CallType::ValeNueve => Some(TrucoLevel::ValeNueve),
            CallType::ValeJuego => Some(TrucoLevel::ValeJuego),
            _ => None,
        }
    }

    pub fn envido_level(&self) -> Option<EnvidoLevel> {
        match self {
            CallType::Envido => Some(EnvidoLevel::Envido),
            CallType::RealEnvido => Some(EnvidoLevel::RealEnvido),
            CallType::FaltaEnvido => Some(EnvidoLevel::FaltaEnvido),
            _ => None,
        }
    }

    /// Truco call that raises the ladder to `level`
    pub fn for_truco_level(level: TrucoLevel) -> Option<CallType> {
        match level {
            TrucoLevel::None => None,
            TrucoLevel::Truco => Some(CallType::Truco),
            TrucoLevel::Retruco => Some(CallType::Retruco),
            TrucoLevel::ValeNueve => Some(CallType::ValeNueve),
            TrucoLevel::ValeJuego => Some(CallType::ValeJuego),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallType::Flor => "Flor",
            CallType::Envido => "Envido",
            CallType::RealEnvido => "+2 piedras",
            CallType::FaltaEnvido => "Falta Envido",
            CallType::Truco => "Truco",
            CallType::Retruco => "Retruco",
            CallType::ValeNueve => "Vale Nueve",
            CallType::ValeJuego => "Vale Juego",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "flor" => Some(CallType::Flor),
            "envido" => Some(CallType::Envido),
            "realEnvido" => Some(CallType::RealEnvido),
            "faltaEnvido" => Some(CallType::FaltaEnvido),
            "truco" => Some(CallType::Truco),
            "retruco" => Some(CallType::Retruco),
            "valeNueve" => Some(CallType::ValeNueve),
            "valeJuego" => Some(CallType::ValeJuego),
            _ => None,
        }
    }
}

/// Call waiting for an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCall {
    pub call: CallType,
    pub caller: Side,
}

/// Outcome of a single trick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundWinner {
    Player,
    Computer,
    Tie,
}

impl RoundWinner {
    pub fn side(&self) -> Option<Side> {
        match self {
            RoundWinner::Player => Some(Side::Player),
            RoundWinner::Computer => Some(Side::Computer),
            RoundWinner::Tie => None,
        }
    }
}

/// Tricks won this hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickTally {
    pub player: u8,
    pub computer: u8,
}

impl TrickTally {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Computer => self.computer,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Computer => self.computer += 1,
        }
    }

    /// Side holding strictly more tricks
    pub fn leader(&self) -> Option<Side> {
        match self.player.cmp(&self.computer) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Computer),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A finished trick, kept for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickRecord {
    pub round: u8,
    pub player_card: Card,
    pub computer_card: Card,
    pub winner: RoundWinner,
}

/// Full game snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_hand: Hand,
    pub computer_hand: Hand,

    // Trump pair for the current hand
    pub vira: Option<Card>,
    pub perico: Option<Card>,

    pub player_score: u8,
    pub computer_score: u8,

    /// Trick index, 1-based
    pub current_round: u8,
    pub player_card: Option<Card>,
    pub computer_card: Option<Card>,
    pub rounds_won: TrickTally,
    pub trick_history: Vec<TrickRecord>,

    // Betting
    pub current_phase: Phase,
    pub current_truco_level: TrucoLevel,
    pub current_envido_level: EnvidoLevel,
    pub last_call: Option<PendingCall>,
    pub waiting_for_response: bool,
    pub truco_pending_offer: Option<Pot>,
    pub truco_accepted_pot: Pot,
    /// Side whose call set the accepted truco level; it cannot raise its own bet
    pub last_truco_caller: Option<Side>,

    pub player_envido_points: u8,
    pub computer_envido_points: u8,
    pub player_has_flor: bool,
    pub computer_has_flor: bool,
    pub flor_called: bool,

    pub mano_is_player: bool,
    pub is_player_turn: bool,
    pub hand_number: u32,
    pub hand_over: bool,
    pub hand_winner: Option<Side>,
    pub game_in_progress: bool,
    pub winner: Option<Side>,
    pub is_processing_action: bool,

    pub difficulty: Difficulty,
    pub ai_personality: AiPersonality,
    pub avatar: Option<String>,
    pub sound_effects_enabled: bool,

    pub lore: VecDeque<String>,
}

impl GameState {
    /// Empty table: no hand dealt yet
    pub fn new(difficulty: Difficulty, ai_personality: AiPersonality) -> Self {
        GameState {
            player_hand: SmallVec::new(),
            computer_hand: SmallVec::new(),
            vira: None,
            perico: None,
            player_score: 0,
            computer_score: 0,
            current_round: 1,
            player_card: None,
            computer_card: None,
            rounds_won: TrickTally::default(),
            trick_history: Vec::with_capacity(MAX_ROUNDS as usize),
            current_phase: Phase::Flor,
            current_truco_level: TrucoLevel::None,
            current_envido_level: EnvidoLevel::None,
            last_call: None,
            waiting_for_response: false,
            truco_pending_offer: None,
            truco_accepted_pot: Pot::default(),
            last_truco_caller: None,
            player_envido_points: 0,
            computer_envido_points: 0,
            player_has_flor: false,
            computer_has_flor: false,
            flor_called: false,
            mano_is_player: true,
            is_player_turn: true,
            hand_number: 0,
            hand_over: true,
            hand_winner: None,
            game_in_progress: true,
            winner: None,
            is_processing_action: false,
            difficulty,
            ai_personality,
            avatar: None,
            sound_effects_enabled: false,
            lore: VecDeque::with_capacity(LORE_CAPACITY),
        }
    }

    #[inline]
    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player_score,
            Side::Computer => self.computer_score,
        }
    }

    #[inline]
    pub fn set_score(&mut self, side: Side, score: u8) {
        match side {
            Side::Player => self.player_score = score,
            Side::Computer => self.computer_score = score,
        }
    }

    #[inline]
    pub fn add_score(&mut self, side: Side, points: u8) {
        let score = self.score(side).saturating_add(points);
        self.set_score(side, score);
    }

    #[inline]
    pub fn hand(&self, side: Side) -> &Hand {
        match side {
            Side::Player => &self.player_hand,
            Side::Computer => &self.computer_hand,
        }
    }

    #[inline]
    pub fn hand_mut(&mut self, side: Side) -> &mut Hand {
        match side {
            Side::Player => &mut self.player_hand,
            Side::Computer => &mut self.computer_hand,
        }
    }

    #[inline]
    pub fn played_card(&self, side: Side) -> Option<Card> {
        match side {
            Side::Player => self.player_card,
            Side::Computer => self.computer_card,
        }
    }

    #[inline]
    pub fn set_played_card(&mut self, side: Side, card: Option<Card>) {
        match side {
            Side::Player => self.player_card = card,
            Side::Computer => self.computer_card = card,
        }
    }

    #[inline]
    pub fn envido_points(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player_envido_points,
            Side::Computer => self.computer_envido_points,
        }
    }

    #[inline]
    pub fn has_flor(&self, side: Side) -> bool {
        match side {
            Side::Player => self.player_has_flor,
            Side::Computer => self.computer_has_flor,
        }
    }

    /// Side acting first this hand
    #[inline]
    pub fn mano(&self) -> Side {
        if self.mano_is_player {
            Side::Player
        } else {
            Side::Computer
        }
    }

    /// Side whose turn it is to play a card
    #[inline]
    pub fn turn(&self) -> Side {
        if self.is_player_turn {
            Side::Player
        } else {
            Side::Computer
        }
    }

    #[inline]
    pub fn set_turn(&mut self, side: Side) {
        self.is_player_turn = side == Side::Player;
    }

    /// Side expected to answer the pending call
    pub fn responder(&self) -> Option<Side> {
        if !self.waiting_for_response {
            return None;
        }
        self.last_call.map(|c| c.caller.opponent())
    }

    /// True while a hand is being played and the game is not decided
    pub fn hand_active(&self) -> bool {
        self.game_in_progress && !self.hand_over
    }

    /// Append a lore line, dropping the oldest beyond capacity
    pub fn push_lore(&mut self, message: impl Into<String>) {
        if self.lore.len() == LORE_CAPACITY {
            self.lore.pop_front();
        }
        self.lore.push_back(message.into());
    }

    pub fn last_lore(&self) -> Option<&str> {
        self.lore.back().map(String::as_str)
    }
}
