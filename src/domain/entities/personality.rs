use serde::{Deserialize, Serialize};

/// Lowest value any trait may take
pub const TRAIT_MIN: u8 = 1;
/// Highest value any trait may take
pub const TRAIT_MAX: u8 = 10;

/// Hidden trait vector driving the computer opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPersonality {
    /// Willingness to press and to accept bets
    pub agresividad: u8,
    /// Bluffing tendency
    pub intimidacion: u8,
    /// Patience and calculation
    pub calculo: u8,
    /// How much the play shifts as the hand progresses
    pub adaptabilidad: u8,
    /// Descriptive archetype label
    pub archetype: String,
}

impl AiPersonality {
    pub fn new(
        agresividad: u8,
        intimidacion: u8,
        calculo: u8,
        adaptabilidad: u8,
        archetype: impl Into<String>,
    ) -> Self {
        Self {
            agresividad: clamp_trait(agresividad as i32),
            intimidacion: clamp_trait(intimidacion as i32),
            calculo: clamp_trait(calculo as i32),
            adaptabilidad: clamp_trait(adaptabilidad as i32),
            archetype: archetype.into(),
        }
    }
}

impl Default for AiPersonality {
    fn default() -> Self {
        Self::new(5, 5, 5, 5, "Equilibrado")
    }
}

/// Clamp a raw trait value into 1..=10
pub fn clamp_trait(value: i32) -> u8 {
    value.clamp(TRAIT_MIN as i32, TRAIT_MAX as i32) as u8
}

/// Profile of a named opponent supplied by the UI (tournament rival, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub agresividad: u8,
    pub riesgo: u8,
    pub blufeo: u8,
    pub consistencia: u8,
    /// "easy", "intermediate", "medium", "hard" or "master"
    #[serde(default)]
    pub difficulty: Option<String>,
}
