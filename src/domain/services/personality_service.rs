//! Personality service - builds the computer's hidden trait vector

use rand::Rng;

use crate::domain::entities::{clamp_trait, AiPersonality, OpponentProfile, TRAIT_MAX};

/// Label used for randomly rolled personalities
pub const RANDOM_ARCHETYPE: &str = "Personalizado";

/// Named archetypes: (name, agresividad, intimidacion, calculo, adaptabilidad)
const ARCHETYPES: [(&str, u8, u8, u8, u8); 4] = [
    ("Agresivo", 9, 7, 4, 5),
    ("Calculador", 4, 3, 9, 7),
    ("Farolero", 6, 9, 5, 4),
    ("Equilibrado", 5, 5, 5, 5),
];

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(-1..=1)
}

/// Roll every trait in 0..=10 and shift them all by one shared jitter
pub fn generate_random_personality<R: Rng + ?Sized>(rng: &mut R) -> AiPersonality {
    let mut roll = || rng.gen_range(0..=TRAIT_MAX as i32);
    let raw = [roll(), roll(), roll(), roll()];
    let shift = jitter(rng);

    AiPersonality {
        agresividad: clamp_trait(raw[0] + shift),
        intimidacion: clamp_trait(raw[1] + shift),
        calculo: clamp_trait(raw[2] + shift),
        adaptabilidad: clamp_trait(raw[3] + shift),
        archetype: RANDOM_ARCHETYPE.to_string(),
    }
}

/// Fixed archetype with a -1..=1 wobble per trait. Unknown names roll at random.
pub fn generate_personality_from_archetype<R: Rng + ?Sized>(
    name: &str,
    rng: &mut R,
) -> AiPersonality {
    let Some(&(label, agr, int, calc, adapt)) = ARCHETYPES
        .iter()
        .find(|a| a.0.eq_ignore_ascii_case(name))
    else {
        return generate_random_personality(rng);
    };

    AiPersonality {
        agresividad: clamp_trait(agr as i32 + jitter(rng)),
        intimidacion: clamp_trait(int as i32 + jitter(rng)),
        calculo: clamp_trait(calc as i32 + jitter(rng)),
        adaptabilidad: clamp_trait(adapt as i32 + jitter(rng)),
        archetype: label.to_string(),
    }
}

/// Map an opponent profile onto the engine traits.
///
/// Risk appetite is inverted into calculation (`calculo = 11 - riesgo`), bluffing
/// becomes intimidation and consistency becomes adaptability.
pub fn convert_opponent_to_personality(opponent: &OpponentProfile) -> AiPersonality {
    let agresividad = clamp_trait(opponent.agresividad as i32);
    let intimidacion = clamp_trait(opponent.blufeo as i32);
    let calculo = clamp_trait(11 - opponent.riesgo as i32);
    let adaptabilidad = clamp_trait(opponent.consistencia as i32);

    let archetype = opponent_label(agresividad, intimidacion, calculo, adaptabilidad);
    AiPersonality {
        agresividad,
        intimidacion,
        calculo,
        adaptabilidad,
        archetype: archetype.to_string(),
    }
}

fn opponent_label(agr: u8, int: u8, calc: u8, adapt: u8) -> &'static str {
    if agr >= 8 && int >= 7 {
        "Agresivo Intimidante"
    } else if agr >= 7 {
        "Agresivo"
    } else if calc >= 8 {
        "Calculador"
    } else if int >= 8 {
        "Farolero"
    } else if adapt >= 8 {
        "Adaptable"
    } else {
        "Equilibrado"
    }
}
