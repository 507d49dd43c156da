use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Type effectiveness multiplier for an attacking type against one defending type,
    /// using the first-generation chart (Ghost cannot touch Psychic, Bug and Poison
    /// are mutually super effective, Ice is neutral against Fire).
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f32 {
        use PokemonType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Ghost) => 0.0,
            (Normal, Rock) => 0.5,
            (Normal, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, _) => 1.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Ice
            (Ice, Water) | (Ice, Ice) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
            (Ice, _) => 1.0,

            // Fighting
            (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => 0.5,
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) => 2.0,
            (Fighting, _) => 1.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Grass) | (Poison, Bug) => 2.0,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Grass) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock) => 2.0,
            (Ground, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) => 0.5,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
            (Flying, _) => 1.0,

            // Psychic
            (Psychic, Psychic) => 0.5,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, _) => 1.0,

            // Bug
            (Bug, Fire) | (Bug, Fighting) | (Bug, Flying) | (Bug, Ghost) => 0.5,
            (Bug, Grass) | (Bug, Psychic) | (Bug, Poison) => 2.0,
            (Bug, _) => 1.0,

            // Rock
            (Rock, Fighting) | (Rock, Ground) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
            (Rock, _) => 1.0,

            // Ghost
            (Ghost, Normal) | (Ghost, Psychic) => 0.0,
            (Ghost, Ghost) => 2.0,
            (Ghost, _) => 1.0,

            // Dragon
            (Dragon, Dragon) => 2.0,
            (Dragon, _) => 1.0,
        }
    }

    /// Moves of these types use Special on both sides of the damage formula.
    pub fn is_special(self) -> bool {
        use PokemonType::*;
        matches!(self, Fire | Water | Grass | Electric | Psychic | Ice | Dragon)
    }
}

/// A creature's one or two types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Typing {
    pub primary: PokemonType,
    pub secondary: Option<PokemonType>,
}

impl Typing {
    pub fn single(primary: PokemonType) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn dual(primary: PokemonType, secondary: PokemonType) -> Self {
        if primary == secondary {
            return Self::single(primary);
        }
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.primary == pokemon_type || self.secondary == Some(pokemon_type)
    }

    /// Combined multiplier of an attacking type against both defending types.
    pub fn effectiveness_against(&self, attacking: PokemonType) -> f32 {
        let primary = PokemonType::type_effectiveness(attacking, self.primary);
        match self.secondary {
            Some(secondary) => primary * PokemonType::type_effectiveness(attacking, secondary),
            None => primary,
        }
    }

    pub fn is_immune_to(&self, attacking: PokemonType) -> bool {
        self.effectiveness_against(attacking) == 0.0
    }
}

impl fmt::Display for Typing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{}/{}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_generation_chart_quirks() {
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Ghost, PokemonType::Psychic), 0.0);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Bug, PokemonType::Poison), 2.0);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Poison, PokemonType::Bug), 2.0);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Ice, PokemonType::Fire), 1.0);
    }

    #[test]
    fn test_dual_typing_multiplies() {
        let typing = Typing::dual(PokemonType::Rock, PokemonType::Ground);
        assert_eq!(typing.effectiveness_against(PokemonType::Water), 4.0);
        assert_eq!(typing.effectiveness_against(PokemonType::Electric), 0.0);
        assert!(typing.is_immune_to(PokemonType::Electric));
        assert_eq!(Typing::dual(PokemonType::Fire, PokemonType::Fire), Typing::single(PokemonType::Fire));
    }
}
