//! Tunable battle constants.
//!
//! Defaults reproduce first-generation behaviour. A RON file may override any subset of
//! fields; omitted fields keep their defaults.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inclusive turn-count range rolled when a timed condition starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRange {
    pub min: u8,
    pub max: u8,
}

impl TurnRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Every timed condition lasts at least one turn.
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Percent chance a paralyzed combatant is fully paralyzed.
    pub full_paralysis_chance: u8,
    /// Percent chance a confused combatant hurts itself.
    pub confusion_self_hit_chance: u8,
    pub confusion_self_hit_power: u16,
    pub sleep_turns: TurnRange,
    pub confusion_turns: TurnRange,
    pub disable_turns: TurnRange,
    pub bide_turns: u8,
    /// Turns a thrashing move keeps going after the turn it was selected.
    pub thrash_turns: TurnRange,
    /// Turns a partial-trapping move keeps going after the turn it hit.
    pub trapping_turns: TurnRange,
    /// Substitute costs max HP divided by this.
    pub substitute_cost_divisor: u16,
    pub rest_sleep_turns: u8,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            full_paralysis_chance: 25,
            confusion_self_hit_chance: 50,
            confusion_self_hit_power: 40,
            sleep_turns: TurnRange::new(1, 7),
            confusion_turns: TurnRange::new(1, 4),
            disable_turns: TurnRange::new(1, 8),
            bide_turns: 2,
            thrash_turns: TurnRange::new(2, 3),
            trapping_turns: TurnRange::new(1, 4),
            substitute_cost_divisor: 4,
            rest_sleep_turns: 2,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig =
            ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("full_paralysis_chance", self.full_paralysis_chance),
            ("confusion_self_hit_chance", self.confusion_self_hit_chance),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidChance { field, value });
            }
        }

        self.sleep_turns.validate("sleep_turns")?;
        self.confusion_turns.validate("confusion_turns")?;
        self.disable_turns.validate("disable_turns")?;
        self.thrash_turns.validate("thrash_turns")?;
        self.trapping_turns.validate("trapping_turns")?;

        if self.bide_turns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bide_turns",
                value: 0,
            });
        }
        if self.substitute_cost_divisor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "substitute_cost_divisor",
                value: 0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = BattleConfig::from_ron_str("(full_paralysis_chance: 50, bide_turns: 3)").unwrap();
        assert_eq!(config.full_paralysis_chance, 50);
        assert_eq!(config.bide_turns, 3);
        assert_eq!(config.sleep_turns, TurnRange::new(1, 7));
        assert_eq!(config.substitute_cost_divisor, 4);
    }

    #[test]
    fn test_ron_with_default_values_is_default() {
        assert_eq!(
            BattleConfig::from_ron_str("(bide_turns: 2)").unwrap(),
            BattleConfig::default()
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = BattleConfig::from_ron_str("(sleep_turns: (min: 5, max: 2))").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                field: "sleep_turns",
                min: 5,
                max: 2
            }
        );

        let err = BattleConfig::from_ron_str("(confusion_self_hit_chance: 101)").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChance { value: 101, .. }));

        assert!(matches!(
            BattleConfig::from_ron_str("(bide_turns: \"two\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    #[case("thrash_turns")]
    #[case("trapping_turns")]
    #[case("sleep_turns")]
    #[case("disable_turns")]
    fn test_zero_turn_minimum_is_rejected(#[case] field: &'static str) {
        let source = format!("({}: (min: 0, max: 3))", field);
        assert_eq!(
            BattleConfig::from_ron_str(&source),
            Err(ConfigError::InvalidRange { field, min: 0, max: 3 })
        );
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = BattleConfig::load(Path::new("definitely/not/here.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
