// In: src/battle/calculators.rs

use crate::battle::combatant::Combatant;
use crate::battle::rng::TurnRng;
use schema::PokemonType;

/// Damage is capped here before the +2 of the first-generation formula.
const DAMAGE_CAP: u32 = 997;
/// Stats above this are quartered (both attack and defense) before the formula runs.
const STAT_SCALING_THRESHOLD: u32 = 255;
/// Critical-hit thresholds are out of 256.
const CRITICAL_HIT_CEILING: u16 = 255;

/// Multipliers applied after the base formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageModifier {
    /// Same-type attack bonus (x1.5).
    pub stab: bool,
    pub effectiveness: f32,
}

impl DamageModifier {
    pub const NEUTRAL: DamageModifier = DamageModifier {
        stab: false,
        effectiveness: 1.0,
    };
}

/// The first-generation damage formula, before the random factor.
pub fn damage_formula(
    level: u16,
    attack: u16,
    defense: u16,
    power: u16,
    modifier: DamageModifier,
) -> u16 {
    let mut attack = u32::from(attack);
    let mut defense = u32::from(defense);
    if attack > STAT_SCALING_THRESHOLD || defense > STAT_SCALING_THRESHOLD {
        attack /= 4;
        defense /= 4;
    }
    let defense = defense.max(1);

    let level_factor = 2 * u32::from(level) / 5 + 2;
    let base = level_factor * attack * u32::from(power) / defense / 50;
    let mut damage = base.min(DAMAGE_CAP) + 2;

    if modifier.stab {
        damage = damage * 3 / 2;
    }
    let damage = (damage as f32 * modifier.effectiveness).floor() as u32;
    damage.min(u32::from(u16::MAX)) as u16
}

/// Scale damage by a roll in 217..=255, out of 255. Damage of 1 or less is left alone.
pub fn apply_random_factor(damage: u16, rng: &mut TurnRng) -> u16 {
    if damage <= 1 {
        return damage;
    }
    let roll = u32::from(rng.next_in_range("Damage Variance", 217, 255));
    (u32::from(damage) * roll / 255) as u16
}

/// Roll accuracy for a move. `None` accuracy never misses. A defender that is underground
/// or in the air is always missed without a roll.
pub fn move_hits(
    accuracy: Option<u8>,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut TurnRng,
) -> bool {
    if defender.is_semi_invulnerable() {
        return false;
    }
    let Some(accuracy) = accuracy else {
        return true;
    };
    let multiplier = attacker
        .accuracy_multiplier()
        .then(defender.evasion_multiplier());
    let threshold = multiplier.apply(u32::from(accuracy)).clamp(1, 100) as u8;
    rng.chance("Accuracy Check", threshold)
}

/// Critical-hit threshold out of 256, from the creature's base speed.
pub fn critical_hit_threshold(attacker: &Combatant, high_critical: bool) -> u16 {
    let mut threshold = u16::from(attacker.base_speed()) / 2;
    if high_critical {
        threshold = threshold.saturating_mul(8);
    }
    if attacker.has_focus_energy() {
        threshold = threshold.saturating_mul(4);
    }
    threshold.min(CRITICAL_HIT_CEILING)
}

pub fn is_critical_hit(attacker: &Combatant, high_critical: bool, rng: &mut TurnRng) -> bool {
    let percent = critical_hit_threshold(attacker, high_critical) * 100 / 256;
    u16::from(rng.next_outcome("Critical Hit Check")) <= percent
}

/// Damage for a regular attack, including the random factor.
///
/// A critical hit ignores stat stages, burn and screens and doubles the attacker's level.
pub fn attack_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_type: PokemonType,
    power: u8,
    critical: bool,
    effectiveness: f32,
    rng: &mut TurnRng,
) -> u16 {
    let special = move_type.is_special();
    let (attack, defense) = if critical {
        let attacker_stats = attacker.unmodified_stats();
        let defender_stats = defender.unmodified_stats();
        if special {
            (attacker_stats.special, defender_stats.special)
        } else {
            (attacker_stats.attack, defender_stats.defense)
        }
    } else if special {
        let mut defense = defender.special();
        if defender.has_light_screen() {
            defense = defense.saturating_mul(2);
        }
        (attacker.special(), defense)
    } else {
        let mut defense = defender.defense();
        if defender.has_reflect() {
            defense = defense.saturating_mul(2);
        }
        (attacker.attack(), defense)
    };

    let level = u16::from(attacker.level()) * if critical { 2 } else { 1 };
    let modifier = DamageModifier {
        stab: attacker.typing().has_type(move_type),
        effectiveness,
    };
    let damage = damage_formula(level, attack, defense, u16::from(power), modifier);
    apply_random_factor(damage, rng)
}

/// Self-inflicted confusion damage: fixed power, the creature's own attack and defense,
/// no type modifiers and no random factor.
pub fn confusion_damage(level: u8, attack: u16, defense: u16, power: u16) -> u16 {
    damage_formula(
        u16::from(level),
        attack,
        defense,
        power,
        DamageModifier::NEUTRAL,
    )
}
