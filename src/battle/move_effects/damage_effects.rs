// In: src/battle/move_effects/damage_effects.rs

use super::MoveContext;
use crate::battle::calculators::{attack_damage, is_critical_hit, move_hits};
use crate::battle::combatant::Combatant;
use crate::battle::events::MoveSignal;
use crate::battle::rng::TurnRng;
use schema::{MoveData, SecondaryEffect};

// These functions are `pub(super)` so only the dispatcher and sibling modules see them.

/// Outcome of the shared accuracy and damage pipeline. Misses and immunities have already
/// been reported when this is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Strike {
    Immune,
    Missed,
    Landed {
        damage: u16,
        critical: bool,
        effectiveness: f32,
    },
}

/// Type immunity, then accuracy, then the critical roll, then damage.
pub(super) fn strike(
    ctx: &MoveContext,
    data: &MoveData,
    high_critical: bool,
    user: &mut Combatant,
    opponent: &Combatant,
    rng: &mut TurnRng,
) -> Strike {
    let effectiveness = opponent.typing().effectiveness_against(data.move_type);
    if effectiveness == 0.0 {
        ctx.signal(user, MoveSignal::NoEffect);
        return Strike::Immune;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return Strike::Missed;
    }
    let critical = is_critical_hit(user, high_critical, rng);
    let power = data.power.unwrap_or(0);
    let damage = attack_damage(
        user,
        opponent,
        data.move_type,
        power,
        critical,
        effectiveness,
        rng,
    );
    Strike::Landed {
        damage,
        critical,
        effectiveness,
    }
}

pub(super) fn report_hit(ctx: &MoveContext, user: &mut Combatant, critical: bool, effectiveness: f32) {
    if critical {
        ctx.signal(user, MoveSignal::CriticalHit);
    }
    if effectiveness > 1.0 {
        ctx.signal(user, MoveSignal::SuperEffective);
    } else if effectiveness < 1.0 {
        ctx.signal(user, MoveSignal::NotVeryEffective);
    }
}

/// Strike once and apply the damage. Returns the damage dealt if the hit landed.
pub(super) fn hit(
    ctx: &MoveContext,
    data: &MoveData,
    high_critical: bool,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) -> Option<u16> {
    match strike(ctx, data, high_critical, user, opponent, rng) {
        Strike::Landed {
            damage,
            critical,
            effectiveness,
        } => {
            opponent.damage(damage, data.move_type);
            report_hit(ctx, user, critical, effectiveness);
            Some(damage)
        }
        Strike::Immune | Strike::Missed => None,
    }
}

pub(super) fn apply_attack(
    ctx: &MoveContext,
    data: &MoveData,
    secondary: Option<SecondaryEffect>,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if hit(ctx, data, false, user, opponent, rng).is_none() || opponent.is_fainted() {
        return;
    }
    if let Some(effect) = secondary {
        apply_secondary_effect(effect, data, opponent, rng);
    }
}

/// Roll a damaging move's side effect. A creature is never given a status by a move of
/// its own type.
fn apply_secondary_effect(
    effect: SecondaryEffect,
    data: &MoveData,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    match effect {
        SecondaryEffect::Status { status, chance } => {
            if opponent.typing().has_type(data.move_type) {
                return;
            }
            if rng.chance("Secondary Status Check", chance) {
                opponent.inflict_status_as_secondary_effect(status, rng);
            }
        }
        SecondaryEffect::Flinch { chance } => {
            if rng.chance("Flinch Check", chance) {
                opponent.flinch();
            }
        }
        SecondaryEffect::Confuse { chance } => {
            if rng.chance("Secondary Confusion Check", chance) {
                opponent.confuse_as_secondary_effect(rng);
            }
        }
        SecondaryEffect::StatDrop {
            stat,
            stages,
            chance,
        } => {
            if rng.chance("Secondary Stat Drop Check", chance) {
                let _ = opponent.modify_stat_stage_as_secondary(stat, stages);
            }
        }
    }
}

pub(super) fn apply_high_critical(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    hit(ctx, data, true, user, opponent, rng);
}

/// Accuracy and damage are rolled once; every hit deals the same amount. Only the first hit
/// counts for Bide and Counter. Stops early if the target faints or its substitute breaks.
pub(super) fn apply_multi_hit(
    ctx: &MoveContext,
    data: &MoveData,
    min_hits: u8,
    max_hits: u8,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    let Strike::Landed {
        damage,
        critical,
        effectiveness,
    } = strike(ctx, data, false, user, opponent, rng)
    else {
        return;
    };
    let hits = roll_hit_count(min_hits, max_hits, rng);
    let had_substitute = opponent.substitute().is_active();

    opponent.damage(damage, data.move_type);
    let mut landed = 1;
    while landed < hits
        && !opponent.is_fainted()
        && !(had_substitute && !opponent.substitute().is_active())
    {
        opponent.damage_without_bide_or_counter(damage);
        landed += 1;
    }

    report_hit(ctx, user, critical, effectiveness);
    ctx.signal(user, MoveSignal::HitMultipleTimes(landed));
}

/// Two and three hits come up 3/8 of the time each, four and five 1/8 each. A fixed
/// count needs no roll.
fn roll_hit_count(min_hits: u8, max_hits: u8, rng: &mut TurnRng) -> u8 {
    if min_hits >= max_hits {
        return min_hits;
    }
    let hits = match rng.next_in_range("Multi Hit Count", 0, 7) {
        0..=2 => 2,
        3..=5 => 3,
        6 => 4,
        _ => 5,
    };
    hits.clamp(min_hits, max_hits)
}

pub(super) fn apply_recoil(
    ctx: &MoveContext,
    data: &MoveData,
    divisor: u8,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    let Some(damage) = hit(ctx, data, false, user, opponent, rng) else {
        return;
    };
    let recoil = (damage / u16::from(divisor.max(1))).max(1);
    user.recoil_damage(recoil);
    ctx.signal(user, MoveSignal::HurtByRecoil);
}

pub(super) fn apply_drain(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    let Some(damage) = hit(ctx, data, false, user, opponent, rng) else {
        return;
    };
    user.restore_hp((damage / 2).max(1));
    ctx.signal(user, MoveSignal::SuckedHealth);
}

/// A miss costs the user 1 HP.
pub(super) fn apply_crash(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    match strike(ctx, data, false, user, opponent, rng) {
        Strike::Landed {
            damage,
            critical,
            effectiveness,
        } => {
            opponent.damage(damage, data.move_type);
            report_hit(ctx, user, critical, effectiveness);
        }
        Strike::Missed => {
            ctx.signal(user, MoveSignal::CrashDamage);
            user.damage_pokemon_only(1);
        }
        Strike::Immune => {}
    }
}

pub(super) fn apply_pay_day(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if hit(ctx, data, false, user, opponent, rng).is_some() {
        ctx.signal(user, MoveSignal::PayDayTriggered);
    }
}

/// Fails against a faster target. Takes out the substitute, or the creature, in one hit.
pub(super) fn apply_one_hit_ko(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if opponent.typing().is_immune_to(data.move_type) {
        ctx.signal(user, MoveSignal::NoEffect);
        return;
    }
    if user.speed() < opponent.speed() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    let amount = opponent.substitute_hp().unwrap_or_else(|| opponent.hp());
    opponent.damage(amount, data.move_type);
    ctx.signal(user, MoveSignal::OneHitKo);
}

/// Fixed damage ignores the type chart, stats and critical hits.
pub(super) fn apply_fixed_damage(
    ctx: &MoveContext,
    data: &MoveData,
    amount: u16,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    opponent.damage(amount, data.move_type);
}

pub(super) fn apply_super_fang(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    let amount = (opponent.hp() / 2).max(1);
    opponent.damage(amount, data.move_type);
}

/// Returns double the last Normal or Fighting damage the user took.
pub(super) fn apply_counter(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    let taken = user.damage_for_counter();
    if taken == 0 {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    opponent.damage_for_counter_only(taken.saturating_mul(2));
}
