// In: src/battle/move_effects/special_effects.rs

use super::damage_effects::hit;
use super::MoveContext;
use crate::battle::calculators::move_hits;
use crate::battle::combatant::Combatant;
use crate::battle::conditions::MultiTurnState;
use crate::battle::events::MoveSignal;
use crate::battle::rng::TurnRng;
use crate::errors::BattleResult;
use crate::move_data::get_move_data;
use schema::{Move, MoveData, PokemonType};

// --- Two-turn moves ---

/// First turn charges, second turn attacks.
pub(super) fn apply_charge(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if !user.is_continuing(ctx.move_used) {
        user.start_two_turn(ctx.move_used);
        ctx.signal(user, MoveSignal::ChargingFirstTurn);
        return;
    }
    user.end_two_turn();
    hit(ctx, data, false, user, opponent, rng);
}

/// Fly and Dig: out of reach on the first turn, attack on the second.
pub(super) fn apply_semi_invulnerable(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if !user.is_continuing(ctx.move_used) {
        user.start_two_turn(ctx.move_used);
        user.set_semi_invulnerable(true);
        let signal = match data.move_type {
            PokemonType::Ground => MoveSignal::DugAHole,
            _ => MoveSignal::FlewUpHigh,
        };
        ctx.signal(user, signal);
        return;
    }
    user.end_two_turn();
    user.set_semi_invulnerable(false);
    hit(ctx, data, false, user, opponent, rng);
}

// --- Locked-in moves ---

/// Attacks for several turns, then confuses the user.
pub(super) fn apply_thrash(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    match user.multi_turn() {
        Some(MultiTurnState::Thrashing { move_, turns_left }) if move_ == ctx.move_used => {
            hit(ctx, data, false, user, opponent, rng);
            let turns_left = turns_left.saturating_sub(1);
            if turns_left == 0 {
                user.set_multi_turn(None);
                user.confuse_from_fatigue(rng);
            } else {
                user.set_multi_turn(Some(MultiTurnState::Thrashing { move_, turns_left }));
            }
        }
        _ => {
            ctx.signal(user, MoveSignal::ThrashingAbout);
            hit(ctx, data, false, user, opponent, rng);
            let range = user.config().thrash_turns;
            let turns_left = rng.next_in_range("Thrash Duration", range.min, range.max);
            user.set_multi_turn(Some(MultiTurnState::Thrashing {
                move_: ctx.move_used,
                turns_left,
            }));
        }
    }
}

/// Once started, Rage repeats until the user leaves battle. Taking damage raises attack.
pub(super) fn apply_rage(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if !user.is_continuing(ctx.move_used) {
        user.set_multi_turn(Some(MultiTurnState::Raging {
            move_: ctx.move_used,
        }));
    }
    hit(ctx, data, false, user, opponent, rng);
}

/// Wrap, Bind and Fire Spin. The first hit traps the target; later turns repeat the same
/// damage without rolling. A target that switched out is attacked afresh.
pub(super) fn apply_trap(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if let Some(MultiTurnState::Trapping {
        move_,
        turns_left,
        damage,
    }) = user.multi_turn()
    {
        if move_ == ctx.move_used && !opponent.switched_this_turn() {
            ctx.signal(user, MoveSignal::AttackContinues);
            opponent.damage(damage, data.move_type);
            let turns_left = turns_left.saturating_sub(1);
            if turns_left == 0 || opponent.is_fainted() {
                user.set_multi_turn(None);
                opponent.deactivate_partial_trapping_at_end_of_turn();
            } else {
                user.set_multi_turn(Some(MultiTurnState::Trapping {
                    move_,
                    turns_left,
                    damage,
                }));
            }
            return;
        }
        user.set_multi_turn(None);
    }

    let Some(damage) = hit(ctx, data, false, user, opponent, rng) else {
        return;
    };
    if opponent.is_fainted() {
        return;
    }
    opponent.activate_partial_trapping();
    let range = user.config().trapping_turns;
    let turns_left = rng.next_in_range("Trapping Duration", range.min, range.max);
    user.set_multi_turn(Some(MultiTurnState::Trapping {
        move_: ctx.move_used,
        turns_left,
        damage,
    }));
}

/// The user must recharge next turn unless the hit knocked out the target or its substitute.
pub(super) fn apply_hyper_beam(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if let Some(MultiTurnState::Recharging { .. }) = user.multi_turn() {
        user.set_multi_turn(None);
        ctx.signal(user, MoveSignal::Recharging);
        return;
    }
    if hit(ctx, data, false, user, opponent, rng).is_some()
        && !opponent.is_fainted()
        && !opponent.substitute().broke_this_turn()
    {
        user.set_multi_turn(Some(MultiTurnState::Recharging {
            move_: ctx.move_used,
        }));
    }
}

/// Store damage for a few turns, then return it doubled. Never misses.
pub(super) fn apply_bide(ctx: &MoveContext, user: &mut Combatant, opponent: &mut Combatant) {
    if !user.bide().is_active() {
        user.activate_bide();
        ctx.signal(user, MoveSignal::BidingTime);
        return;
    }
    if !user.tick_bide() {
        ctx.signal(user, MoveSignal::BidingTime);
        return;
    }
    let unleashed = user.bide().unleashed_damage();
    user.deactivate_bide();
    ctx.signal(user, MoveSignal::BideUnleashed);
    if unleashed == 0 {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    opponent.damage_without_bide_or_counter(unleashed);
}

// --- Copying and volatile moves ---

pub(super) fn apply_substitute(ctx: &MoveContext, user: &mut Combatant) {
    if !user.activate_substitute() {
        ctx.signal(user, MoveSignal::Failed);
    }
}

pub(super) fn apply_transform(
    _ctx: &MoveContext,
    user: &mut Combatant,
    opponent: &mut Combatant,
) -> BattleResult<()> {
    user.activate_transform(opponent)
}

pub(super) fn apply_conversion(_ctx: &MoveContext, user: &mut Combatant, opponent: &mut Combatant) {
    user.activate_conversion(opponent);
}

/// Mimic needs the slot it was used from. Called through Mirror Move it fails.
pub(super) fn apply_mimic(
    ctx: &MoveContext,
    user: &mut Combatant,
    opponent: &mut Combatant,
) -> BattleResult<()> {
    let Some(slot) = ctx.slot else {
        ctx.signal(user, MoveSignal::Failed);
        return Ok(());
    };
    if user.mimic_move(slot, opponent)?.is_none() {
        ctx.signal(user, MoveSignal::Failed);
    }
    Ok(())
}

/// Disable one of the target's moves that still has PP, picked at random.
pub(super) fn apply_disable(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if opponent.disable().is_active() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    let candidates: Vec<Move> = opponent
        .move_slots()
        .iter()
        .flatten()
        .filter(|instance| instance.pp > 0)
        .map(|instance| instance.move_)
        .collect();
    if candidates.is_empty() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    let last = (candidates.len() - 1) as u8;
    let choice = usize::from(rng.next_in_range("Disable Move Choice", 0, last));
    let range = user.config().disable_turns;
    let turns = rng.next_in_range("Disable Duration", range.min, range.max);
    opponent.activate_disable(candidates[choice], turns);
}

pub(super) fn apply_recover(ctx: &MoveContext, user: &mut Combatant) {
    if user.hp() == user.max_hp() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    user.restore_hp(user.max_hp() / 2);
    ctx.signal(user, MoveSignal::RegainedHealth);
}

/// Use the last move the opponent used. Fails for moves that span several turns.
pub(super) fn apply_mirror_move(
    ctx: &MoveContext,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let Some(mirrored) = user.mirror_move() else {
        ctx.signal(user, MoveSignal::Failed);
        return Ok(());
    };
    if get_move_data(mirrored)?.family.spans_multiple_turns() {
        ctx.signal(user, MoveSignal::Failed);
        return Ok(());
    }
    super::execute(MoveContext::new(mirrored, None), user, opponent, rng)
}
