// In: src/battle/move_effects/mod.rs

// --- 1. HELPER MODULES ---
mod damage_effects;
mod special_effects;
mod stat_effects;
mod status_effects;

// --- 2. IMPORTS ---
use crate::battle::combatant::Combatant;
use crate::battle::conditions::MultiTurnState;
use crate::battle::events::MoveSignal;
use crate::battle::rng::TurnRng;
use crate::errors::BattleResult;
use crate::move_data::get_move_data;
use schema::{Move, MoveFamily};
use tracing::trace;

use self::{damage_effects::*, special_effects::*, stat_effects::*, status_effects::*};

// --- 3. CONTEXT ---

/// The move being executed and the slot it came from. Moves called through Mirror Move
/// have no slot and spend no PP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub move_used: Move,
    pub slot: Option<usize>,
}

impl MoveContext {
    pub fn new(move_used: Move, slot: Option<usize>) -> Self {
        Self { move_used, slot }
    }

    fn signal(&self, user: &mut Combatant, signal: MoveSignal) {
        user.publish_move_signal(self.move_used, signal);
    }
}

// --- 4. DISPATCH ---

/// Perform the full effect of `ctx.move_used` by `user` against `opponent`.
///
/// The user must be attached to a move execution (see `Combatant::resolve_turn`). Outcomes
/// are published as move signals on the user; only missing move data is an error.
pub fn execute(
    ctx: MoveContext,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let data = get_move_data(ctx.move_used)?;
    let continuing = user.is_continuing(ctx.move_used);
    if !continuing {
        if let Some(slot) = ctx.slot {
            user.deduct_pp(slot);
        }
    }
    trace!(user = %user.name(), move_used = %ctx.move_used, continuing, "executing move");

    let recharging = matches!(user.multi_turn(), Some(MultiTurnState::Recharging { .. }));
    if !recharging {
        ctx.signal(user, MoveSignal::Used);
    }

    match data.family {
        MoveFamily::Attack { secondary } => apply_attack(&ctx, &data, secondary, user, opponent, rng),
        MoveFamily::HighCritical => apply_high_critical(&ctx, &data, user, opponent, rng),
        MoveFamily::MultiHit { min_hits, max_hits } => {
            apply_multi_hit(&ctx, &data, min_hits, max_hits, user, opponent, rng)
        }
        MoveFamily::Recoil { divisor } => apply_recoil(&ctx, &data, divisor, user, opponent, rng),
        MoveFamily::Drain => apply_drain(&ctx, &data, user, opponent, rng),
        MoveFamily::Crash => apply_crash(&ctx, &data, user, opponent, rng),
        MoveFamily::PayDay => apply_pay_day(&ctx, &data, user, opponent, rng),
        MoveFamily::OneHitKo => apply_one_hit_ko(&ctx, &data, user, opponent, rng),
        MoveFamily::FixedDamage(amount) => {
            apply_fixed_damage(&ctx, &data, amount, user, opponent, rng)
        }
        MoveFamily::LevelDamage => {
            let amount = u16::from(user.level());
            apply_fixed_damage(&ctx, &data, amount, user, opponent, rng)
        }
        MoveFamily::SuperFang => apply_super_fang(&ctx, &data, user, opponent, rng),
        MoveFamily::Charge => apply_charge(&ctx, &data, user, opponent, rng),
        MoveFamily::SemiInvulnerable => apply_semi_invulnerable(&ctx, &data, user, opponent, rng),
        MoveFamily::Thrash => apply_thrash(&ctx, &data, user, opponent, rng),
        MoveFamily::Rage => apply_rage(&ctx, &data, user, opponent, rng),
        MoveFamily::Trap => apply_trap(&ctx, &data, user, opponent, rng),
        MoveFamily::HyperBeam => apply_hyper_beam(&ctx, &data, user, opponent, rng),
        MoveFamily::Counter => apply_counter(&ctx, &data, user, opponent, rng),
        MoveFamily::Bide => apply_bide(&ctx, user, opponent),
        MoveFamily::InflictStatus(status) => {
            apply_inflict_status(&ctx, &data, status, user, opponent, rng)
        }
        MoveFamily::Confuse => apply_confuse(&ctx, &data, user, opponent, rng),
        MoveFamily::StatChange {
            target,
            stat,
            stages,
        } => apply_stat_change(&ctx, &data, target, stat, stages, user, opponent, rng),
        MoveFamily::Substitute => apply_substitute(&ctx, user),
        MoveFamily::Transform => apply_transform(&ctx, user, opponent)?,
        MoveFamily::Disable => apply_disable(&ctx, &data, user, opponent, rng),
        MoveFamily::Conversion => apply_conversion(&ctx, user, opponent),
        MoveFamily::Mimic => apply_mimic(&ctx, user, opponent)?,
        MoveFamily::LeechSeed => apply_leech_seed(&ctx, &data, user, opponent, rng),
        MoveFamily::Mist => apply_screen(&ctx, user, Combatant::activate_mist),
        MoveFamily::Reflect => apply_screen(&ctx, user, Combatant::activate_reflect),
        MoveFamily::LightScreen => apply_screen(&ctx, user, Combatant::activate_light_screen),
        MoveFamily::FocusEnergy => apply_screen(&ctx, user, Combatant::activate_focus_energy),
        MoveFamily::Haze => apply_haze(&ctx, user, opponent),
        MoveFamily::Recover => apply_recover(&ctx, user),
        MoveFamily::Rest => apply_rest(&ctx, user),
        MoveFamily::MirrorMove => {
            // The mirrored move records itself.
            return apply_mirror_move(&ctx, user, opponent, rng);
        }
    }

    user.set_last_move_used(ctx.move_used);
    opponent.set_mirror_move(ctx.move_used);
    Ok(())
}
