// In: src/battle/move_effects/stat_effects.rs

use super::MoveContext;
use crate::battle::calculators::move_hits;
use crate::battle::combatant::Combatant;
use crate::battle::events::MoveSignal;
use crate::battle::rng::TurnRng;
use schema::{MoveData, StatType, Target};

/// Raising the user's own stat never misses. Lowering the target's is blocked by a
/// substitute or mist.
#[allow(clippy::too_many_arguments)]
pub(super) fn apply_stat_change(
    ctx: &MoveContext,
    data: &MoveData,
    target: Target,
    stat: StatType,
    stages: i8,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    match target {
        Target::User => {
            let _ = user.modify_stat_stage_as_primary(stat, stages);
        }
        Target::Target => {
            if !move_hits(data.accuracy, user, opponent, rng) {
                ctx.signal(user, MoveSignal::Missed);
                return;
            }
            if opponent.modify_stat_stage_as_secondary(stat, stages).is_none() {
                ctx.signal(user, MoveSignal::Failed);
            }
        }
    }
}

/// Mist, Reflect, Light Screen and Focus Energy. Fails if already up.
pub(super) fn apply_screen(
    ctx: &MoveContext,
    user: &mut Combatant,
    activate: fn(&mut Combatant) -> bool,
) {
    if !activate(user) {
        ctx.signal(user, MoveSignal::Failed);
    }
}

pub(super) fn apply_haze(_ctx: &MoveContext, user: &mut Combatant, opponent: &mut Combatant) {
    user.activate_haze(opponent);
}
