// In: src/battle/move_effects/status_effects.rs

use super::MoveContext;
use crate::battle::calculators::move_hits;
use crate::battle::combatant::Combatant;
use crate::battle::events::MoveSignal;
use crate::battle::rng::TurnRng;
use schema::{MoveData, PokemonType, StatusType, Typing};

/// Poison types can't be poisoned, fire types can't be burned, ice types can't be frozen.
/// Electric status moves also follow the type chart.
fn immune_to_status(status: StatusType, move_type: PokemonType, typing: Typing) -> bool {
    let immune_type = match status {
        StatusType::Poison | StatusType::BadlyPoison => Some(PokemonType::Poison),
        StatusType::Burn => Some(PokemonType::Fire),
        StatusType::Freeze => Some(PokemonType::Ice),
        StatusType::Paralysis | StatusType::Sleep => None,
    };
    immune_type.is_some_and(|immune| typing.has_type(immune))
        || (move_type == PokemonType::Electric && typing.is_immune_to(move_type))
}

pub(super) fn apply_inflict_status(
    ctx: &MoveContext,
    data: &MoveData,
    status: StatusType,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if immune_to_status(status, data.move_type, opponent.typing()) {
        ctx.signal(user, MoveSignal::NoEffect);
        return;
    }
    if opponent.status().is_some() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    if !opponent.inflict_status_as_primary_effect(status, rng) {
        ctx.signal(user, MoveSignal::Failed);
    }
}

pub(super) fn apply_confuse(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if opponent.is_confused() || opponent.substitute().is_active() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    opponent.confuse(rng);
}

/// Grass types can't be seeded.
pub(super) fn apply_leech_seed(
    ctx: &MoveContext,
    data: &MoveData,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut TurnRng,
) {
    if opponent.typing().has_type(PokemonType::Grass) {
        ctx.signal(user, MoveSignal::NoEffect);
        return;
    }
    if opponent.is_seeded() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    if !move_hits(data.accuracy, user, opponent, rng) {
        ctx.signal(user, MoveSignal::Missed);
        return;
    }
    opponent.activate_leech_seed();
}

/// Full heal, any status replaced by a fixed-length sleep.
pub(super) fn apply_rest(ctx: &MoveContext, user: &mut Combatant) {
    if user.hp() == user.max_hp() {
        ctx.signal(user, MoveSignal::Failed);
        return;
    }
    user.clear_status();
    let turns = user.config().rest_sleep_turns;
    user.sleep_for(turns);
    user.restore_hp(user.max_hp());
    ctx.signal(user, MoveSignal::RegainedHealth);
}
