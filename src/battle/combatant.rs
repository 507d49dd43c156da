// In: src/battle/combatant.rs

//! The in-battle wrapper around a creature.
//!
//! A `Combatant` owns the creature currently on the field plus everything that only
//! exists while it is there: move slots (which Mimic and Transform can overwrite), stat
//! stages, volatile conditions and the per-turn flags. The creature's HP, status and PP
//! persist; everything else is reset by `switch_out`.

use crate::battle::calculators::confusion_damage;
use crate::battle::conditions::{
    Bide, Conversion, Disable, MultiTurnState, Substitute, Transform, TransformedForm,
    TwoTurnState,
};
use crate::battle::events::{
    BattleEvent, BattleEventKind, BlockReason, EventChannel, MoveSignal, SubscriptionId,
};
use crate::battle::move_effects::{self, MoveContext};
use crate::battle::rng::TurnRng;
use crate::battle::stats::{StageChange, StageMultiplier, StatStages};
use crate::config::BattleConfig;
use crate::errors::BattleResult;
use crate::pokemon::{MoveInstance, PokemonEvent, PokemonInst, StatBlock, StatusCondition};
use schema::{Move, PokemonType, StatType, StatusType, Typing};
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, trace};

/// Modified stats are kept within this range.
const MIN_STAT: u32 = 1;
const MAX_STAT: u32 = 999;

/// How a combatant's turn went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    MoveExecuted,
    Blocked(BlockReason),
}

/// What occupies one of the four in-battle move slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleMoveSlot {
    /// The creature's own move at this index. PP is spent on the creature.
    Native(usize),
    /// A move copied by Mimic or Transform. Discarded on switch-out.
    Borrowed(MoveInstance),
}

/// Forwards the active creature's notifications into the combatant.
#[derive(Debug)]
struct CreatureLink {
    subscription: SubscriptionId,
    inbox: Receiver<PokemonEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CombatantFlags {
    switched_this_turn: bool,
    seeded: bool,
    flinching: bool,
    partially_trapped: bool,
    trapping_ends_this_turn: bool,
    semi_invulnerable: bool,
    focus_energy: bool,
    mist: bool,
    reflect: bool,
    light_screen: bool,
    paralysis_speed_drop: bool,
    burn_attack_drop: bool,
}

#[derive(Debug)]
pub struct Combatant {
    label: String,
    pokemon: PokemonInst,
    link: CreatureLink,
    events: EventChannel<BattleEvent>,
    config: BattleConfig,
    moves: [Option<BattleMoveSlot>; 4],
    stat_stages: StatStages,
    substitute: Substitute,
    transform: Transform,
    bide: Bide,
    disable: Disable,
    conversion: Conversion,
    two_turn: Option<TwoTurnState>,
    multi_turn: Option<MultiTurnState>,
    executing: Option<Move>,
    last_move_used: Option<Move>,
    mirror_move: Option<Move>,
    confusion_turns: u8,
    damage_for_counter: u16,
    /// Ramp factor for badly-poisoned and leech-seed damage.
    status_damage_multiplier: u16,
    flags: CombatantFlags,
}

impl Combatant {
    /// Put `pokemon` on the field under `label` (usually the player's name).
    pub fn new(label: impl Into<String>, mut pokemon: PokemonInst, config: BattleConfig) -> Self {
        let link = Self::attach(&mut pokemon);
        let moves = Self::native_slots(&pokemon);
        let mut combatant = Self {
            label: label.into(),
            pokemon,
            link,
            events: EventChannel::new(),
            config,
            moves,
            stat_stages: StatStages::new(),
            substitute: Substitute::default(),
            transform: Transform::default(),
            bide: Bide::default(),
            disable: Disable::default(),
            conversion: Conversion::default(),
            two_turn: None,
            multi_turn: None,
            executing: None,
            last_move_used: None,
            mirror_move: None,
            confusion_turns: 0,
            damage_for_counter: 0,
            status_damage_multiplier: 1,
            flags: CombatantFlags::default(),
        };
        combatant.derive_status_flags();
        combatant
    }

    fn attach(pokemon: &mut PokemonInst) -> CreatureLink {
        let (sender, inbox) = mpsc::channel();
        let subscription = pokemon.subscribe(move |event: &PokemonEvent| {
            // The receiver lives as long as the link; a closed channel means we detached.
            let _ = sender.send(event.clone());
        });
        CreatureLink {
            subscription,
            inbox,
        }
    }

    fn native_slots(pokemon: &PokemonInst) -> [Option<BattleMoveSlot>; 4] {
        std::array::from_fn(|index| pokemon.moves[index].map(|_| BattleMoveSlot::Native(index)))
    }

    fn derive_status_flags(&mut self) {
        let status = self.pokemon.status();
        self.flags.paralysis_speed_drop = status == Some(StatusCondition::Paralysis);
        self.flags.burn_attack_drop = status == Some(StatusCondition::Burn);
    }

    // === Notifications ===

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&BattleEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn publish(&mut self, kind: BattleEventKind) {
        let event = BattleEvent {
            combatant: self.label.clone(),
            pokemon: self.pokemon.name.clone(),
            kind,
        };
        self.events.publish(&event);
    }

    /// Re-broadcast whatever the creature published since the last drain.
    fn relay_creature_events(&mut self) {
        while let Ok(event) = self.link.inbox.try_recv() {
            self.publish(BattleEventKind::Creature(event));
        }
    }

    /// Report a move outcome. Only valid while a move is executing.
    pub(crate) fn publish_move_signal(&mut self, move_used: Move, signal: MoveSignal) {
        assert!(
            self.executing.is_some(),
            "{:?} for {} published outside of move execution",
            signal,
            move_used
        );
        self.publish(BattleEventKind::Move { move_used, signal });
    }

    pub fn is_executing_move(&self) -> bool {
        self.executing.is_some()
    }

    fn assert_not_fainted(&self, operation: &str) {
        assert!(
            !self.pokemon.is_fainted(),
            "{} on fainted {} ({})",
            operation,
            self.pokemon.name,
            self.label
        );
    }

    // === Read access ===

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &str {
        &self.pokemon.name
    }

    pub fn level(&self) -> u8 {
        self.pokemon.level
    }

    pub fn base_speed(&self) -> u8 {
        self.pokemon.base_speed
    }

    pub fn pokemon(&self) -> &PokemonInst {
        &self.pokemon
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn hp(&self) -> u16 {
        self.pokemon.current_hp()
    }

    pub fn max_hp(&self) -> u16 {
        self.pokemon.max_hp()
    }

    pub fn status(&self) -> Option<StatusCondition> {
        self.pokemon.status()
    }

    /// Empty when the creature has no status.
    pub fn status_abbreviation(&self) -> &'static str {
        self.pokemon
            .status()
            .map_or("", |status| status.abbreviation())
    }

    pub fn is_fainted(&self) -> bool {
        self.pokemon.is_fainted()
    }

    pub fn substitute_hp(&self) -> Option<u16> {
        self.substitute.hp()
    }

    pub fn typing(&self) -> Typing {
        if let Some(typing) = self.conversion.typing() {
            return typing;
        }
        match self.transform.form() {
            Some(form) => form.typing,
            None => self.pokemon.typing,
        }
    }

    /// Stats before stages and status drops. A transformed combatant reports the copied ones.
    pub fn unmodified_stats(&self) -> StatBlock {
        match self.transform.form() {
            Some(form) => form.stats,
            None => self.pokemon.stats,
        }
    }

    fn modified_stat(&self, stat: StatType) -> u16 {
        let stats = self.unmodified_stats();
        let base = match stat {
            StatType::Attack => stats.attack,
            StatType::Defense => stats.defense,
            StatType::Special => stats.special,
            StatType::Speed => stats.speed,
            StatType::Accuracy | StatType::Evasion => {
                panic!("{} has no base value; use the accuracy multipliers", stat)
            }
        };
        let mut multiplier = self.stat_stages.stat_multiplier(stat);
        if stat == StatType::Attack && self.flags.burn_attack_drop {
            multiplier = multiplier.then(StageMultiplier::new(1, 2));
        }
        if stat == StatType::Speed && self.flags.paralysis_speed_drop {
            multiplier = multiplier.then(StageMultiplier::new(1, 4));
        }
        multiplier
            .apply(u32::from(base))
            .clamp(MIN_STAT, MAX_STAT) as u16
    }

    pub fn attack(&self) -> u16 {
        self.modified_stat(StatType::Attack)
    }

    pub fn defense(&self) -> u16 {
        self.modified_stat(StatType::Defense)
    }

    pub fn special(&self) -> u16 {
        self.modified_stat(StatType::Special)
    }

    pub fn speed(&self) -> u16 {
        self.modified_stat(StatType::Speed)
    }

    pub fn accuracy_multiplier(&self) -> StageMultiplier {
        self.stat_stages.accuracy_multiplier()
    }

    pub fn evasion_multiplier(&self) -> StageMultiplier {
        self.stat_stages.evasion_multiplier()
    }

    pub fn stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(stat)
    }

    pub fn stat_stages(&self) -> &StatStages {
        &self.stat_stages
    }

    pub fn substitute(&self) -> &Substitute {
        &self.substitute
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn bide(&self) -> &Bide {
        &self.bide
    }

    pub fn disable(&self) -> &Disable {
        &self.disable
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    pub fn two_turn(&self) -> Option<TwoTurnState> {
        self.two_turn
    }

    pub fn multi_turn(&self) -> Option<MultiTurnState> {
        self.multi_turn
    }

    pub fn confusion_turns(&self) -> u8 {
        self.confusion_turns
    }

    pub fn is_confused(&self) -> bool {
        self.confusion_turns > 0
    }

    pub fn sleep_turns(&self) -> u8 {
        self.pokemon.sleep_turns()
    }

    pub fn damage_for_counter(&self) -> u16 {
        self.damage_for_counter
    }

    pub fn status_damage_multiplier(&self) -> u16 {
        self.status_damage_multiplier
    }

    pub fn is_seeded(&self) -> bool {
        self.flags.seeded
    }

    pub fn is_flinching(&self) -> bool {
        self.flags.flinching
    }

    pub fn is_partially_trapped(&self) -> bool {
        self.flags.partially_trapped
    }

    pub fn is_semi_invulnerable(&self) -> bool {
        self.flags.semi_invulnerable
    }

    pub fn has_focus_energy(&self) -> bool {
        self.flags.focus_energy
    }

    pub fn has_mist(&self) -> bool {
        self.flags.mist
    }

    pub fn has_reflect(&self) -> bool {
        self.flags.reflect
    }

    pub fn has_light_screen(&self) -> bool {
        self.flags.light_screen
    }

    pub fn switched_this_turn(&self) -> bool {
        self.flags.switched_this_turn
    }

    pub fn has_paralysis_speed_drop(&self) -> bool {
        self.flags.paralysis_speed_drop
    }

    pub fn has_burn_attack_drop(&self) -> bool {
        self.flags.burn_attack_drop
    }

    pub fn last_move_used(&self) -> Option<Move> {
        self.last_move_used
    }

    pub(crate) fn set_last_move_used(&mut self, move_: Move) {
        self.last_move_used = Some(move_);
    }

    /// The last move the opponent used against this combatant.
    pub fn mirror_move(&self) -> Option<Move> {
        self.mirror_move
    }

    pub(crate) fn set_mirror_move(&mut self, move_: Move) {
        self.mirror_move = Some(move_);
    }

    // === Move slots ===

    fn slot_instance(&self, slot: usize) -> Option<&MoveInstance> {
        match self.moves.get(slot)?.as_ref()? {
            BattleMoveSlot::Native(index) => self.pokemon.moves.get(*index)?.as_ref(),
            BattleMoveSlot::Borrowed(instance) => Some(instance),
        }
    }

    fn slot_instance_mut(&mut self, slot: usize) -> Option<&mut MoveInstance> {
        match self.moves.get_mut(slot)?.as_mut()? {
            BattleMoveSlot::Native(index) => self.pokemon.moves.get_mut(*index)?.as_mut(),
            BattleMoveSlot::Borrowed(instance) => Some(instance),
        }
    }

    /// The four in-battle slots with their current PP, for display.
    pub fn move_slots(&self) -> [Option<MoveInstance>; 4] {
        std::array::from_fn(|slot| self.slot_instance(slot).copied())
    }

    pub fn move_in_slot(&self, slot: usize) -> Option<Move> {
        self.slot_instance(slot).map(|instance| instance.move_)
    }

    pub fn move_ids(&self) -> [Option<Move>; 4] {
        std::array::from_fn(|slot| self.move_in_slot(slot))
    }

    pub fn slot_of(&self, move_: Move) -> Option<usize> {
        (0..self.moves.len()).find(|slot| self.move_in_slot(*slot) == Some(move_))
    }

    /// Spend one PP from `slot`. Returns false when the slot is empty or has no PP left.
    pub fn deduct_pp(&mut self, slot: usize) -> bool {
        self.slot_instance_mut(slot)
            .is_some_and(|instance| instance.use_move())
    }

    /// The slot a move in progress forces this turn, if any.
    pub fn forced_move_slot(&self) -> Option<usize> {
        let forced = if let Some(state) = self.two_turn {
            state.move_
        } else if let Some(state) = self.multi_turn {
            state.move_()
        } else if self.bide.is_active() {
            Move::Bide
        } else {
            return None;
        };
        self.slot_of(forced)
    }

    /// True while `move_` is being carried over from an earlier turn.
    pub fn is_continuing(&self, move_: Move) -> bool {
        self.two_turn.is_some_and(|state| state.move_ == move_)
            || self.multi_turn.is_some_and(|state| state.move_() == move_)
            || (move_ == Move::Bide && self.bide.is_active())
    }

    // === Turn protocol ===

    /// Attempt the move in `slot`, then apply this combatant's end-of-turn effects.
    pub fn resolve_turn(
        &mut self,
        slot: usize,
        opponent: &mut Combatant,
        rng: &mut TurnRng,
    ) -> BattleResult<TurnOutcome> {
        self.assert_not_fainted("resolve_turn");
        let move_ = self
            .move_in_slot(slot)
            .unwrap_or_else(|| panic!("{} has no move in slot {}", self.name(), slot));

        let outcome = match self.check_action_preventing_conditions(move_, opponent, rng) {
            Some(reason) => {
                debug!(combatant = %self.label, ?reason, "turn blocked");
                TurnOutcome::Blocked(reason)
            }
            None => {
                // Confusion picked up during this move starts counting next turn.
                let was_confused = self.is_confused();
                self.execute_move(slot, move_, opponent, rng)?;
                if was_confused {
                    self.decrement_confusion();
                }
                self.tick_disable();
                TurnOutcome::MoveExecuted
            }
        };

        self.end_of_turn_effects(opponent);
        Ok(outcome)
    }

    fn check_action_preventing_conditions(
        &mut self,
        move_: Move,
        opponent: &mut Combatant,
        rng: &mut TurnRng,
    ) -> Option<BlockReason> {
        match self.pokemon.status() {
            Some(StatusCondition::Sleep) => {
                if self.pokemon.sleep_turns() > 0 {
                    self.publish(BattleEventKind::FastAsleep);
                    return Some(BlockReason::FastAsleep);
                }
                self.publish(BattleEventKind::WokeUp);
                self.clear_status();
                return Some(BlockReason::WokeUp);
            }
            Some(StatusCondition::Freeze) => {
                self.publish(BattleEventKind::FrozenSolid);
                return Some(BlockReason::FrozenSolid);
            }
            Some(StatusCondition::Paralysis) => {
                if rng.chance("Full Paralysis Check", self.config.full_paralysis_chance) {
                    self.publish(BattleEventKind::FullyParalyzed);
                    self.abort_ongoing_moves(opponent);
                    self.tick_disable();
                    return Some(BlockReason::FullyParalyzed);
                }
            }
            _ => {}
        }

        if self.confusion_turns > 0 {
            self.publish(BattleEventKind::Confused);
            if rng.chance(
                "Confusion Self-Hit Check",
                self.config.confusion_self_hit_chance,
            ) {
                let damage = confusion_damage(
                    self.pokemon.level,
                    self.pokemon.stats.attack,
                    self.pokemon.stats.defense,
                    self.config.confusion_self_hit_power,
                );
                self.publish(BattleEventKind::HurtFromConfusion { damage });
                self.damage_pokemon_only(damage);
                self.disrupt_thrashing();
                self.decrement_confusion();
                self.tick_disable();
                return Some(BlockReason::HurtItselfInConfusion);
            }
        }

        if self.flags.flinching {
            self.flags.flinching = false;
            self.publish(BattleEventKind::Flinched);
            return Some(BlockReason::Flinched);
        }

        if self.disable.disabled_move() == Some(move_) {
            self.publish(BattleEventKind::DisabledMoveAttempted {
                move_attempted: move_,
            });
            // Drops a continuation of the disabled move along with its forced slot.
            self.abort_ongoing_moves(opponent);
            self.tick_disable();
            return Some(BlockReason::MoveDisabled);
        }

        None
    }

    fn execute_move(
        &mut self,
        slot: usize,
        move_: Move,
        opponent: &mut Combatant,
        rng: &mut TurnRng,
    ) -> BattleResult<()> {
        self.executing = Some(move_);
        let result = move_effects::execute(MoveContext::new(move_, Some(slot)), self, opponent, rng);
        self.executing = None;
        result
    }

    /// Full paralysis or a disabled continuation ends anything the combatant was in the
    /// middle of.
    fn abort_ongoing_moves(&mut self, opponent: &mut Combatant) {
        if let Some(MultiTurnState::Trapping { .. }) = self.multi_turn {
            opponent.deactivate_partial_trapping_at_end_of_turn();
        }
        self.multi_turn = None;
        self.two_turn = None;
        self.flags.semi_invulnerable = false;
        self.bide.deactivate();
    }

    fn decrement_confusion(&mut self) {
        if self.confusion_turns == 0 {
            return;
        }
        self.confusion_turns -= 1;
        if self.confusion_turns == 0 {
            self.publish(BattleEventKind::ConfusionWoreOff);
        }
    }

    fn tick_disable(&mut self) {
        if let Some(move_disabled) = self.disable.tick() {
            self.publish(BattleEventKind::DisableWoreOff { move_disabled });
        }
    }

    /// Leech seed, then burn or poison damage. Skipped once this combatant has fainted.
    pub fn end_of_turn_effects(&mut self, opponent: &mut Combatant) {
        if self.is_fainted() {
            return;
        }
        self.apply_leech_seed(opponent);
        if self.is_fainted() {
            return;
        }
        self.apply_status_damage();
    }

    fn apply_leech_seed(&mut self, opponent: &mut Combatant) {
        if !self.flags.seeded || opponent.is_fainted() {
            return;
        }
        let hp = self.pokemon.current_hp();
        let sap = if hp < 16 {
            1
        } else {
            (hp / 16).saturating_mul(self.status_damage_multiplier)
        };
        let restored = sap.min(opponent.max_hp() - opponent.hp());
        debug!(combatant = %self.label, sap, restored, "leech seed");
        self.publish(BattleEventKind::LeechSeedSaps {
            damage: sap,
            restored,
        });
        self.damage_pokemon_only(sap);
        opponent.restore_hp(restored);
    }

    fn apply_status_damage(&mut self) {
        let status = match self.pokemon.status() {
            Some(
                status @ (StatusCondition::Burn
                | StatusCondition::Poison
                | StatusCondition::BadlyPoisoned),
            ) => status,
            _ => return,
        };
        let damage = (self.pokemon.current_hp() / 16).saturating_mul(self.status_damage_multiplier);
        if status == StatusCondition::BadlyPoisoned {
            self.status_damage_multiplier = self.status_damage_multiplier.saturating_add(1);
        }
        if damage == 0 {
            return;
        }
        debug!(combatant = %self.label, ?status, damage, "residual damage");
        self.publish(BattleEventKind::StatusDamage { status, damage });
        self.damage_pokemon_only(damage);
    }

    /// Turn the combatant spends unable to move because it is partially trapped.
    pub fn pass_turn_while_trapped(&mut self, opponent: &mut Combatant) {
        self.publish(BattleEventKind::TrappedCannotMove);
        self.end_of_turn_effects(opponent);
    }

    /// Clears per-turn flags. Called on both combatants once the turn is over.
    pub fn update_for_end_of_turn(&mut self) {
        self.flags.switched_this_turn = false;
        self.flags.flinching = false;
        self.pokemon.tick_sleep();
        if self.flags.trapping_ends_this_turn {
            self.flags.partially_trapped = false;
            self.flags.trapping_ends_this_turn = false;
        }
        self.substitute.end_turn();
    }

    // === Damage and healing ===

    fn absorb_damage(&mut self, amount: u16) {
        if self.substitute.is_active() {
            trace!(combatant = %self.label, amount, "substitute takes damage");
            if self.substitute.damage(amount) {
                self.publish(BattleEventKind::SubstituteBroke);
            }
        } else {
            trace!(combatant = %self.label, amount, "pokemon takes damage");
            self.pokemon.take_damage(amount);
            self.relay_creature_events();
        }
    }

    /// Damage from an opponent's attack.
    pub fn damage(&mut self, amount: u16, damage_type: PokemonType) {
        self.assert_not_fainted("damage");
        self.absorb_damage(amount);
        self.bide.accrue(amount);
        if matches!(damage_type, PokemonType::Normal | PokemonType::Fighting) {
            self.damage_for_counter = amount;
        }
        if damage_type == PokemonType::Fire && self.pokemon.status() == Some(StatusCondition::Freeze) {
            self.clear_status();
        }
        if matches!(self.multi_turn, Some(MultiTurnState::Raging { .. }))
            && !self.is_fainted()
            && self.stat_stages.can_go_higher(StatType::Attack)
        {
            let _ = self.modify_stat_stage_as_primary(StatType::Attack, 1);
        }
    }

    /// Follow-up hits of a multi-hit attack. No Bide or Counter bookkeeping.
    pub fn damage_without_bide_or_counter(&mut self, amount: u16) {
        self.assert_not_fainted("damage_without_bide_or_counter");
        self.absorb_damage(amount);
    }

    /// Damage dealt by Counter. Clears this combatant's own counter record first.
    pub fn damage_for_counter_only(&mut self, amount: u16) {
        self.assert_not_fainted("damage_for_counter_only");
        self.damage_for_counter = 0;
        self.absorb_damage(amount);
        self.bide.accrue(amount);
    }

    /// Damage that ignores the substitute: residual effects and self-inflicted hits.
    pub fn damage_pokemon_only(&mut self, amount: u16) {
        self.assert_not_fainted("damage_pokemon_only");
        self.pokemon.take_damage(amount);
        self.relay_creature_events();
    }

    /// Recoil from the user's own attack. Counter reflects it.
    pub fn recoil_damage(&mut self, amount: u16) {
        self.assert_not_fainted("recoil_damage");
        self.pokemon.take_damage(amount);
        self.relay_creature_events();
        self.damage_for_counter = amount;
    }

    /// Returns the HP actually restored.
    pub fn restore_hp(&mut self, amount: u16) -> u16 {
        let restored = self.pokemon.restore_hp(amount);
        self.relay_creature_events();
        restored
    }

    // === Status infliction ===

    fn apply_status(&mut self, status: StatusCondition) -> bool {
        if self.is_fainted() || !self.pokemon.inflict_status(status) {
            return false;
        }
        self.relay_creature_events();
        match status {
            StatusCondition::Paralysis => self.flags.paralysis_speed_drop = true,
            StatusCondition::Burn => self.flags.burn_attack_drop = true,
            StatusCondition::BadlyPoisoned => self.status_damage_multiplier = 1,
            _ => {}
        }
        true
    }

    /// Inflict a status as the whole point of a move. Returns whether it took hold.
    pub fn inflict_status_as_primary_effect(
        &mut self,
        status: StatusType,
        rng: &mut TurnRng,
    ) -> bool {
        match status {
            StatusType::Sleep => self.sleep_as_primary_effect(rng),
            other => self.apply_status(StatusCondition::from(other)),
        }
    }

    /// Inflict a status as the side effect of a damaging move. Blocked by a substitute.
    pub fn inflict_status_as_secondary_effect(
        &mut self,
        status: StatusType,
        rng: &mut TurnRng,
    ) -> bool {
        if self.substitute.is_active() {
            return false;
        }
        self.inflict_status_as_primary_effect(status, rng)
    }

    pub fn burn_as_primary_effect(&mut self) -> bool {
        self.apply_status(StatusCondition::Burn)
    }

    pub fn burn_as_secondary_effect(&mut self) -> bool {
        !self.substitute.is_active() && self.burn_as_primary_effect()
    }

    pub fn freeze_as_primary_effect(&mut self) -> bool {
        self.apply_status(StatusCondition::Freeze)
    }

    pub fn freeze_as_secondary_effect(&mut self) -> bool {
        !self.substitute.is_active() && self.freeze_as_primary_effect()
    }

    pub fn paralyze_as_primary_effect(&mut self) -> bool {
        self.apply_status(StatusCondition::Paralysis)
    }

    pub fn paralyze_as_secondary_effect(&mut self) -> bool {
        !self.substitute.is_active() && self.paralyze_as_primary_effect()
    }

    pub fn poison_as_primary_effect(&mut self) -> bool {
        self.apply_status(StatusCondition::Poison)
    }

    pub fn poison_as_secondary_effect(&mut self) -> bool {
        !self.substitute.is_active() && self.poison_as_primary_effect()
    }

    pub fn badly_poison_as_primary_effect(&mut self) -> bool {
        self.apply_status(StatusCondition::BadlyPoisoned)
    }

    pub fn badly_poison_as_secondary_effect(&mut self) -> bool {
        !self.substitute.is_active() && self.badly_poison_as_primary_effect()
    }

    /// Sleep for a rolled number of turns. The roll only happens if sleep can take hold.
    pub fn sleep_as_primary_effect(&mut self, rng: &mut TurnRng) -> bool {
        if self.is_fainted() || self.pokemon.status().is_some() {
            return false;
        }
        let range = self.config.sleep_turns;
        let turns = rng.next_in_range("Sleep Duration", range.min, range.max);
        self.sleep_for(turns)
    }

    pub fn sleep_as_secondary_effect(&mut self, rng: &mut TurnRng) -> bool {
        !self.substitute.is_active() && self.sleep_as_primary_effect(rng)
    }

    /// Sleep for exactly `turns` turns.
    pub fn sleep_for(&mut self, turns: u8) -> bool {
        if !self.apply_status(StatusCondition::Sleep) {
            return false;
        }
        self.pokemon.set_sleep_turns(turns);
        true
    }

    /// Clear the creature's status along with the combatant-side status bookkeeping.
    pub fn clear_status(&mut self) {
        self.pokemon.clear_status();
        self.relay_creature_events();
        self.status_damage_multiplier = 1;
        self.derive_status_flags();
    }

    pub fn confuse(&mut self, rng: &mut TurnRng) {
        let range = self.config.confusion_turns;
        self.confusion_turns = rng.next_in_range("Confusion Duration", range.min, range.max);
        self.publish(BattleEventKind::BecameConfused);
    }

    /// Returns false when a substitute is up or the combatant is already confused.
    pub fn confuse_as_secondary_effect(&mut self, rng: &mut TurnRng) -> bool {
        if self.substitute.is_active() || self.is_confused() {
            return false;
        }
        self.confuse(rng);
        true
    }

    /// Confusion at the end of a thrashing move.
    pub fn confuse_from_fatigue(&mut self, rng: &mut TurnRng) {
        let range = self.config.confusion_turns;
        self.confusion_turns = rng.next_in_range("Confusion Duration", range.min, range.max);
        self.publish(BattleEventKind::ConfusedByFatigue);
    }

    pub fn flinch(&mut self) -> bool {
        if self.substitute.is_active() {
            return false;
        }
        self.flags.flinching = true;
        true
    }

    // === Stat stages ===

    pub fn modify_stat_stage_as_primary(&mut self, stat: StatType, delta: i8) -> StageChange {
        let change = self.stat_stages.modify(stat, delta);
        match change {
            StageChange::Changed { to, .. } => self.publish(BattleEventKind::StatStageChanged {
                stat,
                delta,
                stage: to,
            }),
            StageChange::Unchanged => {
                self.publish(BattleEventKind::StatStageUnchanged { stat, delta })
            }
        }
        change
    }

    /// A stage change coming from the opponent. `None` when a substitute or mist blocks it.
    pub fn modify_stat_stage_as_secondary(
        &mut self,
        stat: StatType,
        delta: i8,
    ) -> Option<StageChange> {
        if self.substitute.is_active() || self.flags.mist {
            return None;
        }
        Some(self.modify_stat_stage_as_primary(stat, delta))
    }

    /// Haze resets both sides and cures the opponent's status.
    pub fn activate_haze(&mut self, opponent: &mut Combatant) {
        self.publish(BattleEventKind::HazeActivated);
        self.clear_stat_changes_for_haze();
        opponent.clear_stat_changes_for_haze();
        if !opponent.is_fainted() {
            opponent.clear_status();
        }
    }

    /// Stages back to zero and most volatile effects removed.
    fn clear_stat_changes_for_haze(&mut self) {
        self.stat_stages.reset();
        self.confusion_turns = 0;
        self.flags.seeded = false;
        self.flags.mist = false;
        self.flags.reflect = false;
        self.flags.light_screen = false;
        self.flags.focus_energy = false;
        self.flags.paralysis_speed_drop = false;
        self.flags.burn_attack_drop = false;
        self.disable.deactivate();
        self.pokemon.change_badly_poison_to_poison();
        self.status_damage_multiplier = 1;
    }

    // === Volatile conditions ===

    /// Pay a quarter of max HP for a decoy. Fails if one is up or the cost would faint.
    pub fn activate_substitute(&mut self) -> bool {
        let cost = self.max_hp() / self.config.substitute_cost_divisor;
        if self.substitute.is_active() || cost == 0 || self.hp() <= cost {
            return false;
        }
        self.pokemon.take_damage(cost);
        self.relay_creature_events();
        self.substitute.activate(cost);
        debug!(combatant = %self.label, hp = cost, "substitute up");
        self.publish(BattleEventKind::SubstituteActivated { hp: cost });
        true
    }

    /// Copy the target's typing, stats, stat stages and moves. Copied moves start at full PP.
    pub fn activate_transform(&mut self, target: &Combatant) -> BattleResult<()> {
        let moves = target.move_ids();
        let mut slots = [None; 4];
        for (slot, move_) in slots.iter_mut().zip(moves.iter()) {
            if let Some(move_) = move_ {
                *slot = Some(BattleMoveSlot::Borrowed(MoveInstance::new(*move_)?));
            }
        }
        let form = TransformedForm {
            into: target.name().to_string(),
            typing: target.typing(),
            stats: target.unmodified_stats(),
            moves,
        };
        self.moves = slots;
        self.stat_stages = target.stat_stages.clone();
        let into = form.into.clone();
        self.transform.activate(form);
        debug!(combatant = %self.label, %into, "transformed");
        self.publish(BattleEventKind::TransformActivated { into });
        Ok(())
    }

    pub fn activate_conversion(&mut self, target: &Combatant) {
        let typing = target.typing();
        self.conversion.activate(typing);
        self.publish(BattleEventKind::ConversionActivated { typing });
    }

    pub fn activate_disable(&mut self, move_disabled: Move, turns: u8) {
        self.disable.activate(move_disabled, turns);
        debug!(combatant = %self.label, %move_disabled, turns, "disabled");
        self.publish(BattleEventKind::Disabled {
            move_disabled,
            turns,
        });
    }

    pub fn activate_bide(&mut self) {
        self.bide.activate(self.config.bide_turns);
    }

    /// Returns true once the storing period has run out.
    pub fn tick_bide(&mut self) -> bool {
        self.bide.tick()
    }

    pub fn deactivate_bide(&mut self) {
        self.bide.deactivate();
    }

    /// Returns false if already seeded.
    pub fn activate_leech_seed(&mut self) -> bool {
        if self.flags.seeded {
            return false;
        }
        self.flags.seeded = true;
        self.publish(BattleEventKind::LeechSeedActivated);
        true
    }

    pub fn activate_mist(&mut self) -> bool {
        if self.flags.mist {
            return false;
        }
        self.flags.mist = true;
        self.publish(BattleEventKind::MistActivated);
        true
    }

    pub fn activate_reflect(&mut self) -> bool {
        if self.flags.reflect {
            return false;
        }
        self.flags.reflect = true;
        self.publish(BattleEventKind::ReflectActivated);
        true
    }

    pub fn activate_light_screen(&mut self) -> bool {
        if self.flags.light_screen {
            return false;
        }
        self.flags.light_screen = true;
        self.publish(BattleEventKind::LightScreenActivated);
        true
    }

    pub fn activate_focus_energy(&mut self) -> bool {
        if self.flags.focus_energy {
            return false;
        }
        self.flags.focus_energy = true;
        self.publish(BattleEventKind::FocusEnergyActivated);
        true
    }

    pub fn activate_partial_trapping(&mut self) {
        self.flags.partially_trapped = true;
        self.flags.trapping_ends_this_turn = false;
        self.publish(BattleEventKind::PartiallyTrapped);
    }

    /// The trap lets go once the current turn is over.
    pub fn deactivate_partial_trapping_at_end_of_turn(&mut self) {
        if self.flags.partially_trapped {
            self.flags.trapping_ends_this_turn = true;
        }
    }

    /// Immediate release, used when the trapper leaves battle.
    pub fn release_partial_trapping(&mut self) {
        self.flags.partially_trapped = false;
        self.flags.trapping_ends_this_turn = false;
    }

    pub(crate) fn set_semi_invulnerable(&mut self, semi_invulnerable: bool) {
        self.flags.semi_invulnerable = semi_invulnerable;
    }

    pub(crate) fn start_two_turn(&mut self, move_: Move) {
        self.two_turn = Some(TwoTurnState { move_ });
    }

    pub(crate) fn end_two_turn(&mut self) {
        self.two_turn = None;
    }

    pub(crate) fn set_multi_turn(&mut self, state: Option<MultiTurnState>) {
        self.multi_turn = state;
    }

    /// A self-inflicted confusion hit ends a thrash without the fatigue confusion.
    fn disrupt_thrashing(&mut self) {
        if let Some(MultiTurnState::Thrashing { .. }) = self.multi_turn {
            self.multi_turn = None;
        }
    }

    /// Replace the move in `slot` with the opponent's last move, or its first move if it
    /// has not moved yet. Returns the copied move, or `None` when there is nothing to copy.
    pub fn mimic_move(&mut self, slot: usize, opponent: &Combatant) -> BattleResult<Option<Move>> {
        let Some(copied) = opponent.last_move_used().or_else(|| opponent.move_in_slot(0)) else {
            return Ok(None);
        };
        assert!(slot < self.moves.len(), "mimic into invalid slot {}", slot);
        self.moves[slot] = Some(BattleMoveSlot::Borrowed(MoveInstance::new(copied)?));
        self.publish(BattleEventKind::Mimicked {
            move_copied: copied,
        });
        Ok(Some(copied))
    }

    // === Switching ===

    /// Send `incoming` out in place of the current creature, which is handed back.
    pub fn switch_out(&mut self, incoming: PokemonInst) -> PokemonInst {
        self.publish(BattleEventKind::SwitchedOut {
            incoming: incoming.name.clone(),
        });
        self.pokemon.change_badly_poison_to_poison();
        self.relay_creature_events();
        self.pokemon.unsubscribe(self.link.subscription);

        let outgoing = std::mem::replace(&mut self.pokemon, incoming);
        self.link = Self::attach(&mut self.pokemon);
        self.moves = Self::native_slots(&self.pokemon);

        self.two_turn = None;
        self.multi_turn = None;
        self.flags.switched_this_turn = true;
        self.flags.seeded = false;
        self.flags.semi_invulnerable = false;
        self.flags.flinching = false;
        self.flags.mist = false;
        self.flags.reflect = false;
        self.flags.light_screen = false;
        self.flags.focus_energy = false;
        self.flags.partially_trapped = false;
        self.flags.trapping_ends_this_turn = false;
        self.conversion.deactivate();
        self.substitute.deactivate();
        self.transform.deactivate();
        self.bide.deactivate();
        self.disable.deactivate();
        self.confusion_turns = 0;
        self.stat_stages.reset();
        self.status_damage_multiplier = 1;
        self.derive_status_flags();

        debug!(
            combatant = %self.label,
            outgoing = %outgoing.name,
            incoming = %self.pokemon.name,
            "switched out"
        );
        outgoing
    }

    /// Hand back the creature currently on the field, for end-of-battle bookkeeping.
    pub fn into_pokemon(mut self) -> PokemonInst {
        self.pokemon.unsubscribe(self.link.subscription);
        self.pokemon
    }
}
