use crate::pokemon::{PokemonEvent, StatusCondition};
use schema::{Move, StatType, Typing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// === Observer channel ===

/// Handle returned by `EventChannel::subscribe`, used to detach later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<E> = Box<dyn FnMut(&E) + Send>;

/// A synchronous observer list. `publish` calls every observer in the order they were
/// attached before returning. Observers must not reach back into the publisher.
pub struct EventChannel<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<E>)>,
}

impl<E> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&E) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when `id` was not attached.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, event: &E) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning yields an empty channel; subscriptions belong to the original.
impl<E> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.observers.len())
            .finish()
    }
}

// === Move outcome vocabulary ===

/// What a move reports about its own execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSignal {
    Used,
    Failed,
    Missed,
    NoEffect,
    SuperEffective,
    NotVeryEffective,
    CriticalHit,
    OneHitKo,
    PayDayTriggered,
    ChargingFirstTurn,
    FlewUpHigh,
    DugAHole,
    BidingTime,
    BideUnleashed,
    AttackContinues,
    HitMultipleTimes(u8),
    CrashDamage,
    HurtByRecoil,
    ThrashingAbout,
    Recharging,
    SuckedHealth,
    RegainedHealth,
}

// === Combatant events ===

/// Why a combatant could not carry out its selected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    FastAsleep,
    WokeUp,
    FrozenSolid,
    FullyParalyzed,
    HurtItselfInConfusion,
    Flinched,
    MoveDisabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventKind {
    /// A notification from the underlying creature, relayed.
    Creature(PokemonEvent),
    Move { move_used: Move, signal: MoveSignal },
    SwitchedOut { incoming: String },
    StatStageChanged { stat: StatType, delta: i8, stage: i8 },
    StatStageUnchanged { stat: StatType, delta: i8 },
    SubstituteActivated { hp: u16 },
    SubstituteBroke,
    ConversionActivated { typing: Typing },
    TransformActivated { into: String },
    LeechSeedActivated,
    LeechSeedSaps { damage: u16, restored: u16 },
    BecameConfused,
    Confused,
    ConfusedByFatigue,
    ConfusionWoreOff,
    HurtFromConfusion { damage: u16 },
    Flinched,
    FullyParalyzed,
    FrozenSolid,
    FastAsleep,
    WokeUp,
    Disabled { move_disabled: Move, turns: u8 },
    DisableWoreOff { move_disabled: Move },
    DisabledMoveAttempted { move_attempted: Move },
    Mimicked { move_copied: Move },
    StatusDamage { status: StatusCondition, damage: u16 },
    MistActivated,
    ReflectActivated,
    LightScreenActivated,
    FocusEnergyActivated,
    HazeActivated,
    PartiallyTrapped,
    TrappedCannotMove,
}

/// A combatant notification, attributed to the combatant and its current creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub combatant: String,
    pub pokemon: String,
    pub kind: BattleEventKind,
}

impl BattleEvent {
    /// Human readable text for this event, or `None` for events that are silent.
    pub fn format(&self) -> Option<String> {
        let name = &self.pokemon;
        let text = match &self.kind {
            BattleEventKind::Creature(event) => return event.format(name),
            BattleEventKind::Move { move_used, signal } => {
                return Self::format_move_signal(name, *move_used, *signal)
            }
            BattleEventKind::SwitchedOut { incoming } => {
                format!("{} withdrew {} and sent out {}!", self.combatant, name, incoming)
            }
            BattleEventKind::StatStageChanged { stat, delta, .. } => {
                let amount = match delta {
                    d if *d >= 2 => "greatly rose",
                    d if *d > 0 => "rose",
                    d if *d <= -2 => "greatly fell",
                    _ => "fell",
                };
                format!("{}'s {} {}!", name, stat, amount)
            }
            BattleEventKind::StatStageUnchanged { .. } => "Nothing happened!".to_string(),
            BattleEventKind::SubstituteActivated { .. } => {
                format!("{} made a substitute!", name)
            }
            BattleEventKind::SubstituteBroke => format!("{}'s substitute broke!", name),
            BattleEventKind::ConversionActivated { typing } => {
                format!("{} converted to {} type!", name, typing)
            }
            BattleEventKind::TransformActivated { into } => {
                format!("{} transformed into {}!", name, into)
            }
            BattleEventKind::LeechSeedActivated => format!("{} was seeded!", name),
            BattleEventKind::LeechSeedSaps { .. } => {
                format!("Leech Seed saps {}!", name)
            }
            BattleEventKind::BecameConfused => format!("{} became confused!", name),
            BattleEventKind::Confused => format!("{} is confused!", name),
            BattleEventKind::ConfusedByFatigue => {
                format!("{} became confused due to fatigue!", name)
            }
            BattleEventKind::ConfusionWoreOff => format!("{} is confused no more!", name),
            BattleEventKind::HurtFromConfusion { .. } => {
                "It hurt itself in its confusion!".to_string()
            }
            BattleEventKind::Flinched => format!("{} flinched!", name),
            BattleEventKind::FullyParalyzed => format!("{} is fully paralyzed!", name),
            BattleEventKind::FrozenSolid => format!("{} is frozen solid!", name),
            BattleEventKind::FastAsleep => format!("{} is fast asleep!", name),
            BattleEventKind::WokeUp => format!("{} woke up!", name),
            BattleEventKind::Disabled { move_disabled, .. } => {
                format!("{}'s {} was disabled!", name, move_disabled)
            }
            BattleEventKind::DisableWoreOff { .. } => {
                format!("{} is disabled no more!", name)
            }
            BattleEventKind::DisabledMoveAttempted { move_attempted } => {
                format!("{}'s {} is disabled!", name, move_attempted)
            }
            BattleEventKind::Mimicked { move_copied } => {
                format!("{} learned {}!", name, move_copied)
            }
            BattleEventKind::StatusDamage { status, .. } => match status {
                StatusCondition::Burn => format!("{}'s hurt by the burn!", name),
                _ => format!("{}'s hurt by poison!", name),
            },
            BattleEventKind::MistActivated => format!("{}'s shrouded in mist!", name),
            BattleEventKind::ReflectActivated => {
                format!("{} gained armor!", name)
            }
            BattleEventKind::LightScreenActivated => {
                format!("{}'s protected against special attacks!", name)
            }
            BattleEventKind::FocusEnergyActivated => format!("{}'s getting pumped!", name),
            BattleEventKind::HazeActivated => "All status changes were eliminated!".to_string(),
            BattleEventKind::PartiallyTrapped => format!("{} can't escape!", name),
            BattleEventKind::TrappedCannotMove => format!("{} can't move!", name),
        };
        Some(text)
    }

    fn format_move_signal(name: &str, move_used: Move, signal: MoveSignal) -> Option<String> {
        let text = match signal {
            MoveSignal::Used => format!("{} used {}!", name, move_used),
            MoveSignal::Failed => "But, it failed!".to_string(),
            MoveSignal::Missed => format!("{}'s attack missed!", name),
            MoveSignal::NoEffect => "It doesn't affect the target...".to_string(),
            MoveSignal::SuperEffective => "It's super effective!".to_string(),
            MoveSignal::NotVeryEffective => "It's not very effective...".to_string(),
            MoveSignal::CriticalHit => "Critical hit!".to_string(),
            MoveSignal::OneHitKo => "One-hit KO!".to_string(),
            MoveSignal::PayDayTriggered => "Coins scattered everywhere!".to_string(),
            MoveSignal::ChargingFirstTurn => match move_used {
                Move::SolarBeam => format!("{} took in sunlight!", name),
                Move::SkullBash => format!("{} lowered its head!", name),
                Move::SkyAttack => format!("{} is glowing!", name),
                _ => format!("{} made a whirlwind!", name),
            },
            MoveSignal::FlewUpHigh => format!("{} flew up high!", name),
            MoveSignal::DugAHole => format!("{} dug a hole!", name),
            MoveSignal::BidingTime => format!("{} is storing energy!", name),
            MoveSignal::BideUnleashed => format!("{} unleashed energy!", name),
            MoveSignal::AttackContinues => format!("{}'s attack continues!", name),
            MoveSignal::HitMultipleTimes(hits) => format!("Hit {} times!", hits),
            MoveSignal::CrashDamage => format!("{} kept going and crashed!", name),
            MoveSignal::HurtByRecoil => format!("{}'s hit with recoil!", name),
            MoveSignal::ThrashingAbout => format!("{}'s thrashing about!", name),
            MoveSignal::Recharging => format!("{} must recharge!", name),
            MoveSignal::SuckedHealth => "Sucked health from the target!".to_string(),
            MoveSignal::RegainedHealth => format!("{} regained health!", name),
        };
        Some(text)
    }
}

// === Collecting observer ===

/// A cloneable, shared event log. Subscribe `observer()` to one or more combatants and
/// read the collected events back in delivery order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Arc<Mutex<Vec<BattleEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BattleEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// An observer that appends every event it receives to this bus.
    pub fn observer(&self) -> impl FnMut(&BattleEvent) + Send + 'static {
        let events = Arc::clone(&self.events);
        move |event: &BattleEvent| {
            events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        }
    }

    pub fn push(&self, event: BattleEvent) {
        self.lock().push(event);
    }

    /// Snapshot of every event received so far.
    pub fn events(&self) -> Vec<BattleEvent> {
        self.lock().clone()
    }

    pub fn kinds(&self) -> Vec<BattleEventKind> {
        self.lock().iter().map(|event| event.kind.clone()).collect()
    }

    /// Removes and returns every event received so far.
    pub fn drain(&self) -> Vec<BattleEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in self.lock().iter() {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.lock().iter() {
            if let Some(text) = event.format() {
                writeln!(f, "{}", text)?;
            }
        }
        Ok(())
    }
}
