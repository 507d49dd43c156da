use crate::battle::events::{EventChannel, SubscriptionId};
use crate::errors::MoveDataResult;
use crate::move_data::get_move_max_pp;
use schema::{Move, StatusType, Typing};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_LEVEL: u8 = 100;

/// Persistent status carried by a creature across switches. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Sleep,
    Poison,
    BadlyPoisoned,
    Burn,
    Freeze,
    Paralysis,
    Faint,
}

impl StatusCondition {
    /// Short label shown next to the HP bar.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StatusCondition::Sleep => "SLP",
            StatusCondition::Poison | StatusCondition::BadlyPoisoned => "PSN",
            StatusCondition::Burn => "BRN",
            StatusCondition::Freeze => "FRZ",
            StatusCondition::Paralysis => "PAR",
            StatusCondition::Faint => "FNT",
        }
    }
}

impl From<StatusType> for StatusCondition {
    fn from(status: StatusType) -> Self {
        match status {
            StatusType::Burn => StatusCondition::Burn,
            StatusType::Freeze => StatusCondition::Freeze,
            StatusType::Paralysis => StatusCondition::Paralysis,
            StatusType::Poison => StatusCondition::Poison,
            StatusType::BadlyPoison => StatusCondition::BadlyPoisoned,
            StatusType::Sleep => StatusCondition::Sleep,
        }
    }
}

/// Notifications a creature publishes about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PokemonEvent {
    Burned,
    Frozen,
    Paralyzed,
    Poisoned,
    BadlyPoisoned,
    FellAsleep,
    StatusCleared { previous: StatusCondition },
    Fainted,
    LeveledUp { level: u8 },
    GainedExp { amount: u32 },
    GainedHp { amount: u16 },
    LostHp { amount: u16 },
}

impl PokemonEvent {
    pub fn format(&self, name: &str) -> Option<String> {
        let text = match self {
            PokemonEvent::Burned => format!("{} was burned!", name),
            PokemonEvent::Frozen => format!("{} was frozen solid!", name),
            PokemonEvent::Paralyzed => format!("{}'s paralyzed! It may not attack!", name),
            PokemonEvent::Poisoned => format!("{} was poisoned!", name),
            PokemonEvent::BadlyPoisoned => format!("{} was badly poisoned!", name),
            PokemonEvent::FellAsleep => format!("{} fell asleep!", name),
            PokemonEvent::StatusCleared { previous } => match previous {
                StatusCondition::Freeze => format!("{} was defrosted!", name),
                StatusCondition::Sleep => return None,
                _ => format!("{} was cured!", name),
            },
            PokemonEvent::Fainted => format!("{} fainted!", name),
            PokemonEvent::LeveledUp { level } => format!("{} grew to level {}!", name, level),
            PokemonEvent::GainedExp { amount } => {
                format!("{} gained {} EXP. Points!", name, amount)
            }
            PokemonEvent::GainedHp { .. } | PokemonEvent::LostHp { .. } => return None,
        };
        Some(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(move_: Move) -> MoveDataResult<Self> {
        let max_pp = get_move_max_pp(move_)?;
        Ok(MoveInstance {
            move_,
            pp: max_pp,
            max_pp,
        })
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    /// Restore PP
    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.max_pp);
    }
}

/// The persistent creature. Its HP, status and PP outlive any single stint in battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub level: u8,
    pub typing: Typing,
    pub stats: StatBlock,
    /// Species base speed; drives the critical-hit rate.
    pub base_speed: u8,
    pub moves: [Option<MoveInstance>; 4],
    exp: u32,
    current_hp: u16,
    status: Option<StatusCondition>,
    /// Turns left before a sleeping creature wakes. Travels with the creature when benched.
    #[serde(default)]
    sleep_turns: u8,
    #[serde(skip)]
    events: EventChannel<PokemonEvent>,
}

impl PokemonInst {
    /// Create a creature at full HP. Only the first four moves are kept.
    pub fn new(
        name: impl Into<String>,
        level: u8,
        typing: Typing,
        stats: StatBlock,
        base_speed: u8,
        moves: &[Move],
    ) -> MoveDataResult<Self> {
        let mut slots = [None; 4];
        for (slot, move_) in slots.iter_mut().zip(moves.iter()) {
            *slot = Some(MoveInstance::new(*move_)?);
        }
        let level = level.clamp(1, MAX_LEVEL);
        Ok(Self {
            name: name.into(),
            level,
            typing,
            stats,
            base_speed,
            moves: slots,
            exp: exp_for_level(level),
            current_hp: stats.hp,
            status: None,
            sleep_turns: 0,
            events: EventChannel::new(),
        })
    }

    /// Pre-battle setup: start at the given HP without publishing anything.
    pub fn with_current_hp(mut self, hp: u16) -> Self {
        self.current_hp = hp.min(self.stats.hp);
        if self.current_hp == 0 {
            self.status = Some(StatusCondition::Faint);
        }
        self
    }

    /// Pre-battle setup: start with a status without publishing anything.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        if status == StatusCondition::Faint {
            self.current_hp = 0;
        }
        self.status = Some(status);
        self
    }

    // --- Read access ---

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn status(&self) -> Option<StatusCondition> {
        self.status
    }

    pub fn sleep_turns(&self) -> u8 {
        self.sleep_turns
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0 || self.status == Some(StatusCondition::Faint)
    }

    pub fn move_ids(&self) -> [Option<Move>; 4] {
        self.moves.map(|slot| slot.map(|instance| instance.move_))
    }

    // --- Notifications ---

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&PokemonEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn publish(&mut self, event: PokemonEvent) {
        self.events.publish(&event);
    }

    // --- Mutators ---

    /// Apply damage and return whether the creature fainted from it.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        if self.is_fainted() || amount == 0 {
            return false;
        }
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        self.publish(PokemonEvent::LostHp { amount: dealt });
        if self.current_hp == 0 {
            self.status = Some(StatusCondition::Faint);
            self.publish(PokemonEvent::Fainted);
            return true;
        }
        false
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn restore_hp(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let restored = amount.min(self.max_hp() - self.current_hp);
        if restored > 0 {
            self.current_hp += restored;
            self.publish(PokemonEvent::GainedHp { amount: restored });
        }
        restored
    }

    /// Set a persistent status. Fails when one is already present.
    pub fn inflict_status(&mut self, status: StatusCondition) -> bool {
        if self.status.is_some() || status == StatusCondition::Faint {
            return false;
        }
        self.status = Some(status);
        let event = match status {
            StatusCondition::Burn => PokemonEvent::Burned,
            StatusCondition::Freeze => PokemonEvent::Frozen,
            StatusCondition::Paralysis => PokemonEvent::Paralyzed,
            StatusCondition::Poison => PokemonEvent::Poisoned,
            StatusCondition::BadlyPoisoned => PokemonEvent::BadlyPoisoned,
            StatusCondition::Sleep => PokemonEvent::FellAsleep,
            StatusCondition::Faint => unreachable!("fainting goes through take_damage"),
        };
        self.publish(event);
        true
    }

    /// Remove any non-faint status.
    pub fn clear_status(&mut self) -> bool {
        match self.status {
            Some(StatusCondition::Faint) | None => false,
            Some(previous) => {
                self.status = None;
                self.sleep_turns = 0;
                self.publish(PokemonEvent::StatusCleared { previous });
                true
            }
        }
    }

    /// Set the sleep countdown. Ignored unless the creature is asleep.
    pub fn set_sleep_turns(&mut self, turns: u8) {
        if self.status == Some(StatusCondition::Sleep) {
            self.sleep_turns = turns;
        }
    }

    /// Count one turn of sleep down.
    pub fn tick_sleep(&mut self) {
        self.sleep_turns = self.sleep_turns.saturating_sub(1);
    }

    /// Badly poisoned reverts to regular poison when leaving battle.
    pub fn change_badly_poison_to_poison(&mut self) {
        if self.status == Some(StatusCondition::BadlyPoisoned) {
            self.status = Some(StatusCondition::Poison);
        }
    }

    /// Add experience, levelling up along the medium-fast curve.
    pub fn gain_exp(&mut self, amount: u32) {
        if amount == 0 || self.level >= MAX_LEVEL {
            return;
        }
        self.exp = self.exp.saturating_add(amount);
        self.publish(PokemonEvent::GainedExp { amount });
        while self.level < MAX_LEVEL && self.exp >= exp_for_level(self.level + 1) {
            self.level += 1;
            self.publish(PokemonEvent::LeveledUp { level: self.level });
        }
    }
}

/// Total experience needed to reach `level` on the medium-fast curve.
pub fn exp_for_level(level: u8) -> u32 {
    u32::from(level).pow(3)
}

impl fmt::Display for PokemonInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Lv.{} {}/{}",
            self.name,
            self.level,
            self.current_hp,
            self.max_hp()
        )?;
        if let Some(status) = self.status {
            write!(f, " {}", status.abbreviation())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::PokemonType;
    use std::sync::{Arc, Mutex};

    fn pikachu() -> PokemonInst {
        PokemonInst::new(
            "Pikachu",
            25,
            Typing::single(PokemonType::Electric),
            StatBlock {
                hp: 60,
                attack: 40,
                defense: 30,
                special: 40,
                speed: 70,
            },
            90,
            &[Move::ThunderShock, Move::Growl],
        )
        .unwrap()
    }

    fn record(pokemon: &mut PokemonInst) -> Arc<Mutex<Vec<PokemonEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        pokemon.subscribe(move |event: &PokemonEvent| sink.lock().unwrap().push(event.clone()));
        log
    }

    #[test]
    fn test_new_pokemon_starts_healthy_with_full_pp() {
        let pokemon = pikachu();
        assert_eq!(pokemon.current_hp(), 60);
        assert_eq!(pokemon.status(), None);
        assert_eq!(pokemon.moves[0].unwrap().pp, 30);
        assert_eq!(pokemon.moves[1].unwrap().move_, Move::Growl);
        assert!(pokemon.moves[2].is_none());
        assert_eq!(pokemon.exp(), exp_for_level(25));
    }

    #[test]
    fn test_take_damage_faints_at_zero() {
        let mut pokemon = pikachu();
        let log = record(&mut pokemon);

        assert!(!pokemon.take_damage(20));
        assert!(pokemon.take_damage(100));
        assert_eq!(pokemon.current_hp(), 0);
        assert_eq!(pokemon.status(), Some(StatusCondition::Faint));
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                PokemonEvent::LostHp { amount: 20 },
                PokemonEvent::LostHp { amount: 40 },
                PokemonEvent::Fainted
            ]
        );
    }

    #[test]
    fn test_status_is_exclusive() {
        let mut pokemon = pikachu();
        assert!(pokemon.inflict_status(StatusCondition::Burn));
        assert!(!pokemon.inflict_status(StatusCondition::Paralysis));
        assert_eq!(pokemon.status(), Some(StatusCondition::Burn));
        assert!(pokemon.clear_status());
        assert!(pokemon.inflict_status(StatusCondition::Paralysis));
    }

    #[test]
    fn test_restore_hp_caps_at_max() {
        let mut pokemon = pikachu().with_current_hp(50);
        let log = record(&mut pokemon);
        assert_eq!(pokemon.restore_hp(30), 10);
        assert_eq!(pokemon.restore_hp(30), 0);
        assert_eq!(*log.lock().unwrap(), vec![PokemonEvent::GainedHp { amount: 10 }]);
    }

    #[test]
    fn test_gain_exp_levels_up() {
        let mut pokemon = pikachu();
        let log = record(&mut pokemon);
        let needed = exp_for_level(27) - pokemon.exp();
        pokemon.gain_exp(needed);
        assert_eq!(pokemon.level, 27);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                PokemonEvent::GainedExp { amount: needed },
                PokemonEvent::LeveledUp { level: 26 },
                PokemonEvent::LeveledUp { level: 27 }
            ]
        );
    }

    #[test]
    fn test_badly_poison_reverts_silently() {
        let mut pokemon = pikachu().with_status(StatusCondition::BadlyPoisoned);
        let log = record(&mut pokemon);
        pokemon.change_badly_poison_to_poison();
        assert_eq!(pokemon.status(), Some(StatusCondition::Poison));
        assert_eq!(StatusCondition::Poison.abbreviation(), "PSN");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sleep_countdown_belongs_to_a_sleeping_creature() {
        let mut pokemon = pikachu();
        pokemon.set_sleep_turns(3);
        assert_eq!(pokemon.sleep_turns(), 0);

        assert!(pokemon.inflict_status(StatusCondition::Sleep));
        pokemon.set_sleep_turns(3);
        pokemon.tick_sleep();
        assert_eq!(pokemon.sleep_turns(), 2);

        assert!(pokemon.clear_status());
        assert_eq!(pokemon.sleep_turns(), 0);
    }
}
