use crate::battle::combatant::Combatant;
use crate::battle::events::{BattleEventKind, EventBus, MoveSignal};
use crate::config::BattleConfig;
use crate::pokemon::{PokemonEvent, PokemonInst, StatBlock, StatusCondition};
use schema::{Move, PokemonType, Typing};

/// RNG script for one landed, non-critical, full-damage hit of a move that rolls accuracy.
pub const CLEAN_HIT: [u8; 3] = [1, 100, 255];

/// A builder for test creatures with common defaults: level 50, Normal type, 100 HP,
/// 80 attack, 60 defense, 70 special, 90 speed, base speed 90, Tackle only.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_moves(vec![Move::ThunderShock])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    typing: Typing,
    stats: StatBlock,
    base_speed: u8,
    moves: Vec<Move>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 50,
            typing: Typing::single(PokemonType::Normal),
            stats: StatBlock {
                hp: 100,
                attack: 80,
                defense: 60,
                special: 70,
                speed: 90,
            },
            base_speed: 90,
            moves: vec![Move::Tackle],
            status: None,
            current_hp: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_max_hp(mut self, hp: u16) -> Self {
        self.stats.hp = hp;
        self
    }

    pub fn with_type(mut self, typing: Typing) -> Self {
        self.typing = typing;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn build(self) -> PokemonInst {
        let mut pokemon = match PokemonInst::new(
            self.name.clone(),
            self.level,
            self.typing,
            self.stats,
            self.base_speed,
            &self.moves,
        ) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test Pokemon {}: {}", self.name, err),
        };
        if let Some(hp) = self.current_hp {
            pokemon = pokemon.with_current_hp(hp);
        }
        if let Some(status) = self.status {
            pokemon = pokemon.with_status(status);
        }
        pokemon
    }
}

/// Put a creature on the field with the default config and an event recorder attached.
pub fn combatant(label: &str, pokemon: PokemonInst) -> (Combatant, EventBus) {
    combatant_with_config(label, pokemon, BattleConfig::default())
}

pub fn combatant_with_config(
    label: &str,
    pokemon: PokemonInst,
    config: BattleConfig,
) -> (Combatant, EventBus) {
    let mut combatant = Combatant::new(label, pokemon, config);
    let bus = EventBus::new();
    combatant.subscribe(bus.observer());
    (combatant, bus)
}

/// Event kinds from `bus`, without the HP bookkeeping noise.
pub fn significant_kinds(bus: &EventBus) -> Vec<BattleEventKind> {
    bus.kinds()
        .into_iter()
        .filter(|kind| {
            !matches!(
                kind,
                BattleEventKind::Creature(PokemonEvent::LostHp { .. })
                    | BattleEventKind::Creature(PokemonEvent::GainedHp { .. })
            )
        })
        .collect()
}

pub fn move_signals(bus: &EventBus) -> Vec<MoveSignal> {
    bus.kinds()
        .into_iter()
        .filter_map(|kind| match kind {
            BattleEventKind::Move { signal, .. } => Some(signal),
            _ => None,
        })
        .collect()
}
