// In: src/lib.rs

//! Pokemon Battle State Engine
//!
//! The per-combatant state machine of a first-generation Pokemon battle: stat stages,
//! volatile conditions, the turn-resolution protocol and the damage and status entry
//! points, plus a small two-sided orchestrator to drive it. Move data is baked in at
//! compile time from `data/moves.ron`.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod pokemon;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Move, MoveData, MoveFamily, PokemonType, SecondaryEffect, StatType, StatusType, Target,
    Typing,
};

// --- From this crate's modules (`src/`) ---

// Core battle types.
pub use battle::combatant::{Combatant, TurnOutcome};
pub use battle::events::{BattleEvent, BattleEventKind, BlockReason, EventBus, MoveSignal};
pub use battle::rng::TurnRng;
pub use battle::turn_orchestrator::{Battle, BattleSide, GameState, PlayerAction, TurnSummary};

// Creatures and configuration.
pub use config::BattleConfig;
pub use pokemon::{MoveInstance, PokemonEvent, PokemonInst, StatBlock, StatusCondition};

// Primary data access functions.
pub use move_data::{get_move_data, get_move_max_pp};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, MoveDataError,
    MoveDataResult,
};
