use schema::Move;
use thiserror::Error;

/// Main error type for the battle-state engine.
///
/// Simulated outcomes (a move missing, a creature too asleep to act) are never errors;
/// they are reported through the event channels. These variants cover bad data,
/// bad configuration and illegal requests from whoever drives the battle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the baked move table
    #[error("Move not found: {0:?}")]
    MoveNotFound(Move),
    /// The baked bytes for a move failed to decode
    #[error("Malformed move data for {move_:?}: {reason}")]
    MalformedData { move_: Move, reason: String },
}

/// Errors raised while loading or validating a `BattleConfig`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid range for {field}: {min}..={max}")]
    InvalidRange { field: &'static str, min: u8, max: u8 },
    #[error("Invalid chance for {field}: {value} (must be 0..=100)")]
    InvalidChance { field: &'static str, value: u8 },
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: u16 },
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A side was created without any creatures
    #[error("Team is empty")]
    EmptyTeam,
    /// A side was created with more than six creatures
    #[error("Team has {0} members, at most 6 are allowed")]
    TeamTooLarge(usize),
    /// Every creature on the leading team slot has fainted before the battle began
    #[error("Team has no usable Pokemon")]
    NoUsablePokemon,
    /// Invalid side index
    #[error("Invalid side index: {0}")]
    InvalidSideIndex(usize),
    /// A turn was requested after one side ran out of usable creatures
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("No PP remaining for move in slot {0}")]
    NoPpRemaining(usize),
    #[error("Invalid Pokemon index: {0}")]
    InvalidPokemonIndex(usize),
    #[error("Pokemon at index {0} has fainted")]
    PokemonFainted(usize),
    #[error("Pokemon at index {0} is already in battle")]
    AlreadyActive(usize),
    #[error("Cannot switch while partially trapped")]
    Trapped,
    #[error("Active Pokemon has fainted and must be replaced")]
    ReplacementRequired,
    #[error("No replacement is required")]
    NoReplacementRequired,
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for move data operations
pub type MoveDataResult<T> = Result<T, MoveDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_and_display() {
        let err: BattleEngineError = MoveDataError::MoveNotFound(Move::Tackle).into();
        assert_eq!(err.to_string(), "Move data error: Move not found: Tackle");

        let err: BattleEngineError = ActionError::NoPpRemaining(2).into();
        assert_eq!(err.to_string(), "Action error: No PP remaining for move in slot 2");
    }
}
