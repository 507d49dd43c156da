// Battle State Schema - Shared type definitions
// This crate contains the enums and data structs that are shared between
// the main pokemon-battle-state crate and its build script, so that move
// data can be baked into the binary with postcard.

// Re-export the main types
pub use move_types::*;
pub use moves::*;
pub use pokemon_types::*;
pub use strum::IntoEnumIterator;

pub mod move_types;
pub mod moves;
pub mod pokemon_types;
