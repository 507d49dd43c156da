pub mod calculators;
pub mod combatant;
pub mod conditions;
pub mod events;
pub mod move_effects;
pub mod rng;
pub mod stats;
pub mod turn_orchestrator;

#[cfg(test)]
mod tests;
