//! Volatile battle conditions. Each is a small state machine owned by a combatant and
//! cleared when its creature leaves battle.

use crate::pokemon::StatBlock;
use schema::{Move, Typing};
use serde::{Deserialize, Serialize};

// --- Substitute ---

/// A decoy with its own HP pool that absorbs incoming damage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitute {
    hp: Option<u16>,
    broke_this_turn: bool,
}

impl Substitute {
    pub fn activate(&mut self, hp: u16) {
        assert!(hp > 0, "a substitute needs at least 1 HP");
        self.hp = Some(hp);
        self.broke_this_turn = false;
    }

    pub fn deactivate(&mut self) {
        self.hp = None;
    }

    pub fn is_active(&self) -> bool {
        self.hp.is_some()
    }

    pub fn hp(&self) -> Option<u16> {
        self.hp
    }

    /// Damage the decoy. Excess damage does not carry over. Returns true if it broke.
    pub fn damage(&mut self, amount: u16) -> bool {
        let Some(hp) = self.hp else {
            return false;
        };
        let remaining = hp.saturating_sub(amount);
        if remaining == 0 {
            self.hp = None;
            self.broke_this_turn = true;
            true
        } else {
            self.hp = Some(remaining);
            false
        }
    }

    pub fn broke_this_turn(&self) -> bool {
        self.broke_this_turn
    }

    pub fn end_turn(&mut self) {
        self.broke_this_turn = false;
    }
}

// --- Transform ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedForm {
    pub into: String,
    pub typing: Typing,
    /// Copied stats. The `hp` field is never consulted.
    pub stats: StatBlock,
    pub moves: [Option<Move>; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    form: Option<TransformedForm>,
}

impl Transform {
    pub fn activate(&mut self, form: TransformedForm) {
        self.form = Some(form);
    }

    pub fn deactivate(&mut self) {
        self.form = None;
    }

    pub fn is_active(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&TransformedForm> {
        self.form.as_ref()
    }
}

// --- Bide ---

/// Stores damage taken over a fixed number of turns, then returns it doubled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bide {
    turns_left: Option<u8>,
    damage: u16,
}

impl Bide {
    pub fn activate(&mut self, turns: u8) {
        self.turns_left = Some(turns);
        self.damage = 0;
    }

    pub fn deactivate(&mut self) {
        self.turns_left = None;
        self.damage = 0;
    }

    pub fn is_active(&self) -> bool {
        self.turns_left.is_some()
    }

    pub fn accrue(&mut self, amount: u16) {
        if self.is_active() {
            self.damage = self.damage.saturating_add(amount);
        }
    }

    /// Count down one turn. Returns true once the storing period is over.
    pub fn tick(&mut self) -> bool {
        match &mut self.turns_left {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                *turns == 0
            }
            None => false,
        }
    }

    pub fn turns_left(&self) -> Option<u8> {
        self.turns_left
    }

    pub fn accumulated_damage(&self) -> u16 {
        self.damage
    }

    pub fn unleashed_damage(&self) -> u16 {
        self.damage.saturating_mul(2)
    }
}

// --- Disable ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disable {
    disabled: Option<(Move, u8)>,
}

impl Disable {
    pub fn activate(&mut self, move_: Move, turns: u8) {
        assert!(turns > 0, "disable needs at least one turn");
        self.disabled = Some((move_, turns));
    }

    pub fn deactivate(&mut self) {
        self.disabled = None;
    }

    pub fn is_active(&self) -> bool {
        self.disabled.is_some()
    }

    pub fn disabled_move(&self) -> Option<Move> {
        self.disabled.map(|(move_, _)| move_)
    }

    pub fn turns_left(&self) -> Option<u8> {
        self.disabled.map(|(_, turns)| turns)
    }

    /// Count down one turn, clearing at zero. Returns the move that was freed, if any.
    pub fn tick(&mut self) -> Option<Move> {
        let (move_, turns) = self.disabled.as_mut()?;
        *turns = turns.saturating_sub(1);
        if *turns == 0 {
            let freed = *move_;
            self.disabled = None;
            return Some(freed);
        }
        None
    }
}

// --- Conversion ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    typing: Option<Typing>,
}

impl Conversion {
    pub fn activate(&mut self, typing: Typing) {
        self.typing = Some(typing);
    }

    pub fn deactivate(&mut self) {
        self.typing = None;
    }

    pub fn is_active(&self) -> bool {
        self.typing.is_some()
    }

    pub fn typing(&self) -> Option<Typing> {
        self.typing
    }
}

// --- Multi-turn move progress ---

/// A move that spends its first turn preparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoTurnState {
    pub move_: Move,
}

/// A move that keeps the user locked in over several turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiTurnState {
    /// Attacks again for `turns_left` more turns, then the user becomes confused.
    Thrashing { move_: Move, turns_left: u8 },
    /// Attacks every turn until the user leaves battle or faints.
    Raging { move_: Move },
    /// Re-applies `damage` for `turns_left` more turns while the target is trapped.
    Trapping { move_: Move, turns_left: u8, damage: u16 },
    /// The turn after a landed Hyper Beam is spent recharging.
    Recharging { move_: Move },
}

impl MultiTurnState {
    pub fn move_(&self) -> Move {
        match self {
            MultiTurnState::Thrashing { move_, .. }
            | MultiTurnState::Raging { move_ }
            | MultiTurnState::Trapping { move_, .. }
            | MultiTurnState::Recharging { move_ } => *move_,
        }
    }
}
