// In: src/battle/turn_orchestrator.rs

//! Two-sided battle driver. Decides who acts first and calls each combatant's turn
//! protocol; everything a creature does happens inside `Combatant`.

use crate::battle::combatant::{Combatant, TurnOutcome};
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::rng::TurnRng;
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::move_data::get_move_data;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

pub const MAX_TEAM_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    // The index refers to the move's position (0-3) in the active Pokémon's move list.
    UseMove { move_index: usize },

    // The index refers to the Pokémon's position (0-5) in the player's team.
    SwitchPokemon { team_index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    WaitingForActions,
    WaitingForPlayer1Replacement, // Player 1 needs to send out a new Pokemon after faint
    WaitingForPlayer2Replacement, // Player 2 needs to send out a new Pokemon after faint
    WaitingForBothReplacements,   // Both players need to send out new Pokemon after faints
    Player1Win,
    Player2Win,
    Draw,
}

/// What happened during one call to `Battle::resolve_turn`.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSummary {
    pub turn_number: u32,
    /// `None` for a side that switched, was trapped, or had nothing to hit.
    pub outcomes: [Option<TurnOutcome>; 2],
    pub events: Vec<BattleEvent>,
}

/// One player's team. The creature on the field lives inside the combatant; its bench
/// slot stays empty until it is switched out.
#[derive(Debug)]
pub struct BattleSide {
    pub player_name: String,
    bench: Vec<Option<PokemonInst>>,
    active_index: usize,
    combatant: Combatant,
}

impl BattleSide {
    /// Leads with the first creature that has not fainted.
    pub fn new(
        player_name: impl Into<String>,
        team: Vec<PokemonInst>,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        if team.is_empty() {
            return Err(BattleStateError::EmptyTeam.into());
        }
        if team.len() > MAX_TEAM_SIZE {
            return Err(BattleStateError::TeamTooLarge(team.len()).into());
        }
        let active_index = team
            .iter()
            .position(|pokemon| !pokemon.is_fainted())
            .ok_or(BattleStateError::NoUsablePokemon)?;

        let player_name = player_name.into();
        let mut bench: Vec<Option<PokemonInst>> = team.into_iter().map(Some).collect();
        let lead = bench[active_index]
            .take()
            .ok_or(BattleStateError::NoUsablePokemon)?;
        let combatant = Combatant::new(player_name.clone(), lead, config);

        Ok(Self {
            player_name,
            bench,
            active_index,
            combatant,
        })
    }

    pub fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    pub fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn team_size(&self) -> usize {
        self.bench.len()
    }

    pub fn team_member(&self, index: usize) -> Option<&PokemonInst> {
        if index == self.active_index {
            return Some(self.combatant.pokemon());
        }
        self.bench.get(index)?.as_ref()
    }

    pub fn has_usable_pokemon(&self) -> bool {
        !self.combatant.is_fainted()
            || self
                .bench
                .iter()
                .flatten()
                .any(|pokemon| !pokemon.is_fainted())
    }

    fn check_switch_target(&self, team_index: usize) -> Result<(), ActionError> {
        if team_index == self.active_index {
            return Err(ActionError::AlreadyActive(team_index));
        }
        match self.bench.get(team_index) {
            Some(Some(pokemon)) if pokemon.is_fainted() => {
                Err(ActionError::PokemonFainted(team_index))
            }
            Some(Some(_)) => Ok(()),
            _ => Err(ActionError::InvalidPokemonIndex(team_index)),
        }
    }

    fn switch_to(&mut self, team_index: usize) -> BattleResult<()> {
        self.check_switch_target(team_index)?;
        let incoming = self
            .bench
            .get_mut(team_index)
            .and_then(Option::take)
            .ok_or(ActionError::InvalidPokemonIndex(team_index))?;
        let outgoing = self.combatant.switch_out(incoming);
        self.bench[self.active_index] = Some(outgoing);
        self.active_index = team_index;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Battle {
    sides: [BattleSide; 2],
    turn_number: u32,
    state: GameState,
    bus: EventBus,
}

impl Battle {
    pub fn new(player1: BattleSide, player2: BattleSide) -> Self {
        let bus = EventBus::new();
        let mut sides = [player1, player2];
        for side in sides.iter_mut() {
            side.combatant.subscribe(bus.observer());
        }
        Self {
            sides,
            turn_number: 0,
            state: GameState::WaitingForActions,
            bus,
        }
    }

    pub fn side(&self, index: usize) -> BattleResult<&BattleSide> {
        self.sides
            .get(index)
            .ok_or_else(|| BattleStateError::InvalidSideIndex(index).into())
    }

    pub fn sides(&self) -> &[BattleSide; 2] {
        &self.sides
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Events published since the last resolved turn.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn winner(&self) -> Option<usize> {
        match self.state {
            GameState::Player1Win => Some(0),
            GameState::Player2Win => Some(1),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.state,
            GameState::Player1Win | GameState::Player2Win | GameState::Draw
        )
    }

    fn split_sides_mut(&mut self, index: usize) -> (&mut BattleSide, &mut BattleSide) {
        let [first, second] = &mut self.sides;
        if index == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Check that `action` is legal for `side_index` right now.
    pub fn validate_action(&self, side_index: usize, action: &PlayerAction) -> BattleResult<()> {
        let side = self.side(side_index)?;
        self.ensure_waiting_for_actions()?;

        match *action {
            PlayerAction::UseMove { move_index } => {
                let instance = side
                    .combatant
                    .move_slots()
                    .get(move_index)
                    .copied()
                    .flatten()
                    .ok_or(ActionError::InvalidMoveIndex(move_index))?;
                if instance.pp == 0 {
                    return Err(ActionError::NoPpRemaining(move_index).into());
                }
            }
            PlayerAction::SwitchPokemon { team_index } => {
                side.check_switch_target(team_index)?;
                if side.combatant.is_partially_trapped() {
                    return Err(ActionError::Trapped.into());
                }
            }
        }
        Ok(())
    }

    fn ensure_waiting_for_actions(&self) -> BattleResult<()> {
        match self.state {
            GameState::WaitingForActions => Ok(()),
            GameState::Player1Win | GameState::Player2Win | GameState::Draw => {
                Err(BattleStateError::BattleOver.into())
            }
            _ => Err(ActionError::ReplacementRequired.into()),
        }
    }

    /// A move in progress overrides whatever the player chose.
    fn effective_action(&self, side_index: usize, chosen: PlayerAction) -> BattleResult<PlayerAction> {
        if let Some(move_index) = self.sides[side_index].combatant.forced_move_slot() {
            return Ok(PlayerAction::UseMove { move_index });
        }
        self.validate_action(side_index, &chosen)?;
        Ok(chosen)
    }

    /// Resolve one turn: switches first, then moves by priority and speed, then
    /// end-of-turn bookkeeping on both sides.
    pub fn resolve_turn(
        &mut self,
        actions: [PlayerAction; 2],
        rng: &mut TurnRng,
    ) -> BattleResult<TurnSummary> {
        self.ensure_waiting_for_actions()?;
        let actions = [
            self.effective_action(0, actions[0])?,
            self.effective_action(1, actions[1])?,
        ];
        self.turn_number += 1;
        info!(turn = self.turn_number, ?actions, "resolving turn");

        for (index, action) in actions.iter().enumerate() {
            if let PlayerAction::SwitchPokemon { team_index } = *action {
                let (side, foe) = self.split_sides_mut(index);
                side.switch_to(team_index)?;
                foe.combatant.release_partial_trapping();
            }
        }

        let mut outcomes = [None, None];
        for index in self.move_order(&actions, rng)? {
            let PlayerAction::UseMove { move_index } = actions[index] else {
                continue;
            };
            let (side, foe) = self.split_sides_mut(index);
            let (user, opponent) = (&mut side.combatant, &mut foe.combatant);
            if user.is_fainted() {
                continue;
            }
            if opponent.is_fainted() {
                user.end_of_turn_effects(opponent);
                continue;
            }
            if user.is_partially_trapped() {
                user.pass_turn_while_trapped(opponent);
                continue;
            }
            outcomes[index] = Some(user.resolve_turn(move_index, opponent, rng)?);
        }

        for side in self.sides.iter_mut() {
            side.combatant.update_for_end_of_turn();
        }
        self.state = self.next_state();
        debug!(turn = self.turn_number, state = ?self.state, "turn resolved");

        Ok(TurnSummary {
            turn_number: self.turn_number,
            outcomes,
            events: self.bus.drain(),
        })
    }

    /// Indices of the sides using a move, in the order they act.
    fn move_order(&self, actions: &[PlayerAction; 2], rng: &mut TurnRng) -> BattleResult<Vec<usize>> {
        let mut priorities = [None, None];
        for (index, action) in actions.iter().enumerate() {
            if let PlayerAction::UseMove { move_index } = *action {
                let combatant = &self.sides[index].combatant;
                let priority = match combatant.move_in_slot(move_index) {
                    Some(move_) => get_move_data(move_)?.priority,
                    None => 0,
                };
                priorities[index] = Some((priority, combatant.speed()));
            }
        }

        let order = match priorities {
            [Some(first), Some(second)] => match first.cmp(&second) {
                Ordering::Greater => vec![0, 1],
                Ordering::Less => vec![1, 0],
                Ordering::Equal => {
                    if rng.chance("Speed Tie", 50) {
                        vec![0, 1]
                    } else {
                        vec![1, 0]
                    }
                }
            },
            [Some(_), None] => vec![0],
            [None, Some(_)] => vec![1],
            [None, None] => Vec::new(),
        };
        Ok(order)
    }

    /// Send in `team_index` for a side whose active creature fainted.
    pub fn replace_fainted(&mut self, side_index: usize, team_index: usize) -> BattleResult<()> {
        self.side(side_index)?;
        if self.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        let (side, foe) = self.split_sides_mut(side_index);
        if !side.combatant.is_fainted() {
            return Err(ActionError::NoReplacementRequired.into());
        }
        side.switch_to(team_index)?;
        foe.combatant.release_partial_trapping();
        self.state = self.next_state();
        Ok(())
    }

    fn next_state(&self) -> GameState {
        let usable = self.sides.each_ref().map(BattleSide::has_usable_pokemon);
        match usable {
            [false, false] => return GameState::Draw,
            [true, false] => return GameState::Player1Win,
            [false, true] => return GameState::Player2Win,
            [true, true] => {}
        }
        let fainted = self.sides.each_ref().map(|side| side.combatant.is_fainted());
        match fainted {
            [true, true] => GameState::WaitingForBothReplacements,
            [true, false] => GameState::WaitingForPlayer1Replacement,
            [false, true] => GameState::WaitingForPlayer2Replacement,
            [false, false] => GameState::WaitingForActions,
        }
    }

    /// Hand the teams back, active creatures included, in their original order.
    pub fn into_teams(self) -> [Vec<PokemonInst>; 2] {
        self.sides.map(|side| {
            let BattleSide {
                mut bench,
                active_index,
                combatant,
                ..
            } = side;
            bench[active_index] = Some(combatant.into_pokemon());
            bench.into_iter().flatten().collect()
        })
    }
}
