//! A node of the rotation search tree

use crate::rules::{AuxState, Successor};
use crate::trigger::{TriggerSet, TurnTriggers};
use crate::types::ActionKind;

/// Everything a path carries: energy, turns so far, skill points, the
/// entity-specific counters and its own copy of the trigger counters.
///
/// States are never mutated after creation; expanding one builds fresh
/// successors.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub energy: f64,
    /// Energy held before the most recent turn began
    pub previous_energy: f64,
    pub turns: Vec<ActionKind>,
    pub resource: i32,
    pub aux: AuxState,
    pub triggers: TriggerSet,
}

impl SearchState {
    /// The state before the first turn
    pub fn root(energy: f64, resource: i32, aux: AuxState, triggers: TriggerSet) -> Self {
        SearchState {
            energy,
            previous_energy: energy,
            turns: Vec::new(),
            resource,
            aux,
            triggers,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Take `successor` from a turn that started with `turn_energy`
    pub fn advance(
        &self,
        turn_energy: f64,
        successor: &Successor,
        turn: &TurnTriggers,
        triggers: TriggerSet,
    ) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns);
        turns.push(successor.action);

        SearchState {
            energy: turn_energy + successor.energy_delta * turn.recharge_factor,
            previous_energy: self.energy,
            turns,
            resource: self.resource + successor.resource_delta,
            aux: successor.aux,
            triggers,
        }
    }
}
