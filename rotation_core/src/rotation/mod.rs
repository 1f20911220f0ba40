//! Rotations and the catalog the search fills

mod catalog;
mod signature;

pub use catalog::RotationCatalog;
pub use signature::{Deduplicator, Signature};

use crate::types::{ActionCounts, ActionKind, DisplayStyle};
use serde::{Deserialize, Serialize};

/// Round to three decimals, the precision rotations are reported with
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A terminating turn multiset and its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub signature: Signature,
    /// Turns sorted in `ActionKind` order
    pub turns: Vec<ActionKind>,
    pub turn_count: usize,
    pub energy_generated: f64,
    /// Net skill point change, including any banked points
    pub resource_delta: i32,
    pub resource_per_turn: f64,
    pub counts: ActionCounts,
    pub display: String,
}

impl Rotation {
    /// Derive every metric from a finished path
    ///
    /// `turns` must not be empty.
    pub fn new(mut turns: Vec<ActionKind>, energy: f64, resource_delta: i32, style: DisplayStyle) -> Self {
        turns.sort();
        let turn_count = turns.len();
        let counts = ActionCounts::from_turns(&turns);
        let resource_per_turn = if turn_count == 0 {
            0.0
        } else {
            round3(resource_delta as f64 / turn_count as f64)
        };

        Rotation {
            signature: Signature::of_sorted(&turns),
            turns,
            turn_count,
            energy_generated: round3(energy),
            resource_delta,
            resource_per_turn,
            display: counts.display(style),
            counts,
        }
    }

    pub fn count(&self, kind: ActionKind) -> u32 {
        self.counts.get(kind)
    }

    pub fn summary(&self) -> RotationSummary {
        RotationSummary::from(self)
    }
}

/// The reported view of a rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationSummary {
    pub turn_count: usize,
    pub energy_generated: f64,
    pub resource_per_turn: f64,
    pub display: String,
}

impl From<&Rotation> for RotationSummary {
    fn from(rotation: &Rotation) -> Self {
        RotationSummary {
            turn_count: rotation.turn_count,
            energy_generated: rotation.energy_generated,
            resource_per_turn: rotation.resource_per_turn,
            display: rotation.display.clone(),
        }
    }
}
