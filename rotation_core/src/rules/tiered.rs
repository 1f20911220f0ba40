//! Multi-level enhanced basic attacks paid for with skill points

use super::{AuxState, Successor};
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

const TIER_KINDS: [ActionKind; 3] = [
    ActionKind::EnhancedBasic,
    ActionKind::EnhancedBasic2,
    ActionKind::EnhancedBasic3,
];

/// BASIC plus up to three enhanced tiers costing 1, 2 and 3 skill points
///
/// Every tier is offered every turn. Skill points may go negative: the
/// entity spends banked points rather than generating them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredRules {
    pub basic: f64,
    /// Energy of each tier, lowest first
    pub tiers: Vec<f64>,
}

impl TieredRules {
    pub fn new(basic: f64, tiers: Vec<f64>) -> Self {
        TieredRules { basic, tiers }
    }

    pub fn expand(&self) -> Vec<Successor> {
        let mut successors = vec![Successor::new(self.basic, ActionKind::Basic, 1, AuxState::None)];
        successors.extend(
            self.tiers
                .iter()
                .zip(TIER_KINDS)
                .enumerate()
                .map(|(i, (&energy, kind))| {
                    Successor::new(energy, kind, -(i as i32 + 1), AuxState::None)
                }),
        );
        successors
    }
}
