//! Enhanced basic attack unlocked by accumulated charges

use super::{AuxState, Successor};
use crate::trigger::TurnTriggers;
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

/// Charges accumulate from attacks (and optionally hits taken); once they
/// reach `cost` an enhanced basic attack can be used instead, consuming them.
///
/// The plain BASIC and SKILL stay on offer when the enhanced attack is
/// available, since saving charges can lead to a different rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeGatedRules {
    pub basic: f64,
    pub skill: f64,
    pub enhanced: f64,
    pub cost: u32,
    #[serde(default)]
    pub initial_charges: u32,
    /// Energy gained with every charge
    #[serde(default)]
    pub charge_energy: f64,
    /// Extra charges a skill grants on top of the usual one
    #[serde(default)]
    pub skill_bonus_charges: u32,
    /// Whether hits taken grant charges
    #[serde(default)]
    pub hits_grant_charges: bool,
}

impl ChargeGatedRules {
    pub fn new(basic: f64, skill: f64, enhanced: f64, cost: u32) -> Self {
        ChargeGatedRules {
            basic,
            skill,
            enhanced,
            cost,
            initial_charges: 0,
            charge_energy: 0.0,
            skill_bonus_charges: 0,
            hits_grant_charges: false,
        }
    }

    pub fn with_initial_charges(mut self, charges: u32) -> Self {
        self.initial_charges = charges;
        self
    }

    pub fn with_charge_energy(mut self, energy: f64) -> Self {
        self.charge_energy = energy;
        self
    }

    pub fn with_skill_bonus_charges(mut self, charges: u32) -> Self {
        self.skill_bonus_charges = charges;
        self
    }

    pub fn with_hit_charges(mut self) -> Self {
        self.hits_grant_charges = true;
        self
    }

    pub fn initial_aux(&self) -> AuxState {
        AuxState::Charges {
            charges: self.initial_charges,
        }
    }

    pub fn expand(&self, aux: AuxState, turn: &TurnTriggers) -> Vec<Successor> {
        let mut charges = match aux {
            AuxState::Charges { charges } => charges,
            _ => self.initial_charges,
        };
        if self.hits_grant_charges {
            charges = charges.saturating_add(turn.hits_taken);
        }

        let mut successors = Vec::with_capacity(3);

        if charges >= self.cost {
            successors.push(Successor::new(
                self.enhanced,
                ActionKind::EnhancedBasic,
                1,
                AuxState::Charges {
                    charges: charges - self.cost,
                },
            ));
        }

        successors.push(Successor::new(
            self.basic + self.charge_energy,
            ActionKind::Basic,
            1,
            AuxState::Charges {
                charges: charges.saturating_add(1),
            },
        ));

        let skill_charges = 1 + self.skill_bonus_charges;
        successors.push(Successor::new(
            self.skill + self.charge_energy * skill_charges as f64,
            ActionKind::Skill,
            -1,
            AuxState::Charges {
                charges: charges.saturating_add(skill_charges),
            },
        ));

        successors
    }
}
