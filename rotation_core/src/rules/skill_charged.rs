//! Enhanced basic attacks fed by a turn-free skill, with stack-driven follow-ups

use super::{AuxState, Successor};
use crate::trigger::TurnTriggers;
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

/// Every turn is an E. BASIC. When no charges are left the skill is cast
/// first without ending the turn: it spends a skill point, grants
/// `charges_per_skill` charges and one stack. Attacks and hits taken add
/// stacks, and once `follow_up_cost` stacks are held the follow-up attack
/// fires in the same turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillChargedRules {
    pub enhanced: f64,
    pub follow_up: f64,
    pub follow_up_cost: u32,
    #[serde(default = "default_charges_per_skill")]
    pub charges_per_skill: u8,
    #[serde(default)]
    pub initial_stacks: u32,
}

fn default_charges_per_skill() -> u8 {
    3
}

impl SkillChargedRules {
    pub fn new(enhanced: f64, follow_up: f64, follow_up_cost: u32) -> Self {
        SkillChargedRules {
            enhanced,
            follow_up,
            follow_up_cost,
            charges_per_skill: default_charges_per_skill(),
            initial_stacks: 0,
        }
    }

    pub fn with_initial_stacks(mut self, stacks: u32) -> Self {
        self.initial_stacks = stacks;
        self
    }

    pub fn initial_aux(&self) -> AuxState {
        AuxState::SkillCharged {
            charges: 0,
            stacks: self.initial_stacks,
        }
    }

    pub fn expand(&self, aux: AuxState, turn: &TurnTriggers) -> Vec<Successor> {
        let (mut charges, mut stacks) = match aux {
            AuxState::SkillCharged { charges, stacks } => (charges, stacks),
            _ => (0, self.initial_stacks),
        };
        stacks = stacks.saturating_add(turn.hits_taken);

        let mut resource_delta = 0;
        if charges == 0 {
            charges = self.charges_per_skill.max(1);
            stacks = stacks.saturating_add(1);
            resource_delta = -1;
        }

        let mut energy = self.enhanced;
        charges -= 1;
        stacks = stacks.saturating_add(1);

        if self.follow_up_cost > 0 && stacks >= self.follow_up_cost {
            energy += self.follow_up;
            stacks -= self.follow_up_cost;
        }

        vec![Successor::new(
            energy,
            ActionKind::EnhancedBasic,
            resource_delta,
            AuxState::SkillCharged { charges, stacks },
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_turn_casts_skill() {
        let rules = SkillChargedRules::new(30.0, 10.0, 5);
        let successors = rules.expand(rules.initial_aux(), &TurnTriggers::default());
        assert_eq!(successors.len(), 1);
        let turn = &successors[0];
        assert_eq!(turn.action, ActionKind::EnhancedBasic);
        assert_eq!(turn.resource_delta, -1);
        assert_eq!(turn.aux, AuxState::SkillCharged { charges: 2, stacks: 2 });
    }

    #[test]
    fn test_charged_turn_costs_nothing() {
        let rules = SkillChargedRules::new(30.0, 10.0, 5);
        let successors = rules.expand(
            AuxState::SkillCharged { charges: 2, stacks: 0 },
            &TurnTriggers::default(),
        );
        assert_eq!(successors[0].resource_delta, 0);
        assert!((successors[0].energy_delta - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_follow_up_fires_and_consumes_stacks() {
        let rules = SkillChargedRules::new(30.0, 10.0, 5);
        let turn = TurnTriggers {
            energy: 10.0,
            hits_taken: 1,
            ..TurnTriggers::default()
        };
        let successors = rules.expand(AuxState::SkillCharged { charges: 2, stacks: 3 }, &turn);
        assert!((successors[0].energy_delta - 40.0).abs() < 1e-9);
        assert_eq!(successors[0].aux, AuxState::SkillCharged { charges: 1, stacks: 0 });
    }

    #[test]
    fn test_huge_hit_counts_saturate() {
        let rules = SkillChargedRules::new(30.0, 10.0, 0);
        let turn = TurnTriggers {
            hits_taken: u32::MAX,
            ..TurnTriggers::default()
        };
        let successors = rules.expand(AuxState::SkillCharged { charges: 1, stacks: 3 }, &turn);
        assert_eq!(successors[0].aux, AuxState::SkillCharged { charges: 0, stacks: u32::MAX });
    }

    #[test]
    fn test_initial_stacks_reach_follow_up_sooner() {
        let rules = SkillChargedRules::new(30.0, 10.0, 4).with_initial_stacks(2);
        let successors = rules.expand(rules.initial_aux(), &TurnTriggers::default());
        assert!((successors[0].energy_delta - 40.0).abs() < 1e-9);
        assert_eq!(successors[0].aux, AuxState::SkillCharged { charges: 2, stacks: 0 });
    }
}
