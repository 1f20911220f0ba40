//! Basic attack or skill, every turn

use super::{AuxState, Successor};
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

/// The default rules: BASIC generates a skill point, SKILL spends one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoActionRules {
    pub basic: f64,
    pub skill: f64,
    /// Skill point change of a skill (-1 for most entities, 0 for free skills)
    pub skill_resource: i32,
}

impl TwoActionRules {
    pub fn new(basic: f64, skill: f64, skill_resource: i32) -> Self {
        TwoActionRules {
            basic,
            skill,
            skill_resource,
        }
    }

    pub fn expand(&self) -> Vec<Successor> {
        vec![
            Successor::new(self.basic, ActionKind::Basic, 1, AuxState::None),
            Successor::new(self.skill, ActionKind::Skill, self.skill_resource, AuxState::None),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_basic_and_skill() {
        let successors = TwoActionRules::new(20.0, 30.0, -1).expand();
        assert_eq!(successors.len(), 2);
        assert_eq!(successors[0].action, ActionKind::Basic);
        assert_eq!(successors[0].resource_delta, 1);
        assert_eq!(successors[1].action, ActionKind::Skill);
        assert_eq!(successors[1].resource_delta, -1);
        assert!((successors[1].energy_delta - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_skill() {
        let successors = TwoActionRules::new(20.0, 30.0, 0).expand();
        assert_eq!(successors[1].resource_delta, 0);
    }
}
