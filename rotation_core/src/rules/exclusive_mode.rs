//! Stacks that lock the entity into an enhanced-skill-only mode

use super::{AuxState, Successor};
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

/// SKILL builds stacks. Once `trigger_stacks` are held at the start of a
/// turn the entity enters its exclusive mode and can only use E. SKILL,
/// which costs no skill points, for `trigger_stacks + extra_uses` turns.
/// Leaving the mode resets the stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusiveModeRules {
    pub basic: f64,
    pub skill: f64,
    pub enhanced_skill: f64,
    pub trigger_stacks: u8,
    #[serde(default)]
    pub extra_uses: u8,
    #[serde(default)]
    pub initial_stacks: u8,
}

impl ExclusiveModeRules {
    pub fn new(basic: f64, skill: f64, enhanced_skill: f64, trigger_stacks: u8) -> Self {
        ExclusiveModeRules {
            basic,
            skill,
            enhanced_skill,
            trigger_stacks,
            extra_uses: 0,
            initial_stacks: 0,
        }
    }

    pub fn with_extra_uses(mut self, uses: u8) -> Self {
        self.extra_uses = uses;
        self
    }

    pub fn with_initial_stacks(mut self, stacks: u8) -> Self {
        self.initial_stacks = stacks;
        self
    }

    pub fn initial_aux(&self) -> AuxState {
        AuxState::Exclusive {
            stacks: self.initial_stacks,
            uses: 0,
        }
    }

    fn mode_uses(&self) -> u8 {
        self.trigger_stacks.saturating_add(self.extra_uses).max(1)
    }

    pub fn expand(&self, aux: AuxState) -> Vec<Successor> {
        let (stacks, mut uses) = match aux {
            AuxState::Exclusive { stacks, uses } => (stacks, uses),
            _ => (self.initial_stacks, 0),
        };

        if uses == 0 && stacks >= self.trigger_stacks {
            uses = self.mode_uses();
        }

        if uses > 0 {
            let remaining = uses - 1;
            let after = AuxState::Exclusive {
                stacks: if remaining == 0 { 0 } else { stacks },
                uses: remaining,
            };
            return vec![Successor::new(
                self.enhanced_skill,
                ActionKind::EnhancedSkill,
                0,
                after,
            )];
        }

        vec![
            Successor::new(
                self.basic,
                ActionKind::Basic,
                1,
                AuxState::Exclusive { stacks, uses: 0 },
            ),
            Successor::new(
                self.skill,
                ActionKind::Skill,
                -1,
                AuxState::Exclusive {
                    stacks: stacks.saturating_add(1),
                    uses: 0,
                },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ExclusiveModeRules {
        ExclusiveModeRules::new(20.0, 30.0, 30.0, 2)
    }

    #[test]
    fn test_normal_mode_builds_stacks() {
        let successors = rules().expand(rules().initial_aux());
        assert_eq!(successors.len(), 2);
        assert_eq!(successors[1].action, ActionKind::Skill);
        assert_eq!(successors[1].aux, AuxState::Exclusive { stacks: 1, uses: 0 });
    }

    #[test]
    fn test_enters_mode_at_trigger_stacks() {
        let successors = rules().expand(AuxState::Exclusive { stacks: 2, uses: 0 });
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].action, ActionKind::EnhancedSkill);
        assert_eq!(successors[0].resource_delta, 0);
        assert_eq!(successors[0].aux, AuxState::Exclusive { stacks: 2, uses: 1 });
    }

    #[test]
    fn test_leaving_mode_resets_stacks() {
        let successors = rules().expand(AuxState::Exclusive { stacks: 2, uses: 1 });
        assert_eq!(successors[0].aux, AuxState::Exclusive { stacks: 0, uses: 0 });

        let after = rules().expand(successors[0].aux);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_extra_use_lengthens_mode() {
        let upgraded = rules().with_extra_uses(1).with_initial_stacks(2);
        let mut aux = upgraded.initial_aux();
        let mut enhanced = 0;
        loop {
            let successors = upgraded.expand(aux);
            if successors[0].action != ActionKind::EnhancedSkill {
                break;
            }
            enhanced += 1;
            aux = successors[0].aux;
        }
        assert_eq!(enhanced, 3);
    }
}
