//! Skill that opens a window in which later skills are enhanced

use super::{AuxState, Successor};
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};

/// SKILL opens a window of `window` turns. While it is open the skill is
/// replaced by E. SKILL, which refreshes the window to its full length;
/// BASIC lets it run down by one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationGatedRules {
    pub basic: f64,
    pub skill: f64,
    pub enhanced_skill: f64,
    pub window: u8,
    #[serde(default)]
    pub initial_window: u8,
}

impl DurationGatedRules {
    pub fn new(basic: f64, skill: f64, enhanced_skill: f64, window: u8) -> Self {
        DurationGatedRules {
            basic,
            skill,
            enhanced_skill,
            window,
            initial_window: 0,
        }
    }

    pub fn with_initial_window(mut self, remaining: u8) -> Self {
        self.initial_window = remaining;
        self
    }

    pub fn initial_aux(&self) -> AuxState {
        AuxState::Window {
            remaining: self.initial_window,
        }
    }

    pub fn expand(&self, aux: AuxState) -> Vec<Successor> {
        let remaining = match aux {
            AuxState::Window { remaining } => remaining,
            _ => self.initial_window,
        };
        let refreshed = AuxState::Window {
            remaining: self.window,
        };

        let skill = if remaining == 0 {
            Successor::new(self.skill, ActionKind::Skill, -1, refreshed)
        } else {
            Successor::new(self.enhanced_skill, ActionKind::EnhancedSkill, -1, refreshed)
        };

        vec![
            skill,
            Successor::new(
                self.basic,
                ActionKind::Basic,
                1,
                AuxState::Window {
                    remaining: remaining.saturating_sub(1),
                },
            ),
        ]
    }
}
