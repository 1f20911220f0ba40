//! Action rule sets - per-entity turn transition functions
//!
//! Every variant answers the same question: given the entity-specific
//! state before a turn, which turns can be taken, what energy and skill
//! points does each produce, and what state follows. The set is closed;
//! supporting a new kind of entity means adding a variant here, never
//! touching the search engine.
//!
//! Every successor appends exactly one turn, so the turn count grows on
//! every branch and the engine's depth cap bounds the search.

mod charge_gated;
mod duration_gated;
mod exclusive_mode;
mod skill_charged;
mod tiered;
mod two_action;

pub use charge_gated::ChargeGatedRules;
pub use duration_gated::DurationGatedRules;
pub use exclusive_mode::ExclusiveModeRules;
pub use skill_charged::SkillChargedRules;
pub use tiered::TieredRules;
pub use two_action::TwoActionRules;

use crate::trigger::TurnTriggers;
use crate::types::{ActionKind, DisplayStyle};
use serde::{Deserialize, Serialize};

/// Entity-specific counters carried along a search path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuxState {
    #[default]
    None,
    /// Stacks spent on enhanced attacks
    Charges { charges: u32 },
    /// Turns left in a bonus window
    Window { remaining: u8 },
    /// Stacks toward an exclusive mode and enhanced uses left inside it
    Exclusive { stacks: u8, uses: u8 },
    /// Enhanced attack charges and follow-up stacks
    SkillCharged { charges: u8, stacks: u32 },
}

/// One legal turn out of a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Successor {
    pub energy_delta: f64,
    pub action: ActionKind,
    pub resource_delta: i32,
    pub aux: AuxState,
}

impl Successor {
    pub fn new(energy_delta: f64, action: ActionKind, resource_delta: i32, aux: AuxState) -> Self {
        Successor {
            energy_delta,
            action,
            resource_delta,
            aux,
        }
    }
}

/// Closed set of entity state machines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionRuleSet {
    TwoAction(TwoActionRules),
    ChargeGated(ChargeGatedRules),
    Tiered(TieredRules),
    DurationGated(DurationGatedRules),
    ExclusiveMode(ExclusiveModeRules),
    SkillCharged(SkillChargedRules),
}

impl ActionRuleSet {
    pub fn name(&self) -> &'static str {
        match self {
            ActionRuleSet::TwoAction(_) => "two_action",
            ActionRuleSet::ChargeGated(_) => "charge_gated",
            ActionRuleSet::Tiered(_) => "tiered",
            ActionRuleSet::DurationGated(_) => "duration_gated",
            ActionRuleSet::ExclusiveMode(_) => "exclusive_mode",
            ActionRuleSet::SkillCharged(_) => "skill_charged",
        }
    }

    /// State before the first turn
    pub fn initial_aux(&self) -> AuxState {
        match self {
            ActionRuleSet::TwoAction(_) | ActionRuleSet::Tiered(_) => AuxState::None,
            ActionRuleSet::ChargeGated(r) => r.initial_aux(),
            ActionRuleSet::DurationGated(r) => r.initial_aux(),
            ActionRuleSet::ExclusiveMode(r) => r.initial_aux(),
            ActionRuleSet::SkillCharged(r) => r.initial_aux(),
        }
    }

    /// Enumerate the turns available from `aux`
    ///
    /// Trigger energy is added by the engine; `turn` is passed so rules can
    /// react to hits taken this turn.
    pub fn expand(&self, aux: AuxState, turn: &TurnTriggers) -> Vec<Successor> {
        match self {
            ActionRuleSet::TwoAction(r) => r.expand(),
            ActionRuleSet::ChargeGated(r) => r.expand(aux, turn),
            ActionRuleSet::Tiered(r) => r.expand(),
            ActionRuleSet::DurationGated(r) => r.expand(aux),
            ActionRuleSet::ExclusiveMode(r) => r.expand(aux),
            ActionRuleSet::SkillCharged(r) => r.expand(aux, turn),
        }
    }

    /// Largest energy any single action can produce
    pub fn peak_action_energy(&self) -> f64 {
        match self {
            ActionRuleSet::TwoAction(r) => r.basic.max(r.skill),
            ActionRuleSet::ChargeGated(r) => r.basic.max(r.skill).max(r.enhanced),
            ActionRuleSet::Tiered(r) => r.tiers.iter().copied().fold(r.basic, f64::max),
            ActionRuleSet::DurationGated(r) => r.basic.max(r.skill).max(r.enhanced_skill),
            ActionRuleSet::ExclusiveMode(r) => r.basic.max(r.skill).max(r.enhanced_skill),
            ActionRuleSet::SkillCharged(r) => r.enhanced,
        }
    }

    pub fn display_style(&self) -> DisplayStyle {
        match self {
            ActionRuleSet::Tiered(_) => DisplayStyle::Tiered,
            _ => DisplayStyle::Standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_appends_one_turn_per_successor() {
        let rule_sets = vec![
            ActionRuleSet::TwoAction(TwoActionRules::new(20.0, 30.0, -1)),
            ActionRuleSet::ChargeGated(ChargeGatedRules::new(20.0, 30.0, 30.0, 4).with_initial_charges(4)),
            ActionRuleSet::Tiered(TieredRules::new(20.0, vec![30.0, 35.0, 40.0])),
            ActionRuleSet::DurationGated(DurationGatedRules::new(20.0, 30.0, 40.0, 3)),
            ActionRuleSet::ExclusiveMode(ExclusiveModeRules::new(20.0, 30.0, 30.0, 2)),
            ActionRuleSet::SkillCharged(SkillChargedRules::new(30.0, 10.0, 5)),
        ];

        for rules in rule_sets {
            let successors = rules.expand(rules.initial_aux(), &TurnTriggers::default());
            assert!(!successors.is_empty(), "{} offered no turns", rules.name());
            assert!(successors.len() <= 4, "{} branches too widely", rules.name());
        }
    }

    #[test]
    fn test_display_style() {
        let tiered = ActionRuleSet::Tiered(TieredRules::new(20.0, vec![30.0]));
        assert_eq!(tiered.display_style(), DisplayStyle::Tiered);
        let simple = ActionRuleSet::TwoAction(TwoActionRules::new(20.0, 30.0, -1));
        assert_eq!(simple.display_style(), DisplayStyle::Standard);
    }

    #[test]
    fn test_peak_action_energy() {
        let tiered = ActionRuleSet::Tiered(TieredRules::new(20.0, vec![30.0, 45.0]));
        assert!((tiered.peak_action_energy() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rule_set_serialization() {
        let rules = ActionRuleSet::TwoAction(TwoActionRules::new(20.0, 30.0, 0));
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("\"kind\":\"two_action\""));
    }
}
