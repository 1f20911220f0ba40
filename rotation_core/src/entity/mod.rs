//! Supported entities and the mechanics each one brings to a calculation

mod passive;

pub use passive::EntityPassive;

use crate::config::{ConfigError, RunConfig};
use crate::rules::{
    ActionRuleSet, ChargeGatedRules, DurationGatedRules, ExclusiveModeRules, SkillChargedRules,
    TieredRules, TwoActionRules,
};
use crate::stat_vector::StatVector;
use crate::trigger::TriggerCounter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill point budgets (per turn) reported for tiered entities
const TIERED_BUDGETS: [f64; 6] = [0.0, -0.5, -1.25, -1.5, -2.0, -2.33];

/// Closed set of entities with dedicated mechanics
///
/// Anything not listed here uses `Generic`, which must be chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EntityKind {
    #[default]
    Generic,
    Arlan,
    Argenti,
    Blade,
    Clara,
    DanHengImbibitorLunae,
    FuXuan,
    Jingliu,
    Luka,
    Lynx,
    Topaz,
    TrailblazerPreservation,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Generic,
            EntityKind::Arlan,
            EntityKind::Argenti,
            EntityKind::Blade,
            EntityKind::Clara,
            EntityKind::DanHengImbibitorLunae,
            EntityKind::FuXuan,
            EntityKind::Jingliu,
            EntityKind::Luka,
            EntityKind::Lynx,
            EntityKind::Topaz,
            EntityKind::TrailblazerPreservation,
        ]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Generic => "Generic",
            EntityKind::Arlan => "Arlan",
            EntityKind::Argenti => "Argenti",
            EntityKind::Blade => "Blade",
            EntityKind::Clara => "Clara",
            EntityKind::DanHengImbibitorLunae => "Dan Heng IL",
            EntityKind::FuXuan => "Fu Xuan",
            EntityKind::Jingliu => "Jingliu",
            EntityKind::Luka => "Luka",
            EntityKind::Lynx => "Lynx",
            EntityKind::Topaz => "Topaz",
            EntityKind::TrailblazerPreservation => "Trailblazer (Preservation)",
        }
    }

    fn config_name(self) -> &'static str {
        match self {
            EntityKind::Generic => "generic",
            EntityKind::Arlan => "arlan",
            EntityKind::Argenti => "argenti",
            EntityKind::Blade => "blade",
            EntityKind::Clara => "clara",
            EntityKind::DanHengImbibitorLunae => "dan_heng_imbibitor_lunae",
            EntityKind::FuXuan => "fu_xuan",
            EntityKind::Jingliu => "jingliu",
            EntityKind::Luka => "luka",
            EntityKind::Lynx => "lynx",
            EntityKind::Topaz => "topaz",
            EntityKind::TrailblazerPreservation => "trailblazer_preservation",
        }
    }

    /// Passive adjustments to the un-scaled stats
    pub fn passive(self, run: &RunConfig) -> EntityPassive<'_> {
        EntityPassive::new(self, run)
    }

    /// Build the turn rules from fully prepared (recharge-scaled) stats
    pub fn rule_set(self, stats: &StatVector, run: &RunConfig) -> ActionRuleSet {
        let energy = &stats.energy;
        let ultimate = run.assume_ultimate_activation_at_start as u32;
        let technique = run.technique as u32;
        let enhanced_skill = if energy.enhanced_skill > 0.0 {
            energy.enhanced_skill
        } else {
            energy.skill
        };
        let first_tier = energy.enhanced_tier(1).unwrap_or(energy.basic);

        match self {
            EntityKind::Arlan => {
                ActionRuleSet::TwoAction(TwoActionRules::new(energy.basic, energy.skill, 0))
            }
            EntityKind::Blade => {
                let cost = if run.eidolon_level >= 6 { 4 } else { 5 };
                ActionRuleSet::SkillCharged(
                    SkillChargedRules::new(first_tier, energy.follow_up, cost)
                        .with_initial_stacks(ultimate + technique),
                )
            }
            EntityKind::DanHengImbibitorLunae => ActionRuleSet::Tiered(TieredRules::new(
                energy.basic,
                energy.enhanced_basic.clone(),
            )),
            EntityKind::FuXuan => {
                let window = if run.technique { 2 } else { 0 };
                ActionRuleSet::DurationGated(
                    DurationGatedRules::new(energy.basic, energy.skill, enhanced_skill, 3)
                        .with_initial_window(window),
                )
            }
            EntityKind::Jingliu => {
                let extra = if run.eidolon_level >= 6 { 1 } else { 0 };
                ActionRuleSet::ExclusiveMode(
                    ExclusiveModeRules::new(energy.basic, energy.skill, enhanced_skill, 2)
                        .with_extra_uses(extra)
                        .with_initial_stacks((ultimate + technique) as u8),
                )
            }
            EntityKind::Luka => {
                let bonus = if run.eidolon_level >= 2 && run.enemy_weakness_matches {
                    1
                } else {
                    0
                };
                ActionRuleSet::ChargeGated(
                    ChargeGatedRules::new(energy.basic, energy.skill, first_tier, 2)
                        .with_initial_charges(1 + 2 * ultimate + technique)
                        .with_charge_energy(stats.scaled(3.0))
                        .with_skill_bonus_charges(bonus),
                )
            }
            EntityKind::TrailblazerPreservation => ActionRuleSet::ChargeGated(
                ChargeGatedRules::new(energy.basic, energy.skill, first_tier, 4)
                    .with_initial_charges(4 * ultimate)
                    .with_hit_charges(),
            ),
            EntityKind::Generic
            | EntityKind::Argenti
            | EntityKind::Clara
            | EntityKind::Lynx
            | EntityKind::Topaz => {
                ActionRuleSet::TwoAction(TwoActionRules::new(energy.basic, energy.skill, -1))
            }
        }
    }

    /// Entity-specific per-turn bonus (Topaz's Numby)
    pub fn entity_bonus(self, stats: &StatVector, run: &RunConfig) -> TriggerCounter {
        match self {
            EntityKind::Topaz if run.assume_ultimate_activation_at_start => {
                let base = if run.eidolon_level >= 2 { 15.0 } else { 10.0 };
                TriggerCounter::times(2, stats.scaled(base))
            }
            _ => TriggerCounter::default(),
        }
    }

    /// Other ultimate costs worth reporting next to `threshold`
    pub fn alternate_thresholds(self, threshold: f64) -> Vec<f64> {
        match self {
            EntityKind::Argenti if (threshold - 180.0).abs() < f64::EPSILON => vec![90.0],
            _ => Vec::new(),
        }
    }

    /// Per-turn skill point budgets to report rotations for
    pub fn resource_budgets(self) -> &'static [f64] {
        match self {
            EntityKind::DanHengImbibitorLunae => &TIERED_BUDGETS,
            _ => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for EntityKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EntityKind::all()
            .iter()
            .copied()
            .find(|kind| {
                kind.config_name() == wanted || kind.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ConfigError::UnknownEntity(s.to_string()))
    }
}

impl TryFrom<String> for EntityKind {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionKind;

    fn run() -> RunConfig {
        RunConfig::default()
    }

    #[test]
    fn test_parse_display_and_config_names() {
        assert_eq!("Fu Xuan".parse::<EntityKind>().unwrap(), EntityKind::FuXuan);
        assert_eq!("fu_xuan".parse::<EntityKind>().unwrap(), EntityKind::FuXuan);
        assert_eq!(
            "dan heng il".parse::<EntityKind>().unwrap(),
            EntityKind::DanHengImbibitorLunae
        );
        assert_eq!(
            "Trailblazer (Preservation)".parse::<EntityKind>().unwrap(),
            EntityKind::TrailblazerPreservation
        );
    }

    #[test]
    fn test_unknown_entity() {
        let result = "Kafka".parse::<EntityKind>();
        assert!(matches!(result, Err(ConfigError::UnknownEntity(name)) if name == "Kafka"));
    }

    #[test]
    fn test_every_kind_round_trips_through_its_names() {
        for &kind in EntityKind::all() {
            assert_eq!(kind.display_name().parse::<EntityKind>().unwrap(), kind);
            assert_eq!(kind.config_name().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_arlan_skill_is_free() {
        let stats = StatVector::new(110.0);
        match EntityKind::Arlan.rule_set(&stats, &run()) {
            ActionRuleSet::TwoAction(rules) => assert_eq!(rules.skill_resource, 0),
            other => panic!("unexpected rules {:?}", other),
        }
    }

    #[test]
    fn test_blade_follow_up_cost_by_eidolon() {
        let stats = StatVector::new(130.0);
        let mut config = run();
        config.eidolon_level = 6;
        config.technique = true;
        match EntityKind::Blade.rule_set(&stats, &config) {
            ActionRuleSet::SkillCharged(rules) => {
                assert_eq!(rules.follow_up_cost, 4);
                assert_eq!(rules.initial_stacks, 1);
            }
            other => panic!("unexpected rules {:?}", other),
        }
    }

    #[test]
    fn test_fu_xuan_falls_back_to_skill_energy() {
        let stats = StatVector::new(135.0);
        let mut config = run();
        config.technique = true;
        match EntityKind::FuXuan.rule_set(&stats, &config) {
            ActionRuleSet::DurationGated(rules) => {
                assert!((rules.enhanced_skill - 30.0).abs() < 1e-9);
                assert_eq!(rules.initial_window, 2);
            }
            other => panic!("unexpected rules {:?}", other),
        }
    }

    #[test]
    fn test_luka_charge_energy_scales_with_recharge() {
        let mut stats = StatVector::new(130.0);
        stats.apply_recharge(1.2).unwrap();
        let mut config = run();
        config.eidolon_level = 2;
        config.enemy_weakness_matches = true;
        match EntityKind::Luka.rule_set(&stats, &config) {
            ActionRuleSet::ChargeGated(rules) => {
                assert!((rules.charge_energy - 3.6).abs() < 1e-9);
                assert_eq!(rules.skill_bonus_charges, 1);
                assert_eq!(rules.initial_charges, 1);
                assert_eq!(rules.cost, 2);
            }
            other => panic!("unexpected rules {:?}", other),
        }
    }

    #[test]
    fn test_tiered_rules_for_dan_heng() {
        let mut stats = StatVector::new(140.0);
        stats.energy.enhanced_basic = vec![30.0, 35.0, 40.0];
        let rules = EntityKind::DanHengImbibitorLunae.rule_set(&stats, &run());
        let successors = rules.expand(rules.initial_aux(), &Default::default());
        assert_eq!(successors.len(), 4);
        assert_eq!(successors[3].action, ActionKind::EnhancedBasic3);
    }

    #[test]
    fn test_topaz_numby_bonus() {
        let mut stats = StatVector::new(130.0);
        stats.apply_recharge(1.1).unwrap();
        let mut config = run();
        assert!(!EntityKind::Topaz.entity_bonus(&stats, &config).is_active());

        config.assume_ultimate_activation_at_start = true;
        config.eidolon_level = 2;
        let bonus = EntityKind::Topaz.entity_bonus(&stats, &config);
        assert_eq!(bonus.remaining, 2);
        assert!((bonus.energy - 16.5).abs() < 1e-9);
    }

    #[test]
    fn test_alternate_thresholds_and_budgets() {
        assert_eq!(EntityKind::Argenti.alternate_thresholds(180.0), vec![90.0]);
        assert!(EntityKind::Argenti.alternate_thresholds(90.0).is_empty());
        assert_eq!(EntityKind::DanHengImbibitorLunae.resource_budgets().len(), 6);
        assert!(EntityKind::Clara.resource_budgets().is_empty());
    }
}
