//! Named rotation selections over a catalog

use crate::rotation::{Rotation, RotationCatalog};
use crate::types::ActionKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A predicate plus ordering that picks one notable rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationQuery {
    /// Shortest rotation, cheapest on skill points
    Best,
    /// Shortest rotation with zero net skill points
    Neutral,
    /// No skill-family turns
    BasicOnly,
    /// No basic-family turns
    SkillOnly,
    /// Exactly one skill-family turn
    OneSkill,
    /// Shortest rotation spending at most `-min_per_turn` skill points per
    /// turn, preferring the strongest attacks
    ResourceBudget(f64),
}

impl RotationQuery {
    pub fn name(&self) -> String {
        match self {
            RotationQuery::Best => "Best rotation".to_string(),
            RotationQuery::Neutral => "Neutral rotation".to_string(),
            RotationQuery::BasicOnly => "Basic attack only".to_string(),
            RotationQuery::SkillOnly => "Skill only".to_string(),
            RotationQuery::OneSkill => "One skill".to_string(),
            RotationQuery::ResourceBudget(budget) => format!("{} SP/T rotation", budget),
        }
    }

    pub fn matches(&self, rotation: &Rotation) -> bool {
        let counts = &rotation.counts;
        match *self {
            RotationQuery::Best => true,
            RotationQuery::Neutral => rotation.resource_delta == 0,
            RotationQuery::BasicOnly => counts.skill_family() == 0,
            RotationQuery::SkillOnly => counts.basic_family() == 0,
            RotationQuery::OneSkill => counts.skill_family() == 1,
            RotationQuery::ResourceBudget(budget) => rotation.resource_per_turn >= budget,
        }
    }

    /// Preference order among matching rotations; smaller is better
    fn compare(&self, a: &Rotation, b: &Rotation) -> Ordering {
        let by_length = a.turn_count.cmp(&b.turn_count);
        let tie_break = match self {
            RotationQuery::Neutral => Ordering::Equal,
            RotationQuery::ResourceBudget(_) => [
                ActionKind::EnhancedBasic3,
                ActionKind::EnhancedBasic2,
                ActionKind::EnhancedBasic,
                ActionKind::Basic,
            ]
            .iter()
            .map(|&kind| b.count(kind).cmp(&a.count(kind)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
            _ => b.resource_per_turn.total_cmp(&a.resource_per_turn),
        };

        by_length
            .then(tie_break)
            .then_with(|| a.signature.cmp(&b.signature))
    }

    /// The preferred matching rotation, if any matches
    pub fn select<'a>(&self, catalog: &'a RotationCatalog) -> Option<&'a Rotation> {
        catalog
            .iter()
            .filter(|r| self.matches(r))
            .min_by(|a, b| self.compare(a, b))
    }
}
