//! Core types shared by the rule sets, the catalog and the queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single turn an entity can take
///
/// The declaration order is the canonical sort order used for rotation
/// signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Basic,
    EnhancedBasic,
    EnhancedBasic2,
    EnhancedBasic3,
    EnhancedSkill,
    Skill,
}

impl ActionKind {
    pub const COUNT: usize = 6;

    /// Get all action kinds in canonical order
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::Basic,
            ActionKind::EnhancedBasic,
            ActionKind::EnhancedBasic2,
            ActionKind::EnhancedBasic3,
            ActionKind::EnhancedSkill,
            ActionKind::Skill,
        ]
    }

    /// Kinds from most specialized/expensive to most basic, as displayed
    pub fn display_order() -> &'static [ActionKind] {
        &[
            ActionKind::Skill,
            ActionKind::EnhancedSkill,
            ActionKind::EnhancedBasic3,
            ActionKind::EnhancedBasic2,
            ActionKind::EnhancedBasic,
            ActionKind::Basic,
        ]
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Label used in signatures and the standard display style
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Basic => "BASIC",
            ActionKind::EnhancedBasic => "E. BASIC",
            ActionKind::EnhancedBasic2 => "EB2",
            ActionKind::EnhancedBasic3 => "EB3",
            ActionKind::EnhancedSkill => "E. SKILL",
            ActionKind::Skill => "SKILL",
        }
    }

    /// Label for a given display style
    pub fn styled_label(self, style: DisplayStyle) -> &'static str {
        match (style, self) {
            (DisplayStyle::Tiered, ActionKind::EnhancedBasic) => "EB1",
            _ => self.label(),
        }
    }

    /// Whether this turn belongs to the basic attack family
    pub fn is_basic_family(self) -> bool {
        matches!(
            self,
            ActionKind::Basic
                | ActionKind::EnhancedBasic
                | ActionKind::EnhancedBasic2
                | ActionKind::EnhancedBasic3
        )
    }

    /// Whether this turn belongs to the skill family
    pub fn is_skill_family(self) -> bool {
        matches!(self, ActionKind::Skill | ActionKind::EnhancedSkill)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How enhanced basic attacks are named in display strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// `E. BASIC`
    #[default]
    Standard,
    /// `EB1`, `EB2`, `EB3` for multi-level enhanced attacks
    Tiered,
}

/// Per-kind turn counts of a rotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCounts([u32; ActionKind::COUNT]);

impl ActionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the turns of a sequence
    pub fn from_turns(turns: &[ActionKind]) -> Self {
        let mut counts = Self::new();
        for &turn in turns {
            counts.add(turn);
        }
        counts
    }

    pub fn add(&mut self, kind: ActionKind) {
        self.0[kind.index()] += 1;
    }

    pub fn get(&self, kind: ActionKind) -> u32 {
        self.0[kind.index()]
    }

    /// Total number of turns
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Turns in the basic attack family (BASIC and every enhanced tier)
    pub fn basic_family(&self) -> u32 {
        ActionKind::all()
            .iter()
            .filter(|k| k.is_basic_family())
            .map(|&k| self.get(k))
            .sum()
    }

    /// Turns in the skill family (SKILL and E. SKILL)
    pub fn skill_family(&self) -> u32 {
        ActionKind::all()
            .iter()
            .filter(|k| k.is_skill_family())
            .map(|&k| self.get(k))
            .sum()
    }

    /// Render as `"2 x SKILL > E. BASIC > 3 x BASIC"`
    pub fn display(&self, style: DisplayStyle) -> String {
        ActionKind::display_order()
            .iter()
            .filter_map(|&kind| match self.get(kind) {
                0 => None,
                1 => Some(kind.styled_label(style).to_string()),
                n => Some(format!("{} x {}", n, kind.styled_label(style))),
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
