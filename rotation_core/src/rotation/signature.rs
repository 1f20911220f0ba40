//! Order-independent rotation keys

use crate::types::ActionKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Canonical key of a turn multiset: labels in `ActionKind` order, space separated
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Build the key for `turns` in any order
    pub fn of(turns: &[ActionKind]) -> Self {
        let mut sorted = turns.to_vec();
        sorted.sort();
        Self::of_sorted(&sorted)
    }

    pub(crate) fn of_sorted(sorted: &[ActionKind]) -> Self {
        let labels: Vec<&str> = sorted.iter().map(|kind| kind.label()).collect();
        Signature(labels.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exact set of signatures already seen
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Signature>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signature`; returns false when it was already present
    pub fn insert(&mut self, signature: &Signature) -> bool {
        if self.seen.contains(signature) {
            return false;
        }
        self.seen.insert(signature.clone())
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.seen.contains(signature)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    #[test]
    fn test_signature_ignores_order() {
        assert_eq!(Signature::of(&[Skill, Basic, Skill]), Signature::of(&[Basic, Skill, Skill]));
        assert_eq!(Signature::of(&[Skill, Basic, Skill]).as_str(), "BASIC SKILL SKILL");
    }

    #[test]
    fn test_signature_distinguishes_counts() {
        assert_ne!(Signature::of(&[Basic, Skill]), Signature::of(&[Basic, Skill, Skill]));
        assert_ne!(Signature::of(&[EnhancedBasic]), Signature::of(&[Basic]));
    }

    #[test]
    fn test_deduplicator_rejects_repeats() {
        let mut dedup = Deduplicator::new();
        let first = Signature::of(&[Skill, Basic]);
        assert!(dedup.insert(&first));
        assert!(!dedup.insert(&Signature::of(&[Basic, Skill])));
        assert!(dedup.contains(&first));
        assert_eq!(dedup.len(), 1);
    }
}
