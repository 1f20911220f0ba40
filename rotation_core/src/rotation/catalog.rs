//! Insertion-ordered collection of distinct rotations

use super::{Deduplicator, Rotation, Signature};
use crate::types::{ActionKind, DisplayStyle};

/// One representative rotation per signature, in discovery order
#[derive(Debug, Default)]
pub struct RotationCatalog {
    rotations: Vec<Rotation>,
    dedup: Deduplicator,
    style: DisplayStyle,
}

impl RotationCatalog {
    pub fn new(style: DisplayStyle) -> Self {
        RotationCatalog {
            rotations: Vec::new(),
            dedup: Deduplicator::new(),
            style,
        }
    }

    /// Add a finished path unless its multiset is already cataloged
    ///
    /// Returns whether a new rotation was added.
    pub fn insert(&mut self, turns: &[ActionKind], energy: f64, resource_delta: i32) -> bool {
        let signature = Signature::of(turns);
        if !self.dedup.insert(&signature) {
            return false;
        }
        self.rotations
            .push(Rotation::new(turns.to_vec(), energy, resource_delta, self.style));
        true
    }

    pub fn get(&self, signature: &Signature) -> Option<&Rotation> {
        self.rotations.iter().find(|r| &r.signature == signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rotation> {
        self.rotations.iter()
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn display_style(&self) -> DisplayStyle {
        self.style
    }
}

impl<'a> IntoIterator for &'a RotationCatalog {
    type Item = &'a Rotation;
    type IntoIter = std::slice::Iter<'a, Rotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rotations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    #[test]
    fn test_first_representative_wins() {
        let mut catalog = RotationCatalog::new(DisplayStyle::Standard);
        assert!(catalog.insert(&[Skill, Basic, Skill], 90.0, -1));
        assert!(!catalog.insert(&[Basic, Skill, Skill], 95.0, -1));
        assert_eq!(catalog.len(), 1);

        let rotation = catalog.get(&Signature::of(&[Skill, Skill, Basic])).unwrap();
        assert!((rotation.energy_generated - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut catalog = RotationCatalog::new(DisplayStyle::Standard);
        catalog.insert(&[Skill, Skill, Skill], 90.0, -3);
        catalog.insert(&[Basic; 5], 100.0, 5);
        let displays: Vec<_> = catalog.iter().map(|r| r.display.as_str()).collect();
        assert_eq!(displays, vec!["3 x SKILL", "5 x BASIC"]);
        assert!(!catalog.is_empty());
    }
}
