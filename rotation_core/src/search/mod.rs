//! Rotation search - exhaustive enumeration of shortest energy paths
//!
//! The engine walks the tree of turn sequences depth-first with an explicit
//! work stack. A path stops growing as soon as its energy reaches the
//! threshold; what it accumulated is handed to the catalog, which keeps one
//! rotation per turn multiset.

mod state;

pub use state::SearchState;

use crate::config::SearchLimits;
use crate::error::CalculationError;
use crate::rotation::RotationCatalog;
use crate::rules::ActionRuleSet;
use crate::stat_vector::StatVector;
use crate::trigger::TriggerSet;

/// Counters describing one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: usize,
    pub completed_paths: usize,
    pub truncated_paths: usize,
    pub max_stack: usize,
}

/// Depth-first rotation enumerator for one prepared configuration
#[derive(Debug, Clone)]
pub struct RotationSearchEngine<'a> {
    rules: &'a ActionRuleSet,
    threshold: f64,
    initial_energy: f64,
    initial_resource: i32,
    triggers: TriggerSet,
    limits: SearchLimits,
}

impl<'a> RotationSearchEngine<'a> {
    pub fn new(rules: &'a ActionRuleSet, stats: &StatVector, triggers: TriggerSet) -> Self {
        RotationSearchEngine {
            rules,
            threshold: stats.threshold,
            initial_energy: stats.initial_energy(),
            initial_resource: stats.initial_resource,
            triggers,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enumerate every rotation reachable within the depth cap
    pub fn run(&self) -> Result<RotationCatalog, CalculationError> {
        self.run_with_stats().map(|(catalog, _)| catalog)
    }

    pub fn run_with_stats(&self) -> Result<(RotationCatalog, SearchStats), CalculationError> {
        let mut catalog = RotationCatalog::new(self.rules.display_style());
        let stats = self.walk(|state| {
            catalog.insert(&state.turns, state.energy, state.resource);
        })?;

        tracing::debug!(
            rules = self.rules.name(),
            threshold = self.threshold,
            expansions = stats.expansions,
            completed = stats.completed_paths,
            truncated = stats.truncated_paths,
            max_stack = stats.max_stack,
            rotations = catalog.len(),
            "rotation search finished"
        );

        if catalog.is_empty() {
            return Err(CalculationError::EmptyCatalog);
        }
        Ok((catalog, stats))
    }

    /// Visit every completed path, repeated turn multisets included
    pub fn walk<F>(&self, mut on_complete: F) -> Result<SearchStats, CalculationError>
    where
        F: FnMut(&SearchState),
    {
        let mut stats = SearchStats::default();
        let mut stack = vec![SearchState::root(
            self.initial_energy,
            self.initial_resource,
            self.rules.initial_aux(),
            self.triggers,
        )];

        while let Some(state) = stack.pop() {
            if state.turn_count() > 0 && state.energy >= self.threshold {
                stats.completed_paths += 1;
                on_complete(&state);
                continue;
            }

            if state.turn_count() >= self.limits.max_turns {
                stats.truncated_paths += 1;
                continue;
            }

            stats.expansions += 1;
            if stats.expansions > self.limits.max_expansions {
                tracing::warn!(
                    limit = self.limits.max_expansions,
                    rules = self.rules.name(),
                    "rotation search exceeded its expansion limit"
                );
                return Err(CalculationError::SearchLimitExceeded {
                    limit: self.limits.max_expansions,
                });
            }

            let mut triggers = state.triggers;
            let turn = triggers.tick();

            let mut energy = state.energy;
            if energy <= self.threshold / 2.0 {
                energy += turn.low_energy;
            }
            energy += turn.energy;

            let successors = self.rules.expand(state.aux, &turn);
            // Reverse so the first listed turn is explored first
            for successor in successors.iter().rev() {
                stack.push(state.advance(energy, successor, &turn, triggers));
            }
            stats.max_stack = stats.max_stack.max(stack.len());
        }

        Ok(stats)
    }
}
