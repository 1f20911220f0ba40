//! End-to-end calculation: prepare stats, search, classify, solve breakpoints

use crate::breakpoint::{Breakpoint, BreakpointOutcome, BreakpointSolver};
use crate::config::{CalculationConstants, CalculationProfile, RunConfig, SearchLimits};
use crate::entity::EntityKind;
use crate::error::CalculationError;
use crate::rotation::{round3, Rotation, RotationCatalog, RotationSummary};
use crate::query::RotationQuery;
use crate::rules::ActionRuleSet;
use crate::search::RotationSearchEngine;
use crate::source::{apply_sources, AllyUltimateSource, OpeningEnergySource};
use crate::stat_vector::StatVector;
use crate::trigger::TriggerSet;
use serde::Serialize;
use std::fmt;

/// A profile turned into scaled stats and resolved rules, ready to search
#[derive(Debug, Clone)]
pub struct Calculation {
    entity: EntityKind,
    run: RunConfig,
    constants: CalculationConstants,
    stats: StatVector,
    rules: ActionRuleSet,
    triggers: TriggerSet,
}

impl Calculation {
    /// Validate the profile, apply every energy source and then recharge, once
    pub fn prepare(profile: &CalculationProfile) -> Result<Self, CalculationError> {
        profile.validate()?;

        let run = profile.run.clone();
        let mut stats = profile.stats.clone();
        stats.clear_snapshots();

        let passive = profile.entity.passive(&run);
        let opening = OpeningEnergySource::new(
            run.assume_ultimate_activation_at_start,
            run.triggers.ultimate_kills.count,
        );
        let ally = AllyUltimateSource {
            energy: run.ally_ultimate_energy,
        };
        apply_sources(&mut stats, &[&passive, &opening, &ally]);
        stats.apply_recharge(profile.recharge)?;

        let (rules, triggers) = resolve(profile.entity, &run, &stats);

        tracing::debug!(
            entity = profile.entity.display_name(),
            recharge = stats.recharge,
            threshold = stats.threshold,
            initial_energy = stats.initial_energy(),
            rules = rules.name(),
            "calculation prepared"
        );

        Ok(Calculation {
            entity: profile.entity,
            run,
            constants: profile.constants.clone(),
            stats,
            rules,
            triggers,
        })
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// The prepared (recharge-scaled) stats
    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    pub fn rules(&self) -> &ActionRuleSet {
        &self.rules
    }

    /// Search the rotations for the prepared threshold
    pub fn run(&self) -> Result<RotationCatalog, CalculationError> {
        self.run_at_threshold(self.stats.threshold)
    }

    /// Search the rotations for another ultimate cost with the same stats
    pub fn run_at_threshold(&self, threshold: f64) -> Result<RotationCatalog, CalculationError> {
        RotationSearchEngine::new(&self.rules, &self.stats, self.triggers)
            .with_threshold(threshold)
            .with_limits(self.constants.search)
            .run()
    }

    /// Recharge needed for `query` to pick a rotation shorter than `target`
    pub fn breakpoint(
        &mut self,
        target: &Rotation,
        query: RotationQuery,
    ) -> Result<Breakpoint, CalculationError> {
        let entity = self.entity;
        let run = &self.run;
        let limits = self.constants.search;
        let solver = BreakpointSolver::new(self.constants.solver);

        solver.solve(&mut self.stats, target, |trial| {
            let catalog = search_trial(entity, run, limits, trial)?;
            Ok(query.select(&catalog).map(|r| r.turn_count))
        })
    }

    /// Run every query and breakpoint worth reporting
    pub fn report(&mut self) -> Result<CalculationReport, CalculationError> {
        let catalog = self.run()?;
        let rotations = NamedRotations::select(&catalog);

        let basic_only_breakpoint = match RotationQuery::BasicOnly.select(&catalog) {
            Some(rotation) => Some(self.breakpoint(rotation, RotationQuery::BasicOnly)?),
            None => None,
        };
        let skill_only_breakpoint = match RotationQuery::SkillOnly.select(&catalog) {
            Some(rotation) => Some(self.breakpoint(rotation, RotationQuery::SkillOnly)?),
            None => None,
        };

        let budget_rotations = self
            .entity
            .resource_budgets()
            .iter()
            .map(|&budget| BudgetRotation {
                budget,
                rotation: RotationQuery::ResourceBudget(budget)
                    .select(&catalog)
                    .map(RotationSummary::from),
            })
            .collect();

        let mut alternate_thresholds = Vec::new();
        for threshold in self.entity.alternate_thresholds(self.stats.threshold) {
            let alternate = self.run_at_threshold(threshold)?;
            alternate_thresholds.push(AlternateThreshold {
                threshold,
                rotation_count: alternate.len(),
                rotations: NamedRotations::select(&alternate),
            });
        }

        Ok(CalculationReport {
            entity: self.entity,
            recharge_percent: round3(self.stats.recharge * 100.0),
            threshold: self.stats.threshold,
            rotation_count: catalog.len(),
            rotations,
            basic_only_breakpoint,
            skill_only_breakpoint,
            budget_rotations,
            alternate_thresholds,
        })
    }
}

/// Build the turn rules and trigger counters for scaled stats
fn resolve(entity: EntityKind, run: &RunConfig, stats: &StatVector) -> (ActionRuleSet, TriggerSet) {
    let rules = entity.rule_set(stats, run);
    let triggers = TriggerSet::from_run(run, stats)
        .with_entity_bonus(entity.entity_bonus(stats, run));
    (rules, triggers)
}

/// Full search at a trial recharge, with rules and counters rebuilt from scratch
fn search_trial(
    entity: EntityKind,
    run: &RunConfig,
    limits: SearchLimits,
    stats: &StatVector,
) -> Result<RotationCatalog, CalculationError> {
    let (rules, triggers) = resolve(entity, run, stats);
    RotationSearchEngine::new(&rules, stats, triggers)
        .with_limits(limits)
        .run()
}

/// The standard named rotations of a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRotations {
    pub best: Option<RotationSummary>,
    pub neutral: Option<RotationSummary>,
    pub basic_only: Option<RotationSummary>,
    pub skill_only: Option<RotationSummary>,
    pub one_skill: Option<RotationSummary>,
}

impl NamedRotations {
    pub fn select(catalog: &RotationCatalog) -> Self {
        let pick = |query: RotationQuery| query.select(catalog).map(RotationSummary::from);
        NamedRotations {
            best: pick(RotationQuery::Best),
            neutral: pick(RotationQuery::Neutral),
            basic_only: pick(RotationQuery::BasicOnly),
            skill_only: pick(RotationQuery::SkillOnly),
            one_skill: pick(RotationQuery::OneSkill),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRotation {
    /// Minimum skill points per turn
    pub budget: f64,
    pub rotation: Option<RotationSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternateThreshold {
    pub threshold: f64,
    pub rotation_count: usize,
    #[serde(flatten)]
    pub rotations: NamedRotations,
}

/// Everything a calculation reports, as plain serializable data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub entity: EntityKind,
    pub recharge_percent: f64,
    pub threshold: f64,
    pub rotation_count: usize,
    #[serde(flatten)]
    pub rotations: NamedRotations,
    pub basic_only_breakpoint: Option<Breakpoint>,
    pub skill_only_breakpoint: Option<Breakpoint>,
    pub budget_rotations: Vec<BudgetRotation>,
    pub alternate_thresholds: Vec<AlternateThreshold>,
}

impl CalculationReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn write_rotation(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    rotation: &Option<RotationSummary>,
) -> fmt::Result {
    if let Some(r) = rotation {
        writeln!(
            f,
            "{} ({} energy, {} SP/T): {}",
            label, r.energy_generated, r.resource_per_turn, r.display
        )?;
    }
    Ok(())
}

fn write_breakpoint(f: &mut fmt::Formatter<'_>, breakpoint: &Option<Breakpoint>) -> fmt::Result {
    match breakpoint.map(|b| b.outcome) {
        Some(BreakpointOutcome::Needed { percent }) => {
            writeln!(f, "ER needed for the next breakpoint: {}%", percent)
        }
        Some(BreakpointOutcome::ExceedsBound { bound_percent }) => {
            writeln!(f, "No breakpoint below {}% ER", bound_percent)
        }
        Some(BreakpointOutcome::NoImprovementPossible) | None => Ok(()),
    }
}

impl fmt::Display for NamedRotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rotation(f, "Most optimal rotation", &self.best)?;
        write_rotation(f, "Neutral rotation", &self.neutral)?;
        write_rotation(f, "Basic only rotation", &self.basic_only)?;
        write_rotation(f, "Skill only rotation", &self.skill_only)?;
        write_rotation(f, "One skill rotation", &self.one_skill)
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} with {}% ER", self.entity, self.recharge_percent)?;
        let named = &self.rotations;
        write_rotation(f, "Most optimal rotation", &named.best)?;
        write_rotation(f, "Neutral rotation", &named.neutral)?;
        write_rotation(f, "Basic only rotation", &named.basic_only)?;
        write_breakpoint(f, &self.basic_only_breakpoint)?;
        write_rotation(f, "Skill only rotation", &named.skill_only)?;
        write_breakpoint(f, &self.skill_only_breakpoint)?;
        write_rotation(f, "One skill rotation", &named.one_skill)?;

        for budget in &self.budget_rotations {
            let label = RotationQuery::ResourceBudget(budget.budget).name();
            write_rotation(f, &label, &budget.rotation)?;
        }
        for alternate in &self.alternate_thresholds {
            writeln!(f, "With a {} energy ultimate:", alternate.threshold)?;
            write!(f, "{}", alternate.rotations)?;
        }
        Ok(())
    }
}
