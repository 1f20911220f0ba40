//! rotation_core - Energy rotation calculator for turn-based combat entities
//!
//! This library provides:
//! - StatVector: Recharge-scaled energy profile with snapshots and trials
//! - ActionRuleSet: Per-entity turn rules (charges, windows, tiers, modes)
//! - RotationSearchEngine: Exhaustive search for shortest energy rotations
//! - RotationQuery: Best, neutral, attack-restricted and budgeted selections
//! - BreakpointSolver: Recharge needed to shorten a rotation by one turn

pub mod breakpoint;
pub mod calculation;
pub mod config;
pub mod entity;
pub mod error;
pub mod prelude;
pub mod query;
pub mod rotation;
pub mod rules;
pub mod search;
pub mod source;
pub mod stat_vector;
pub mod trigger;
pub mod types;

// Re-export core types for convenience
pub use breakpoint::{Breakpoint, BreakpointOutcome, BreakpointSolver};
pub use calculation::{
    AlternateThreshold, BudgetRotation, Calculation, CalculationReport, NamedRotations,
};
pub use config::{
    load_profile, parse_profile, CalculationConstants, CalculationProfile, ConfigError,
    CounterSetting, RunConfig, SearchLimits, SolverSettings, TriggerSettings,
};
pub use entity::{EntityKind, EntityPassive};
pub use error::CalculationError;
pub use query::RotationQuery;
pub use rotation::{Deduplicator, Rotation, RotationCatalog, RotationSummary, Signature};
pub use rules::{ActionRuleSet, AuxState, Successor};
pub use search::{RotationSearchEngine, SearchState, SearchStats};
pub use source::{apply_sources, AllyUltimateSource, EnergySource, OpeningEnergySource};
pub use stat_vector::{EnergyFields, RechargeTrial, StatVector};
pub use trigger::{RechargeBoost, TriggerCounter, TriggerSet, TurnTriggers};
pub use types::{ActionCounts, ActionKind, DisplayStyle};
