//! Search and solver tunables

use serde::{Deserialize, Serialize};

/// Tunable calculation constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationConstants {
    #[serde(default)]
    pub search: SearchLimits,
    #[serde(default)]
    pub solver: SolverSettings,
}

/// Bounds on the rotation search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Paths longer than this are dropped instead of expanded
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Hard cap on popped states; exceeding it fails the search
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_turns: default_max_turns(),
            max_expansions: default_max_expansions(),
        }
    }
}

fn default_max_turns() -> usize {
    32
}
fn default_max_expansions() -> usize {
    5_000_000
}

/// Breakpoint binary search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Highest recharge multiplier searched (2.0 = 200%)
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
    /// Stop once the search interval is narrower than this
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            upper_bound: default_upper_bound(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_upper_bound() -> f64 {
    2.0
}
fn default_tolerance() -> f64 {
    1e-5
}
