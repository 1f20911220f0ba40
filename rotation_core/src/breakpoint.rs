//! Breakpoint solver - the recharge needed to shorten a rotation by a turn

use crate::config::SolverSettings;
use crate::error::CalculationError;
use crate::rotation::{round3, Rotation};
use crate::stat_vector::StatVector;
use serde::{Deserialize, Serialize};

/// Result of a breakpoint search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakpointOutcome {
    /// Minimal recharge (percent) at which the rotation gets shorter
    Needed { percent: f64 },
    /// Not shorter even at the upper bound of the search
    ExceedsBound { bound_percent: f64 },
    /// The rotation already takes a single turn
    NoImprovementPossible,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub current_percent: f64,
    pub outcome: BreakpointOutcome,
}

impl Breakpoint {
    /// Extra recharge (percentage points) over the current value, when reachable
    pub fn increase_percent(&self) -> Option<f64> {
        match self.outcome {
            BreakpointOutcome::Needed { percent } => Some(round3(percent - self.current_percent)),
            _ => None,
        }
    }
}

/// Binary search over the recharge multiplier
///
/// Each trial rescales the stats inside [`StatVector::with_recharge`] and
/// hands them to an evaluator that re-runs the pipeline and reports the
/// turn count of the rotation the query picks at that recharge.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakpointSolver {
    settings: SolverSettings,
}

impl BreakpointSolver {
    pub fn new(settings: SolverSettings) -> Self {
        BreakpointSolver { settings }
    }

    pub fn solve<F>(
        &self,
        stats: &mut StatVector,
        target: &Rotation,
        mut evaluate: F,
    ) -> Result<Breakpoint, CalculationError>
    where
        F: FnMut(&StatVector) -> Result<Option<usize>, CalculationError>,
    {
        let current = stats.recharge;
        let current_percent = round3(current * 100.0);
        let upper = self.settings.upper_bound;
        let turns = target.turn_count;

        if turns <= 1 {
            return Ok(Breakpoint {
                current_percent,
                outcome: BreakpointOutcome::NoImprovementPossible,
            });
        }

        let mut improved_at = |multiplier: f64| -> Result<bool, CalculationError> {
            let trial = stats.with_recharge(multiplier, |trial| evaluate(trial))??;
            if let Some(trial_turns) = trial {
                if trial_turns > turns {
                    tracing::warn!(
                        recharge = multiplier,
                        turns,
                        trial_turns,
                        "higher recharge produced a longer rotation"
                    );
                }
            }
            Ok(matches!(trial, Some(n) if n < turns))
        };

        if current >= upper || !improved_at(upper)? {
            return Ok(Breakpoint {
                current_percent,
                outcome: BreakpointOutcome::ExceedsBound {
                    bound_percent: round3(upper * 100.0),
                },
            });
        }

        let (mut low, mut high) = (current, upper);
        let mut trials = 1;
        while high - low > self.settings.tolerance {
            let mid = (low + high) / 2.0;
            trials += 1;
            if improved_at(mid)? {
                high = mid;
            } else {
                low = mid;
            }
        }

        tracing::debug!(
            current = current,
            breakpoint = high,
            trials,
            turns,
            "breakpoint found"
        );

        Ok(Breakpoint {
            current_percent,
            outcome: BreakpointOutcome::Needed {
                percent: round3(high * 100.0),
            },
        })
    }
}
