//! Errors raised while preparing or running a rotation calculation

use crate::config::ConfigError;
use thiserror::Error;

/// Calculation error
///
/// A query that matches no rotation is not an error; it yields `None`.
#[derive(Error, Debug)]
pub enum CalculationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Energy recharge has already been applied ({current}); re-applying would scale energy twice")]
    RechargeAlreadyApplied { current: f64 },
    #[error("Internal invariant violated: search finished without a single rotation")]
    EmptyCatalog,
    #[error("Search explored more than {limit} states without finishing")]
    SearchLimitExceeded { limit: usize },
}
