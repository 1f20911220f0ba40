//! Prelude module for convenient imports
//!
//! ```rust
//! use rotation_core::prelude::*;
//! ```

// Inputs
pub use crate::config::{CalculationProfile, CounterSetting, RunConfig};
pub use crate::entity::EntityKind;
pub use crate::stat_vector::StatVector;

// Pipeline
pub use crate::calculation::{Calculation, CalculationReport};
pub use crate::error::CalculationError;

// Results
pub use crate::breakpoint::{Breakpoint, BreakpointOutcome};
pub use crate::query::RotationQuery;
pub use crate::rotation::{Rotation, RotationCatalog, RotationSummary};
pub use crate::types::{ActionKind, DisplayStyle};
