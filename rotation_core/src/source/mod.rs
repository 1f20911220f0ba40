//! EnergySource - Contributions applied to a StatVector before recharge

mod opening;

pub use opening::{AllyUltimateSource, OpeningEnergySource};

use crate::stat_vector::StatVector;

/// Anything that adjusts the un-scaled energy profile of an entity
pub trait EnergySource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Entity passives: -100
    /// - Opening energy: 0
    /// - Ally contributions: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source to the stats
    fn apply(&self, stats: &mut StatVector);
}

/// Apply every source in priority order
pub fn apply_sources(stats: &mut StatVector, sources: &[&dyn EnergySource]) {
    let mut ordered: Vec<&dyn EnergySource> = sources.to_vec();
    ordered.sort_by_key(|s| s.priority());
    for source in ordered {
        tracing::trace!(source = source.id(), "applying energy source");
        source.apply(stats);
    }
}
