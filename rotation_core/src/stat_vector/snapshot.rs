//! Snapshots and scoped recharge trials

use super::{EnergyFields, StatVector};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Stored copy of every mutable value of a [`StatVector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub threshold: f64,
    pub recharge: f64,
    pub energy: EnergyFields,
    pub flat_initial_energy: f64,
    pub initial_resource: i32,
    pub unscaled: Option<EnergyFields>,
}

/// Stats temporarily rescaled to a trial recharge value
///
/// The original values come back when the trial is dropped.
pub struct RechargeTrial<'a> {
    stats: &'a mut StatVector,
    saved: StatSnapshot,
}

impl<'a> RechargeTrial<'a> {
    /// Rescale `stats` from its un-scaled values to `multiplier`
    pub fn begin(stats: &'a mut StatVector, multiplier: f64) -> Self {
        let saved = stats.capture();
        let energy = stats.unscaled_energy().scaled(multiplier);
        stats.energy = energy;
        stats.recharge = multiplier;
        RechargeTrial { stats, saved }
    }

    pub fn stats(&self) -> &StatVector {
        self.stats
    }
}

impl Deref for RechargeTrial<'_> {
    type Target = StatVector;

    fn deref(&self) -> &StatVector {
        self.stats
    }
}

impl Drop for RechargeTrial<'_> {
    fn drop(&mut self) {
        self.stats.apply_snapshot(&self.saved);
    }
}
