//! StatVector - The energy generation profile of an entity

mod snapshot;

pub use snapshot::{RechargeTrial, StatSnapshot};

use crate::config::ConfigError;
use crate::error::CalculationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every additive energy value of an entity
///
/// All of these are scaled together by the recharge multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyFields {
    pub basic: f64,
    pub skill: f64,
    /// Enhanced basic attack tiers, lowest first
    pub enhanced_basic: Vec<f64>,
    pub enhanced_skill: f64,
    pub follow_up: f64,
    pub hit_taken: f64,
    pub ally_hit_taken: f64,
    pub kill: f64,
    pub ultimate_kill: f64,
    pub ultimate_activation: f64,
    pub relic_proc: f64,
    /// Energy held before the first turn
    pub initial: f64,
}

impl Default for EnergyFields {
    fn default() -> Self {
        EnergyFields {
            basic: 20.0,
            skill: 30.0,
            enhanced_basic: Vec::new(),
            enhanced_skill: 0.0,
            follow_up: 0.0,
            hit_taken: 10.0,
            ally_hit_taken: 0.0,
            kill: 10.0,
            ultimate_kill: 10.0,
            ultimate_activation: 5.0,
            relic_proc: 0.0,
            initial: 0.0,
        }
    }
}

impl EnergyFields {
    /// Copy with every field multiplied by `multiplier`
    pub fn scaled(&self, multiplier: f64) -> Self {
        EnergyFields {
            basic: self.basic * multiplier,
            skill: self.skill * multiplier,
            enhanced_basic: self.enhanced_basic.iter().map(|v| v * multiplier).collect(),
            enhanced_skill: self.enhanced_skill * multiplier,
            follow_up: self.follow_up * multiplier,
            hit_taken: self.hit_taken * multiplier,
            ally_hit_taken: self.ally_hit_taken * multiplier,
            kill: self.kill * multiplier,
            ultimate_kill: self.ultimate_kill * multiplier,
            ultimate_activation: self.ultimate_activation * multiplier,
            relic_proc: self.relic_proc * multiplier,
            initial: self.initial * multiplier,
        }
    }

    /// Enhanced basic tier (1-based), if the entity has one
    pub fn enhanced_tier(&self, tier: usize) -> Option<f64> {
        tier.checked_sub(1).and_then(|i| self.enhanced_basic.get(i).copied())
    }

    fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            ("basic", self.basic),
            ("skill", self.skill),
            ("enhanced_skill", self.enhanced_skill),
            ("follow_up", self.follow_up),
            ("hit_taken", self.hit_taken),
            ("ally_hit_taken", self.ally_hit_taken),
            ("kill", self.kill),
            ("ultimate_kill", self.ultimate_kill),
            ("ultimate_activation", self.ultimate_activation),
            ("relic_proc", self.relic_proc),
            ("initial", self.initial),
        ]
        .into_iter()
        .chain(self.enhanced_basic.iter().map(|&v| ("enhanced_basic", v)))
    }
}

/// Resolved energy profile for one calculation
///
/// Built by the bonus-resolution layer with un-scaled values. The recharge
/// multiplier is applied once with [`StatVector::apply_recharge`]; the
/// un-scaled values are kept so breakpoint trials can rescale from them.
///
/// Serializes as the un-scaled record it was read from, so prepared stats
/// written out and read back are ready for another recharge pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StatRecord")]
pub struct StatVector {
    /// Energy needed to use the ultimate; never scaled
    pub threshold: f64,
    /// Current recharge multiplier (1.0 = 100%)
    #[serde(skip, default = "default_recharge")]
    pub recharge: f64,
    #[serde(default)]
    pub energy: EnergyFields,
    /// Opening energy that recharge does not affect
    #[serde(default)]
    pub flat_initial_energy: f64,
    /// Banked skill points before the first turn
    #[serde(default)]
    pub initial_resource: i32,

    #[serde(skip)]
    unscaled: Option<EnergyFields>,
    #[serde(skip)]
    snapshots: HashMap<String, StatSnapshot>,
}

fn default_recharge() -> f64 {
    1.0
}

#[derive(Serialize)]
struct StatRecord {
    threshold: f64,
    flat_initial_energy: f64,
    initial_resource: i32,
    energy: EnergyFields,
}

impl From<StatVector> for StatRecord {
    fn from(stats: StatVector) -> Self {
        StatRecord {
            threshold: stats.threshold,
            flat_initial_energy: stats.flat_initial_energy,
            initial_resource: stats.initial_resource,
            energy: stats.unscaled.unwrap_or(stats.energy),
        }
    }
}

impl StatVector {
    /// Create a stat vector with default energy values
    pub fn new(threshold: f64) -> Self {
        StatVector {
            threshold,
            recharge: default_recharge(),
            energy: EnergyFields::default(),
            flat_initial_energy: 0.0,
            initial_resource: 0,
            unscaled: None,
            snapshots: HashMap::new(),
        }
    }

    /// Set the basic attack and skill energy
    pub fn with_action_energy(mut self, basic: f64, skill: f64) -> Self {
        self.energy.basic = basic;
        self.energy.skill = skill;
        self
    }

    /// Set the opening energy (scaled by recharge)
    pub fn with_initial_energy(mut self, initial: f64) -> Self {
        self.energy.initial = initial;
        self
    }

    /// Energy available before the first turn
    pub fn initial_energy(&self) -> f64 {
        self.energy.initial + self.flat_initial_energy
    }

    /// Whether the recharge pass has run
    pub fn is_recharge_applied(&self) -> bool {
        self.unscaled.is_some()
    }

    /// Multiply every energy field by `multiplier` and record it
    ///
    /// May run once per configuration pass.
    pub fn apply_recharge(&mut self, multiplier: f64) -> Result<(), CalculationError> {
        if self.is_recharge_applied() {
            return Err(CalculationError::RechargeAlreadyApplied {
                current: self.recharge,
            });
        }
        validate_multiplier(multiplier)?;

        let base = self.energy.clone();
        self.energy = base.scaled(multiplier);
        self.unscaled = Some(base);
        self.recharge = multiplier;
        Ok(())
    }

    /// Scale a raw energy bonus by the current recharge
    pub fn scaled(&self, value: f64) -> f64 {
        value * self.recharge
    }

    /// Run `f` against a copy of these stats rescaled to `multiplier`
    ///
    /// The stats are restored before returning, including when `f` panics.
    pub fn with_recharge<R>(
        &mut self,
        multiplier: f64,
        f: impl FnOnce(&StatVector) -> R,
    ) -> Result<R, CalculationError> {
        validate_multiplier(multiplier)?;
        let trial = RechargeTrial::begin(self, multiplier);
        let result = f(trial.stats());
        drop(trial);
        Ok(result)
    }

    /// Store the current values under `tag`
    ///
    /// An existing snapshot with the same tag is kept.
    pub fn snapshot(&mut self, tag: &str) {
        if !self.snapshots.contains_key(tag) {
            let snapshot = self.capture();
            self.snapshots.insert(tag.to_string(), snapshot);
        }
    }

    /// Restore and discard the snapshot stored under `tag`
    ///
    /// Returns false when there is no such snapshot, so restoring twice is a
    /// no-op.
    pub fn restore(&mut self, tag: &str) -> bool {
        match self.snapshots.remove(tag) {
            Some(snapshot) => {
                self.apply_snapshot(&snapshot);
                true
            }
            None => false,
        }
    }

    pub fn has_snapshot(&self, tag: &str) -> bool {
        self.snapshots.contains_key(tag)
    }

    /// Drop every stored snapshot
    pub fn clear_snapshots(&mut self) {
        self.snapshots.clear();
    }

    pub(crate) fn capture(&self) -> StatSnapshot {
        StatSnapshot {
            threshold: self.threshold,
            recharge: self.recharge,
            energy: self.energy.clone(),
            flat_initial_energy: self.flat_initial_energy,
            initial_resource: self.initial_resource,
            unscaled: self.unscaled.clone(),
        }
    }

    pub(crate) fn apply_snapshot(&mut self, snapshot: &StatSnapshot) {
        self.threshold = snapshot.threshold;
        self.recharge = snapshot.recharge;
        self.energy = snapshot.energy.clone();
        self.flat_initial_energy = snapshot.flat_initial_energy;
        self.initial_resource = snapshot.initial_resource;
        self.unscaled = snapshot.unscaled.clone();
    }

    pub(crate) fn unscaled_energy(&self) -> &EnergyFields {
        self.unscaled.as_ref().unwrap_or(&self.energy)
    }

    /// Check that the values can drive a search
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if let Some((name, value)) = self
            .energy
            .named_values()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::ValidationError(format!(
                "{} energy must be a non-negative number, got {}",
                name, value
            )));
        }
        if !self.flat_initial_energy.is_finite() || self.flat_initial_energy < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "flat_initial_energy must be a non-negative number, got {}",
                self.flat_initial_energy
            )));
        }
        Ok(())
    }
}

fn validate_multiplier(multiplier: f64) -> Result<(), ConfigError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "recharge multiplier must be positive, got {}",
            multiplier
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_apply_recharge_scales_energy_not_threshold() {
        let mut stats = StatVector::new(120.0).with_initial_energy(10.0);
        stats.energy.enhanced_basic = vec![30.0, 35.0];
        stats.flat_initial_energy = 50.0;

        stats.apply_recharge(1.2).unwrap();

        assert!(approx(stats.threshold, 120.0));
        assert!(approx(stats.recharge, 1.2));
        assert!(approx(stats.energy.basic, 24.0));
        assert!(approx(stats.energy.skill, 36.0));
        assert!(approx(stats.energy.hit_taken, 12.0));
        assert!(approx(stats.energy.enhanced_basic[1], 42.0));
        assert!(approx(stats.initial_energy(), 12.0 + 50.0));
    }

    #[test]
    fn test_apply_recharge_twice_is_an_error() {
        let mut stats = StatVector::new(120.0);
        stats.apply_recharge(1.1).unwrap();
        let err = stats.apply_recharge(1.1).unwrap_err();
        assert!(matches!(err, CalculationError::RechargeAlreadyApplied { .. }));
        assert!(approx(stats.energy.basic, 22.0));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let mut stats = StatVector::new(120.0);
        assert!(stats.apply_recharge(0.0).is_err());
        assert!(stats.apply_recharge(f64::NAN).is_err());
        assert!(!stats.is_recharge_applied());
    }

    #[test]
    fn test_snapshot_restore_is_idempotent() {
        let mut stats = StatVector::new(90.0);
        stats.snapshot("before");
        stats.energy.basic = 99.0;
        stats.threshold = 180.0;

        assert!(stats.restore("before"));
        assert!(approx(stats.energy.basic, 20.0));
        assert!(approx(stats.threshold, 90.0));

        stats.energy.basic = 5.0;
        assert!(!stats.restore("before"));
        assert!(approx(stats.energy.basic, 5.0));
    }

    #[test]
    fn test_snapshot_keeps_first_capture() {
        let mut stats = StatVector::new(90.0);
        stats.snapshot("tag");
        stats.energy.skill = 1.0;
        stats.snapshot("tag");
        stats.restore("tag");
        assert!(approx(stats.energy.skill, 30.0));
    }

    #[test]
    fn test_restore_undoes_recharge_application() {
        let mut stats = StatVector::new(90.0);
        stats.snapshot("base");
        stats.apply_recharge(1.5).unwrap();
        stats.restore("base");
        assert!(!stats.is_recharge_applied());
        assert!(stats.apply_recharge(1.5).is_ok());
    }

    #[test]
    fn test_clear_snapshots() {
        let mut stats = StatVector::new(90.0);
        stats.snapshot("a");
        stats.snapshot("b");
        stats.clear_snapshots();
        assert!(!stats.has_snapshot("a"));
        assert!(!stats.restore("b"));
    }

    #[test]
    fn test_with_recharge_rescales_from_base() {
        let mut stats = StatVector::new(90.0).with_action_energy(20.0, 30.0);
        stats.apply_recharge(1.1).unwrap();

        let trial_skill = stats.with_recharge(1.5, |s| s.energy.skill).unwrap();
        assert!(approx(trial_skill, 45.0));

        assert!(approx(stats.energy.skill, 33.0));
        assert!(approx(stats.recharge, 1.1));
    }

    #[test]
    fn test_with_recharge_before_application_uses_current_values() {
        let mut stats = StatVector::new(90.0);
        let basic = stats.with_recharge(2.0, |s| s.energy.basic).unwrap();
        assert!(approx(basic, 40.0));
        assert!(approx(stats.energy.basic, 20.0));
        assert!(!stats.is_recharge_applied());
    }

    #[test]
    fn test_with_recharge_restores_on_panic() {
        let mut stats = StatVector::new(90.0);
        stats.apply_recharge(1.2).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = stats.with_recharge(1.9, |_| -> u32 { panic!("trial failed") });
        }));

        assert!(result.is_err());
        assert!(approx(stats.recharge, 1.2));
        assert!(approx(stats.energy.basic, 24.0));
    }

    #[test]
    fn test_validate() {
        assert!(StatVector::new(90.0).validate().is_ok());
        assert!(StatVector::new(0.0).validate().is_err());

        let mut stats = StatVector::new(90.0);
        stats.energy.kill = -1.0;
        let err = stats.validate().unwrap_err();
        assert!(err.to_string().contains("kill"));
    }

    #[test]
    fn test_deserialize_uses_defaults() {
        let toml = r#"
threshold = 110.0
initial_resource = 2

[energy]
skill = 35.0
enhanced_basic = [30.0]
"#;

        let stats: StatVector = toml::from_str(toml).unwrap();
        assert!(approx(stats.threshold, 110.0));
        assert!(approx(stats.recharge, 1.0));
        assert!(approx(stats.energy.basic, 20.0));
        assert!(approx(stats.energy.skill, 35.0));
        assert_eq!(stats.energy.enhanced_tier(1), Some(30.0));
        assert_eq!(stats.energy.enhanced_tier(2), None);
        assert_eq!(stats.initial_resource, 2);
        assert!(!stats.is_recharge_applied());
    }

    #[test]
    fn test_prepared_stats_serialize_unscaled() {
        let mut stats = StatVector::new(110.0).with_action_energy(20.0, 30.0);
        stats.apply_recharge(1.5).unwrap();

        let text = toml::to_string(&stats).unwrap();
        let mut read: StatVector = toml::from_str(&text).unwrap();

        assert!(!text.contains("recharge"));
        assert!(approx(read.energy.skill, 30.0));
        read.apply_recharge(1.5).unwrap();
        assert!(approx(read.energy.skill, 45.0));
    }
}
