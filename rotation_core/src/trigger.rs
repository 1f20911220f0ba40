//! Trigger counters - bonuses that fire a number of times or every turn

use crate::config::{CounterSetting, RunConfig};
use crate::stat_vector::StatVector;
use serde::{Deserialize, Serialize};

/// A bonus that fires once per turn
///
/// Counters are plain values: every search state carries its own copy, so
/// consuming one on a branch never affects siblings or later runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerCounter {
    /// Turns left to fire; for every-turn counters, firings per turn
    pub remaining: u32,
    pub every_turn: bool,
    /// Energy added on each turn the counter fires
    pub energy: f64,
}

impl TriggerCounter {
    pub fn new(setting: CounterSetting, energy: f64) -> Self {
        TriggerCounter {
            remaining: if setting.every_turn {
                setting.count.max(1)
            } else {
                setting.count
            },
            every_turn: setting.every_turn,
            energy,
        }
    }

    /// A counter that fires `count` times
    pub fn times(count: u32, energy: f64) -> Self {
        Self::new(CounterSetting::times(count), energy)
    }

    pub fn is_active(&self) -> bool {
        self.every_turn || self.remaining > 0
    }

    /// Consume one turn
    ///
    /// Returns the energy gained and how many triggers fired.
    pub fn tick(&mut self) -> (f64, u32) {
        if self.every_turn {
            (self.energy, self.remaining)
        } else if self.remaining > 0 {
            self.remaining -= 1;
            (self.energy, 1)
        } else {
            (0.0, 0)
        }
    }
}

/// A recharge increase that holds on every turn its counter fires
///
/// Action energy is already scaled by the base recharge, so the boost is
/// kept as the ratio between the raised and the base multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RechargeBoost {
    pub counter: TriggerCounter,
    pub factor: f64,
}

impl Default for RechargeBoost {
    fn default() -> Self {
        RechargeBoost {
            counter: TriggerCounter::default(),
            factor: 1.0,
        }
    }
}

impl RechargeBoost {
    /// Raise `recharge` by `bonus` for as long as `setting` fires
    pub fn new(setting: CounterSetting, recharge: f64, bonus: f64) -> Self {
        RechargeBoost {
            counter: TriggerCounter::new(setting, 0.0),
            factor: (recharge + bonus) / recharge,
        }
    }

    /// Multiplier for this turn's scaled energy
    pub fn tick(&mut self) -> f64 {
        match self.counter.tick() {
            (_, 0) => 1.0,
            _ => self.factor,
        }
    }
}

/// What the trigger counters contributed to one turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnTriggers {
    /// Energy from every counter that fired, boost included
    pub energy: f64,
    /// Bonus granted only when the turn starts at or below half the threshold
    pub low_energy: f64,
    pub hits_taken: u32,
    /// Multiplier for the recharge-scaled energy of this turn's action
    pub recharge_factor: f64,
}

impl Default for TurnTriggers {
    fn default() -> Self {
        TurnTriggers {
            energy: 0.0,
            low_energy: 0.0,
            hits_taken: 0,
            recharge_factor: 1.0,
        }
    }
}

/// The named counters active during a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerSet {
    pub hits_taken: TriggerCounter,
    pub kills: TriggerCounter,
    pub follow_ups: TriggerCounter,
    pub relic_procs: TriggerCounter,
    pub ally_hits_taken: TriggerCounter,
    /// Support light cone energy; not scaled by recharge
    pub support_bonus: TriggerCounter,
    /// Quid Pro Quo style bonus; consumed every turn, paid only when low
    pub low_energy: TriggerCounter,
    pub recharge_boost: RechargeBoost,
    /// Entity-specific bonus (summons and the like)
    pub entity_bonus: TriggerCounter,
}

impl TriggerSet {
    /// Build counters from the run settings, taking scaled energy values
    /// from prepared `stats`
    pub fn from_run(run: &RunConfig, stats: &StatVector) -> Self {
        let settings = &run.triggers;
        let energy = &stats.energy;
        TriggerSet {
            hits_taken: TriggerCounter::new(settings.hits_taken, energy.hit_taken),
            kills: TriggerCounter::new(settings.kills, energy.kill),
            follow_ups: TriggerCounter::new(settings.follow_ups, energy.follow_up),
            relic_procs: TriggerCounter::new(settings.relic_procs, energy.relic_proc),
            ally_hits_taken: TriggerCounter::new(settings.ally_hits_taken, energy.ally_hit_taken),
            support_bonus: TriggerCounter::new(settings.support_bonus, run.support_bonus_energy),
            low_energy: TriggerCounter::new(settings.low_energy, run.low_energy_bonus),
            recharge_boost: RechargeBoost::new(
                settings.temporary_recharge,
                stats.recharge,
                run.temporary_recharge,
            ),
            entity_bonus: TriggerCounter::default(),
        }
    }

    pub fn with_entity_bonus(mut self, counter: TriggerCounter) -> Self {
        self.entity_bonus = counter;
        self
    }

    pub fn any_active(&self) -> bool {
        self.counters().iter().any(|c| c.is_active())
    }

    /// Consume one turn from every counter
    pub fn tick(&mut self) -> TurnTriggers {
        let recharge_factor = self.recharge_boost.tick();
        let (hit_energy, hits_taken) = self.hits_taken.tick();
        let scaled = hit_energy
            + self.kills.tick().0
            + self.follow_ups.tick().0
            + self.relic_procs.tick().0
            + self.ally_hits_taken.tick().0
            + self.entity_bonus.tick().0;

        TurnTriggers {
            energy: scaled * recharge_factor + self.support_bonus.tick().0,
            low_energy: self.low_energy.tick().0,
            hits_taken,
            recharge_factor,
        }
    }

    fn counters(&self) -> [&TriggerCounter; 9] {
        [
            &self.hits_taken,
            &self.kills,
            &self.follow_ups,
            &self.relic_procs,
            &self.ally_hits_taken,
            &self.support_bonus,
            &self.low_energy,
            &self.recharge_boost.counter,
            &self.entity_bonus,
        ]
    }
}
