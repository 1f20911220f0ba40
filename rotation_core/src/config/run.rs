//! Per-run configuration record

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// How often a bonus fires: `count` times, or every turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSetting {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub every_turn: bool,
}

impl CounterSetting {
    pub fn times(count: u32) -> Self {
        CounterSetting {
            count,
            every_turn: false,
        }
    }

    pub fn every_turn() -> Self {
        CounterSetting {
            count: 1,
            every_turn: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.every_turn || self.count > 0
    }
}

/// Named trigger counters supplied by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSettings {
    #[serde(default)]
    pub hits_taken: CounterSetting,
    #[serde(default)]
    pub kills: CounterSetting,
    /// Kills scored by the opening ultimate; adds opening energy only
    #[serde(default)]
    pub ultimate_kills: CounterSetting,
    #[serde(default)]
    pub follow_ups: CounterSetting,
    #[serde(default)]
    pub relic_procs: CounterSetting,
    #[serde(default)]
    pub ally_hits_taken: CounterSetting,
    /// Bonus energy from a support light cone worn by an ally
    #[serde(default)]
    pub support_bonus: CounterSetting,
    /// Turns on which the low-energy bonus may be paid
    #[serde(default)]
    pub low_energy: CounterSetting,
    /// Turns during which the temporary recharge increase holds
    #[serde(default)]
    pub temporary_recharge: CounterSetting,
}

impl TriggerSettings {
    fn named(&self) -> [(&'static str, CounterSetting); 9] {
        [
            ("hits_taken", self.hits_taken),
            ("kills", self.kills),
            ("ultimate_kills", self.ultimate_kills),
            ("follow_ups", self.follow_ups),
            ("relic_procs", self.relic_procs),
            ("ally_hits_taken", self.ally_hits_taken),
            ("support_bonus", self.support_bonus),
            ("low_energy", self.low_energy),
            ("temporary_recharge", self.temporary_recharge),
        ]
    }
}

/// Flags and counters for a single calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub assume_ultimate_activation_at_start: bool,
    #[serde(default)]
    pub technique: bool,
    #[serde(default)]
    pub eidolon_level: u8,
    #[serde(default)]
    pub trace_level: u8,
    #[serde(default = "default_enemy_count")]
    pub enemy_count: u32,
    #[serde(default)]
    pub enemy_weakness_matches: bool,
    /// Opening energy granted by an ally's ultimate; not scaled by recharge
    #[serde(default)]
    pub ally_ultimate_energy: f64,
    /// Energy added at the start of a turn while at or below half the threshold
    #[serde(default)]
    pub low_energy_bonus: f64,
    /// Support light cone energy per trigger; not scaled by recharge
    #[serde(default)]
    pub support_bonus_energy: f64,
    /// Recharge increase (0.12 = +12%) while `triggers.temporary_recharge` fires
    #[serde(default)]
    pub temporary_recharge: f64,
    #[serde(default)]
    pub triggers: TriggerSettings,
}

fn default_enemy_count() -> u32 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            assume_ultimate_activation_at_start: false,
            technique: false,
            eidolon_level: 0,
            trace_level: 0,
            enemy_count: default_enemy_count(),
            enemy_weakness_matches: false,
            ally_ultimate_energy: 0.0,
            low_energy_bonus: 0.0,
            support_bonus_energy: 0.0,
            temporary_recharge: 0.0,
            triggers: TriggerSettings::default(),
        }
    }
}

impl RunConfig {
    pub const MAX_EIDOLON_LEVEL: u8 = 6;
    pub const MAX_TRACE_LEVEL: u8 = 3;
    pub const MAX_ENEMY_COUNT: u32 = 5;
    pub const MAX_TRIGGER_COUNT: u32 = 100;

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eidolon_level > Self::MAX_EIDOLON_LEVEL {
            return Err(ConfigError::ValidationError(format!(
                "eidolon_level must be at most {}, got {}",
                Self::MAX_EIDOLON_LEVEL,
                self.eidolon_level
            )));
        }
        if self.trace_level > Self::MAX_TRACE_LEVEL {
            return Err(ConfigError::ValidationError(format!(
                "trace_level must be at most {}, got {}",
                Self::MAX_TRACE_LEVEL,
                self.trace_level
            )));
        }
        if self.enemy_count == 0 || self.enemy_count > Self::MAX_ENEMY_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "enemy_count must be between 1 and {}, got {}",
                Self::MAX_ENEMY_COUNT,
                self.enemy_count
            )));
        }
        if let Some((name, setting)) = self
            .triggers
            .named()
            .into_iter()
            .find(|(_, setting)| setting.count > Self::MAX_TRIGGER_COUNT)
        {
            return Err(ConfigError::ValidationError(format!(
                "{} count must be at most {}, got {}",
                name,
                Self::MAX_TRIGGER_COUNT,
                setting.count
            )));
        }
        if self.triggers.ultimate_kills.every_turn {
            return Err(ConfigError::ValidationError(
                "ultimate_kills cannot repeat every turn".to_string(),
            ));
        }
        for (name, value) in [
            ("ally_ultimate_energy", self.ally_ultimate_energy),
            ("low_energy_bonus", self.low_energy_bonus),
            ("support_bonus_energy", self.support_bonus_energy),
            ("temporary_recharge", self.temporary_recharge),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
