//! Calculation profile loading

use super::{CalculationConstants, ConfigError, RunConfig};
use crate::entity::EntityKind;
use crate::stat_vector::StatVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything one calculation needs: who, with which stats, under which run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationProfile {
    pub entity: EntityKind,
    /// Energy recharge multiplier (1.0 = 100%)
    #[serde(default = "default_recharge")]
    pub recharge: f64,
    /// Un-scaled stats resolved from base values and gear
    pub stats: StatVector,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub constants: CalculationConstants,
}

fn default_recharge() -> f64 {
    1.0
}

impl CalculationProfile {
    pub fn new(entity: EntityKind, stats: StatVector) -> Self {
        CalculationProfile {
            entity,
            recharge: default_recharge(),
            stats,
            run: RunConfig::default(),
            constants: CalculationConstants::default(),
        }
    }

    pub fn with_recharge(mut self, recharge: f64) -> Self {
        self.recharge = recharge;
        self
    }

    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.recharge.is_finite() || self.recharge <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "recharge must be positive, got {}",
                self.recharge
            )));
        }
        if self.constants.search.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_turns must be at least 1".to_string(),
            ));
        }
        let solver = &self.constants.solver;
        if !solver.tolerance.is_finite() || solver.tolerance <= 0.0 || !solver.upper_bound.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "solver needs a positive tolerance and finite bound, got {} and {}",
                solver.tolerance, solver.upper_bound
            )));
        }
        self.run.validate()?;
        self.stats.validate()
    }
}

/// Load a calculation profile from a TOML file
pub fn load_profile(path: &Path) -> Result<CalculationProfile, ConfigError> {
    profile_from_table(super::load_toml(path)?)
}

/// Load a calculation profile from a TOML string
pub fn parse_profile(content: &str) -> Result<CalculationProfile, ConfigError> {
    profile_from_table(super::parse_toml(content)?)
}

fn profile_from_table(table: toml::Table) -> Result<CalculationProfile, ConfigError> {
    // An unknown entity is reported by name, not as a parse error
    if let Some(toml::Value::String(name)) = table.get("entity") {
        name.parse::<EntityKind>()?;
    }
    let profile: CalculationProfile = toml::Value::Table(table).try_into()?;
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let toml = r#"
entity = "fu_xuan"
recharge = 1.194

[stats]
threshold = 135.0

[stats.energy]
enhanced_skill = 20.0

[run]
assume_ultimate_activation_at_start = true
technique = true
eidolon_level = 4
enemy_count = 1

[run.triggers.hits_taken]
count = 2
"#;

        let profile = parse_profile(toml).unwrap();
        assert_eq!(profile.entity, EntityKind::FuXuan);
        assert!((profile.recharge - 1.194).abs() < 1e-9);
        assert!((profile.stats.threshold - 135.0).abs() < 1e-9);
        assert!((profile.stats.energy.enhanced_skill - 20.0).abs() < 1e-9);
        assert!((profile.stats.energy.basic - 20.0).abs() < 1e-9);
        assert_eq!(profile.run.eidolon_level, 4);
        assert_eq!(profile.run.triggers.hits_taken.count, 2);
        assert!(!profile.run.triggers.hits_taken.every_turn);
        assert_eq!(profile.constants.search.max_turns, 32);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let profile = parse_profile("entity = \"generic\"\n[stats]\nthreshold = 90.0\n").unwrap();
        assert!((profile.recharge - 1.0).abs() < f64::EPSILON);
        assert_eq!(profile.run, RunConfig::default());
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let toml = "entity = \"generic\"\n[stats]\nthreshold = 90.0\n[run]\neidolon_level = 9\n";
        assert!(matches!(
            parse_profile(toml),
            Err(ConfigError::ValidationError(_))
        ));

        let toml = "entity = \"generic\"\nrecharge = 0.0\n[stats]\nthreshold = 90.0\n";
        assert!(matches!(
            parse_profile(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_entity_is_named() {
        let toml = "entity = \"kafka\"\n[stats]\nthreshold = 90.0\n";
        match parse_profile(toml) {
            Err(ConfigError::UnknownEntity(name)) => assert_eq!(name, "kafka"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_entity_accepts_display_name() {
        let toml = "entity = \"Fu Xuan\"\n[stats]\nthreshold = 135.0\n";
        assert_eq!(parse_profile(toml).unwrap().entity, EntityKind::FuXuan);
    }

    #[test]
    fn test_malformed_profile_is_parse_error() {
        let toml = "entity = \"generic\"\n[stats]\nthreshold = \"high\"\n";
        assert!(matches!(parse_profile(toml), Err(ConfigError::ParseError(_))));
    }
}
