//! Opening energy - what the entity holds before its first turn

use crate::source::EnergySource;
use crate::stat_vector::StatVector;

/// Energy from activating the ultimate at the start and the kills it scores
pub struct OpeningEnergySource {
    pub assume_ultimate: bool,
    pub ultimate_kills: u32,
}

impl OpeningEnergySource {
    pub fn new(assume_ultimate: bool, ultimate_kills: u32) -> Self {
        OpeningEnergySource {
            assume_ultimate,
            ultimate_kills,
        }
    }
}

impl EnergySource for OpeningEnergySource {
    fn id(&self) -> &str {
        "opening_energy"
    }

    fn apply(&self, stats: &mut StatVector) {
        if self.assume_ultimate {
            stats.energy.initial += stats.energy.ultimate_activation;
        }
        stats.energy.initial += self.ultimate_kills as f64 * stats.energy.ultimate_kill;
    }
}

/// Flat energy granted by an ally's ultimate
///
/// Lands in `flat_initial_energy`, which recharge does not scale.
pub struct AllyUltimateSource {
    pub energy: f64,
}

impl EnergySource for AllyUltimateSource {
    fn id(&self) -> &str {
        "ally_ultimate"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, stats: &mut StatVector) {
        stats.flat_initial_energy += self.energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_energy_with_ultimate_and_kills() {
        let mut stats = StatVector::new(120.0);
        OpeningEnergySource::new(true, 2).apply(&mut stats);
        // 5 activation + 2 * 10 per kill
        assert!((stats.energy.initial - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_opening_energy_without_ultimate() {
        let mut stats = StatVector::new(120.0);
        OpeningEnergySource::new(false, 0).apply(&mut stats);
        assert!(stats.energy.initial.abs() < 1e-9);
    }

    #[test]
    fn test_ally_ultimate_is_not_scaled() {
        let mut stats = StatVector::new(120.0);
        AllyUltimateSource { energy: 50.0 }.apply(&mut stats);
        stats.apply_recharge(1.5).unwrap();
        assert!((stats.initial_energy() - 50.0).abs() < 1e-9);
        assert_eq!(AllyUltimateSource { energy: 0.0 }.priority(), 200);
    }
}
