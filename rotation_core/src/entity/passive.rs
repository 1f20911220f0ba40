//! Entity passives applied before the recharge pass

use super::EntityKind;
use crate::config::RunConfig;
use crate::source::EnergySource;
use crate::stat_vector::StatVector;

/// Bonus energy per enemy hit by Argenti's attacks
const ARGENTI_HIT_BONUS: f64 = 3.0;

/// Kit adjustments for one entity under one run configuration
///
/// Works on un-scaled values: the recharge multiplier is applied to the
/// result afterwards, exactly once.
pub struct EntityPassive<'a> {
    kind: EntityKind,
    run: &'a RunConfig,
}

impl<'a> EntityPassive<'a> {
    pub fn new(kind: EntityKind, run: &'a RunConfig) -> Self {
        EntityPassive { kind, run }
    }

    fn fill_tiers(stats: &mut StatVector, bonuses: &[f64]) {
        if stats.energy.enhanced_basic.is_empty() {
            let basic = stats.energy.basic;
            stats.energy.enhanced_basic = bonuses.iter().map(|bonus| basic + bonus).collect();
        }
    }
}

impl EnergySource for EntityPassive<'_> {
    fn id(&self) -> &str {
        self.kind.display_name()
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, stats: &mut StatVector) {
        let run = self.run;
        let ultimate = run.assume_ultimate_activation_at_start;

        match self.kind {
            EntityKind::Argenti => {
                let enemies = run.enemy_count as f64;
                stats.energy.basic += ARGENTI_HIT_BONUS;
                stats.energy.skill += ARGENTI_HIT_BONUS * enemies;
                if ultimate {
                    stats.energy.initial += ARGENTI_HIT_BONUS * enemies;
                }
                if run.technique {
                    stats.energy.initial += 15.0;
                }
            }
            EntityKind::Blade => Self::fill_tiers(stats, &[10.0]),
            EntityKind::Clara => stats.energy.hit_taken += stats.energy.follow_up,
            EntityKind::DanHengImbibitorLunae => {
                Self::fill_tiers(stats, &[10.0, 15.0, 20.0]);
                let mut bank = 2 * ultimate as i32 + run.technique as i32;
                if ultimate && run.eidolon_level >= 2 {
                    bank += 1;
                }
                stats.initial_resource += bank;
            }
            EntityKind::FuXuan => {
                if run.eidolon_level >= 4 {
                    stats.energy.ally_hit_taken += 5.0;
                }
            }
            EntityKind::Jingliu => {
                if run.technique {
                    stats.energy.initial += 15.0;
                }
            }
            EntityKind::Luka => {
                if ultimate {
                    stats.energy.initial += 6.0;
                }
                Self::fill_tiers(stats, &[0.0]);
            }
            EntityKind::Lynx => stats.energy.ally_hit_taken += 2.0,
            EntityKind::Topaz => {
                if run.technique {
                    stats.energy.initial += 60.0;
                }
            }
            EntityKind::TrailblazerPreservation => Self::fill_tiers(stats, &[10.0]),
            EntityKind::Generic | EntityKind::Arlan => {}
        }
    }
}
