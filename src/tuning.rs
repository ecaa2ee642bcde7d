//! Data-driven game balance
//!
//! Everything a designer would want to tweak without touching the
//! simulation: world extent, the wave table, respawn pacing and drop rates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{VIEW_SIZE, VIEW_SIZE_MAX, VIEW_SIZE_MIN, WORLD_SIZE};
use crate::error::{self, Error, Result};
use crate::sim::waves::{WaveDef, default_waves};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World extent in world units
    pub world_size: f32,
    /// Initial visible window in world units
    pub view_size: f32,
    /// Ordered wave table; the last wave must last forever
    pub waves: Vec<WaveDef>,
    /// Delay between player death and in-place respawn
    pub respawn_delay_ms: f64,
    /// Minimum distance between a freshly spawned enemy and the player
    pub spawn_min_distance: f32,
    /// Score thresholds that each add one bullet to the primary weapon
    pub weapon_upgrades: Vec<u64>,
    /// Chance a destroyed enemy drops an energy boost while the player is hurt
    pub energy_drop_chance: f32,
    /// Maximum energy boosts in play at once
    pub max_energy_pickups: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            view_size: VIEW_SIZE,
            waves: default_waves(),
            respawn_delay_ms: 2500.0,
            spawn_min_distance: 220.0,
            weapon_upgrades: vec![10_000, 50_000],
            energy_drop_chance: 0.1,
            max_energy_pickups: 2,
        }
    }
}

impl Tuning {
    /// Load and validate a tuning file
    pub fn load(path: &Path) -> Result<Self> {
        let tuning: Tuning = error::read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {} ({} waves)", path.display(), tuning.waves.len());
        Ok(tuning)
    }

    /// Reject tables the wave director could not run
    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.waves.last() else {
            return Err(Error::InvalidTuning("wave table is empty".into()));
        };
        if last.lifetime != 0.0 {
            return Err(Error::InvalidTuning(format!(
                "last wave must have lifetime 0, got {}",
                last.lifetime
            )));
        }
        if let Some(i) = self.waves.iter().position(|w| w.enemy_weighting.is_empty()) {
            return Err(Error::InvalidTuning(format!("wave {} has no enemy weighting", i + 1)));
        }
        if self.world_size <= 2.0 * self.spawn_min_distance {
            return Err(Error::InvalidTuning(format!(
                "world size {} leaves no room to spawn {} units from the player",
                self.world_size, self.spawn_min_distance
            )));
        }
        if !(VIEW_SIZE_MIN..=VIEW_SIZE_MAX).contains(&self.view_size) {
            return Err(Error::InvalidTuning(format!(
                "view size {} is outside {VIEW_SIZE_MIN}..={VIEW_SIZE_MAX}",
                self.view_size
            )));
        }
        if !(0.0..=1.0).contains(&self.energy_drop_chance) {
            return Err(Error::InvalidTuning(format!(
                "energy drop chance {} is not a probability",
                self.energy_drop_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.waves.len(), 12);
    }

    #[test]
    fn test_rejects_finite_last_wave() {
        let tuning = Tuning {
            waves: vec![WaveDef::new(5, vec![EnemyKind::Dumbo], 10.0)],
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_empty_weighting() {
        let tuning = Tuning {
            waves: vec![WaveDef::new(5, vec![], 0.0)],
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_view_size_outside_zoom_range() {
        for view_size in [0.0, -100.0, 400.0, 1600.0] {
            let tuning = Tuning {
                view_size,
                ..Default::default()
            };
            assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))), "{view_size}");
        }
    }

    #[test]
    fn test_tuning_json_roundtrip_keeps_waves() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tuning::default());
    }
}
