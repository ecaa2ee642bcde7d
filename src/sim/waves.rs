//! Wave table and the director that walks it

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};

/// One entry of the wave table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    /// Enemies kept in play while this wave runs
    pub enemy_max: usize,
    /// Spawn pool; a kind listed twice is picked twice as often
    pub enemy_weighting: Vec<EnemyKind>,
    /// Seconds before moving on; 0 means forever
    pub lifetime: f64,
}

impl WaveDef {
    pub fn new(enemy_max: usize, enemy_weighting: Vec<EnemyKind>, lifetime: f64) -> Self {
        Self {
            enemy_max,
            enemy_weighting,
            lifetime,
        }
    }

    pub fn is_endless(&self) -> bool {
        self.lifetime == 0.0
    }
}

/// The standard twelve-wave campaign
pub fn default_waves() -> Vec<WaveDef> {
    use EnemyKind::*;
    vec![
        WaveDef::new(5, vec![Dumbo, Dumbo, Dumbo, Zoner, Zoner, Zoner, Tracker], 20.0),
        WaveDef::new(5, vec![Dumbo, Dumbo, Zoner, Zoner, Tracker, Borg], 20.0),
        WaveDef::new(5, vec![Tracker], 10.0),
        WaveDef::new(8, vec![Dumbo, Zoner, Zoner, Tracker, Tracker, Borg, Borg], 20.0),
        WaveDef::new(8, vec![Borg], 10.0),
        WaveDef::new(10, vec![Zoner, Tracker, Splitter], 20.0),
        WaveDef::new(10, vec![Zoner, Zoner, Tracker, Tracker, Borg, Splitter], 20.0),
        WaveDef::new(10, vec![Tracker, Dodger, Bomber], 10.0),
        WaveDef::new(10, vec![Zoner, Zoner, Tracker, Tracker, Dodger, Splitter], 20.0),
        WaveDef::new(10, vec![Borg, Dodger, Bomber], 10.0),
        WaveDef::new(10, vec![Dodger, Splitter, Bomber], 20.0),
        WaveDef::new(12, vec![Zoner, Tracker, Borg, Dodger, Splitter, Bomber], 0.0),
    ]
}

/// Walks the wave table and keeps the enemy count topped up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    waves: Vec<WaveDef>,
    cursor: usize,
    entered_at: f64,
    /// Move on at the next update regardless of the wave's lifetime
    pub skip: bool,
}

impl WaveDirector {
    /// `waves` must be non-empty; `Tuning::validate` guarantees it for loaded tables
    pub fn new(waves: Vec<WaveDef>, now: f64) -> Self {
        Self {
            waves,
            cursor: 0,
            entered_at: now,
            skip: false,
        }
    }

    pub fn current(&self) -> Option<&WaveDef> {
        self.waves.get(self.cursor)
    }

    /// One-based wave number for display
    pub fn wave_number(&self) -> usize {
        self.cursor + 1
    }

    pub fn elapsed_secs(&self, now: f64) -> f64 {
        (now - self.entered_at) / 1000.0
    }

    /// Step to the next wave when the current one has run its course.
    /// Returns the new one-based wave number.
    pub fn advance(&mut self, now: f64) -> Option<usize> {
        let skip = std::mem::take(&mut self.skip);
        let wave = self.current()?;
        if wave.is_endless() || self.cursor + 1 >= self.waves.len() {
            return None;
        }
        if !skip && now - self.entered_at <= wave.lifetime * 1000.0 {
            return None;
        }
        self.cursor += 1;
        self.entered_at = now;
        log::info!("Wave {} ({} enemies max)", self.wave_number(), self.waves[self.cursor].enemy_max);
        Some(self.wave_number())
    }

    /// Uniform pick from the current weighting
    pub fn pick_kind(&self, rng: &mut Pcg32) -> Option<EnemyKind> {
        let pool = &self.current()?.enemy_weighting;
        if pool.is_empty() {
            return None;
        }
        Some(pool[rng.random_range(0..pool.len())])
    }

    /// Spawn enemies until the current wave's maximum is in play.
    /// Returns how many were added.
    pub fn replenish(
        &self,
        enemies: &mut Vec<Enemy>,
        player: Vec2,
        world_size: f32,
        min_distance: f32,
        rng: &mut Pcg32,
        now: f64,
    ) -> usize {
        let Some(wave) = self.current() else {
            return 0;
        };
        let mut spawned = 0;
        while enemies.len() < wave.enemy_max {
            let Some(kind) = self.pick_kind(rng) else {
                break;
            };
            enemies.push(Enemy::spawn(kind, world_size, player, min_distance, rng, now));
            spawned += 1;
        }
        spawned
    }

    /// Restart from the first wave
    pub fn restart(&mut self, now: f64) {
        self.cursor = 0;
        self.entered_at = now;
        self.skip = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyState;
    use rand::SeedableRng;

    fn two_waves() -> Vec<WaveDef> {
        vec![
            WaveDef::new(5, vec![EnemyKind::Dumbo], 1.0),
            WaveDef::new(1, vec![EnemyKind::Dumbo], 0.0),
        ]
    }

    #[test]
    fn test_advances_exactly_once() {
        let mut director = WaveDirector::new(two_waves(), 0.0);
        let mut advances = 0;
        let mut now = 0.0;
        while now < 5000.0 {
            now += 16.0;
            if director.advance(now).is_some() {
                advances += 1;
                assert!(now > 1000.0 && now <= 1016.0);
            }
        }
        assert_eq!(advances, 1);
        assert_eq!(director.wave_number(), 2);
    }

    #[test]
    fn test_skip_flag_advances_early_and_clears() {
        let mut director = WaveDirector::new(default_waves(), 0.0);
        director.skip = true;
        assert_eq!(director.advance(10.0), Some(2));
        assert!(!director.skip);
        assert_eq!(director.advance(20.0), None);
    }

    #[test]
    fn test_never_runs_past_last_wave() {
        let mut director = WaveDirector::new(default_waves(), 0.0);
        for i in 0..30 {
            director.skip = true;
            director.advance(i as f64);
        }
        assert_eq!(director.wave_number(), 12);
        assert!(director.current().is_some_and(WaveDef::is_endless));
    }

    #[test]
    fn test_replenish_tops_up_to_max() {
        let mut rng = Pcg32::seed_from_u64(21);
        let director = WaveDirector::new(default_waves(), 0.0);
        let mut enemies = Vec::new();
        let player = Vec2::splat(750.0);
        assert_eq!(director.replenish(&mut enemies, player, 1500.0, 220.0, &mut rng, 0.0), 5);
        assert_eq!(director.replenish(&mut enemies, player, 1500.0, 220.0, &mut rng, 0.0), 0);
        for e in &enemies {
            assert_eq!(e.state, EnemyState::Spawning);
            assert!(matches!(e.kind, EnemyKind::Dumbo | EnemyKind::Zoner | EnemyKind::Tracker));
        }
    }

    #[test]
    fn test_weighting_bias() {
        let mut rng = Pcg32::seed_from_u64(99);
        let director = WaveDirector::new(default_waves(), 0.0);
        let dumbos = (0..7000)
            .filter(|_| director.pick_kind(&mut rng) == Some(EnemyKind::Dumbo))
            .count();
        // Three of seven entries
        assert!((2700..3300).contains(&dumbos), "{dumbos}");
    }
}
