//! Shared per-session collaborators threaded through every update

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{FrameClock, FrameTime};
use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::tuning::Tuning;

pub struct SimContext {
    pub clock: FrameClock,
    pub rng: Pcg32,
    pub audio: AudioManager,
    pub settings: Settings,
    pub tuning: Tuning,
    /// Pointer position fires the primary weapon on its own
    pub autofire: bool,
}

impl SimContext {
    pub fn new(settings: Settings, tuning: Tuning, audio: AudioManager, now: f64) -> Self {
        // Without a configured seed, derive one from the start time
        let seed = settings.seed.unwrap_or(now.to_bits());
        log::debug!("Simulation seed {seed}");
        Self {
            clock: FrameClock::new(now),
            rng: Pcg32::seed_from_u64(seed),
            audio,
            autofire: !settings.debug.disable_autofire,
            settings,
            tuning,
        }
    }

    pub fn frame(&self) -> FrameTime {
        self.clock.frame()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Particles per explosion at the configured quality
    pub fn explosion_particles(&self) -> usize {
        self.settings.quality.explosion_particles()
    }
}

#[cfg(test)]
impl SimContext {
    /// Seeded context with default config and silent audio
    pub(crate) fn for_tests(seed: u64) -> Self {
        let settings = Settings {
            seed: Some(seed),
            ..Default::default()
        };
        Self::new(settings, Tuning::default(), AudioManager::default(), 0.0)
    }
}
