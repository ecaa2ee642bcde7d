//! Sound effect routing
//!
//! The simulation names sounds; an `AudioSink` backend plays them. Playback
//! is fire-and-forget: a disabled manager or a sink that has not loaded the
//! sound yet simply drops the request.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Player primary weapon fired
    Laser,
    /// Bomber launched a bomb
    EnemyBomb,
    /// Enemy destroyed (four variations)
    EnemyExplosion(u8),
    /// Enemy hit but not destroyed
    EnemyHit,
    /// Player destroyed
    PlayerExplosion,
    /// Score multiplier collected
    ScoreUp,
    /// Energy boost collected
    PowerUp,
}

impl Sound {
    /// Asset name the backend knows this sound by
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Laser => "laser",
            Sound::EnemyBomb => "enemy-bomb",
            Sound::EnemyExplosion(1) => "enemy-explosion1",
            Sound::EnemyExplosion(2) => "enemy-explosion2",
            Sound::EnemyExplosion(3) => "enemy-explosion3",
            Sound::EnemyExplosion(_) => "enemy-explosion4",
            Sound::EnemyHit => "enemy-hit",
            Sound::PlayerExplosion => "player-explosion",
            Sound::ScoreUp => "scoreup",
            Sound::PowerUp => "powerup",
        }
    }
}

/// Audio backend
pub trait AudioSink {
    fn play_sound(&mut self, name: &str);
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _name: &str) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    enabled: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio), true)
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    /// Play a sound effect
    pub fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }
        log::trace!("play {}", sound.name());
        self.sink.play_sound(sound.name());
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle sound on/off, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!("Sound {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::AudioSink;

    /// Sink that records every name it is asked to play
    #[derive(Debug, Default, Clone)]
    pub struct RecordingAudio {
        pub played: Rc<RefCell<Vec<String>>>,
    }

    impl AudioSink for RecordingAudio {
        fn play_sound(&mut self, name: &str) {
            self.played.borrow_mut().push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingAudio;
    use super::*;

    #[test]
    fn test_disabled_manager_drops_sounds() {
        let sink = RecordingAudio::default();
        let played = sink.played.clone();
        let mut audio = AudioManager::new(Box::new(sink), true);
        audio.play(Sound::Laser);
        assert!(!audio.toggle());
        audio.play(Sound::EnemyHit);
        assert_eq!(*played.borrow(), vec!["laser".to_string()]);
    }

    #[test]
    fn test_explosion_variations() {
        assert_eq!(Sound::EnemyExplosion(1).name(), "enemy-explosion1");
        assert_eq!(Sound::EnemyExplosion(4).name(), "enemy-explosion4");
    }
}
