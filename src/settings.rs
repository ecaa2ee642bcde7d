//! Game settings and preferences
//!
//! Persisted separately from the high score as a JSON file. Missing fields
//! fall back to their defaults so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particles per enemy/player explosion
    pub fn explosion_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium | QualityPreset::High => 20,
        }
    }
}

/// Debug toggles, all off in normal play
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugFlags {
    /// Enemies and enemy bullets never drain energy
    pub invincible: bool,
    /// Pointer aim does not fire on its own
    pub disable_autofire: bool,
    /// The skip-wave key is honoured
    pub allow_wave_skip: bool,
    /// Ask the renderer to outline collision radii
    pub show_collision_radius: bool,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Sound effects start enabled
    pub sound_enabled: bool,
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    pub debug: DebugFlags,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            sound_enabled: true,
            seed: None,
            debug: DebugFlags::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let settings = error::read_json(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Using default settings: {e}");
            Self::default()
        })
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        error::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"debug": {"invincible": true}}"#).unwrap();
        assert!(settings.debug.invincible);
        assert!(!settings.debug.disable_autofire);
        assert!(settings.sound_enabled);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_preset_particles() {
        assert_eq!(QualityPreset::Low.explosion_particles(), 12);
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(Settings::from_preset(QualityPreset::Low).quality.as_str(), "Low");
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("arena-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
