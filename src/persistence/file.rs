//! JSON file backed high score store

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::HighScoreStore;
use crate::error::{self, Result};

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u64,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<HighScoreRecord> {
        error::read_json(&self.path)
    }

    pub fn write(&self, record: HighScoreRecord) -> Result<()> {
        error::write_json(&self.path, &record)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u64 {
        if !self.path.exists() {
            return 0;
        }
        match self.read() {
            Ok(record) => {
                log::info!("Loaded high score {} from {}", record.score, self.path.display());
                record.score
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) {
        match self.write(HighScoreRecord { score }) {
            Ok(()) => log::info!("High score {score} saved"),
            Err(e) => log::warn!("Failed to save high score: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("arena-highscore-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save_high_score(4321);
        let loaded = JsonFileStore::new(&path).load_high_score();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, 4321);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.read().is_err());
        assert_eq!(store.load_high_score(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
