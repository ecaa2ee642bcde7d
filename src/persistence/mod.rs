//! High score persistence
//!
//! The game reads the stored high score once at startup and writes it when a
//! run ends with a new best. Store failures are logged and never interrupt a
//! frame.

pub mod file;

pub use file::JsonFileStore;

/// Backing store for the single best score
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing is stored or the store is unreadable
    fn load_high_score(&self) -> u64;
    /// Fire-and-forget save
    fn save_high_score(&mut self, score: u64);
}

/// Store kept in memory for the lifetime of the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    score: u64,
    saves: u32,
}

impl MemoryStore {
    pub fn new(score: u64) -> Self {
        Self { score, saves: 0 }
    }

    /// Number of saves received
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u64 {
        self.score
    }

    fn save_high_score(&mut self, score: u64) {
        self.score = score;
        self.saves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(500);
        assert_eq!(store.load_high_score(), 500);
        store.save_high_score(1200);
        assert_eq!(store.load_high_score(), 1200);
        assert_eq!(store.saves(), 1);
    }
}
