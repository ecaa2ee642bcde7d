//! Gameplay state and scoring
//!
//! `ArenaState` owns every actor list of the gameplay scene. Lists keep
//! insertion order; collision tests and draw order both rely on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectable::{Collectable, CollectableKind};
use super::effects::Effect;
use super::enemy::Enemy;
use super::player::Player;
use super::weapon::Bullet;

/// Score, multiplier and best score for the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    /// Starts at 1, raised by multiplier pickups
    pub multiplier: u64,
    pub high_score: u64,
    /// Score of the run that just ended
    pub last_score: u64,
    /// Best score before the current run started
    #[serde(default)]
    run_best: u64,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Scoreboard {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            high_score,
            last_score: 0,
            run_best: high_score,
        }
    }

    /// Credit a kill of the given score type, returning the points awarded
    pub fn award(&mut self, score_type: u32) -> u64 {
        let points = (score_type as u64 + 1) * 5 * self.multiplier;
        self.score += points;
        self.high_score = self.high_score.max(self.score);
        points
    }

    /// Close the current run; returns whether it set a new high score
    pub fn end_run(&mut self) -> bool {
        self.last_score = self.score;
        self.score = 0;
        self.multiplier = 1;
        let new_high = self.last_score > self.run_best;
        self.run_best = self.high_score;
        new_high
    }
}

/// Actor lists of the gameplay scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub effects: Vec<Effect>,
    pub collectables: Vec<Collectable>,
    /// Enemies destroyed this run, by any cause
    pub enemy_kills: u32,
}

impl ArenaState {
    pub fn new(player_position: Vec2) -> Self {
        Self {
            player: Player::new(player_position),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            effects: Vec::new(),
            collectables: Vec::new(),
            enemy_kills: 0,
        }
    }

    /// Energy boosts currently in play
    pub fn energy_pickups(&self) -> usize {
        self.collectables
            .iter()
            .filter(|c| c.kind == CollectableKind::EnergyBoost)
            .count()
    }

    /// Player dead and every effect finished
    pub fn is_game_over(&self) -> bool {
        !self.player.is_alive() && self.effects.is_empty()
    }
}
