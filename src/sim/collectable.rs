//! Pickups dropped by destroyed enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, Lifespan};
use super::clock::FrameTime;
use super::effects::{self, Effect};
use super::player::Player;
use super::state::Scoreboard;
use crate::audio::{AudioManager, Sound};
use crate::consts::*;
use crate::render::{DrawContext, Renderable, Visual};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectableKind {
    /// Adds one to the score multiplier
    Multiplier,
    /// Restores player energy
    EnergyBoost,
}

impl CollectableKind {
    fn spin(self) -> f32 {
        match self {
            CollectableKind::Multiplier => 0.015,
            CollectableKind::EnergyBoost => 0.035,
        }
    }

    fn asset_key(self) -> &'static str {
        match self {
            CollectableKind::Multiplier => "multiplier",
            CollectableKind::EnergyBoost => "energyboost",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectable {
    pub body: Body,
    pub kind: CollectableKind,
    pub lifespan: Lifespan,
    /// Radians, cosmetic
    pub rotation: f32,
}

impl Collectable {
    pub fn multiplier(position: Vec2, vector: Vec2, now: f64) -> Self {
        Self {
            body: Body::new(position, vector, MULTIPLIER_RADIUS),
            kind: CollectableKind::Multiplier,
            lifespan: Lifespan::new(now, MULTIPLIER_LIFESPAN_MS),
            rotation: 0.0,
        }
    }

    pub fn energy_boost(position: Vec2, vector: Vec2, now: f64) -> Self {
        Self {
            body: Body::new(position, vector, ENERGY_BOOST_RADIUS),
            kind: CollectableKind::EnergyBoost,
            lifespan: Lifespan::new(now, ENERGY_BOOST_LIFESPAN_MS),
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, frame: FrameTime) {
        self.rotation += self.kind.spin() * frame.multiplier;
    }

    /// Apply the pickup to the player and score
    pub fn collected(
        &self,
        score: &mut Scoreboard,
        player: &mut Player,
        effects: &mut Vec<Effect>,
        audio: &mut AudioManager,
        now: f64,
    ) {
        match self.kind {
            CollectableKind::Multiplier => {
                audio.play(Sound::ScoreUp);
                score.multiplier += 1;
                if score.multiplier % 10 == 0 {
                    let vector = Vec2::new(0.0, -3.5) + self.body.vector;
                    let msg = format!("x{}", score.multiplier);
                    effects.push(effects::text(self.body.position, vector, msg, 32, 1000.0, now));
                }
            }
            CollectableKind::EnergyBoost => {
                audio.play(Sound::PowerUp);
                player.energy = (player.energy + ENERGY_BOOST_AMOUNT).min(PLAYER_ENERGY);
                let vector = Vec2::new(0.0, -3.5) + self.body.vector;
                effects.push(effects::text(self.body.position, vector, "Energy Boost!", 32, 1000.0, now));
            }
        }
    }
}

impl Actor for Collectable {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn expired(&self, now: f64) -> bool {
        !self.body.alive || self.lifespan.expired(now)
    }
}

impl Renderable for Collectable {
    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let alpha = self.lifespan.fade(1.0, 500.0, ctx.now);
        let visual = Visual::Collectable {
            kind: self.kind,
            rotation: self.rotation,
        };
        let key = (self.kind.asset_key(), 0.0);
        ctx.draw(self.body.position, self.body.radius, visual, alpha, Some(key));
    }
}
