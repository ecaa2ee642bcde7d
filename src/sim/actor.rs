//! Shared actor model
//!
//! Every simulated object carries a `Body` and implements `Actor`. Kind
//! specific behavior lives on the concrete types; this module only holds
//! what the update pass and the collision resolver need from all of them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and collision radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    /// World units per ideal frame
    pub vector: Vec2,
    /// 0 excludes the body from collision tests
    pub radius: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(position: Vec2, vector: Vec2, radius: f32) -> Self {
        Self {
            position,
            vector,
            radius,
            alive: true,
        }
    }

    /// Advance position by velocity scaled to the frame length
    #[inline]
    pub fn integrate(&mut self, multiplier: f32) {
        self.position += self.vector * multiplier;
    }

    pub fn collidable(&self) -> bool {
        self.radius > 0.0
    }

    /// Circle-circle overlap, touching counts
    pub fn intersects(&self, other: &Body) -> bool {
        self.collidable()
            && other.collidable()
            && self.position.distance(other.position) <= self.radius + other.radius
    }
}

/// Fixed time window measured from creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifespan {
    pub start: f64,
    pub length: f64,
}

impl Lifespan {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.start
    }

    pub fn expired(&self, now: f64) -> bool {
        self.age(now) > self.length
    }

    /// `value` faded linearly to zero over the final `fade` ms, clamped to [0, value]
    pub fn fade(&self, value: f32, fade: f64, now: f64) -> f32 {
        let remaining = self.length - self.age(now);
        if fade <= 0.0 || remaining >= fade {
            return value;
        }
        ((value as f64 / fade) * remaining).clamp(0.0, value as f64) as f32
    }
}

/// Anything living in one of the scene's actor lists
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Expired actors are dropped by the next update pass
    fn expired(&self, _now: f64) -> bool {
        !self.body().alive
    }
}
