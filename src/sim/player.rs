//! The player ship

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body};
use super::clock::FrameTime;
use super::weapon::{Bullet, Recharge, WeaponSlot, Weapons};
use crate::audio::AudioManager;
use crate::consts::*;
use crate::platform::InputState;
use crate::render::{DrawContext, Renderable, Visual};
use crate::{VecExt, normalize_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// 0..=100, the player dies at 0
    pub energy: i32,
    /// Degrees, 0 = up, clockwise
    pub heading: f32,
    pub weapons: Weapons,
    /// Player bullets reflect off the world edge instead of bursting
    pub bounce_weapons: bool,
    /// Whether thrust was requested this frame (engine flame)
    pub thrusting: bool,
    /// Frame start of the most recent death
    pub killed_on: Option<f64>,
    thrust: Recharge,
    /// Sprite animation counter
    pub frame: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO, PLAYER_RADIUS),
            energy: PLAYER_ENERGY,
            heading: 0.0,
            weapons: Weapons::default(),
            bounce_weapons: false,
            thrusting: false,
            killed_on: None,
            thrust: Recharge::new(THRUST_DELAY_MS),
            frame: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Steer and thrust from this frame's input
    pub fn handle_input(&mut self, input: &InputState, frame: FrameTime) {
        self.frame += frame.multiplier;
        let target = match input.axis_move {
            Some(axis) => {
                let angle = normalize_degrees(Vec2::NEG_Y.theta_to(axis).to_degrees());
                self.heading = angle;
                Some(angle)
            }
            None => input.flag_heading().inspect(|&angle| {
                self.turn_towards(angle, PLAYER_TURN_RATE * frame.multiplier);
            }),
        };
        match target {
            Some(angle) => self.thrust(angle, frame.now),
            None => {
                self.thrusting = false;
                self.body.vector *= frame.damping(PLAYER_DRAG);
            }
        }
    }

    /// Ease the heading a fraction of the way along the shortest arc
    fn turn_towards(&mut self, target: f32, fraction: f32) {
        let delta = (target - self.heading + 540.0).rem_euclid(360.0) - 180.0;
        self.heading = normalize_degrees(self.heading + delta * fraction.min(1.0));
    }

    /// Add a thrust impulse in direction `angle` (degrees) if the thruster has recharged
    pub fn thrust(&mut self, angle: f32, now: f64) {
        self.thrusting = true;
        if !self.thrust.trigger(now) {
            return;
        }
        let impulse = Vec2::new(0.0, -PLAYER_THRUST).rotated_by(angle.to_radians());
        self.body.vector = (self.body.vector + impulse).clamp_length_max(PLAYER_MAX_VELOCITY);
    }

    /// Drain energy; returns true only on the hit that kills
    pub fn damage_by(&mut self, damage: i32, now: f64) -> bool {
        if !self.body.alive {
            return false;
        }
        self.energy -= damage;
        if self.energy <= 0 {
            self.energy = 0;
            self.kill(now);
            return true;
        }
        false
    }

    pub fn kill(&mut self, now: f64) {
        self.body.alive = false;
        self.killed_on = Some(now);
        log::debug!("Player killed at {now:.0}ms");
    }

    /// Restore energy and life; powerups survive only when asked
    pub fn reset(&mut self, persist_powerups: bool) {
        self.body.alive = true;
        self.energy = PLAYER_ENERGY;
        self.killed_on = None;
        if !persist_powerups {
            self.weapons = Weapons::default();
            self.bounce_weapons = false;
        }
    }

    /// Fire every mounted weapon along `vector`. Dead ships do not fire.
    pub fn fire_primary(
        &mut self,
        vector: Vec2,
        heading: f32,
        now: f64,
        rng: &mut Pcg32,
        audio: &mut AudioManager,
    ) -> Vec<Bullet> {
        if !self.body.alive {
            return Vec::new();
        }
        let origin = self.body;
        self.weapons
            .get_mut(WeaponSlot::Main)
            .fire(&origin, vector, heading, now, rng, audio)
    }
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Renderable for Player {
    fn draw(&self, ctx: &mut DrawContext<'_>) {
        if !self.body.alive {
            return;
        }
        let visual = Visual::Player {
            heading: self.heading,
            thrusting: self.thrusting,
        };
        ctx.draw(self.body.position, self.body.radius, visual, 1.0, Some(("playership", self.frame)));
    }
}
