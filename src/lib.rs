//! Arena Shooter - a frame-rate independent arena shooter core
//!
//! Core modules:
//! - `sim`: Actor simulation (update, boundary policy, collisions, waves, scenes)
//! - `game`: Top-level frame driver and scene sequencing
//! - `render`, `audio`, `assets`, `platform`, `persistence`: collaborator seams
//! - `settings`, `tuning`: Player preferences and data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::{DebugFlags, QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Ideal frame length the frame multiplier is normalized against (60 Hz)
    pub const IDEAL_FRAME_MS: f64 = 1000.0 / 60.0;

    /// World dimensions (square, world units)
    pub const WORLD_SIZE: f32 = 1500.0;
    /// Visible window into the world (world units)
    pub const VIEW_SIZE: f32 = 1000.0;
    pub const VIEW_SIZE_MIN: f32 = 500.0;
    pub const VIEW_SIZE_MAX: f32 = 1500.0;
    pub const VIEW_SIZE_STEP: f32 = 100.0;
    /// View stops following the player this close to a world edge (fraction of view)
    pub const VIEW_EDGE_FRACTION: f32 = 0.2;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_ENERGY: i32 = 100;
    pub const PLAYER_MAX_VELOCITY: f32 = 15.0;
    pub const PLAYER_THRUST: f32 = 3.0;
    pub const THRUST_DELAY_MS: f64 = 125.0;
    /// Per-frame velocity decay when no direction is held
    pub const PLAYER_DRAG: f32 = 0.95;
    /// Fraction of the remaining heading delta turned per ideal frame
    pub const PLAYER_TURN_RATE: f32 = 0.15;

    /// Wall damping
    pub const PLAYER_BOUNCE_DAMPING: f32 = 0.5;
    pub const BOUNCE_DAMPING: f32 = 0.9;

    /// Weapons
    pub const WEAPON_RECHARGE_MS: f64 = 125.0;
    pub const BULLET_SPEED: f32 = 16.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 12.0;
    pub const PLAYER_BULLET_LIFESPAN_MS: f64 = 750.0;
    pub const PLAYER_BULLET_POWER: i32 = 1;
    pub const ENEMY_BULLET_RADIUS: f32 = 10.0;
    pub const ENEMY_BULLET_LIFESPAN_MS: f64 = 1250.0;

    /// Enemies
    pub const ENEMY_SPAWN_MS: f64 = 500.0;
    pub const ENEMY_CRUISE_SPEED: f32 = 4.0;
    pub const BOMBER_RECHARGE_MS: f64 = 1500.0;
    pub const BOMBER_BULLET_POWER: i32 = 10;
    pub const BOMBER_BULLET_SPEED: f32 = 8.0;

    /// Collectables
    pub const MULTIPLIER_RADIUS: f32 = 10.0;
    pub const MULTIPLIER_LIFESPAN_MS: f64 = 6000.0;
    pub const ENERGY_BOOST_RADIUS: f32 = 12.0;
    pub const ENERGY_BOOST_LIFESPAN_MS: f64 = 8000.0;
    pub const ENERGY_BOOST_AMOUNT: i32 = 25;

    /// Floating text
    pub const WAVE_TEXT_MS: f64 = 1500.0;
    pub const POWERUP_TEXT_MS: f64 = 1500.0;
}

/// Rotation and scaling helpers on top of glam's `Vec2`
///
/// Angles are radians, positive turning +x toward +y. With screen
/// coordinates (y down) that is clockwise.
pub trait VecExt: Sized {
    /// Return this vector rotated by `angle`
    fn rotated_by(self, angle: f32) -> Self;
    /// Rotate this vector in place
    fn rotate_by(&mut self, angle: f32);
    /// Return a vector with the same direction and the given length.
    /// A zero vector stays zero.
    fn scaled_to(self, length: f32) -> Self;
    /// Signed angle that rotates `self` onto `other`
    fn theta_to(self, other: Self) -> f32;
}

impl VecExt for Vec2 {
    #[inline]
    fn rotated_by(self, angle: f32) -> Self {
        Vec2::from_angle(angle).rotate(self)
    }

    #[inline]
    fn rotate_by(&mut self, angle: f32) {
        *self = self.rotated_by(angle);
    }

    #[inline]
    fn scaled_to(self, length: f32) -> Self {
        self.normalize_or_zero() * length
    }

    #[inline]
    fn theta_to(self, other: Self) -> f32 {
        other.y.atan2(other.x) - self.y.atan2(self.x)
    }
}

/// Normalized heading in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotated_by(FRAC_PI_2);
        assert!(v.x.abs() < 0.0001);
        assert!((v.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotate_in_place_matches_rotated() {
        let mut v = Vec2::new(3.0, -2.0);
        let expected = v.rotated_by(0.7);
        v.rotate_by(0.7);
        assert!((v - expected).length() < 0.0001);
    }

    #[test]
    fn test_scaled_to_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.scaled_to(16.0), Vec2::ZERO);
        let v = Vec2::new(3.0, 4.0).scaled_to(10.0);
        assert!((v.length() - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_theta_to_rotates_onto_target() {
        let from = Vec2::new(0.0, -1.0);
        let to = Vec2::new(1.0, 0.0);
        let rotated = from.rotated_by(from.theta_to(to));
        assert!((rotated - to).length() < 0.0001);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 0.0001);
        assert!((normalize_degrees(720.0)).abs() < 0.0001);
    }
}
