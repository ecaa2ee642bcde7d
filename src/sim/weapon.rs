//! Weapons, bullets and recharge timers
//!
//! Recharge gates compare absolute milliseconds, so fire rate does not
//! depend on frame rate. Bullets are plain actors with a fixed lifespan.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, Lifespan};
use crate::VecExt;
use crate::audio::{AudioManager, Sound};
use crate::consts::*;
use crate::render::{DrawContext, Renderable, Visual};

/// Minimum gap between two triggers of the same action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recharge {
    pub interval: f64,
    last: Option<f64>,
}

impl Recharge {
    /// A gate that is open immediately
    pub fn new(interval: f64) -> Self {
        Self { interval, last: None }
    }

    /// A gate that first opens `interval` after `now`
    pub fn starting_at(interval: f64, now: f64) -> Self {
        Self {
            interval,
            last: Some(now),
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        self.last.is_none_or(|last| now - last > self.interval)
    }

    /// Close the gate at `now` if it is open, returning whether it was
    pub fn trigger(&mut self, now: f64) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last = Some(now);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    /// Degrees, 0 = up
    pub heading: f32,
    /// Damage dealt on hit
    pub power: i32,
    pub lifespan: Lifespan,
}

impl Bullet {
    pub fn player(position: Vec2, vector: Vec2, heading: f32, now: f64) -> Self {
        Self {
            body: Body::new(position, vector, PLAYER_BULLET_RADIUS),
            owner: BulletOwner::Player,
            heading,
            power: PLAYER_BULLET_POWER,
            lifespan: Lifespan::new(now, PLAYER_BULLET_LIFESPAN_MS),
        }
    }

    pub fn enemy(position: Vec2, vector: Vec2, power: i32, now: f64) -> Self {
        Self {
            body: Body::new(position, vector, ENEMY_BULLET_RADIUS),
            owner: BulletOwner::Enemy,
            heading: 0.0,
            power,
            lifespan: Lifespan::new(now, ENEMY_BULLET_LIFESPAN_MS),
        }
    }

    fn fade_length(&self) -> f64 {
        match self.owner {
            BulletOwner::Player => 125.0,
            BulletOwner::Enemy => 200.0,
        }
    }
}

impl Actor for Bullet {
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

impl Renderable for Bullet {
    fn draw(&self, ctx: &mut DrawContext<'_>) {
        // Freshly fired bullets would draw over the ship that fired them
        let (visual, hidden_for, key) = match self.owner {
            BulletOwner::Player => (
                Visual::PlayerBullet {
                    heading: self.heading,
                },
                35.0,
                Some(("playerweapon", 0.0)),
            ),
            BulletOwner::Enemy => (Visual::EnemyBullet, 25.0, None),
        };
        if self.lifespan.age(ctx.now) <= hidden_for {
            return;
        }
        let alpha = self.lifespan.fade(1.0, self.fade_length(), ctx.now);
        ctx.draw(self.body.position, self.body.radius, visual, alpha, key);
    }
}

/// The player's forward gun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryWeapon {
    recharge: Recharge,
    /// Bullets per volley
    pub bullet_count: u32,
}

impl Default for PrimaryWeapon {
    fn default() -> Self {
        Self {
            recharge: Recharge::new(WEAPON_RECHARGE_MS),
            bullet_count: 1,
        }
    }
}

impl PrimaryWeapon {
    /// Fire a volley from `origin` along `vector` if the weapon has recharged
    ///
    /// `heading` is the ship heading in degrees; each bullet gets a small
    /// random spread around it when more than one is fired.
    pub fn fire(
        &mut self,
        origin: &Body,
        vector: Vec2,
        heading: f32,
        now: f64,
        rng: &mut Pcg32,
        audio: &mut AudioManager,
    ) -> Vec<Bullet> {
        if !self.recharge.trigger(now) {
            return Vec::new();
        }
        audio.play(Sound::Laser);

        let count = self.bullet_count.max(1);
        let total = if count > 2 {
            rng.random_range(count - 1..=count)
        } else {
            count
        };
        let spread = PI / 32.0 * (count - 1) as f32;
        (0..total)
            .map(|_| {
                let offset = if count > 1 {
                    rng.random::<f32>() * PI / 16.0 * (count - 1) as f32
                } else {
                    0.0
                };
                let angle = offset - spread;
                let speed = 1.0 + rng.random::<f32>() * 0.1 - 0.05;
                let v = vector.rotated_by(angle) * speed + origin.vector;
                Bullet::player(origin.position, v, heading + angle.to_degrees(), now)
            })
            .collect()
    }
}

/// Weapon mount points on the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSlot {
    Main,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weapons {
    pub main: PrimaryWeapon,
}

impl Weapons {
    pub fn get_mut(&mut self, slot: WeaponSlot) -> &mut PrimaryWeapon {
        match slot {
            WeaponSlot::Main => &mut self.main,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn origin() -> Body {
        Body::new(Vec2::new(500.0, 500.0), Vec2::new(1.0, 0.0), PLAYER_RADIUS)
    }

    #[test]
    fn test_recharge_gate() {
        let mut gate = Recharge::new(125.0);
        assert!(gate.trigger(0.0));
        assert!(!gate.trigger(100.0));
        assert!(!gate.trigger(125.0));
        assert!(gate.trigger(125.5));

        let enemy_gate = Recharge::starting_at(1500.0, 1000.0);
        assert!(!enemy_gate.ready(2400.0));
        assert!(enemy_gate.ready(2600.0));
    }

    #[test]
    fn test_single_bullet_follows_aim() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut audio = AudioManager::default();
        let mut weapon = PrimaryWeapon::default();
        let bullets = weapon.fire(&origin(), Vec2::new(0.0, -16.0), 0.0, 0.0, &mut rng, &mut audio);
        assert_eq!(bullets.len(), 1);
        let b = &bullets[0];
        assert_eq!(b.body.position, Vec2::new(500.0, 500.0));
        // Aim plus inherited ship velocity, speed jittered within 5%
        assert!((b.body.vector.x - 1.0).abs() < 0.001);
        assert!(b.body.vector.y < -15.19 && b.body.vector.y > -16.81);
        assert_eq!(b.heading, 0.0);
    }

    #[test]
    fn test_recharging_weapon_yields_nothing() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut audio = AudioManager::default();
        let mut weapon = PrimaryWeapon::default();
        assert_eq!(weapon.fire(&origin(), Vec2::Y, 0.0, 0.0, &mut rng, &mut audio).len(), 1);
        assert!(weapon.fire(&origin(), Vec2::Y, 0.0, 50.0, &mut rng, &mut audio).is_empty());
    }

    #[test]
    fn test_triple_shot_fires_two_or_three() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut audio = AudioManager::default();
        let mut weapon = PrimaryWeapon {
            bullet_count: 3,
            ..Default::default()
        };
        for i in 0..20 {
            let n = weapon
                .fire(&origin(), Vec2::new(0.0, -16.0), 0.0, i as f64 * 200.0, &mut rng, &mut audio)
                .len();
            assert!(n == 2 || n == 3);
        }
    }

    #[test]
    fn test_bullet_lifespans() {
        let p = Bullet::player(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        assert!(!p.expired(750.0));
        assert!(p.expired(751.0));
        let e = Bullet::enemy(Vec2::ZERO, Vec2::ZERO, 10, 0.0);
        assert!(!e.expired(1250.0));
        assert!(e.expired(1251.0));
        assert_eq!(e.power, 10);
        assert_eq!(e.body.radius, ENEMY_BULLET_RADIUS);
    }
}
