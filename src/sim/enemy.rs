//! Enemy kinds and their behavior
//!
//! One `Enemy` type covers every kind; the per-kind numbers live in the
//! `EnemyProfile` table and the per-kind AI in `Enemy::think`.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body};
use super::clock::FrameTime;
use super::weapon::{Bullet, Recharge};
use crate::VecExt;
use crate::audio::{AudioManager, Sound};
use crate::consts::*;
use crate::render::{Colour, DrawContext, Renderable, Visual};

/// Attempts at finding a spawn point far enough from the player
const MAX_SPAWN_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Drifts, occasionally flipping vertical direction
    Dumbo,
    /// Slowly re-aims at the player now and then
    Zoner,
    /// Re-aims often and fast
    Tracker,
    /// Large and tough, dashes at the player
    Borg,
    /// Sidesteps incoming player bullets
    Dodger,
    /// Breaks into two minis when shot down
    Splitter,
    /// Holds range and lobs bombs
    Bomber,
    /// Splitter offspring
    SplitterMini,
}

/// Static numbers for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub radius: f32,
    pub health: i32,
    pub player_damage: i32,
    pub score_type: u32,
    pub drops_multiplier: bool,
    pub colour: Colour,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::Dumbo,
        EnemyKind::Zoner,
        EnemyKind::Tracker,
        EnemyKind::Borg,
        EnemyKind::Dodger,
        EnemyKind::Splitter,
        EnemyKind::Bomber,
        EnemyKind::SplitterMini,
    ];

    /// Stable numeric id, also the default score type
    pub fn index(self) -> u32 {
        match self {
            EnemyKind::Dumbo => 0,
            EnemyKind::Zoner => 1,
            EnemyKind::Tracker => 2,
            EnemyKind::Borg => 3,
            EnemyKind::Dodger => 4,
            EnemyKind::Splitter => 5,
            EnemyKind::Bomber => 6,
            EnemyKind::SplitterMini => 99,
        }
    }

    pub fn profile(self) -> EnemyProfile {
        let (radius, health, player_damage, colour) = match self {
            EnemyKind::Dumbo => (22.0, 1, 10, Colour::ENEMY_DUMBO),
            EnemyKind::Zoner => (22.0, 1, 10, Colour::ENEMY_ZONER),
            EnemyKind::Tracker => (22.0, 2, 15, Colour::ENEMY_TRACKER),
            EnemyKind::Borg => (52.0, 5, 25, Colour::ENEMY_BORG),
            EnemyKind::Dodger => (25.0, 2, 10, Colour::ENEMY_DODGER),
            EnemyKind::Splitter => (25.0, 3, 20, Colour::ENEMY_SPLITTER),
            EnemyKind::Bomber => (28.0, 5, 20, Colour::ENEMY_BOMBER),
            EnemyKind::SplitterMini => (12.0, 1, 5, Colour::ENEMY_SPLITTER),
        };
        let (score_type, drops_multiplier) = match self {
            EnemyKind::SplitterMini => (4, false),
            kind => (kind.index(), true),
        };
        EnemyProfile {
            radius,
            health,
            player_damage,
            score_type,
            drops_multiplier,
            colour,
        }
    }

    /// Upper bound on multiplier pickups dropped when destroyed (at least 1)
    pub fn max_multiplier_drops(self) -> u32 {
        self.index().clamp(1, 4)
    }

    pub fn asset_key(self) -> &'static str {
        match self {
            EnemyKind::Dumbo => "enemy-0",
            EnemyKind::Zoner => "enemy-1",
            EnemyKind::Tracker => "enemy-2",
            EnemyKind::Borg => "enemy-3",
            EnemyKind::Dodger => "enemy-4",
            EnemyKind::Splitter => "enemy-5",
            EnemyKind::Bomber => "enemy-6",
            EnemyKind::SplitterMini => "enemy-99",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Growing into place, not yet moving
    Spawning,
    Alive,
}

/// Damage applied to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Force {
    Hit(i32),
    /// Destroy regardless of health (player collision)
    Fatal,
}

/// What an enemy can see of the rest of the scene
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub player_position: Vec2,
    pub player_alive: bool,
    pub player_bullets: &'a [Bullet],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    pub score_type: u32,
    pub player_damage: i32,
    pub drops_multiplier: bool,
    pub colour: Colour,
    pub state: EnemyState,
    pub created: f64,
    bomb: Recharge,
    /// Took a non-fatal hit this frame
    pub hit: bool,
    /// Sprite animation counter
    pub frame: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec2, now: f64) -> Self {
        let profile = kind.profile();
        Self {
            body: Body::new(position, Vec2::ZERO, profile.radius),
            kind,
            health: profile.health,
            score_type: profile.score_type,
            player_damage: profile.player_damage,
            drops_multiplier: profile.drops_multiplier,
            colour: profile.colour,
            state: EnemyState::Spawning,
            created: now,
            bomb: Recharge::starting_at(BOMBER_RECHARGE_MS, now),
            hit: false,
            frame: 0.0,
        }
    }

    /// Spawn at a random point at least `min_distance` from `avoid`
    pub fn spawn(
        kind: EnemyKind,
        world_size: f32,
        avoid: Vec2,
        min_distance: f32,
        rng: &mut Pcg32,
        now: f64,
    ) -> Self {
        let mut position = Vec2::ZERO;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            position = Vec2::new(rng.random::<f32>() * world_size, rng.random::<f32>() * world_size);
            if position.distance(avoid) > min_distance {
                break;
            }
        }
        log::debug!("Spawned {kind:?} at ({:.0}, {:.0})", position.x, position.y);
        Self::new(kind, position, now)
    }

    /// Per-frame hook: finish spawning or run the kind's AI
    pub fn update(
        &mut self,
        env: &Surroundings<'_>,
        frame: FrameTime,
        rng: &mut Pcg32,
        audio: &mut AudioManager,
        enemy_bullets: &mut Vec<Bullet>,
    ) {
        self.hit = false;
        self.frame += frame.multiplier;
        match self.state {
            EnemyState::Spawning => {
                if frame.now >= self.created + ENEMY_SPAWN_MS {
                    self.state = EnemyState::Alive;
                    let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    self.body.vector = Vec2::new(sx, sy) * ENEMY_CRUISE_SPEED;
                }
            }
            EnemyState::Alive => self.think(env, frame, rng, audio, enemy_bullets),
        }
    }

    fn think(
        &mut self,
        env: &Surroundings<'_>,
        frame: FrameTime,
        rng: &mut Pcg32,
        audio: &mut AudioManager,
        enemy_bullets: &mut Vec<Bullet>,
    ) {
        let to_player = env.player_position - self.body.position;
        match self.kind {
            EnemyKind::Dumbo => {
                if rng.random_bool(frame.chance(0.01)) {
                    let v = &mut self.body.vector;
                    v.y = -(v.y + (0.35 - rng.random::<f32>()));
                }
            }
            EnemyKind::Zoner => self.reaim(to_player, 0.05, 3.0, frame, rng),
            EnemyKind::Tracker => self.reaim(to_player, 0.25, 5.5, frame, rng),
            EnemyKind::Borg => {
                if rng.random_bool(frame.chance(0.03)) {
                    self.body.vector = to_player.scaled_to(8.0);
                } else {
                    self.body.vector *= frame.damping(0.95);
                }
            }
            EnemyKind::Dodger => {
                // Close to the player it goes for the kill instead
                let dodged = to_player.length() > 150.0 && self.dodge(env.player_bullets, rng);
                if !dodged {
                    self.reaim(to_player, 0.04, 5.5, frame, rng);
                }
            }
            EnemyKind::Splitter => self.reaim(to_player, 0.05, 3.5, frame, rng),
            EnemyKind::Bomber => {
                let distance = to_player.length();
                if distance > 400.0 {
                    self.reaim(to_player, 0.08, 6.0, frame, rng);
                } else if distance < 350.0 {
                    self.reaim(-to_player, 0.08, 6.0, frame, rng);
                } else {
                    self.body.vector *= frame.damping(0.85);
                    if env.player_alive && self.bomb.trigger(frame.now) {
                        audio.play(Sound::EnemyBomb);
                        let jitter = Vec2::new(
                            rng.random::<f32>() * 2.0 - 1.0,
                            rng.random::<f32>() * 2.0 - 1.0,
                        );
                        let v = to_player.scaled_to(BOMBER_BULLET_SPEED) + jitter;
                        enemy_bullets.push(Bullet::enemy(self.body.position, v, BOMBER_BULLET_POWER, frame.now));
                    }
                }
            }
            EnemyKind::SplitterMini => self.reaim(to_player, 0.04, 6.0, frame, rng),
        }
    }

    /// With per-frame chance `p`, head along `direction` at `speed`
    fn reaim(&mut self, direction: Vec2, p: f32, speed: f32, frame: FrameTime, rng: &mut Pcg32) {
        if rng.random_bool(frame.chance(p)) {
            self.body.vector = direction.scaled_to(speed);
        }
    }

    /// Sidestep the first player bullet inside perception range
    fn dodge(&mut self, bullets: &[Bullet], rng: &mut Pcg32) -> bool {
        let position = self.body.position;
        let perception = self.body.radius + 50.0;
        let Some(bullet) = bullets
            .iter()
            .find(|b| b.body.position.distance(position) <= b.body.radius + perception)
        else {
            return false;
        };
        let n = rng.random::<f32>();
        let angle = if n < 0.5 { n * FRAC_PI_4 } else { -n * FRAC_PI_4 };
        self.body.vector = -(bullet.body.position - position).scaled_to(7.0).rotated_by(angle);
        true
    }

    /// Apply damage; returns whether the enemy is now destroyed
    pub fn damage_by(&mut self, force: Force) -> bool {
        self.hit = true;
        match force {
            Force::Fatal => self.body.alive = false,
            Force::Hit(power) => {
                self.health -= power;
                if self.health <= 0 {
                    self.body.alive = false;
                }
            }
        }
        !self.body.alive
    }

    /// Enemies released when this one is shot down
    pub fn on_destroyed(&self, now: f64) -> Vec<Enemy> {
        if self.kind != EnemyKind::Splitter {
            return Vec::new();
        }
        [FRAC_PI_2, -FRAC_PI_2]
            .into_iter()
            .map(|angle| {
                let vector = self.body.vector.rotated_by(angle);
                let mut child = Enemy::new(EnemyKind::SplitterMini, self.body.position + vector, now);
                child.body.vector = vector;
                child
            })
            .collect()
    }

    /// Grow-in scale while spawning, in [0.01, 1]
    pub fn spawn_scale(&self, now: f64) -> f32 {
        match self.state {
            EnemyState::Alive => 1.0,
            EnemyState::Spawning => ((now - self.created) / ENEMY_SPAWN_MS).clamp(0.01, 1.0) as f32,
        }
    }
}

impl Actor for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Renderable for Enemy {
    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let visual = Visual::Enemy {
            kind: self.kind,
            spawn_scale: self.spawn_scale(ctx.now),
            hit: self.hit,
        };
        let key = (self.kind.asset_key(), self.frame);
        ctx.draw(self.body.position, self.body.radius, visual, 1.0, Some(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn env(player: Vec2) -> Surroundings<'static> {
        Surroundings {
            player_position: player,
            player_alive: true,
            player_bullets: &[],
        }
    }

    fn alive(kind: EnemyKind, position: Vec2) -> Enemy {
        let mut enemy = Enemy::new(kind, position, 0.0);
        enemy.state = EnemyState::Alive;
        enemy
    }

    #[test]
    fn test_profile_table() {
        let borg = EnemyKind::Borg.profile();
        assert_eq!(borg.radius, 52.0);
        assert_eq!(borg.health, 5);
        assert_eq!(borg.player_damage, 25);
        let mini = EnemyKind::SplitterMini.profile();
        assert_eq!(mini.score_type, 4);
        assert!(!mini.drops_multiplier);
        assert_eq!(EnemyKind::Dumbo.max_multiplier_drops(), 1);
        assert_eq!(EnemyKind::Bomber.max_multiplier_drops(), 4);
    }

    #[test]
    fn test_spawn_keeps_distance_from_player() {
        let mut rng = Pcg32::seed_from_u64(11);
        let player = Vec2::splat(750.0);
        for _ in 0..200 {
            let e = Enemy::spawn(EnemyKind::Zoner, 1500.0, player, 220.0, &mut rng, 0.0);
            assert!(e.body.position.distance(player) > 220.0);
            assert_eq!(e.state, EnemyState::Spawning);
            assert_eq!(e.body.vector, Vec2::ZERO);
        }
    }

    #[test]
    fn test_spawning_becomes_alive_with_diagonal_velocity() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut audio = AudioManager::default();
        let mut bullets = Vec::new();
        let mut e = Enemy::new(EnemyKind::Dumbo, Vec2::splat(100.0), 1000.0);
        e.update(&env(Vec2::ZERO), FrameTime::new(1499.0, 1.0), &mut rng, &mut audio, &mut bullets);
        assert_eq!(e.state, EnemyState::Spawning);
        e.update(&env(Vec2::ZERO), FrameTime::new(1500.0, 1.0), &mut rng, &mut audio, &mut bullets);
        assert_eq!(e.state, EnemyState::Alive);
        assert_eq!(e.body.vector.x.abs(), 4.0);
        assert_eq!(e.body.vector.y.abs(), 4.0);
    }

    #[test]
    fn test_fatal_force_ignores_health() {
        let mut borg = alive(EnemyKind::Borg, Vec2::ZERO);
        assert!(!borg.damage_by(Force::Hit(1)));
        assert_eq!(borg.health, 4);
        assert!(borg.hit);
        assert!(borg.damage_by(Force::Fatal));
        assert!(borg.expired(0.0));
    }

    #[test]
    fn test_splitter_children_rotate_parent_velocity() {
        let mut splitter = alive(EnemyKind::Splitter, Vec2::new(400.0, 400.0));
        splitter.body.vector = Vec2::new(3.0, 0.0);
        let children = splitter.on_destroyed(10.0);
        assert_eq!(children.len(), 2);
        for (child, sign) in children.iter().zip([1.0, -1.0]) {
            assert_eq!(child.kind, EnemyKind::SplitterMini);
            let expected = Vec2::new(0.0, 3.0 * sign);
            assert!((child.body.vector - expected).length() < 0.001);
            assert!((child.body.position - (Vec2::new(400.0, 400.0) + expected)).length() < 0.001);
        }
        assert!(alive(EnemyKind::Dumbo, Vec2::ZERO).on_destroyed(0.0).is_empty());
    }

    #[test]
    fn test_tracker_closes_in() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut audio = AudioManager::default();
        let mut bullets = Vec::new();
        let mut e = alive(EnemyKind::Tracker, Vec2::new(100.0, 100.0));
        // A 25% per-frame chance hits well within 100 frames
        for i in 0..100 {
            e.update(&env(Vec2::new(600.0, 100.0)), FrameTime::new(i as f64, 1.0), &mut rng, &mut audio, &mut bullets);
        }
        assert!((e.body.vector - Vec2::new(5.5, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_dodger_evades_nearby_bullet() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut audio = AudioManager::default();
        let mut bullets = Vec::new();
        let incoming = [Bullet::player(Vec2::new(160.0, 100.0), Vec2::new(-16.0, 0.0), 270.0, 0.0)];
        let surroundings = Surroundings {
            player_position: Vec2::new(1000.0, 100.0),
            player_alive: true,
            player_bullets: &incoming,
        };
        let mut e = alive(EnemyKind::Dodger, Vec2::new(100.0, 100.0));
        e.update(&surroundings, FrameTime::new(0.0, 1.0), &mut rng, &mut audio, &mut bullets);
        // Moves away from the bullet, within 45 degrees of straight back
        assert!((e.body.vector.length() - 7.0).abs() < 0.001);
        assert!(e.body.vector.x < -4.9);
    }

    #[test]
    fn test_bomber_fires_in_range() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut audio = AudioManager::default();
        let mut bullets = Vec::new();
        let mut e = alive(EnemyKind::Bomber, Vec2::new(100.0, 100.0));
        let player = Vec2::new(475.0, 100.0);
        e.update(&env(player), FrameTime::new(1000.0, 1.0), &mut rng, &mut audio, &mut bullets);
        assert!(bullets.is_empty(), "bomb still recharging");
        e.update(&env(player), FrameTime::new(1501.0, 1.0), &mut rng, &mut audio, &mut bullets);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].power, BOMBER_BULLET_POWER);
        assert!(bullets[0].body.vector.x > 6.9);
        e.update(&env(player), FrameTime::new(1600.0, 1.0), &mut rng, &mut audio, &mut bullets);
        assert_eq!(bullets.len(), 1);
    }
}
