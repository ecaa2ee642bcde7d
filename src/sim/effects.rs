//! Particle emitters and floating text
//!
//! Effects never collide. A `ParticleEmitter` builds its particles once from
//! a factory closure and is spent when the last particle has aged out.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, Lifespan};
use super::clock::FrameTime;
use super::enemy::{Enemy, EnemyKind};
use crate::VecExt;
use crate::render::{Colour, DrawContext, Renderable, Visual};

/// Default floating text size (pt) and lifespan
pub const TEXT_SIZE: u32 = 22;
pub const TEXT_LIFESPAN_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleShape {
    Dot,
    /// Spinning streak; `angle` in radians
    Line { angle: f32, spin: f32 },
    Smudge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub vector: Vec2,
    pub size: f32,
    pub shape: ParticleShape,
    pub colour: Colour,
    pub lifespan: Lifespan,
    /// Alpha fades out over the last `fade` ms
    pub fade: f64,
}

impl Particle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec2,
        vector: Vec2,
        size: f32,
        shape: ParticleShape,
        colour: Colour,
        lifespan: f64,
        fade: f64,
        now: f64,
    ) -> Self {
        Self {
            position,
            vector,
            size,
            shape,
            colour,
            lifespan: Lifespan::new(now, lifespan),
            fade,
        }
    }

    pub fn alive(&self, now: f64) -> bool {
        self.lifespan.age(now) < self.lifespan.length
    }

    pub fn alpha(&self, now: f64) -> f32 {
        self.lifespan.fade(1.0, self.fade, now)
    }

    fn advance(&mut self, multiplier: f32) {
        self.position += self.vector * multiplier;
        if let ParticleShape::Line { angle, spin } = &mut self.shape {
            *angle += *spin * multiplier;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEmitter {
    pub body: Body,
    pub particles: Vec<Particle>,
}

impl ParticleEmitter {
    pub fn new(position: Vec2, vector: Vec2, count: usize, factory: impl FnMut(usize) -> Particle) -> Self {
        Self {
            body: Body::new(position, vector, 0.0),
            particles: (0..count).map(factory).collect(),
        }
    }

    /// Move live particles and drop those past their lifespan
    pub fn animate(&mut self, frame: FrameTime) {
        self.particles.retain_mut(|p| {
            if !p.alive(frame.now) {
                return false;
            }
            p.advance(frame.multiplier);
            true
        });
    }

    pub fn is_spent(&self) -> bool {
        self.particles.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextIndicator {
    pub body: Body,
    pub msg: String,
    pub size: u32,
    pub colour: Colour,
    pub lifespan: Lifespan,
}

impl TextIndicator {
    /// Fades over its whole lifespan
    pub fn alpha(&self, now: f64) -> f32 {
        self.lifespan.fade(1.0, self.lifespan.length, now)
    }
}

/// Any visual-only actor in the effects list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Effect {
    Particles(ParticleEmitter),
    Text(TextIndicator),
}

impl Effect {
    /// Post-collision animation step
    pub fn animate(&mut self, frame: FrameTime) {
        if let Effect::Particles(emitter) = self {
            emitter.animate(frame);
        }
    }
}

impl Actor for Effect {
    fn body(&self) -> &Body {
        match self {
            Effect::Particles(e) => &e.body,
            Effect::Text(t) => &t.body,
        }
    }

    fn body_mut(&mut self) -> &mut Body {
        match self {
            Effect::Particles(e) => &mut e.body,
            Effect::Text(t) => &mut t.body,
        }
    }

    fn expired(&self, now: f64) -> bool {
        match self {
            Effect::Particles(e) => e.is_spent(),
            Effect::Text(t) => t.lifespan.expired(now),
        }
    }
}

impl Renderable for Effect {
    fn draw(&self, ctx: &mut DrawContext<'_>) {
        match self {
            Effect::Particles(emitter) => {
                for p in &emitter.particles {
                    let visual = Visual::Particle {
                        shape: p.shape,
                        size: p.size,
                        colour: p.colour,
                    };
                    ctx.draw(p.position, p.size, visual, p.alpha(ctx.now), None);
                }
            }
            Effect::Text(text) => {
                let visual = Visual::Text {
                    msg: &text.msg,
                    size: text.size,
                    colour: text.colour,
                };
                ctx.draw(text.body.position, 128.0, visual, text.alpha(ctx.now), None);
            }
        }
    }
}

/// Random offset of up to 5 units on each axis
fn jitter(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(rng.random_range(-5..=5) as f32, rng.random_range(-5..=5) as f32)
}

/// Radial velocity of `speed` in a random direction, plus `base`
fn radial(rng: &mut Pcg32, speed: f32, base: Vec2) -> Vec2 {
    Vec2::new(0.0, speed).rotated_by(rng.random::<f32>() * TAU) + base
}

fn line(rng: &mut Pcg32) -> ParticleShape {
    ParticleShape::Line {
        angle: rng.random::<f32>() * TAU,
        spin: (rng.random::<f32>() - 0.5) * 0.5,
    }
}

pub fn enemy_explosion(
    position: Vec2,
    vector: Vec2,
    enemy: &Enemy,
    count: usize,
    rng: &mut Pcg32,
    now: f64,
) -> Effect {
    let big = enemy.kind == EnemyKind::Borg;
    let colour = enemy.colour;
    Effect::Particles(ParticleEmitter::new(position, vector, count, |_| {
        let pos = position + jitter(rng);
        match rng.random_range(0..=2) {
            0 => {
                let speed = rng.random_range(12..=15) as f32;
                let v = radial(rng, speed, vector);
                let size = rng.random_range(0..4) as f32;
                Particle::new(pos, v, size, ParticleShape::Dot, Colour::PARTICLE, 1000.0, 300.0, now)
            }
            1 => {
                let speed = rng.random_range(2..=5) as f32;
                let v = radial(rng, speed, vector);
                let size = if big {
                    rng.random::<f32>() * 10.0 + 10.0
                } else {
                    rng.random::<f32>() * 5.0 + 5.0
                };
                let shape = line(rng);
                Particle::new(pos, v, size, shape, colour, 1000.0, 300.0, now)
            }
            _ => {
                let speed = rng.random_range(1..=3) as f32;
                let v = radial(rng, speed, vector);
                let size = rng.random_range(4..8) as f32;
                Particle::new(pos, v, size, ParticleShape::Smudge, Colour::PARTICLE, 1000.0, 300.0, now)
            }
        }
    }))
}

pub fn enemy_impact(position: Vec2, vector: Vec2, colour: Colour, rng: &mut Pcg32, now: f64) -> Effect {
    Effect::Particles(ParticleEmitter::new(position, vector, 5, |_| {
        let speed = rng.random_range(3..=8) as f32;
        let speed = if rng.random_bool(0.5) { -speed } else { speed };
        let v = Vec2::new(0.0, speed).rotated_by(rng.random::<f32>() * FRAC_PI_2 - FRAC_PI_4) + vector;
        let size = rng.random_range(0..4) as f32;
        Particle::new(position, v, size, ParticleShape::Dot, colour, 750.0, 250.0, now)
    }))
}

pub fn bullet_impact(position: Vec2, vector: Vec2, rng: &mut Pcg32, now: f64) -> Effect {
    Effect::Particles(ParticleEmitter::new(position, vector, 3, |_| {
        let v = vector.rotated_by(rng.random::<f32>() * FRAC_PI_8);
        let size = rng.random_range(0..4) as f32;
        Particle::new(position, v, size, ParticleShape::Dot, Colour::PARTICLE, 500.0, 200.0, now)
    }))
}

pub fn player_explosion(position: Vec2, vector: Vec2, count: usize, rng: &mut Pcg32, now: f64) -> Effect {
    Effect::Particles(ParticleEmitter::new(position, vector, count, |_| {
        let pos = position + jitter(rng);
        if rng.random_bool(0.5) {
            let speed = rng.random_range(3..=5) as f32;
            let v = radial(rng, speed, vector);
            let size = rng.random::<f32>() * 5.0 + 5.0;
            let shape = line(rng);
            Particle::new(pos, v, size, shape, Colour::PLAYER, 1000.0, 300.0, now)
        } else {
            let speed = rng.random_range(3..=8) as f32;
            let v = radial(rng, speed, vector);
            let size = rng.random_range(4..8) as f32;
            Particle::new(pos, v, size, ParticleShape::Smudge, Colour::PARTICLE, 1000.0, 300.0, now)
        }
    }))
}

/// Floating text
pub fn text(position: Vec2, vector: Vec2, msg: impl Into<String>, size: u32, lifespan: f64, now: f64) -> Effect {
    Effect::Text(TextIndicator {
        body: Body::new(position, vector, 0.0),
        msg: msg.into(),
        size,
        colour: Colour::WHITE,
        lifespan: Lifespan::new(now, lifespan),
    })
}

/// Points awarded, floating up from where they were earned
pub fn score_indicator(position: Vec2, vector: Vec2, score: u64, now: f64) -> Effect {
    text(position, vector, score.to_string(), TEXT_SIZE, TEXT_LIFESPAN_MS, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_emitter_spent_after_last_particle_ages_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = Enemy::new(EnemyKind::Zoner, Vec2::splat(300.0), 0.0);
        let mut effect = enemy_explosion(Vec2::splat(300.0), Vec2::ZERO, &enemy, 20, &mut rng, 0.0);
        let Effect::Particles(emitter) = &effect else {
            panic!("expected particles");
        };
        assert_eq!(emitter.particles.len(), 20);

        let mut now: f64 = 0.0;
        while now < 999.0 {
            now += 16.0;
            let t = now.min(999.0);
            effect.animate(FrameTime::new(t, 1.0));
            assert!(!effect.expired(t), "still live at {t}");
        }
        effect.animate(FrameTime::new(1000.0, 1.0));
        assert!(effect.expired(1000.0));
    }

    #[test]
    fn test_particle_fade_clamped() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, ParticleShape::Dot, Colour::PARTICLE, 1000.0, 300.0, 0.0);
        assert_eq!(p.alpha(100.0), 1.0);
        assert!((p.alpha(850.0) - 0.5).abs() < 0.001);
        assert_eq!(p.alpha(1200.0), 0.0);
        assert!(p.alive(999.0));
        assert!(!p.alive(1000.0));
    }

    #[test]
    fn test_line_particles_spin() {
        let mut emitter = ParticleEmitter::new(Vec2::ZERO, Vec2::ZERO, 1, |_| {
            let shape = ParticleShape::Line { angle: 0.0, spin: 0.2 };
            Particle::new(Vec2::ZERO, Vec2::X, 5.0, shape, Colour::PLAYER, 1000.0, 300.0, 0.0)
        });
        emitter.animate(FrameTime::new(16.0, 2.0));
        let p = &emitter.particles[0];
        assert_eq!(p.position, Vec2::new(2.0, 0.0));
        assert_eq!(p.shape, ParticleShape::Line { angle: 0.4, spin: 0.2 });
    }

    #[test]
    fn test_bullet_impact_keeps_speed() {
        let mut rng = Pcg32::seed_from_u64(8);
        let Effect::Particles(emitter) = bullet_impact(Vec2::ZERO, Vec2::new(8.0, 0.0), &mut rng, 0.0) else {
            panic!("expected particles");
        };
        assert_eq!(emitter.particles.len(), 3);
        for p in &emitter.particles {
            assert!((p.vector.length() - 8.0).abs() < 0.001);
            assert!(p.vector.y >= 0.0);
        }
    }

    #[test]
    fn test_text_expires_after_lifespan() {
        let effect = score_indicator(Vec2::ZERO, Vec2::new(0.0, -5.0), 150, 100.0);
        assert!(!effect.expired(600.0));
        assert!(effect.expired(601.0));
        let Effect::Text(text) = &effect else {
            panic!("expected text");
        };
        assert_eq!(text.msg, "150");
        assert!((text.alpha(350.0) - 0.5).abs() < 0.001);
    }
}
