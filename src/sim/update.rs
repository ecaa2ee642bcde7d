//! Actor update pass and world boundary policy
//!
//! Each list is walked in insertion order: the kind's update hook runs, then
//! expired actors are compacted out, survivors move by `vector * multiplier`
//! and are clamped to the world square.

use glam::Vec2;

use super::actor::Actor;
use super::clock::FrameTime;
use crate::VecExt;

/// What happens when an actor is clamped at the world edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Mirror velocity on the clamped axis and scale it by `damping`
    Reflect { damping: f32 },
    /// Remove the actor and report the impact
    Absorb,
}

/// Axes clamped during the last move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeHit {
    pub x: bool,
    pub y: bool,
}

impl EdgeHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// An absorbed actor's last position and half its incoming velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub position: Vec2,
    pub vector: Vec2,
}

/// Result of stepping one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Keep,
    Expired,
    Absorbed(Impact),
}

/// Clamp a position to [0, size] on each axis
pub fn clamp_to_world(position: &mut Vec2, size: f32) -> EdgeHit {
    let mut hit = EdgeHit::default();
    if position.x >= size {
        position.x = size;
        hit.x = true;
    } else if position.x < 0.0 {
        position.x = 0.0;
        hit.x = true;
    }
    if position.y >= size {
        position.y = size;
        hit.y = true;
    } else if position.y < 0.0 {
        position.y = 0.0;
        hit.y = true;
    }
    hit
}

/// Bounce off one wall: rotate the velocity by twice its angle to the wall,
/// damp it and push the position off the wall by the result
fn bounce(position: &mut Vec2, vector: &mut Vec2, wall: Vec2, damping: f32) {
    let theta = vector.theta_to(wall);
    vector.rotate_by(theta * 2.0);
    *vector *= damping;
    *position += *vector;
}

/// Apply the reflect policy for the clamped axes, X before Y
pub fn reflect(position: &mut Vec2, vector: &mut Vec2, hit: EdgeHit, damping: f32) {
    if hit.x {
        bounce(position, vector, Vec2::Y, damping);
    }
    if hit.y {
        bounce(position, vector, Vec2::X, damping);
    }
}

/// Expire, move and bound a single actor
pub fn step_actor<A: Actor>(actor: &mut A, boundary: Boundary, world_size: f32, frame: FrameTime) -> Step {
    if actor.expired(frame.now) {
        return Step::Expired;
    }
    let body = actor.body_mut();
    body.integrate(frame.multiplier);
    let hit = clamp_to_world(&mut body.position, world_size);
    if !hit.any() {
        return Step::Keep;
    }
    match boundary {
        Boundary::Absorb => Step::Absorbed(Impact {
            position: body.position,
            vector: body.vector * 0.5,
        }),
        Boundary::Reflect { damping } => {
            reflect(&mut body.position, &mut body.vector, hit, damping);
            Step::Keep
        }
    }
}

/// Run the update pass over one actor list
///
/// `on_update` is the kind's per-frame hook and runs before the expiry check.
/// Returns the impacts of absorbed actors so the caller can spawn effects.
pub fn update_actors<A: Actor>(
    list: &mut Vec<A>,
    boundary: Boundary,
    world_size: f32,
    frame: FrameTime,
    mut on_update: impl FnMut(&mut A),
) -> Vec<Impact> {
    let mut impacts = Vec::new();
    list.retain_mut(|actor| {
        on_update(actor);
        match step_actor(actor, boundary, world_size, frame) {
            Step::Keep => true,
            Step::Expired => false,
            Step::Absorbed(impact) => {
                impacts.push(impact);
                false
            }
        }
    });
    impacts
}
