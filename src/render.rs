//! Rendering seam
//!
//! The core decides what is visible and where it lands on screen; a
//! `Renderer` backend decides how it looks. Actors describe themselves with
//! a `Visual` and the draw context culls them against the view window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetStore, ImageHandle, select_frame};
use crate::sim::collectable::CollectableKind;
use crate::sim::effects::ParticleShape;
use crate::sim::enemy::EnemyKind;
use crate::sim::scene::AttractorPage;
use crate::sim::world::World;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const PLAYER: Colour = Colour::rgb(255, 255, 255);
    pub const PARTICLE: Colour = Colour::rgb(255, 150, 75);
    pub const ENEMY_DUMBO: Colour = Colour::rgb(0, 128, 255);
    pub const ENEMY_TRACKER: Colour = Colour::rgb(255, 96, 0);
    pub const ENEMY_ZONER: Colour = Colour::rgb(255, 255, 0);
    pub const ENEMY_BORG: Colour = Colour::rgb(0, 255, 64);
    pub const ENEMY_DODGER: Colour = Colour::rgb(0, 255, 255);
    pub const ENEMY_SPLITTER: Colour = Colour::rgb(148, 0, 255);
    pub const ENEMY_BOMBER: Colour = Colour::rgb(255, 0, 255);
}

/// What to draw for one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual<'a> {
    Player { heading: f32, thrusting: bool },
    Enemy { kind: EnemyKind, spawn_scale: f32, hit: bool },
    PlayerBullet { heading: f32 },
    EnemyBullet,
    Collectable { kind: CollectableKind, rotation: f32 },
    Particle { shape: ParticleShape, size: f32, colour: Colour },
    Text { msg: &'a str, size: u32, colour: Colour },
}

/// A culled, screen-space draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    pub visual: Visual<'a>,
    /// Viewport pixels
    pub screen: Vec2,
    /// Pixels per world unit
    pub scale: f32,
    pub alpha: f32,
    /// Prerendered frame when the asset store has one
    pub image: Option<ImageHandle>,
    /// Collision radius to outline, debug only
    pub outline: Option<f32>,
}

/// Heads-up display values for the gameplay scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    /// Player energy in [0, 1]
    pub energy: f32,
    pub score: u64,
    pub high_score: u64,
    pub multiplier: u64,
    pub wave: usize,
    /// Seconds spent in the current wave
    pub wave_elapsed: f64,
}

/// Full-screen layers drawn over the actors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay<'a> {
    Hud(Hud),
    /// Intro banner shown before a scene starts
    Interval { label: &'a str },
    Attract { page: AttractorPage, high_score: u64, last_score: u64 },
    GameOver { score: u64, new_high_score: bool },
    Paused,
}

/// Rendering backend
pub trait Renderer {
    /// Draw one visible actor
    fn render(&mut self, sprite: &Sprite<'_>, world: &World);

    /// Draw a full-screen layer
    fn overlay(&mut self, _overlay: &Overlay<'_>) {}
}

/// Everything an actor needs to draw itself
pub struct DrawContext<'r> {
    pub renderer: &'r mut dyn Renderer,
    pub assets: &'r dyn AssetStore,
    pub world: &'r World,
    pub now: f64,
    pub show_collision_radius: bool,
}

impl DrawContext<'_> {
    /// Cull and submit one sprite. `image` is an asset key and frame counter.
    /// Returns whether anything was drawn.
    pub fn draw(
        &mut self,
        position: Vec2,
        radius: f32,
        visual: Visual<'_>,
        alpha: f32,
        image: Option<(&str, f32)>,
    ) -> bool {
        let Some(screen) = self.world.to_screen(position, radius) else {
            return false;
        };
        let image = image.and_then(|(key, counter)| select_frame(self.assets, key, counter));
        let sprite = Sprite {
            visual,
            screen,
            scale: self.world.scale(),
            alpha,
            image,
            outline: self.show_collision_radius.then_some(radius),
        };
        self.renderer.render(&sprite, self.world);
        true
    }
}

/// Actors that can describe themselves to a renderer
pub trait Renderable {
    fn draw(&self, ctx: &mut DrawContext<'_>);
}
