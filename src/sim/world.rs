//! World extent and the view window into it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{VIEW_EDGE_FRACTION, VIEW_SIZE_MAX, VIEW_SIZE_MIN, VIEW_SIZE_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Side of the square world
    pub size: f32,
    /// Top-left corner of the view window
    pub view_x: f32,
    pub view_y: f32,
    /// Side of the view window in world units
    pub view_size: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl World {
    pub fn new(size: f32, view_size: f32, viewport: Vec2) -> Self {
        let mut world = Self {
            size,
            view_x: 0.0,
            view_y: 0.0,
            view_size,
            viewport,
        };
        world.center_view();
        world
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        self.viewport.x / self.view_size
    }

    pub fn center_view(&mut self) {
        self.view_x = self.size * 0.5 - self.view_size * 0.5;
        self.view_y = self.size * 0.5 - self.view_size * 0.5;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size * 0.5)
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Screen position of a circle, or `None` when it lies wholly outside the view
    pub fn to_screen(&self, position: Vec2, radius: f32) -> Option<Vec2> {
        let vx = position.x - self.view_x;
        let vy = position.y - self.view_y;
        let visible = vx < self.view_size + radius
            && vy < self.view_size + radius
            && vx > -radius
            && vy > -radius;
        visible.then(|| Vec2::new(vx, vy) * self.scale())
    }

    /// World position under a viewport pixel
    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        pixel / self.scale() + Vec2::new(self.view_x, self.view_y)
    }

    /// World position at the middle of the viewport
    pub fn screen_center(&self) -> Vec2 {
        self.screen_to_world(self.viewport * 0.5)
    }

    /// Keep the player centred until it nears a world edge
    pub fn follow(&mut self, target: Vec2) {
        let edge = self.view_size * VIEW_EDGE_FRACTION;
        if target.x > edge && target.x < self.size - edge {
            self.view_x = target.x - self.view_size * 0.5;
        }
        if target.y > edge && target.y < self.size - edge {
            self.view_y = target.y - self.view_size * 0.5;
        }
    }

    /// Shrink the view window one step
    pub fn zoom_in(&mut self) -> bool {
        if self.view_size > VIEW_SIZE_MIN {
            self.view_size -= VIEW_SIZE_STEP;
            return true;
        }
        false
    }

    /// Grow the view window one step
    pub fn zoom_out(&mut self) -> bool {
        if self.view_size < VIEW_SIZE_MAX {
            self.view_size += VIEW_SIZE_STEP;
            return true;
        }
        false
    }
}
