//! Frame clock
//!
//! Turns wall-clock frame timestamps into a multiplier relative to an ideal
//! 60 Hz frame. Per-frame motion is scaled by the multiplier; timers compare
//! absolute milliseconds instead.

use serde::{Deserialize, Serialize};

use crate::consts::IDEAL_FRAME_MS;

/// Timing for the frame being simulated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Start of this frame (ms)
    pub now: f64,
    /// Elapsed time since the previous frame in ideal frames
    pub multiplier: f32,
}

impl FrameTime {
    pub fn new(now: f64, multiplier: f32) -> Self {
        Self { now, multiplier }
    }

    /// Per-frame chance `p` adjusted for the frame length, capped at 1
    pub fn chance(&self, p: f32) -> f64 {
        (p * self.multiplier).clamp(0.0, 1.0) as f64
    }

    /// Per-frame damping factor adjusted for the frame length
    pub fn damping(&self, factor: f32) -> f32 {
        factor.powf(self.multiplier)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameClock {
    frame_start: f64,
    multiplier: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        Self {
            frame_start: now,
            multiplier: 1.0,
            frame_count: 0,
        }
    }

    /// Begin a new frame at `now`, returning its multiplier
    ///
    /// A zero or negative interval is clamped to 1 ms.
    pub fn tick(&mut self, now: f64) -> f32 {
        let interval = (now - self.frame_start).max(1.0);
        self.multiplier = (interval / IDEAL_FRAME_MS) as f32;
        self.frame_start = now;
        self.frame_count += 1;
        self.multiplier
    }

    /// Reset the baseline after a pause so the next frame does not jump
    pub fn resume(&mut self, now: f64) {
        self.frame_start = now;
        self.multiplier = 1.0;
    }

    pub fn frame(&self) -> FrameTime {
        FrameTime::new(self.frame_start, self.multiplier)
    }

    pub fn now(&self) -> f64 {
        self.frame_start
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
