//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (sampled into an `InputState` once per frame)
//! - Wall-clock time for the frame driver

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::{MonotonicClock, TimeSource};
