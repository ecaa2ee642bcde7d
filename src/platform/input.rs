//! Per-frame input snapshot
//!
//! The host fills an `InputState` from its event stream before each frame.
//! Direction flags are levels (held keys); `pressed` holds the key-down edges
//! seen since the previous frame.

use glam::Vec2;

/// Discrete key-down events the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Start a game from the attract screen
    Start,
    /// Start button on a gamepad (also disables pointer autofire)
    GamepadStart,
    /// Pause/resume
    Pause,
    ToggleSound,
    /// Debug: jump to the next wave
    SkipWave,
    /// Shrink the view window
    ZoomIn,
    /// Grow the view window
    ZoomOut,
}

impl Key {
    /// Map a host key name (DOM `KeyboardEvent.key` style) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            " " | "Enter" => Some(Key::Start),
            "Escape" => Some(Key::Pause),
            "t" | "T" => Some(Key::ToggleSound),
            "l" | "L" => Some(Key::SkipWave),
            "[" => Some(Key::ZoomIn),
            "]" => Some(Key::ZoomOut),
            _ => None,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Analogue movement stick; overrides the direction flags when present
    pub axis_move: Option<Vec2>,
    /// Analogue fire stick; fires in its direction when present
    pub axis_fire: Option<Vec2>,
    /// Pointer position in viewport pixels
    pub pointer: Option<Vec2>,
    /// Key-down events since the last frame
    pub pressed: Vec<Key>,
}

impl InputState {
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.push(key);
    }

    /// Drop edge events once a frame has consumed them
    pub fn clear_events(&mut self) {
        self.pressed.clear();
    }

    /// Heading in degrees (0 = up, clockwise) requested by the direction flags
    pub fn flag_heading(&self) -> Option<f32> {
        let x = (self.right as i8) - (self.left as i8);
        let y = (self.down as i8) - (self.up as i8);
        match (x, y) {
            (0, -1) => Some(0.0),
            (1, -1) => Some(45.0),
            (1, 0) => Some(90.0),
            (1, 1) => Some(135.0),
            (0, 1) => Some(180.0),
            (-1, 1) => Some(225.0),
            (-1, 0) => Some(270.0),
            (-1, -1) => Some(315.0),
            _ => None,
        }
    }
}
