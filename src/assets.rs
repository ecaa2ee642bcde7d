//! Prerendered sprite frames
//!
//! The host generates and owns sprite images; the core only asks for the
//! frames registered under a key and picks one by animation counter.

use std::collections::HashMap;

/// Opaque handle to a host-owned image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Source of prerendered frames
pub trait AssetStore {
    /// Whether all sprites have finished prerendering
    fn ready(&self) -> bool {
        true
    }

    /// Frames registered under `key`, if any
    fn frames(&self, key: &str) -> Option<&[ImageHandle]>;
}

/// Store with nothing in it; every sprite falls back to vector drawing
#[derive(Debug, Default)]
pub struct NoAssets;

impl AssetStore for NoAssets {
    fn frames(&self, _key: &str) -> Option<&[ImageHandle]> {
        None
    }
}

/// In-memory registry filled by the host as it prerenders
#[derive(Debug, Default)]
pub struct FrameRegistry {
    frames: HashMap<String, Vec<ImageHandle>>,
    ready: bool,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, frames: Vec<ImageHandle>) {
        self.frames.insert(key.into(), frames);
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }
}

impl AssetStore for FrameRegistry {
    fn ready(&self) -> bool {
        self.ready
    }

    fn frames(&self, key: &str) -> Option<&[ImageHandle]> {
        self.frames.get(key).map(Vec::as_slice)
    }
}

/// Pick the frame for an animation counter, wrapping around
pub fn select_frame(assets: &dyn AssetStore, key: &str, counter: f32) -> Option<ImageHandle> {
    let frames = assets.frames(key)?;
    if frames.is_empty() {
        return None;
    }
    let index = (counter.max(0.0) as usize) % frames.len();
    Some(frames[index])
}
