//! Arena Shooter headless driver
//!
//! Runs the game core against null collaborators with a scripted player for
//! a fixed number of synthetic 60 Hz frames, then logs a summary. Useful for
//! soak-testing balance changes in a tuning file.
//!
//! Environment:
//! - `ARENA_SETTINGS`: settings JSON path
//! - `ARENA_TUNING`: tuning JSON path
//! - `ARENA_HIGHSCORE`: high score JSON path (kept in memory when unset)
//! - `ARENA_FRAMES`: frames to simulate (default 7200)

use std::path::PathBuf;

use glam::Vec2;

use arena_shooter::assets::NoAssets;
use arena_shooter::audio::{AudioManager, NullAudio};
use arena_shooter::consts::IDEAL_FRAME_MS;
use arena_shooter::game::SceneId;
use arena_shooter::persistence::{HighScoreStore, JsonFileStore, MemoryStore};
use arena_shooter::platform::{InputState, Key, MonotonicClock, TimeSource};
use arena_shooter::render::{Overlay, Renderer, Sprite};
use arena_shooter::sim::World;
use arena_shooter::{Game, Settings, Tuning};

const VIEWPORT: f32 = 800.0;

/// Renderer that only counts what it is given
#[derive(Debug, Default)]
struct CountingRenderer {
    sprites: u64,
    overlays: u64,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _sprite: &Sprite<'_>, _world: &World) {
        self.sprites += 1;
    }

    fn overlay(&mut self, _overlay: &Overlay<'_>) {
        self.overlays += 1;
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).map(PathBuf::from)
}

fn load_tuning() -> Tuning {
    let Some(path) = env_path("ARENA_TUNING") else {
        return Tuning::default();
    };
    Tuning::load(&path).unwrap_or_else(|e| {
        log::warn!("Using default tuning: {e}");
        Tuning::default()
    })
}

/// Scripted player: presses start, circles the pointer and weaves around
fn script_input(input: &mut InputState, frame: u64, scene: Option<SceneId>) {
    input.clear_events();
    input.pointer = None;
    input.up = false;
    input.right = false;
    input.down = false;
    input.left = false;
    if scene != Some(SceneId::Arena) {
        if frame % 120 == 0 {
            input.pressed.extend(Key::from_name("Enter"));
        }
        return;
    }
    let t = frame as f32 / 60.0;
    let aim = Vec2::new(t.cos(), t.sin()) * VIEWPORT * 0.4;
    input.pointer = Some(Vec2::splat(VIEWPORT * 0.5) + aim);
    match (frame / 90) % 4 {
        0 => input.up = true,
        1 => input.right = true,
        2 => input.down = true,
        _ => input.left = true,
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Arena Shooter (headless) starting...");

    let settings = env_path("ARENA_SETTINGS")
        .map(|path| Settings::load_or_default(&path))
        .unwrap_or_default();
    let tuning = load_tuning();
    let store: Box<dyn HighScoreStore> = match env_path("ARENA_HIGHSCORE") {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };
    let frames: u64 = std::env::var("ARENA_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(7200);

    let audio = AudioManager::new(Box::new(NullAudio), settings.sound_enabled);
    let mut game = Game::new(
        settings,
        tuning,
        audio,
        store,
        Box::new(NoAssets),
        Vec2::splat(VIEWPORT),
        0.0,
    );
    let mut renderer = CountingRenderer::default();
    let mut input = InputState::default();
    let mut runs = 0;
    let mut previous = None;
    let wall = MonotonicClock::new();

    for frame in 1..=frames {
        let now = frame as f64 * IDEAL_FRAME_MS;
        script_input(&mut input, frame, game.scene());
        game.frame(now, &input);
        game.render(&mut renderer);

        let scene = game.scene();
        if scene == Some(SceneId::GameOver) && previous != scene {
            runs += 1;
            log::info!("Run {runs} ended with {} points", game.score().last_score);
        }
        previous = scene;
    }

    log::info!(
        "Simulated {} frames in {:.0}ms: {runs} runs, high score {}, wave {}, {} sprites drawn, {} overlays",
        game.context().clock.frame_count(),
        wall.now_ms(),
        game.score().high_score,
        game.arena().waves.wave_number(),
        renderer.sprites,
        renderer.overlays
    );
}
