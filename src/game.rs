//! Top-level frame driver
//!
//! `Game` owns the simulation context, the three scenes and the host
//! collaborators. The host calls `frame` once per display refresh with a
//! timestamp and the input gathered since the previous frame, then `render`.

use glam::Vec2;

use crate::assets::AssetStore;
use crate::audio::AudioManager;
use crate::persistence::HighScoreStore;
use crate::platform::{InputState, Key};
use crate::render::{Overlay, Renderer};
use crate::settings::Settings;
use crate::sim::{AttractorScene, GameOverScene, GameScene, Scoreboard, SimContext};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    Attractor,
    Arena,
    GameOver,
}

impl SceneId {
    /// Scene entered once this one completes
    fn next(self) -> Self {
        match self {
            SceneId::Attractor => SceneId::Arena,
            SceneId::Arena | SceneId::GameOver => SceneId::Attractor,
        }
    }
}

pub struct Game {
    ctx: SimContext,
    score: Scoreboard,
    attractor: AttractorScene,
    arena: GameScene,
    game_over: GameOverScene,
    current: Option<SceneId>,
    paused: bool,
    store: Box<dyn HighScoreStore>,
    assets: Box<dyn AssetStore>,
}

impl Game {
    pub fn new(
        settings: Settings,
        tuning: Tuning,
        audio: AudioManager,
        store: Box<dyn HighScoreStore>,
        assets: Box<dyn AssetStore>,
        viewport: Vec2,
        now: f64,
    ) -> Self {
        let high_score = store.load_high_score();
        log::info!("High score {high_score}");
        let ctx = SimContext::new(settings, tuning, audio, now);
        let arena = GameScene::new(&ctx, viewport);
        Self {
            ctx,
            score: Scoreboard::new(high_score),
            attractor: AttractorScene::new(now),
            arena,
            game_over: GameOverScene::default(),
            current: None,
            paused: false,
            store,
            assets,
        }
    }

    /// Run one frame at time `now` (ms)
    pub fn frame(&mut self, now: f64, input: &InputState) {
        if input.was_pressed(Key::Pause) && self.current == Some(SceneId::Arena) {
            self.paused = !self.paused;
            if self.paused {
                log::info!("Paused");
                return;
            }
            log::info!("Resumed");
            self.ctx.clock.resume(now);
        } else if self.paused {
            return;
        } else {
            self.ctx.clock.tick(now);
        }

        if input.was_pressed(Key::ToggleSound) {
            self.ctx.audio.toggle();
        }

        let scene = self.transition();
        match scene {
            SceneId::Attractor => self.attractor.update(input, &mut self.ctx),
            SceneId::Arena => {
                if self.arena.interval.is_complete() {
                    self.arena.update(input, &mut self.score, &mut self.ctx);
                } else {
                    self.arena.interval.update(self.ctx.now());
                }
            }
            SceneId::GameOver => {
                self.game_over.interval.update(self.ctx.now());
            }
        }
    }

    /// Apply the scene transition rules, returning the scene to run this frame
    fn transition(&mut self) -> SceneId {
        let mut scene = match self.current {
            None => self.enter(SceneId::Attractor),
            Some(SceneId::Arena) if self.arena.is_game_over() => self.end_run(),
            Some(scene) => scene,
        };
        if self.is_complete(scene) {
            scene = self.enter(scene.next());
        }
        scene
    }

    fn is_complete(&self, scene: SceneId) -> bool {
        match scene {
            SceneId::Attractor => self.attractor.is_complete(self.assets.as_ref()),
            // The arena only ends through the game over rule
            SceneId::Arena => false,
            SceneId::GameOver => self.game_over.interval.is_complete(),
        }
    }

    fn end_run(&mut self) -> SceneId {
        let new_high = self.score.end_run();
        log::info!(
            "Game over: score {} after {} kills",
            self.score.last_score,
            self.arena.state.enemy_kills
        );
        if new_high {
            self.store.save_high_score(self.score.high_score);
            log::info!("New high score {} saved", self.score.high_score);
        }
        self.game_over.enter(new_high);
        self.current = Some(SceneId::GameOver);
        SceneId::GameOver
    }

    fn enter(&mut self, scene: SceneId) -> SceneId {
        log::info!("Entering {scene:?}");
        let now = self.ctx.now();
        match scene {
            SceneId::Attractor => self.attractor.enter(now),
            SceneId::Arena => self.arena.enter(&self.ctx),
            SceneId::GameOver => self.game_over.enter(false),
        }
        self.current = Some(scene);
        scene
    }

    /// Draw the current scene
    pub fn render(&self, renderer: &mut dyn Renderer) {
        match self.current {
            None => {}
            Some(SceneId::Attractor) => self.attractor.render(renderer, &self.score),
            Some(SceneId::Arena) => {
                self.arena
                    .render(renderer, self.assets.as_ref(), &self.score, &self.ctx)
            }
            Some(SceneId::GameOver) => self.game_over.render(renderer, &self.score),
        }
        if self.paused {
            renderer.overlay(&Overlay::Paused);
        }
    }

    /// Viewport resized by the host
    pub fn resize(&mut self, viewport: Vec2) {
        self.arena.world.set_viewport(viewport);
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn arena(&self) -> &GameScene {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut GameScene {
        &mut self.arena
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn sound_enabled(&self) -> bool {
        self.ctx.audio.is_enabled()
    }
}
