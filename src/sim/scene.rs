//! Scenes: attract mode, the arena itself and the game over banner
//!
//! Each scene owns its own state and is driven by `Game`. A scene may carry
//! an intro `Interval`; while it runs the scene is not updated and only the
//! interval banner is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::context::SimContext;
use super::effects;
use super::enemy::Surroundings;
use super::state::{ArenaState, Scoreboard};
use super::update::{Boundary, Impact, step_actor, update_actors};
use super::waves::WaveDirector;
use super::world::World;
use crate::assets::AssetStore;
use crate::consts::*;
use crate::platform::{InputState, Key};
use crate::render::{DrawContext, Hud, Overlay, Renderable, Renderer};
use crate::{VecExt, normalize_degrees};

/// Milliseconds each attract page stays up
pub const ATTRACT_PAGE_MS: f64 = 8000.0;

/// Timed intro banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub label: String,
    pub duration_ms: f64,
    started: Option<f64>,
    complete: bool,
}

impl Interval {
    pub fn new(label: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            label: label.into(),
            duration_ms,
            started: None,
            complete: false,
        }
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.complete = false;
    }

    /// Count the interval down; the first call starts it
    pub fn update(&mut self, now: f64) -> bool {
        let started = *self.started.get_or_insert(now);
        if now - started >= self.duration_ms {
            self.complete = true;
        }
        self.complete
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttractorPage {
    Welcome,
    /// Controls and enemy guide
    Info,
    Scores,
}

impl AttractorPage {
    pub fn next(self) -> Self {
        match self {
            AttractorPage::Welcome => AttractorPage::Info,
            AttractorPage::Info => AttractorPage::Scores,
            AttractorPage::Scores => AttractorPage::Welcome,
        }
    }
}

/// Title screen, waits for a start key
#[derive(Debug, Clone)]
pub struct AttractorScene {
    pub page: AttractorPage,
    page_started: f64,
    start: bool,
}

impl AttractorScene {
    pub fn new(now: f64) -> Self {
        Self {
            page: AttractorPage::Welcome,
            page_started: now,
            start: false,
        }
    }

    pub fn enter(&mut self, now: f64) {
        *self = Self::new(now);
    }

    pub fn update(&mut self, input: &InputState, ctx: &mut SimContext) {
        let now = ctx.now();
        if now - self.page_started >= ATTRACT_PAGE_MS {
            self.page = self.page.next();
            self.page_started = now;
        }
        if input.was_pressed(Key::GamepadStart) {
            // Pad players aim with the fire stick
            ctx.autofire = false;
            self.start = true;
        }
        if input.was_pressed(Key::Start) {
            self.start = true;
        }
    }

    /// Start requested and the images are ready
    pub fn is_complete(&self, assets: &dyn AssetStore) -> bool {
        self.start && assets.ready()
    }

    pub fn render(&self, renderer: &mut dyn Renderer, score: &Scoreboard) {
        renderer.overlay(&Overlay::Attract {
            page: self.page,
            high_score: score.high_score,
            last_score: score.last_score,
        });
    }
}

/// The arena: every actor, the wave director and the view window
#[derive(Debug, Clone)]
pub struct GameScene {
    pub world: World,
    pub state: ArenaState,
    pub waves: WaveDirector,
    pub interval: Interval,
}

impl GameScene {
    pub fn new(ctx: &SimContext, viewport: Vec2) -> Self {
        let tuning = &ctx.tuning;
        let world = World::new(tuning.world_size, tuning.view_size, viewport);
        Self {
            state: ArenaState::new(world.center()),
            waves: WaveDirector::new(tuning.waves.clone(), ctx.now()),
            world,
            interval: Interval::new("ENTER THE ARENA!", 830.0),
        }
    }

    /// Fresh run: empty lists, first wave, player in the middle
    pub fn enter(&mut self, ctx: &SimContext) {
        self.world.center_view();
        self.state = ArenaState::new(self.world.center());
        self.waves.restart(ctx.now());
        self.interval.reset();
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// One simulation step
    pub fn update(&mut self, input: &InputState, score: &mut Scoreboard, ctx: &mut SimContext) {
        let frame = ctx.frame();
        self.upgrade_weapons(score, &ctx.tuning.weapon_upgrades, frame.now);
        self.handle_keys(input, ctx);

        if self.state.player.is_alive() {
            self.state.player.handle_input(input, frame);
        }
        self.update_actors(ctx);
        self.autofire(input, ctx);
        self.world.follow(self.state.player.body.position);
        self.direct_waves(ctx);

        collision::resolve_bullets(&mut self.state, score, ctx);
        if self.state.player.is_alive() {
            collision::resolve_player(&mut self.state, score, ctx);
        } else {
            let killed_on = self.state.player.killed_on.unwrap_or(frame.now);
            if frame.now - killed_on > ctx.tuning.respawn_delay_ms {
                self.state.enemies.clear();
                self.respawn_player();
            }
        }

        for effect in &mut self.state.effects {
            effect.animate(frame);
        }
    }

    /// Each threshold passed adds one bullet to the primary weapon
    fn upgrade_weapons(&mut self, score: &Scoreboard, thresholds: &[u64], now: f64) {
        let main = &mut self.state.player.weapons.main;
        for (level, &threshold) in thresholds.iter().enumerate() {
            if score.score > threshold && main.bullet_count == level as u32 + 1 {
                main.bullet_count += 1;
                log::debug!("Weapon upgraded to {} bullets", main.bullet_count);
                let msg = format!("POWERUP X{}!", level + 1);
                let position = self.world.screen_center();
                self.state
                    .effects
                    .push(effects::text(position, Vec2::new(0.0, -3.5), msg, 32, POWERUP_TEXT_MS, now));
            }
        }
    }

    fn handle_keys(&mut self, input: &InputState, ctx: &SimContext) {
        if input.was_pressed(Key::ZoomIn) && self.world.zoom_in() {
            log::debug!("View size {}", self.world.view_size);
        }
        if input.was_pressed(Key::ZoomOut) && self.world.zoom_out() {
            log::debug!("View size {}", self.world.view_size);
        }
        if input.was_pressed(Key::SkipWave) && ctx.settings.debug.allow_wave_skip {
            self.waves.skip = true;
        }
    }

    fn update_actors(&mut self, ctx: &mut SimContext) {
        let frame = ctx.frame();
        let size = self.world.size;
        let ArenaState {
            player,
            enemies,
            player_bullets,
            enemy_bullets,
            effects,
            collectables,
            ..
        } = &mut self.state;
        let bounce = Boundary::Reflect {
            damping: BOUNCE_DAMPING,
        };

        let surroundings = Surroundings {
            player_position: player.body.position,
            player_alive: player.is_alive(),
            player_bullets: player_bullets.as_slice(),
        };
        update_actors(enemies, bounce, size, frame, |enemy| {
            enemy.update(&surroundings, frame, &mut ctx.rng, &mut ctx.audio, enemy_bullets);
        });

        let bullet_boundary = if player.bounce_weapons {
            bounce
        } else {
            Boundary::Absorb
        };
        let mut impacts = update_actors(player_bullets, bullet_boundary, size, frame, |_| {});
        impacts.extend(update_actors(enemy_bullets, Boundary::Absorb, size, frame, |_| {}));
        for Impact { position, vector } in impacts {
            effects.push(effects::bullet_impact(position, vector, &mut ctx.rng, frame.now));
        }

        update_actors(effects, bounce, size, frame, |_| {});
        update_actors(collectables, bounce, size, frame, |c| c.update(frame));
        // A destroyed ship stays where it blew up until the respawn
        if player.is_alive() {
            step_actor(
                player,
                Boundary::Reflect {
                    damping: PLAYER_BOUNCE_DAMPING,
                },
                size,
                frame,
            );
        }
    }

    /// Fire towards the pointer or along the fire stick
    fn autofire(&mut self, input: &InputState, ctx: &mut SimContext) {
        let player = &mut self.state.player;
        let aim = match (input.axis_fire, input.pointer) {
            (Some(axis), _) => axis,
            (None, Some(pointer)) if ctx.autofire => {
                self.world.screen_to_world(pointer) - player.body.position + player.body.vector
            }
            _ => return,
        };
        let vector = aim.scaled_to(BULLET_SPEED);
        if vector == Vec2::ZERO {
            return;
        }
        let heading = normalize_degrees(Vec2::NEG_Y.theta_to(vector).to_degrees());
        let now = ctx.now();
        let bullets = player.fire_primary(vector, heading, now, &mut ctx.rng, &mut ctx.audio);
        self.state.player_bullets.extend(bullets);
    }

    fn direct_waves(&mut self, ctx: &mut SimContext) {
        let now = ctx.now();
        if let Some(wave) = self.waves.advance(now) {
            let position = self.world.screen_center();
            let msg = format!("WAVE {wave}");
            self.state
                .effects
                .push(effects::text(position, Vec2::new(0.0, -3.5), msg, 32, WAVE_TEXT_MS, now));
        }
        self.waves.replenish(
            &mut self.state.enemies,
            self.state.player.body.position,
            self.world.size,
            ctx.tuning.spawn_min_distance,
            &mut ctx.rng,
            now,
        );
    }

    /// Back to the middle of the world with a fresh ship
    fn respawn_player(&mut self) {
        let player = &mut self.state.player;
        player.body.position = self.world.center();
        player.body.vector = Vec2::ZERO;
        player.heading = 0.0;
        player.reset(false);
        log::info!("Player respawned on wave {}", self.waves.wave_number());
    }

    pub fn hud(&self, score: &Scoreboard, now: f64) -> Hud {
        Hud {
            energy: self.state.player.energy as f32 / PLAYER_ENERGY as f32,
            score: score.score,
            high_score: score.high_score,
            multiplier: score.multiplier,
            wave: self.waves.wave_number(),
            wave_elapsed: self.waves.elapsed_secs(now),
        }
    }

    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        assets: &dyn AssetStore,
        score: &Scoreboard,
        ctx: &SimContext,
    ) {
        if !self.interval.is_complete() {
            renderer.overlay(&Overlay::Interval {
                label: &self.interval.label,
            });
            return;
        }
        let now = ctx.now();
        let mut draw = DrawContext {
            renderer: &mut *renderer,
            assets,
            world: &self.world,
            now,
            show_collision_radius: ctx.settings.debug.show_collision_radius,
        };
        let state = &self.state;
        for enemy in state.enemies.iter().filter(|e| e.body.alive) {
            enemy.draw(&mut draw);
        }
        for bullet in state.player_bullets.iter().chain(&state.enemy_bullets) {
            bullet.draw(&mut draw);
        }
        for effect in &state.effects {
            effect.draw(&mut draw);
        }
        for item in &state.collectables {
            item.draw(&mut draw);
        }
        state.player.draw(&mut draw);
        renderer.overlay(&Overlay::Hud(self.hud(score, now)));
    }
}

/// Final score banner
#[derive(Debug, Clone)]
pub struct GameOverScene {
    pub interval: Interval,
    pub new_high_score: bool,
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self {
            interval: Interval::new("GAME OVER", 3300.0),
            new_high_score: false,
        }
    }
}

impl GameOverScene {
    pub fn enter(&mut self, new_high_score: bool) {
        self.interval.reset();
        self.new_high_score = new_high_score;
    }

    pub fn render(&self, renderer: &mut dyn Renderer, score: &Scoreboard) {
        renderer.overlay(&Overlay::GameOver {
            score: score.last_score,
            new_high_score: self.new_high_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::render::testing::RecordingRenderer;
    use crate::sim::enemy::{Enemy, EnemyKind, EnemyState};
    use crate::sim::weapon::Bullet;

    fn arena(ctx: &SimContext) -> GameScene {
        let mut scene = GameScene::new(ctx, Vec2::splat(1000.0));
        scene.interval.update(0.0);
        scene.interval.update(1000.0);
        scene
    }

    fn step(scene: &mut GameScene, input: &InputState, score: &mut Scoreboard, ctx: &mut SimContext, now: f64) {
        ctx.clock.tick(now);
        scene.update(input, score, ctx);
    }

    #[test]
    fn test_interval_counts_from_first_update() {
        let mut interval = Interval::new("GAME OVER", 3300.0);
        assert!(!interval.update(500.0));
        assert!(!interval.update(3799.0));
        assert!(interval.update(3800.0));
        interval.reset();
        assert!(!interval.is_complete());
    }

    #[test]
    fn test_attract_pages_cycle() {
        let mut ctx = SimContext::for_tests(1);
        let mut scene = AttractorScene::new(0.0);
        let input = InputState::default();
        let mut pages = Vec::new();
        for i in 1..=4 {
            ctx.clock.tick(i as f64 * ATTRACT_PAGE_MS);
            scene.update(&input, &mut ctx);
            pages.push(scene.page);
        }
        assert_eq!(
            pages,
            vec![AttractorPage::Info, AttractorPage::Scores, AttractorPage::Welcome, AttractorPage::Info]
        );
        assert!(!scene.is_complete(&NoAssets));
    }

    #[test]
    fn test_gamepad_start_disables_autofire() {
        let mut ctx = SimContext::for_tests(2);
        let mut scene = AttractorScene::new(0.0);
        let mut input = InputState::default();
        input.press(Key::GamepadStart);
        scene.update(&input, &mut ctx);
        assert!(scene.is_complete(&NoAssets));
        assert!(!ctx.autofire);
    }

    #[test]
    fn test_first_frame_fills_wave_one() {
        let mut ctx = SimContext::for_tests(3);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);
        assert_eq!(scene.state.enemies.len(), 5);
        assert!(scene.state.enemies.iter().all(|e| e.state == EnemyState::Spawning));
    }

    #[test]
    fn test_pointer_autofire() {
        let mut ctx = SimContext::for_tests(4);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        // Pointer straight to the right of the centred player
        let input = InputState {
            pointer: Some(Vec2::new(900.0, 500.0)),
            ..Default::default()
        };
        step(&mut scene, &input, &mut score, &mut ctx, 16.0);
        assert_eq!(scene.state.player_bullets.len(), 1);
        let bullet = &scene.state.player_bullets[0];
        assert!(bullet.body.vector.x > 15.0);
        assert!((bullet.heading - 90.0).abs() < 0.01);

        ctx.autofire = false;
        step(&mut scene, &input, &mut score, &mut ctx, 400.0);
        assert!(scene.state.player_bullets.len() <= 1);
    }

    #[test]
    fn test_weapon_upgrades_with_score() {
        let mut ctx = SimContext::for_tests(5);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        score.score = 10_001;
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);
        assert_eq!(scene.state.player.weapons.main.bullet_count, 2);
        score.score = 60_000;
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 32.0);
        assert_eq!(scene.state.player.weapons.main.bullet_count, 3);
        let banners: Vec<_> = scene
            .state
            .effects
            .iter()
            .filter_map(|e| match e {
                effects::Effect::Text(t) => Some(t.msg.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(banners, vec!["POWERUP X1!", "POWERUP X2!"]);
    }

    #[test]
    fn test_respawn_after_delay_keeps_wave() {
        let mut ctx = SimContext::for_tests(6);
        let mut score = Scoreboard::default();
        score.multiplier = 4;
        let mut scene = arena(&ctx);
        scene.waves.skip = true;
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);
        assert_eq!(scene.waves.wave_number(), 2);

        scene.state.player.kill(16.0);
        // Keep an effect alive so the run is not over
        scene.state.effects.push(effects::text(Vec2::ZERO, Vec2::ZERO, "x", 22, 10_000.0, 16.0));
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 2000.0);
        assert!(!scene.state.player.is_alive());
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 2600.0);
        assert!(scene.state.player.is_alive());
        assert_eq!(scene.state.player.body.position, scene.world.center());
        assert_eq!(scene.waves.wave_number(), 2);
        assert_eq!(score.multiplier, 4);
        assert!(scene.state.enemies.is_empty());
    }

    /// Fill wave one far from the right wall so no spawn lands on a test bullet
    fn park_wave(scene: &mut GameScene) {
        scene.state.enemies = (0..5)
            .map(|_| Enemy::new(EnemyKind::Dumbo, Vec2::splat(100.0), 0.0))
            .collect();
    }

    #[test]
    fn test_bounce_weapons_reflect_player_bullets() {
        let mut ctx = SimContext::for_tests(10);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        park_wave(&mut scene);
        scene.state.player.bounce_weapons = true;
        let wall = Vec2::new(1490.0, 750.0);
        scene.state.player_bullets.push(Bullet::player(wall, Vec2::new(16.0, 0.0), 90.0, 0.0));
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);

        assert_eq!(scene.state.player_bullets.len(), 1);
        let bullet = &scene.state.player_bullets[0];
        assert!((bullet.body.vector.x + 14.4).abs() < 0.01, "{:?}", bullet.body.vector);
        assert!(bullet.body.vector.y.abs() < 0.01);
        assert!(bullet.body.position.x < 1500.0);
        assert!(scene.state.effects.is_empty());
    }

    #[test]
    fn test_player_bullets_absorbed_at_wall_by_default() {
        let mut ctx = SimContext::for_tests(11);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        park_wave(&mut scene);
        let wall = Vec2::new(1490.0, 750.0);
        scene.state.player_bullets.push(Bullet::player(wall, Vec2::new(16.0, 0.0), 90.0, 0.0));
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);

        assert!(scene.state.player_bullets.is_empty());
        assert_eq!(scene.state.effects.len(), 1);
        assert!(matches!(scene.state.effects[0], effects::Effect::Particles(_)));
    }

    #[test]
    fn test_dead_player_stays_put() {
        let mut ctx = SimContext::for_tests(12);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        park_wave(&mut scene);
        scene.state.player.kill(0.0);
        scene.state.player.body.vector = Vec2::new(6.0, -4.0);
        let wreck = scene.state.player.body.position;
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 16.0);
        step(&mut scene, &InputState::default(), &mut score, &mut ctx, 32.0);
        assert_eq!(scene.state.player.body.position, wreck);
    }

    #[test]
    fn test_skip_key_needs_debug_flag() {
        let mut ctx = SimContext::for_tests(7);
        let mut score = Scoreboard::default();
        let mut scene = arena(&ctx);
        let mut input = InputState::default();
        input.press(Key::SkipWave);
        step(&mut scene, &input, &mut score, &mut ctx, 16.0);
        assert_eq!(scene.waves.wave_number(), 1);
        ctx.settings.debug.allow_wave_skip = true;
        step(&mut scene, &input, &mut score, &mut ctx, 32.0);
        assert_eq!(scene.waves.wave_number(), 2);
    }

    #[test]
    fn test_render_skips_dead_enemies_and_adds_hud() {
        let ctx = SimContext::for_tests(8);
        let mut scene = arena(&ctx);
        let mut dead = Enemy::new(EnemyKind::Dumbo, Vec2::splat(700.0), 0.0);
        dead.body.alive = false;
        scene.state.enemies = vec![dead, Enemy::new(EnemyKind::Zoner, Vec2::splat(800.0), 0.0)];
        let mut renderer = RecordingRenderer::default();
        scene.render(&mut renderer, &NoAssets, &Scoreboard::default(), &ctx);
        // Live enemy and player
        assert_eq!(renderer.sprites.len(), 2);
        assert_eq!(renderer.overlays.len(), 1);
        assert!(renderer.overlays[0].starts_with("Hud"));
    }

    #[test]
    fn test_interval_banner_before_play() {
        let ctx = SimContext::for_tests(9);
        let scene = GameScene::new(&ctx, Vec2::splat(1000.0));
        let mut renderer = RecordingRenderer::default();
        scene.render(&mut renderer, &NoAssets, &Scoreboard::default(), &ctx);
        assert!(renderer.sprites.is_empty());
        assert!(renderer.overlays[0].contains("ENTER THE ARENA!"));
    }
}
