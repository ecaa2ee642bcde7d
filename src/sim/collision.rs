//! Collision resolution for the gameplay scene
//!
//! Circle-circle tests in list order. Destroyed enemies stay in the list
//! (flagged dead) until the next update pass so later tests in the same pass
//! skip them; enemies released during the pass are appended afterwards.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::collectable::{Collectable, CollectableKind};
use super::context::SimContext;
use super::effects::{self, Effect};
use super::enemy::{Enemy, Force};
use super::player::Player;
use super::state::{ArenaState, Scoreboard};
use super::weapon::Bullet;
use crate::VecExt;
use crate::audio::Sound;
use crate::consts::PLAYER_ENERGY;

/// Index of the first live enemy under the bullet
pub fn first_hit(bullet: &Bullet, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.body.alive && e.body.intersects(&bullet.body))
}

/// Player bullets against enemies. Returns the number of enemies destroyed.
pub fn resolve_bullets(state: &mut ArenaState, score: &mut Scoreboard, ctx: &mut SimContext) -> u32 {
    let ArenaState {
        player,
        enemies,
        player_bullets,
        effects,
        collectables,
        enemy_kills,
        ..
    } = state;
    let now = ctx.now();
    let mut released = Vec::new();
    let mut destroyed = 0;

    player_bullets.retain(|bullet| {
        let Some(index) = first_hit(bullet, enemies) else {
            return true;
        };
        let enemy = &mut enemies[index];
        if enemy.damage_by(Force::Hit(bullet.power)) {
            explode(enemy, bullet.body.vector, effects, ctx);
            let points = score.award(enemy.score_type);
            let position = enemy.body.position - Vec2::new(0.0, 16.0);
            let vector = Vec2::new(0.0, -5.0) + enemy.body.vector * 0.5;
            effects.push(effects::score_indicator(position, vector, points, now));
            released.extend(enemy.on_destroyed(now));
            drop_multipliers(enemy, collectables, ctx);
            drop_energy(enemy, player, collectables, ctx);
            *enemy_kills += 1;
            destroyed += 1;
        } else {
            ctx.audio.play(Sound::EnemyHit);
            let vector = bullet.body.vector * (0.5 + ctx.rng.random::<f32>() * 0.5);
            effects.push(effects::enemy_impact(bullet.body.position, vector, enemy.colour, &mut ctx.rng, now));
        }
        false
    });

    enemies.append(&mut released);
    destroyed
}

/// Player against enemies, enemy bullets and collectables.
/// Returns whether the player died during the pass.
pub fn resolve_player(state: &mut ArenaState, score: &mut Scoreboard, ctx: &mut SimContext) -> bool {
    let ArenaState {
        player,
        enemies,
        enemy_bullets,
        effects,
        collectables,
        enemy_kills,
        ..
    } = state;
    if !player.is_alive() {
        return false;
    }
    let now = ctx.now();
    let invincible = ctx.settings.debug.invincible;
    let mut killed = false;

    for enemy in enemies.iter_mut() {
        if !enemy.body.alive || !player.body.intersects(&enemy.body) {
            continue;
        }
        if !invincible {
            killed |= player.damage_by(enemy.player_damage, now);
        }
        player.body.vector += enemy.body.vector * 0.5;
        // Rammed enemies score nothing and neither split nor drop
        enemy.damage_by(Force::Fatal);
        explode(enemy, player.body.vector, effects, ctx);
        *enemy_kills += 1;
    }

    enemy_bullets.retain(|bullet| {
        if !player.body.intersects(&bullet.body) {
            return true;
        }
        if !invincible {
            killed |= player.damage_by(bullet.power, now);
        }
        player.body.vector += bullet.body.vector * 0.2;
        effects.push(effects::bullet_impact(bullet.body.position, bullet.body.vector * 0.5, &mut ctx.rng, now));
        false
    });

    collectables.retain(|item| {
        if !player.body.intersects(&item.body) {
            return true;
        }
        item.collected(score, player, effects, &mut ctx.audio, now);
        false
    });

    if killed {
        ctx.audio.play(Sound::PlayerExplosion);
        let count = ctx.explosion_particles();
        effects.push(effects::player_explosion(
            player.body.position,
            player.body.vector,
            count,
            &mut ctx.rng,
            now,
        ));
        log::info!("Player destroyed at {now:.0}ms");
    }
    killed
}

/// Explosion and sound for a destroyed enemy, nudged by whatever hit it
fn explode(enemy: &Enemy, impactor: Vec2, effects: &mut Vec<Effect>, ctx: &mut SimContext) {
    let now = ctx.now();
    let count = ctx.explosion_particles();
    let vector = enemy.body.vector + impactor * 0.2;
    effects.push(effects::enemy_explosion(
        enemy.body.position,
        vector,
        enemy,
        count,
        &mut ctx.rng,
        now,
    ));
    let variation = ctx.rng.random_range(1..=4);
    ctx.audio.play(Sound::EnemyExplosion(variation));
}

fn drop_multipliers(enemy: &Enemy, collectables: &mut Vec<Collectable>, ctx: &mut SimContext) {
    if !enemy.drops_multiplier {
        return;
    }
    let now = ctx.now();
    let count = ctx.rng.random_range(1..=enemy.kind.max_multiplier_drops());
    for _ in 0..count {
        let vector = (enemy.body.vector * 0.2).rotated_by(ctx.rng.random::<f32>() * TAU);
        collectables.push(Collectable::multiplier(enemy.body.position, vector, now));
    }
}

fn drop_energy(enemy: &Enemy, player: &Player, collectables: &mut Vec<Collectable>, ctx: &mut SimContext) {
    if player.energy >= PLAYER_ENERGY {
        return;
    }
    if ctx.rng.random::<f32>() >= ctx.tuning.energy_drop_chance {
        return;
    }
    let in_play = collectables
        .iter()
        .filter(|c| c.kind == CollectableKind::EnergyBoost)
        .count();
    if in_play >= ctx.tuning.max_energy_pickups {
        return;
    }
    let vector = (enemy.body.vector * 0.5).rotated_by(ctx.rng.random::<f32>() * TAU);
    collectables.push(Collectable::energy_boost(enemy.body.position, vector, ctx.now()));
}
