//! Projectile motion, hit resolution and kill rewards
//!
//! Projectiles are single-hit: the first overlap consumes them. Collections
//! are compacted with `retain_mut` / partition rather than spliced mid-loop.

use super::particles::{COLOR_DEATH, COLOR_DEATH_ELITE};
use super::player::take_damage;
use super::state::{Enemy, Player, Projectile, World};
use crate::consts::*;
use crate::{circles_overlap, in_field};

/// Damage a player projectile deals given the current crit and combo state
pub fn shot_damage(shot: &Projectile, player: &Player) -> f32 {
    let base = if shot.crit {
        shot.damage * (player.crit_multiplier + 1.0)
    } else {
        shot.damage
    };
    base * (1.0 + (player.combo - 1.0) * COMBO_DAMAGE_BONUS)
}

/// Experience granted for destroying `enemy`
pub fn kill_xp(enemy: &Enemy) -> f32 {
    let xp = enemy.max_hp / 10.0 + enemy.damage;
    if enemy.elite { xp * ELITE_XP_MULT } else { xp }
}

/// Move a projectile and report whether it is still in flight
fn advance_shot(shot: &mut Projectile, dt: f32, margin: f32) -> bool {
    shot.pos += shot.vel * dt;
    shot.life -= dt;
    shot.life > 0.0 && in_field(shot.pos, margin)
}

/// Integrate player projectiles and apply hits to enemies
pub fn resolve_player_shots(world: &mut World, dt: f32) {
    let World {
        player,
        enemies,
        player_shots,
        particles,
        rng,
        ..
    } = world;

    player_shots.retain_mut(|shot| {
        if !advance_shot(shot, dt, PLAYER_SHOT_MARGIN) {
            return false;
        }
        let target = enemies
            .iter_mut()
            .find(|e| !e.is_dead() && circles_overlap(e.pos, e.radius, shot.pos, shot.radius));
        match target {
            Some(enemy) => {
                enemy.hp -= shot_damage(shot, player);
                particles.hit(&mut *rng, enemy.pos, shot.crit);
                false
            }
            None => true,
        }
    });
}

/// Integrate enemy projectiles and apply hits to the player
pub fn resolve_enemy_shots(world: &mut World, dt: f32) {
    let World {
        player,
        enemy_shots,
        particles,
        rng,
        ..
    } = world;

    enemy_shots.retain_mut(|shot| {
        if !advance_shot(shot, dt, ENEMY_SHOT_MARGIN) {
            return false;
        }
        if circles_overlap(player.pos, PLAYER_RADIUS, shot.pos, shot.radius) {
            take_damage(player, shot.damage);
            particles.hit(&mut *rng, player.pos, false);
            return false;
        }
        true
    });
}

/// Remove destroyed enemies and pay out their rewards. Returns the number
/// of kills.
pub fn reap_dead(world: &mut World) -> usize {
    if !world.enemies.iter().any(Enemy::is_dead) {
        return 0;
    }
    let (fallen, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut world.enemies).into_iter().partition(Enemy::is_dead);
    world.enemies = alive;

    for enemy in &fallen {
        on_enemy_killed(world, enemy);
    }
    fallen.len()
}

fn on_enemy_killed(world: &mut World, enemy: &Enemy) {
    let player = &mut world.player;
    let xp = kill_xp(enemy);
    player.xp += xp;
    player.score += xp * SCORE_PER_XP;
    player.combo = (player.combo + COMBO_STEP).min(COMBO_MAX);
    player.combo_timer = 0.0;

    let (color, count) = if enemy.elite {
        (COLOR_DEATH_ELITE, 55)
    } else {
        (COLOR_DEATH, 35)
    };
    world
        .particles
        .explosion(&mut world.rng, enemy.pos, color, count);
}
