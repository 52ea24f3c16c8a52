//! Per-variant enemy behavior
//!
//! No state machine: each variant reacts to the player's current position
//! every frame and fires off its own cooldown.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;

use super::particles::{COLOR_ARTILLERY, COLOR_CONTACT, ParticleSystem};
use super::player::take_damage;
use super::state::{Enemy, EnemyKind, Player, Projectile, World};
use crate::consts::{ENEMY_OVERSCAN, PLAYER_RADIUS};
use crate::{clamp_to_field, unit_from_angle};

/// Chaser contact damage is `damage * dt * CHASER_BURST` before it detonates
pub const CHASER_BURST: f32 = 4.0;

pub const STRAFER_STANDOFF: f32 = 240.0;
pub const STRAFER_MAX_CORRECTION: f32 = 120.0;
pub const STRAFER_ORBIT: f32 = 0.4;
pub const STRAFER_ELITE_ORBIT: f32 = 1.4;
pub const STRAFER_COOLDOWN: f32 = 0.65;
pub const STRAFER_JITTER: f32 = 0.12;
pub const STRAFER_SHOT_SPEED: f32 = 320.0;
pub const STRAFER_ELITE_SHOT_BONUS: f32 = 120.0;

pub const ARTILLERY_STANDOFF: f32 = 320.0;
pub const ARTILLERY_COOLDOWN: f32 = 2.8;
pub const ARTILLERY_SHOT_SPEED: f32 = 260.0;
pub const ARTILLERY_DAMAGE_MULT: f32 = 1.6;

const STRAFER_SHOT_COLOR: u32 = 0xffcc55;
const STRAFER_ELITE_SHOT_COLOR: u32 = 0xff4689;

/// What an enemy needs from the world during its update
struct Ctx<'a, R: Rng> {
    player: &'a mut Player,
    shots: &'a mut Vec<Projectile>,
    particles: &'a mut ParticleSystem,
    rng: &'a mut R,
    dt: f32,
}

/// Run every enemy's behavior for one frame. Enemies left at hp <= 0 are
/// reaped by the caller.
pub fn run(world: &mut World, dt: f32) {
    let World {
        player,
        enemies,
        enemy_shots,
        particles,
        rng,
        ..
    } = world;
    let mut ctx = Ctx {
        player,
        shots: enemy_shots,
        particles,
        rng,
        dt,
    };

    for enemy in enemies.iter_mut() {
        match enemy.kind {
            EnemyKind::Chaser => chase(enemy, &mut ctx),
            EnemyKind::Strafer => strafe(enemy, &mut ctx),
            EnemyKind::Artillery => bombard(enemy, &mut ctx),
        }
        enemy.fire_cooldown -= dt;
        enemy.pos = clamp_to_field(enemy.pos, ENEMY_OVERSCAN);
    }
}

fn chase<R: Rng>(enemy: &mut Enemy, ctx: &mut Ctx<'_, R>) {
    let dist = ctx.player.pos.distance(enemy.pos);
    enemy.vel = pursuit_velocity(enemy.pos, ctx.player.pos, enemy.speed);
    enemy.pos += enemy.vel * ctx.dt;

    if dist < enemy.radius + PLAYER_RADIUS {
        take_damage(ctx.player, enemy.damage * ctx.dt * CHASER_BURST);
        ctx.particles.explosion(&mut *ctx.rng, enemy.pos, COLOR_CONTACT, 20);
        enemy.hp = 0.0;
    }
}

fn strafe<R: Rng>(enemy: &mut Enemy, ctx: &mut Ctx<'_, R>) {
    let offset = ctx.player.pos - enemy.pos;
    let dist = offset.length();
    let angle = offset.y.atan2(offset.x);
    let dt = ctx.dt;

    let follow = (enemy.speed * dt / STRAFER_STANDOFF).min(1.0);
    let correction = (dist - STRAFER_STANDOFF).min(STRAFER_MAX_CORRECTION);
    let target = unit_from_angle(angle) * correction;
    enemy.vel += (target - enemy.vel) * follow;

    let orbit = if enemy.elite { STRAFER_ELITE_ORBIT } else { 1.0 };
    enemy.vel += unit_from_angle(angle + FRAC_PI_2) * enemy.speed * STRAFER_ORBIT * dt * orbit;
    enemy.pos += enemy.vel * dt;

    if enemy.fire_cooldown <= 0.0 {
        enemy.fire_cooldown = STRAFER_COOLDOWN;
        let aim = angle + ctx.rng.random_range(-STRAFER_JITTER..STRAFER_JITTER);
        let speed = STRAFER_SHOT_SPEED
            + if enemy.elite {
                STRAFER_ELITE_SHOT_BONUS
            } else {
                0.0
            };
        ctx.shots.push(Projectile {
            pos: enemy.pos,
            vel: unit_from_angle(aim) * speed,
            radius: 6.0,
            damage: enemy.damage,
            life: 3.0,
            crit: false,
            color: if enemy.elite {
                STRAFER_ELITE_SHOT_COLOR
            } else {
                STRAFER_SHOT_COLOR
            },
        });
    }
}

fn bombard<R: Rng>(enemy: &mut Enemy, ctx: &mut Ctx<'_, R>) {
    let offset = ctx.player.pos - enemy.pos;
    let dir = if offset.length() > ARTILLERY_STANDOFF {
        1.0
    } else {
        -1.0
    };
    enemy.vel = offset.normalize_or_zero() * enemy.speed * dir;
    enemy.pos += enemy.vel * ctx.dt;

    if enemy.fire_cooldown <= 0.0 {
        enemy.fire_cooldown = ARTILLERY_COOLDOWN;
        let aim = offset.y.atan2(offset.x);
        ctx.shots.push(Projectile {
            pos: enemy.pos,
            vel: unit_from_angle(aim) * ARTILLERY_SHOT_SPEED,
            radius: 10.0,
            damage: enemy.damage * ARTILLERY_DAMAGE_MULT,
            life: 4.0,
            crit: false,
            color: COLOR_ARTILLERY,
        });
        let burst = if enemy.elite { 32 } else { 20 };
        ctx.particles.ring(&mut *ctx.rng, enemy.pos, COLOR_ARTILLERY, burst);
    }
}

/// Straight-line velocity from `from` toward `target`; zero when they coincide
pub fn pursuit_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - from).normalize_or_zero() * speed
}
