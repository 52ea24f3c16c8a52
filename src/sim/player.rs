//! Player controller
//!
//! Movement, firing with weapon heat, dash, shield regeneration and damage
//! intake. Each function touches only what it is handed so the frame clock
//! can borrow world fields independently.

use glam::Vec2;
use rand::Rng;

use super::particles::{COLOR_DASH, ParticleSystem};
use super::state::{Player, Projectile};
use super::tick::InputIntent;
use crate::consts::*;
use crate::{clamp_to_field, heading_or, unit_from_angle};

const PLAYER_SHOT_COLOR: u32 = 0x9ff6ff;

/// Count down per-player timers. Never below zero except the fire
/// cooldown, which keeps its remainder.
pub fn tick_timers(player: &mut Player, dt: f32) {
    player.fire_cooldown -= dt;
    player.dash_timer = (player.dash_timer - dt).max(0.0);
    player.invulnerable_timer = (player.invulnerable_timer - dt).max(0.0);
    player.shield_delay_timer = (player.shield_delay_timer - dt).max(0.0);
    player.combo_timer += dt;
}

/// Combo bleeds back toward 1 after a quiet spell
pub fn decay_combo(player: &mut Player, dt: f32) {
    if player.combo > 1.0 && player.combo_timer > COMBO_IDLE_SECS {
        player.combo = (player.combo - dt * COMBO_DECAY_PER_SEC).max(1.0);
    }
}

/// Credit income and hull repair
pub fn accrue_passives(player: &mut Player, dt: f32) {
    player.score += player.credit_income * dt;
    if player.passive_regen > 0.0 {
        player.hp = (player.hp + player.passive_regen * dt).min(player.max_hp);
    }
}

/// Bleed off weapon heat; overheat clears only once heat is fully gone
pub fn cool_weapon(player: &mut Player, dt: f32) {
    let rate = if player.overheated {
        player.weapon_heat_decay * OVERHEAT_DECAY_MULT
    } else {
        player.weapon_heat_decay
    };
    player.weapon_heat = (player.weapon_heat - rate * dt).max(0.0);
    if player.overheated && player.weapon_heat <= 0.0 {
        player.overheated = false;
    }
}

/// Unit-length steering direction from the directional intents
pub fn steering(input: &InputIntent) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    dir.normalize_or_zero()
}

/// Apply one frame of input: thrust, trigger, dash.
pub fn apply_input(
    player: &mut Player,
    input: &InputIntent,
    dt: f32,
    shots: &mut Vec<Projectile>,
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
) {
    let dir = steering(input);
    if dir != Vec2::ZERO {
        player.vel += dir * player.acceleration * dt;
        player.angle = heading_or(player.vel, player.angle);
    }

    if input.fire {
        fire(player, shots, particles, rng);
    }

    if input.dash {
        dash(player, particles, rng);
    }
}

/// Fire a volley if the weapon allows it. Returns whether a volley left.
pub fn fire(
    player: &mut Player,
    shots: &mut Vec<Projectile>,
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
) -> bool {
    if player.overheated || player.fire_cooldown > 0.0 {
        return false;
    }

    let aim = heading_or(player.vel, player.angle);
    let count = player.multi_shot.max(1);
    let center = (count - 1) as f32 / 2.0;
    for i in 0..count {
        let angle = aim + (i as f32 - center) * player.spread;
        let dir = unit_from_angle(angle);
        shots.push(Projectile {
            pos: player.pos + dir * MUZZLE_OFFSET,
            vel: dir * player.bullet_speed,
            radius: PLAYER_SHOT_RADIUS,
            damage: player.bullet_damage,
            life: PLAYER_SHOT_LIFE,
            crit: rng.random::<f32>() < player.crit_chance,
            color: PLAYER_SHOT_COLOR,
        });
    }

    player.fire_cooldown = 1.0 / player.fire_rate;
    player.weapon_heat = (player.weapon_heat + HEAT_PER_VOLLEY + HEAT_PER_SHOT * count as f32)
        .min(player.weapon_heat_max);
    if player.weapon_heat >= player.weapon_heat_max {
        player.overheated = true;
        log::debug!("Weapon overheated");
    }
    particles.muzzle_flash(rng, player.pos, aim);
    true
}

/// Burst of speed plus a short invulnerability window
pub fn dash(player: &mut Player, particles: &mut ParticleSystem, rng: &mut impl Rng) -> bool {
    if player.dash_timer > 0.0 {
        return false;
    }

    let speed = player.vel.length();
    if speed > DASH_MIN_SPEED {
        player.vel *= player.dash_distance / speed.max(DASH_SPEED_FLOOR);
    } else {
        player.vel += unit_from_angle(player.angle) * player.dash_distance * 2.0;
    }
    player.dash_timer = player.dash_cooldown;
    player.invulnerable_timer = DASH_IFRAMES;
    particles.ring(rng, player.pos, COLOR_DASH, 28);
    true
}

/// Friction, speed cap, integration, field clamp, shield recharge
pub fn integrate(player: &mut Player, dt: f32) {
    player.vel *= (1.0 - player.friction * dt).max(0.0);
    player.vel = player.vel.clamp_length_max(player.max_speed);
    player.pos = clamp_to_field(player.pos + player.vel * dt, -PLAYER_MARGIN);

    if player.shield_delay_timer <= 0.0 && player.shield < player.max_shield {
        player.shield = (player.shield + player.shield_recharge_rate * dt).min(player.max_shield);
    }
}

/// Route incoming damage through invulnerability, then shield, then hull.
/// Returns the hull damage actually taken.
pub fn take_damage(player: &mut Player, damage: f32) -> f32 {
    if player.is_invulnerable() || damage <= 0.0 {
        return 0.0;
    }
    player.shield_delay_timer = player.shield_recharge_delay;

    let absorbed = player.shield.min(damage);
    player.shield = (player.shield - absorbed).max(0.0);
    let remaining = damage - absorbed;

    let before = player.hp;
    player.hp = (player.hp - remaining).max(0.0);
    before - player.hp
}
