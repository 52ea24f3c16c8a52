//! Cosmetic particle bursts
//!
//! Particles never feed back into gameplay. They still draw from the world
//! RNG so a seeded run replays identically.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::Particle;
use crate::unit_from_angle;

pub const COLOR_MUZZLE_HOT: u32 = 0xfffd71;
pub const COLOR_MUZZLE: u32 = 0xff9e45;
pub const COLOR_DASH: u32 = 0x8ef9ff;
pub const COLOR_HIT: u32 = 0xffedcf;
pub const COLOR_HIT_CRIT: u32 = 0xf8faff;
pub const COLOR_CONTACT: u32 = 0xff8f7a;
pub const COLOR_DEATH: u32 = 0xffbf71;
pub const COLOR_DEATH_ELITE: u32 = 0xff71f1;
pub const COLOR_ARTILLERY: u32 = 0x71a9ff;
pub const COLOR_MINE: u32 = 0x8df5ff;

/// Live particles plus the budget they must fit in
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    #[serde(skip)]
    cap: usize,
}

impl ParticleSystem {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(1024)),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.cap {
            self.particles.push(particle);
        }
    }

    /// Integrate and expire
    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Random-direction burst
    pub fn explosion(&mut self, rng: &mut impl Rng, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let speed: f32 = rng.random_range(40.0..280.0);
            self.push(Particle {
                pos,
                vel: unit_from_angle(angle) * speed,
                radius: rng.random_range(2.0..6.0),
                color,
                life: rng.random_range(0.4..0.8),
            });
        }
    }

    /// Evenly spaced expanding ring
    pub fn ring(&mut self, rng: &mut impl Rng, pos: Vec2, color: u32, count: usize) {
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let speed: f32 = rng.random_range(120.0..220.0);
            self.push(Particle {
                pos,
                vel: unit_from_angle(angle) * speed,
                radius: rng.random_range(1.5..3.0),
                color,
                life: rng.random_range(0.3..0.5),
            });
        }
    }

    /// Impact sparks, brighter and denser on a critical hit
    pub fn hit(&mut self, rng: &mut impl Rng, pos: Vec2, crit: bool) {
        let (color, count) = if crit {
            (COLOR_HIT_CRIT, 26)
        } else {
            (COLOR_HIT, 16)
        };
        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let speed: f32 = rng.random_range(40.0..260.0);
            self.push(Particle {
                pos,
                vel: unit_from_angle(angle) * speed,
                radius: rng.random_range(1.0..3.0),
                color,
                life: rng.random_range(0.2..0.45),
            });
        }
    }

    /// Cone of sparks ahead of the ship along `angle`
    pub fn muzzle_flash(&mut self, rng: &mut impl Rng, origin: Vec2, angle: f32) {
        let nozzle = origin + unit_from_angle(angle) * 18.0;
        for _ in 0..12 {
            let jitter = (rng.random::<f32>() - 0.5) * PI / 5.0;
            let speed: f32 = rng.random_range(120.0..260.0);
            let color = if rng.random_bool(0.4) {
                COLOR_MUZZLE_HOT
            } else {
                COLOR_MUZZLE
            };
            self.push(Particle {
                pos: nozzle,
                vel: unit_from_angle(angle + jitter) * speed,
                radius: rng.random_range(2.0..4.0),
                color,
                life: rng.random_range(0.2..0.35),
            });
        }
    }
}
