//! Nova Skirmish - top-down arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Seeded simulation (entities, AI, combat, progression, frame clock)
//! - `settings`: Runtime presentation settings (particle budget, UI rate)
//! - `error`: Errors raised at the host boundary

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Largest frame delta the host should ever pass in
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player is kept this far inside the field edges
    pub const PLAYER_MARGIN: f32 = 40.0;
    /// Collision radius of the player ship
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Enemies may drift this far outside the visible field
    pub const ENEMY_OVERSCAN: f32 = 60.0;
    /// Enemies appear this far beyond an edge
    pub const SPAWN_PADDING: f32 = 30.0;

    /// Player projectiles expire this far outside the field
    pub const PLAYER_SHOT_MARGIN: f32 = 20.0;
    /// Enemy projectiles expire this far outside the field
    pub const ENEMY_SHOT_MARGIN: f32 = 40.0;

    /// Player projectile shape
    pub const PLAYER_SHOT_RADIUS: f32 = 6.0;
    pub const PLAYER_SHOT_LIFE: f32 = 1.8;
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Difficulty grows linearly with elapsed seconds
    pub const DIFFICULTY_PER_SECOND: f32 = 0.12;

    /// Combo tuning
    pub const COMBO_MAX: f32 = 4.5;
    pub const COMBO_STEP: f32 = 0.12;
    pub const COMBO_IDLE_SECS: f32 = 3.0;
    pub const COMBO_DECAY_PER_SEC: f32 = 0.5;
    /// Damage bonus per combo point above 1
    pub const COMBO_DAMAGE_BONUS: f32 = 0.2;

    /// Weapon heat recovers faster while overheated
    pub const OVERHEAT_DECAY_MULT: f32 = 1.8;
    pub const HEAT_PER_VOLLEY: f32 = 14.0;
    pub const HEAT_PER_SHOT: f32 = 4.0;

    /// Dash tuning
    pub const DASH_MIN_SPEED: f32 = 20.0;
    pub const DASH_SPEED_FLOOR: f32 = 100.0;
    pub const DASH_IFRAMES: f32 = 0.4;

    /// Experience/score on kill
    pub const ELITE_XP_MULT: f32 = 2.4;
    pub const SCORE_PER_XP: f32 = 3.0;

    /// Level curve: next = floor(current * GROWTH + STEP)
    pub const XP_CURVE_GROWTH: f32 = 1.25;
    pub const XP_CURVE_STEP: f32 = 40.0;
    /// Number of upgrades offered per level-up
    pub const UPGRADE_OFFER_SIZE: usize = 3;

    /// Default UI summary rate (Hz)
    pub const UI_SYNC_HZ: f32 = 15.0;
}

/// Returns the heading of `v`, or `fallback` when `v` has no length.
#[inline]
pub fn heading_or(v: Vec2, fallback: f32) -> f32 {
    if v.length_squared() > 0.0 {
        v.y.atan2(v.x)
    } else {
        fallback
    }
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Whether two circles overlap (strictly)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Whether `pos` is inside the play field grown by `margin` on every side
#[inline]
pub fn in_field(pos: Vec2, margin: f32) -> bool {
    pos.x >= -margin
        && pos.x <= consts::FIELD_WIDTH + margin
        && pos.y >= -margin
        && pos.y <= consts::FIELD_HEIGHT + margin
}

/// Clamp `pos` to the play field grown by `margin` (negative shrinks it)
#[inline]
pub fn clamp_to_field(pos: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(-margin, consts::FIELD_WIDTH + margin),
        pos.y.clamp(-margin, consts::FIELD_HEIGHT + margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_falls_back_on_zero_vector() {
        assert_eq!(heading_or(Vec2::ZERO, 1.25), 1.25);
        assert!((heading_or(Vec2::new(0.0, 3.0), 0.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_field_bounds() {
        assert!(in_field(Vec2::new(-15.0, 10.0), 20.0));
        assert!(!in_field(Vec2::new(-25.0, 10.0), 20.0));

        let inset = clamp_to_field(Vec2::new(0.0, 1000.0), -consts::PLAYER_MARGIN);
        assert_eq!(inset, Vec2::new(40.0, 560.0));
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }
}
