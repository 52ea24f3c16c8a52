//! World state and entity definitions
//!
//! Entities are passive data. Behavior lives in the sibling modules and is
//! sequenced by [`super::tick::advance`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::particles::ParticleSystem;
use super::progression::UpgradeId;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen by the host (menu, lost focus)
    Paused,
    /// Frozen until an upgrade offer is resolved
    LevelUp,
    /// Player destroyed; terminal
    GameOver,
}

impl GamePhase {
    /// Whether the frame step is frozen in this phase
    pub fn is_paused(self) -> bool {
        self != GamePhase::Running
    }
}

/// Unlockable support systems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SupportSystems {
    pub gravity_well: bool,
}

/// The player ship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians), follows velocity while moving
    pub angle: f32,

    // Movement
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,

    // Offense
    pub fire_cooldown: f32,
    pub fire_rate: f32,
    pub spread: f32,
    pub multi_shot: u32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,

    // Weapon heat
    pub weapon_heat: f32,
    pub weapon_heat_max: f32,
    pub weapon_heat_decay: f32,
    pub overheated: bool,

    // Defense
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub shield_recharge_rate: f32,
    /// Seconds left before the shield starts recharging
    pub shield_delay_timer: f32,
    /// Delay applied after every damage intake
    pub shield_recharge_delay: f32,
    /// Hull repaired per second
    pub passive_regen: f32,

    // Dash
    pub dash_cooldown: f32,
    pub dash_timer: f32,
    pub dash_distance: f32,
    pub invulnerable_timer: f32,

    // Progression
    pub level: u32,
    pub xp: f32,
    pub xp_to_level: f32,
    pub score: f32,
    pub credit_income: f32,
    pub combo: f32,
    /// Seconds since the last kill
    pub combo_timer: f32,

    pub support: SupportSystems,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            angle: -std::f32::consts::FRAC_PI_2,
            max_speed: 240.0,
            acceleration: 420.0,
            friction: 0.9,
            fire_cooldown: 0.0,
            fire_rate: 3.0,
            spread: 0.1,
            multi_shot: 1,
            bullet_speed: 520.0,
            bullet_damage: 30.0,
            crit_chance: 0.08,
            crit_multiplier: 1.5,
            weapon_heat: 0.0,
            weapon_heat_max: 120.0,
            weapon_heat_decay: 14.0,
            overheated: false,
            hp: 220.0,
            max_hp: 220.0,
            shield: 140.0,
            max_shield: 140.0,
            shield_recharge_rate: 32.0,
            shield_delay_timer: 0.0,
            shield_recharge_delay: 3.0,
            passive_regen: 0.0,
            dash_cooldown: 4.0,
            dash_timer: 0.0,
            dash_distance: 160.0,
            invulnerable_timer: 0.0,
            level: 1,
            xp: 0.0,
            xp_to_level: 120.0,
            score: 0.0,
            credit_income: 4.0,
            combo: 1.0,
            combo_timer: 0.0,
            support: SupportSystems::default(),
        }
    }
}

impl Player {
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Enemy behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    /// Rams the player and detonates on contact
    Chaser,
    /// Circles at a standoff distance, firing quick shots
    Strafer,
    /// Holds long range, lobbing slow heavy shells
    Artillery,
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    /// Contact damage per second (chaser) or base shot damage
    pub damage: f32,
    pub radius: f32,
    pub fire_cooldown: f32,
    pub elite: bool,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// A projectile; owner is implied by the list it lives in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Seconds left before expiry
    pub life: f32,
    /// Critical roll, decided when fired (player shots only)
    pub crit: bool,
    /// 0xRRGGBB
    pub color: u32,
}

/// A cosmetic particle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub life: f32,
}

/// A gravity-well mine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mine {
    pub pos: Vec2,
    pub radius: f32,
    /// Enemies inside this radius are slowed
    pub slow_radius: f32,
    pub life: f32,
}

/// The complete simulation world
///
/// Exclusively owns every entity. A host drives it through
/// [`super::tick::advance`] and resolves offers with
/// [`World::choose_upgrade`] / [`World::skip_upgrade`].
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub particles: ParticleSystem,
    pub mines: Vec<Mine>,
    /// Seconds of unpaused play
    pub elapsed: f32,
    pub difficulty: f32,
    pub spawn_timer: f32,
    pub elite_timer: f32,
    /// Seconds since the last mine was deployed
    pub mine_timer: f32,
    pub phase: GamePhase,
    /// Upgrades on offer while in [`GamePhase::LevelUp`]
    pub pending_offer: Vec<UpgradeId>,
    pub(crate) rng: Pcg32,
    pub(crate) ui_sync_timer: f32,
    pub(crate) ui_sync_interval: f32,
    next_id: u32,
}

impl World {
    /// Create a fresh run with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    /// Create a fresh run honoring the given settings
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            player: Player::default(),
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            particles: ParticleSystem::new(settings.max_particles()),
            mines: Vec::new(),
            elapsed: 0.0,
            difficulty: 1.0,
            spawn_timer: 0.0,
            elite_timer: 12.0,
            mine_timer: 0.0,
            phase: GamePhase::Running,
            pending_offer: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ui_sync_timer: 0.0,
            ui_sync_interval: settings.ui_sync_interval(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    /// Freeze the run (host pause). No-op unless running.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Lift a host pause
    pub fn resume(&mut self) -> Result<(), crate::SimError> {
        match self.phase {
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                Ok(())
            }
            GamePhase::GameOver => Err(crate::SimError::GameOver),
            GamePhase::Running | GamePhase::LevelUp => Err(crate::SimError::NotPaused),
        }
    }
}
