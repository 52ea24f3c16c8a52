//! Read-only views handed to the host after each frame

use serde::Serialize;

use super::progression::Upgrade;
use super::state::{Enemy, GamePhase, Mine, Particle, Player, Projectile, World};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    pub difficulty: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub mines: Vec<Mine>,
}

impl RenderSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            phase: world.phase,
            elapsed: world.elapsed,
            difficulty: world.difficulty,
            player: world.player.clone(),
            enemies: world.enemies.clone(),
            player_shots: world.player_shots.clone(),
            enemy_shots: world.enemy_shots.clone(),
            particles: world.particles.particles.clone(),
            mines: world.mines.clone(),
        }
    }
}

/// Low-rate HUD numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiSummary {
    pub score: u64,
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub level: u32,
    pub xp: f32,
    pub xp_to_level: f32,
    pub difficulty: f32,
    pub overheated: bool,
    pub combo: f32,
}

impl UiSummary {
    pub fn capture(world: &World) -> Self {
        let p = &world.player;
        Self {
            score: p.score.max(0.0).floor() as u64,
            hp: p.hp.round(),
            max_hp: p.max_hp.round(),
            shield: p.shield.round(),
            max_shield: p.max_shield.round(),
            level: p.level,
            xp: p.xp,
            xp_to_level: p.xp_to_level,
            difficulty: world.difficulty,
            overheated: p.overheated,
            combo: p.combo,
        }
    }
}

/// Final record of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverInfo {
    pub score: u64,
    /// Seconds survived
    pub elapsed: f32,
    pub level: u32,
}

/// Discrete happenings the host must react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Simulation is frozen until one is chosen or the offer is skipped
    UpgradeOffered { choices: Vec<Upgrade> },
    /// Emitted exactly once per run
    GameOver(GameOverInfo),
}

/// Output of one call to [`super::tick::advance`]
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub render: RenderSnapshot,
    /// Present when the UI summary interval has elapsed
    pub ui: Option<UiSummary>,
    pub events: Vec<GameEvent>,
}

impl World {
    /// HUD numbers on demand, outside the throttled cadence
    pub fn ui_summary(&self) -> UiSummary {
        UiSummary::capture(self)
    }

    pub fn game_over_info(&self) -> GameOverInfo {
        GameOverInfo {
            score: self.player.score.max(0.0).floor() as u64,
            elapsed: self.elapsed,
            level: self.player.level,
        }
    }
}
