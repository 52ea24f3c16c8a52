//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and input-capture concerns:
//! - The host supplies a clamped frame delta and an input intent
//! - Seeded RNG only, owned by the world
//! - Entities are plain data owned by [`World`]

pub mod ai;
pub mod combat;
pub mod hazards;
pub mod particles;
pub mod player;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use particles::ParticleSystem;
pub use progression::{CATALOG, Upgrade, UpgradeId, apply_upgrade, draw_offer};
pub use snapshot::{FrameSnapshot, GameEvent, GameOverInfo, RenderSnapshot, UiSummary};
pub use state::{
    Enemy, EnemyKind, GamePhase, Mine, Particle, Player, Projectile, SupportSystems, World,
};
pub use tick::{InputIntent, advance};
