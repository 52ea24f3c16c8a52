//! Per-frame simulation step
//!
//! Advances the world by a host-supplied delta in a fixed order:
//! timers, player, spawner, enemy AI, projectiles, particles, mines, then the
//! terminal and level-up checks.

use serde::{Deserialize, Serialize};

use super::progression::{CATALOG, draw_offer, try_level_up};
use super::snapshot::{FrameSnapshot, GameEvent, RenderSnapshot, UiSummary};
use super::state::{GamePhase, World};
use super::{ai, combat, hazards, player, spawner};
use crate::consts::{DIFFICULTY_PER_SECOND, UPGRADE_OFFER_SIZE};

/// Input intents for a single frame, already debounced by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub dash: bool,
}

/// Advance the world by `dt` seconds.
///
/// `dt` must already be clamped by the caller (see
/// [`crate::consts::MAX_FRAME_DT`]). While the world is paused this only
/// captures a snapshot.
pub fn advance(world: &mut World, dt: f32, input: &InputIntent) -> FrameSnapshot {
    if world.is_paused() {
        return FrameSnapshot {
            render: RenderSnapshot::capture(world),
            ui: None,
            events: Vec::new(),
        };
    }

    world.elapsed += dt;
    world.difficulty = 1.0 + world.elapsed * DIFFICULTY_PER_SECOND;
    world.spawn_timer -= dt;
    world.elite_timer -= dt;

    player::tick_timers(&mut world.player, dt);
    player::decay_combo(&mut world.player, dt);
    player::accrue_passives(&mut world.player, dt);
    player::cool_weapon(&mut world.player, dt);

    {
        let World {
            player: ship,
            player_shots,
            particles,
            rng,
            ..
        } = world;
        player::apply_input(ship, input, dt, player_shots, particles, rng);
        player::integrate(ship, dt);
    }

    spawner::run(world);
    ai::run(world, dt);
    combat::reap_dead(world);
    combat::resolve_player_shots(world, dt);
    combat::reap_dead(world);
    combat::resolve_enemy_shots(world, dt);
    world.particles.update(dt);
    hazards::run(world, dt);

    let mut events = Vec::new();
    if world.player.is_dead() {
        world.phase = GamePhase::GameOver;
        let info = world.game_over_info();
        log::info!(
            "Game over: score {} at level {} after {:.1}s",
            info.score,
            info.level,
            info.elapsed
        );
        events.push(GameEvent::GameOver(info));
    } else if try_level_up(&mut world.player) {
        world.pending_offer = draw_offer(&mut world.rng, CATALOG, UPGRADE_OFFER_SIZE);
        world.phase = GamePhase::LevelUp;
        log::info!(
            "Level {} reached, next at {} xp",
            world.player.level,
            world.player.xp_to_level
        );
        events.push(GameEvent::UpgradeOffered {
            choices: world.offered_upgrades(),
        });
    }

    world.ui_sync_timer += dt;
    let ui = if world.ui_sync_timer >= world.ui_sync_interval {
        // Carry the remainder so the cadence holds at any frame rate
        world.ui_sync_timer =
            (world.ui_sync_timer - world.ui_sync_interval).min(world.ui_sync_interval);
        Some(UiSummary::capture(world))
    } else {
        None
    };

    FrameSnapshot {
        render: RenderSnapshot::capture(world),
        ui,
        events,
    }
}
