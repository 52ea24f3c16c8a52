//! Headless runner
//!
//! Plays a seeded session on autopilot at a fixed 60 Hz step and logs HUD
//! summaries and events. Usage: `nova-skirmish [seed] [seconds] [quality]`.

use glam::Vec2;
use nova_skirmish::consts::{FIELD_HEIGHT, FIELD_WIDTH, MAX_FRAME_DT};
use nova_skirmish::sim::{GameEvent, InputIntent, World, advance};
use nova_skirmish::{QualityPreset, Settings, SimError};

const SIM_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 90.0;
const SETTINGS_PATH: &str = "nova-skirmish.json";

/// Distance at which the autopilot starts backing away
const DANGER_RADIUS: f32 = 180.0;
/// Dash when something gets this close
const PANIC_RADIUS: f32 = 70.0;

/// Pick an input for the current frame: kite the nearest enemy, drift back
/// toward the middle of the field and keep the trigger held.
fn autopilot(world: &World) -> InputIntent {
    let player = &world.player;
    let center = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);

    let nearest = world
        .enemies
        .iter()
        .filter(|e| !e.is_dead())
        .min_by(|a, b| {
            a.pos
                .distance(player.pos)
                .partial_cmp(&b.pos.distance(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut steer = (center - player.pos) / center.length();
    let mut dash = false;
    if let Some(enemy) = nearest {
        let dist = enemy.pos.distance(player.pos);
        if dist < DANGER_RADIUS {
            steer += (player.pos - enemy.pos).normalize_or_zero() * 2.0;
        }
        dash = dist < PANIC_RADIUS;
    }

    InputIntent {
        left: steer.x < -0.1,
        right: steer.x > 0.1,
        up: steer.y < -0.1,
        down: steer.y > 0.1,
        fire: !player.overheated,
        dash,
    }
}

fn run() -> Result<(), SimError> {
    let mut settings = Settings::load(SETTINGS_PATH)?;
    let mut args = std::env::args().skip(1);

    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .or(settings.seed)
        .unwrap_or_else(rand::random);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SECONDS);
    if let Some(arg) = args.next() {
        match QualityPreset::parse(&arg) {
            Some(quality) => settings.quality = quality,
            None => log::warn!(
                "Unknown quality preset {:?}, keeping {}",
                arg,
                settings.quality.as_str()
            ),
        }
    }

    log::info!("Session starting with seed: {}", seed);
    let mut world = World::with_settings(seed, &settings);
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        world.particles.cap()
    );
    let frames = (seconds / SIM_DT).ceil() as u32;

    for _ in 0..frames {
        let input = autopilot(&world);
        let frame = advance(&mut world, SIM_DT.min(MAX_FRAME_DT), &input);

        if let Some(ui) = &frame.ui {
            log::debug!(
                "lvl {} score {} hp {}/{} shield {}/{} combo x{:.2}",
                ui.level,
                ui.score,
                ui.hp,
                ui.max_hp,
                ui.shield,
                ui.max_shield,
                ui.combo
            );
        }

        for event in &frame.events {
            match event {
                GameEvent::UpgradeOffered { choices } => match choices.first() {
                    Some(choice) => world.choose_upgrade(choice.id)?,
                    None => world.skip_upgrade()?,
                },
                GameEvent::GameOver(info) => {
                    println!("{}", serde_json::to_string(info)?);
                    return Ok(());
                }
            }
        }
    }

    let summary = world.ui_summary();
    log::info!(
        "Survived {:.1}s at level {} with score {}",
        world.elapsed,
        summary.level,
        summary.score
    );
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    if let Err(err) = run() {
        log::error!("Session failed: {}", err);
        std::process::exit(1);
    }
}
