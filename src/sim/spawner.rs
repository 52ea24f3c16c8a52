//! Timed enemy spawning at the field edges

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, World};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, SPAWN_PADDING};

/// Chance that an elite-eligible spawn actually becomes elite
const ELITE_CHANCE: f64 = 0.6;

/// Base stat profile for a variant
struct Profile {
    hp_mult: f32,
    speed_base: f32,
    speed_per_difficulty: f32,
    damage: f32,
    radius: f32,
    cooldown: (f32, f32),
    elite_hp: f32,
    elite_damage: f32,
    elite_radius: f32,
    elite_cooldown_div: f32,
}

impl EnemyKind {
    /// Variant chosen for a uniform roll in [0, 1): 55/30/15
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.55 {
            EnemyKind::Chaser
        } else if roll < 0.85 {
            EnemyKind::Strafer
        } else {
            EnemyKind::Artillery
        }
    }

    fn profile(self) -> Profile {
        match self {
            EnemyKind::Chaser => Profile {
                hp_mult: 1.0,
                speed_base: 90.0,
                speed_per_difficulty: 12.0,
                damage: 26.0,
                radius: 18.0,
                cooldown: (2.0, 3.0),
                elite_hp: 4.0,
                elite_damage: 1.6,
                elite_radius: 26.0,
                elite_cooldown_div: 1.8,
            },
            EnemyKind::Strafer => Profile {
                hp_mult: 0.85,
                speed_base: 160.0,
                speed_per_difficulty: 20.0,
                damage: 18.0,
                radius: 16.0,
                cooldown: (1.4, 2.0),
                elite_hp: 3.0,
                elite_damage: 1.4,
                elite_radius: 24.0,
                elite_cooldown_div: 1.7,
            },
            EnemyKind::Artillery => Profile {
                hp_mult: 1.6,
                speed_base: 70.0,
                speed_per_difficulty: 8.0,
                damage: 42.0,
                radius: 22.0,
                cooldown: (3.0, 4.5),
                elite_hp: 2.5,
                elite_damage: 1.5,
                elite_radius: 30.0,
                elite_cooldown_div: 1.5,
            },
        }
    }
}

/// Seconds between spawns before jitter
pub fn spawn_interval(difficulty: f32) -> f32 {
    (2.2 / (difficulty + 1.0).sqrt()).max(0.4)
}

/// Seconds until the next elite-eligible spawn
pub fn elite_interval(difficulty: f32) -> f32 {
    (15.0 - difficulty * 0.6).max(7.0)
}

/// Build an enemy of `kind` scaled to `difficulty`. Position is left at the
/// origin for the caller to place.
pub fn create_enemy(
    rng: &mut impl Rng,
    id: u32,
    kind: EnemyKind,
    difficulty: f32,
    elite: bool,
) -> Enemy {
    let p = kind.profile();
    let base_hp = 60.0 + difficulty * 14.0;
    let hp = base_hp * p.hp_mult * if elite { p.elite_hp } else { 1.0 };
    let (lo, hi) = p.cooldown;
    let cooldown = rng.random_range(lo..hi) / if elite { p.elite_cooldown_div } else { 1.0 };

    Enemy {
        id,
        kind,
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        hp,
        max_hp: hp,
        speed: p.speed_base + difficulty * p.speed_per_difficulty,
        damage: p.damage * if elite { p.elite_damage } else { 1.0 },
        radius: if elite { p.elite_radius } else { p.radius },
        fire_cooldown: cooldown,
        elite,
    }
}

/// A point just outside a uniformly chosen field edge
pub fn edge_position(rng: &mut impl Rng) -> Vec2 {
    let pad = SPAWN_PADDING;
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(-pad..FIELD_WIDTH + pad), -pad),
        1 => Vec2::new(FIELD_WIDTH + pad, rng.random_range(-pad..FIELD_HEIGHT + pad)),
        2 => Vec2::new(rng.random_range(-pad..FIELD_WIDTH + pad), FIELD_HEIGHT + pad),
        _ => Vec2::new(-pad, rng.random_range(-pad..FIELD_HEIGHT + pad)),
    }
}

/// Spawn at most one enemy if the spawn timer has run out
pub fn run(world: &mut World) {
    if world.spawn_timer > 0.0 {
        return;
    }
    let difficulty = world.difficulty;
    world.spawn_timer = spawn_interval(difficulty) * world.rng.random_range(0.6f32..1.2);

    let kind = EnemyKind::from_roll(world.rng.random::<f32>());
    let elite_ready = world.elite_timer <= 0.0;
    let elite = elite_ready && world.rng.random_bool(ELITE_CHANCE);

    let id = world.next_entity_id();
    let mut enemy = create_enemy(&mut world.rng, id, kind, difficulty, elite);
    enemy.pos = edge_position(&mut world.rng);
    if elite {
        log::debug!("Elite {:?} #{} spawned at difficulty {:.2}", kind, id, difficulty);
    }
    world.enemies.push(enemy);

    if elite_ready {
        world.elite_timer = elite_interval(difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_variant_weights() {
        assert_eq!(EnemyKind::from_roll(0.0), EnemyKind::Chaser);
        assert_eq!(EnemyKind::from_roll(0.549), EnemyKind::Chaser);
        assert_eq!(EnemyKind::from_roll(0.55), EnemyKind::Strafer);
        assert_eq!(EnemyKind::from_roll(0.849), EnemyKind::Strafer);
        assert_eq!(EnemyKind::from_roll(0.85), EnemyKind::Artillery);
    }

    #[test]
    fn test_intervals_have_floors() {
        assert!((spawn_interval(1.0) - 2.2 / 2.0f32.sqrt()).abs() < 1e-6);
        assert_eq!(spawn_interval(1000.0), 0.4);
        assert!((elite_interval(1.0) - 14.4).abs() < 1e-5);
        assert_eq!(elite_interval(50.0), 7.0);
    }

    #[test]
    fn test_elite_scaling() {
        let mut rng = Pcg32::seed_from_u64(9);
        let normal = create_enemy(&mut rng, 1, EnemyKind::Chaser, 1.0, false);
        let elite = create_enemy(&mut rng, 2, EnemyKind::Chaser, 1.0, true);
        assert_eq!(normal.hp, 74.0);
        assert_eq!(elite.hp, 296.0);
        assert_eq!(elite.max_hp, elite.hp);
        assert!((elite.damage - 26.0 * 1.6).abs() < 1e-4);
        assert_eq!(elite.radius, 26.0);
        assert!(elite.fire_cooldown < 3.0 / 1.8);
        assert_eq!(normal.speed, 102.0);
    }

    #[test]
    fn test_edge_positions_are_outside_field() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let pos = edge_position(&mut rng);
            let outside = pos.x <= -SPAWN_PADDING
                || pos.x >= FIELD_WIDTH + SPAWN_PADDING
                || pos.y <= -SPAWN_PADDING
                || pos.y >= FIELD_HEIGHT + SPAWN_PADDING;
            assert!(outside, "{pos:?} is inside the field");
        }
    }

    #[test]
    fn test_run_respects_timer() {
        let mut world = World::new(5);
        run(&mut world);
        assert_eq!(world.enemies.len(), 1);
        assert!(world.spawn_timer > 0.0);
        assert_eq!(world.enemies[0].vel, Vec2::ZERO);

        run(&mut world);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_elite_timer_resets_when_due() {
        let mut world = World::new(5);
        world.elite_timer = 0.0;
        run(&mut world);
        assert_eq!(world.elite_timer, elite_interval(world.difficulty));
    }

    #[test]
    fn test_elite_gate() {
        let mut world = World::new(42);
        for _ in 0..1000 {
            world.spawn_timer = 0.0;
            world.elite_timer = 5.0;
            run(&mut world);
        }
        assert_eq!(world.enemies.len(), 1000);
        assert!(world.enemies.iter().all(|e| !e.elite));

        world.enemies.clear();
        for _ in 0..1000 {
            world.spawn_timer = 0.0;
            world.elite_timer = 0.0;
            run(&mut world);
        }
        let elites = world.enemies.iter().filter(|e| e.elite).count();
        // 60% elite chance once the timer is due
        assert!((520..=680).contains(&elites), "got {elites} elites");
    }
}
