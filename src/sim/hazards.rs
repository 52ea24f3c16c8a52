//! Gravity-well mines
//!
//! Unlocked through progression. Mines drop at the player's position on a
//! fixed cadence and damp enemy velocity inside their field.

use super::particles::COLOR_MINE;
use super::state::{Mine, World};

pub const MINE_INTERVAL: f32 = 3.0;
pub const MINE_RADIUS: f32 = 14.0;
pub const MINE_LIFE: f32 = 3.5;
pub const MINE_SLOW_RADIUS: f32 = 150.0;
/// Velocity removed at the very center of a field
pub const MINE_MAX_DAMPING: f32 = 0.8;

/// Velocity multiplier for an enemy `dist` away from a mine's center
pub fn damping_factor(dist: f32, slow_radius: f32) -> f32 {
    if dist >= slow_radius || slow_radius <= 0.0 {
        return 1.0;
    }
    let pull = (slow_radius - dist) / slow_radius;
    1.0 - MINE_MAX_DAMPING * pull
}

/// Deploy, age and apply mines for one frame
pub fn run(world: &mut World, dt: f32) {
    if !world.player.support.gravity_well {
        return;
    }

    world.mine_timer += dt;
    if world.mine_timer >= MINE_INTERVAL {
        world.mine_timer = 0.0;
        world.mines.push(Mine {
            pos: world.player.pos,
            radius: MINE_RADIUS,
            slow_radius: MINE_SLOW_RADIUS,
            life: MINE_LIFE,
        });
        log::debug!("Gravity well deployed at {:?}", world.player.pos);
    }

    let World {
        mines,
        enemies,
        particles,
        rng,
        ..
    } = world;

    mines.retain_mut(|mine| {
        mine.life -= dt;
        if mine.life <= 0.0 {
            particles.ring(&mut *rng, mine.pos, COLOR_MINE, 40);
            return false;
        }
        for enemy in enemies.iter_mut() {
            enemy.vel *= damping_factor(enemy.pos.distance(mine.pos), mine.slow_radius);
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::create_enemy;
    use crate::sim::state::EnemyKind;
    use glam::Vec2;

    #[test]
    fn test_damping_profile() {
        assert!((damping_factor(0.0, 150.0) - 0.2).abs() < 1e-6);
        assert!((damping_factor(75.0, 150.0) - 0.6).abs() < 1e-6);
        assert_eq!(damping_factor(150.0, 150.0), 1.0);
        assert_eq!(damping_factor(400.0, 150.0), 1.0);
    }

    #[test]
    fn test_locked_without_upgrade() {
        let mut world = World::new(2);
        for _ in 0..100 {
            run(&mut world, 0.1);
        }
        assert!(world.mines.is_empty());
        assert_eq!(world.mine_timer, 0.0);
    }

    #[test]
    fn test_mines_deploy_slow_and_expire() {
        let mut world = World::new(2);
        world.player.support.gravity_well = true;
        let id = world.next_entity_id();
        let mut enemy = create_enemy(&mut world.rng, id, EnemyKind::Strafer, 1.0, false);
        enemy.pos = world.player.pos + Vec2::new(75.0, 0.0);
        world.enemies.push(enemy);

        // ~30 frames of 0.1s reach the 3s cadence
        for _ in 0..31 {
            run(&mut world, 0.1);
        }
        assert_eq!(world.mines.len(), 1);
        assert_eq!(world.mines[0].pos, world.player.pos);

        world.enemies[0].vel = Vec2::new(100.0, 0.0);
        run(&mut world, 0.1);
        assert!((world.enemies[0].vel.x - 60.0).abs() < 1e-3);

        // Lifetime of 3.5s ends with a cosmetic ring
        for _ in 0..35 {
            run(&mut world, 0.1);
        }
        assert!(world.particles.len() >= 40);
    }
}
