//! Experience, leveling and upgrade offers
//!
//! Upgrades are plain data: an [`UpgradeId`] names the effect and
//! [`apply_upgrade`] interprets it. The catalog is a static table.

use rand::Rng;
use rand::seq::index;
use serde::Serialize;

use super::state::{GamePhase, Player, World};
use crate::consts::{XP_CURVE_GROWTH, XP_CURVE_STEP};
use crate::error::SimError;

/// Every upgrade the run can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeId {
    RapidFire,
    PlasmaRounds,
    TwinBarrel,
    ThrusterOverdrive,
    NaniteArmor,
    FluxShield,
    QuantumCrit,
    OverclockCore,
    GalacticLotto,
    GravityWell,
}

/// Descriptor handed to the host when an offer is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATALOG: &[Upgrade] = &[
    Upgrade {
        id: UpgradeId::RapidFire,
        name: "Rapid Fire Injectors",
        description: "+25% fire rate, -10% weapon heat build-up",
    },
    Upgrade {
        id: UpgradeId::PlasmaRounds,
        name: "Plasma Shredders",
        description: "+30% projectile damage",
    },
    Upgrade {
        id: UpgradeId::TwinBarrel,
        name: "Twin Barrel Array",
        description: "+1 projectile, +10% spread",
    },
    Upgrade {
        id: UpgradeId::ThrusterOverdrive,
        name: "Thruster Overdrive",
        description: "+25% move speed, +20% dash distance",
    },
    Upgrade {
        id: UpgradeId::NaniteArmor,
        name: "Nanite Armor Plating",
        description: "+40 max hull, passive repair over time",
    },
    Upgrade {
        id: UpgradeId::FluxShield,
        name: "Flux Shield Matrix",
        description: "+60 shield, +30% recharge speed",
    },
    Upgrade {
        id: UpgradeId::QuantumCrit,
        name: "Quantum Trigger",
        description: "+15% crit chance, +75% crit damage",
    },
    Upgrade {
        id: UpgradeId::OverclockCore,
        name: "Overclock Reactor",
        description: "+8% global cooldown reduction",
    },
    Upgrade {
        id: UpgradeId::GalacticLotto,
        name: "Galactic Lottery",
        description: "Gain 200 credits, passive income +2/s",
    },
    Upgrade {
        id: UpgradeId::GravityWell,
        name: "Gravity Well Mines",
        description: "Fires gravity mines every 3s that slow enemies",
    },
];

impl UpgradeId {
    /// Catalog entry for this id (catalog is laid out in declaration order)
    pub fn descriptor(self) -> &'static Upgrade {
        &CATALOG[self as usize]
    }
}

/// Mutate player stats for the chosen upgrade
pub fn apply_upgrade(player: &mut Player, id: UpgradeId) {
    match id {
        UpgradeId::RapidFire => {
            player.fire_rate *= 1.25;
            player.weapon_heat_decay *= 1.1;
        }
        UpgradeId::PlasmaRounds => {
            player.bullet_damage *= 1.3;
        }
        UpgradeId::TwinBarrel => {
            player.multi_shot += 1;
            player.spread += 0.1;
        }
        UpgradeId::ThrusterOverdrive => {
            player.max_speed *= 1.25;
            player.dash_distance *= 1.2;
        }
        UpgradeId::NaniteArmor => {
            player.max_hp += 40.0;
            player.hp = (player.hp + 40.0).min(player.max_hp);
            player.passive_regen += 1.0;
        }
        UpgradeId::FluxShield => {
            player.max_shield += 60.0;
            player.shield = (player.shield + 60.0).min(player.max_shield);
            player.shield_recharge_rate *= 1.3;
        }
        UpgradeId::QuantumCrit => {
            player.crit_chance += 0.15;
            player.crit_multiplier += 0.75;
        }
        UpgradeId::OverclockCore => {
            player.fire_rate *= 1.08;
            player.shield_recharge_delay *= 0.92;
            player.dash_cooldown *= 0.92;
        }
        UpgradeId::GalacticLotto => {
            player.score += 200.0;
            player.credit_income += 2.0;
        }
        UpgradeId::GravityWell => {
            player.support.gravity_well = true;
        }
    }
}

/// Draw up to `count` distinct upgrades from `catalog`, in draw order.
/// Smaller catalogs yield smaller offers.
pub fn draw_offer(rng: &mut impl Rng, catalog: &[Upgrade], count: usize) -> Vec<UpgradeId> {
    let amount = count.min(catalog.len());
    index::sample(rng, catalog.len(), amount)
        .into_iter()
        .map(|i| catalog[i].id)
        .collect()
}

/// Threshold for the level after one with `current`
pub fn next_threshold(current: f32) -> f32 {
    (current * XP_CURVE_GROWTH + XP_CURVE_STEP).floor()
}

/// Consume one level's worth of xp if available. Returns whether the player
/// leveled.
pub fn try_level_up(player: &mut Player) -> bool {
    if player.xp < player.xp_to_level {
        return false;
    }
    player.xp -= player.xp_to_level;
    player.xp_to_level = next_threshold(player.xp_to_level);
    player.level += 1;
    true
}

impl World {
    /// Descriptors for the outstanding offer (empty when none)
    pub fn offered_upgrades(&self) -> Vec<Upgrade> {
        self.pending_offer.iter().map(|id| *id.descriptor()).collect()
    }

    /// Apply one of the offered upgrades and resume
    pub fn choose_upgrade(&mut self, id: UpgradeId) -> Result<(), SimError> {
        self.ensure_offer_pending()?;
        if !self.pending_offer.contains(&id) {
            return Err(SimError::UpgradeNotOffered(id));
        }
        apply_upgrade(&mut self.player, id);
        log::info!("Upgrade applied: {}", id.descriptor().name);
        if id == UpgradeId::GravityWell {
            log::info!("Gravity well support system online");
        }
        self.close_offer();
        Ok(())
    }

    /// Decline the offer and resume without any stat change
    pub fn skip_upgrade(&mut self) -> Result<(), SimError> {
        self.ensure_offer_pending()?;
        log::info!("Upgrade offer skipped at level {}", self.player.level);
        self.close_offer();
        Ok(())
    }

    fn ensure_offer_pending(&self) -> Result<(), SimError> {
        match self.phase {
            GamePhase::LevelUp => Ok(()),
            GamePhase::GameOver => Err(SimError::GameOver),
            GamePhase::Running | GamePhase::Paused => Err(SimError::NoOfferPending),
        }
    }

    fn close_offer(&mut self) {
        self.pending_offer.clear();
        self.phase = GamePhase::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
        for upgrade in CATALOG {
            assert_eq!(upgrade.id.descriptor(), upgrade);
        }
        assert_eq!(UpgradeId::FluxShield.descriptor().name, "Flux Shield Matrix");
    }

    #[test]
    fn test_offer_is_distinct() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let offer = draw_offer(&mut rng, CATALOG, 3);
            assert_eq!(offer.len(), 3);
            let unique: HashSet<_> = offer.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_small_catalog_degrades() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(draw_offer(&mut rng, &CATALOG[..2], 3).len(), 2);
        assert!(draw_offer(&mut rng, &[], 3).is_empty());
    }

    #[test]
    fn test_level_curve() {
        let mut player = Player::default();
        player.xp = 130.0;
        assert!(try_level_up(&mut player));
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 10.0);
        assert_eq!(player.xp_to_level, 190.0);
        assert!(!try_level_up(&mut player));

        assert_eq!(next_threshold(190.0), 277.0);
    }

    #[test]
    fn test_upgrades_mutate_stats() {
        let mut player = Player::default();
        apply_upgrade(&mut player, UpgradeId::TwinBarrel);
        assert_eq!(player.multi_shot, 2);
        assert!((player.spread - 0.2).abs() < 1e-6);

        apply_upgrade(&mut player, UpgradeId::NaniteArmor);
        assert_eq!(player.max_hp, 260.0);
        assert_eq!(player.hp, 260.0);
        assert_eq!(player.passive_regen, 1.0);

        player.shield = 10.0;
        apply_upgrade(&mut player, UpgradeId::FluxShield);
        assert_eq!(player.max_shield, 200.0);
        assert_eq!(player.shield, 70.0);

        apply_upgrade(&mut player, UpgradeId::GravityWell);
        assert!(player.support.gravity_well);

        apply_upgrade(&mut player, UpgradeId::GalacticLotto);
        assert_eq!(player.score, 200.0);
        assert_eq!(player.credit_income, 6.0);
    }

    #[test]
    fn test_choose_requires_offer() {
        let mut world = World::new(8);
        assert!(matches!(
            world.choose_upgrade(UpgradeId::PlasmaRounds),
            Err(SimError::NoOfferPending)
        ));
        assert!(matches!(world.skip_upgrade(), Err(SimError::NoOfferPending)));
    }

    #[test]
    fn test_choose_applies_and_resumes() {
        let mut world = World::new(8);
        world.phase = GamePhase::LevelUp;
        world.pending_offer = vec![UpgradeId::PlasmaRounds, UpgradeId::RapidFire];

        let err = world.choose_upgrade(UpgradeId::GravityWell).unwrap_err();
        assert!(matches!(err, SimError::UpgradeNotOffered(UpgradeId::GravityWell)));
        assert_eq!(world.phase, GamePhase::LevelUp);

        world.choose_upgrade(UpgradeId::PlasmaRounds).unwrap();
        assert!((world.player.bullet_damage - 39.0).abs() < 1e-4);
        assert_eq!(world.phase, GamePhase::Running);
        assert!(world.offered_upgrades().is_empty());
    }

    #[test]
    fn test_skip_leaves_stats_alone() {
        let mut world = World::new(8);
        world.phase = GamePhase::LevelUp;
        world.pending_offer = vec![UpgradeId::TwinBarrel];
        let before = world.player.clone();
        world.skip_upgrade().unwrap();
        assert_eq!(world.player, before);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_descriptor_serializes_kebab_id() {
        let json = serde_json::to_string(UpgradeId::RapidFire.descriptor()).unwrap();
        assert!(json.contains(r#""id":"rapid-fire""#));
        assert!(json.contains("Rapid Fire Injectors"));
    }
}
