//! Skill-point awards and upgrade purchases.

use vision_curse_core::{Upgrade, UpgradeRejection};

use crate::entities::Player;

/// Health restored alongside every vitality level.
const VITALITY_HEAL: u32 = 25;

/// Credits skill points and returns the new total.
pub(crate) fn award(player: &mut Player, points: u32) -> u32 {
    player.skill_points = player.skill_points.saturating_add(points);
    player.skill_points
}

/// Confirmed purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Purchase {
    pub(crate) level: u8,
    pub(crate) remaining_points: u32,
}

/// Spends skill points on the next level of `upgrade`.
///
/// Nothing changes when the purchase is rejected.
pub(crate) fn purchase(player: &mut Player, upgrade: Upgrade) -> Result<Purchase, UpgradeRejection> {
    let required = player
        .levels
        .next_cost(upgrade)
        .ok_or(UpgradeRejection::MaxLevel)?;
    if player.skill_points < required {
        return Err(UpgradeRejection::InsufficientPoints {
            required,
            available: player.skill_points,
        });
    }

    let level = player
        .levels
        .raise(upgrade)
        .ok_or(UpgradeRejection::MaxLevel)?;
    player.skill_points -= required;

    if upgrade == Upgrade::Vitality {
        let max_health = player.loadout().max_health;
        player.health = player.health.saturating_add(VITALITY_HEAL).min(max_health);
    }

    Ok(Purchase {
        level,
        remaining_points: player.skill_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use vision_curse_core::tuning;

    fn player_with_points(points: u32) -> Player {
        let mut player = Player::spawn(Vec2::new(60.0, 60.0));
        assert_eq!(award(&mut player, points), points);
        player
    }

    #[test]
    fn purchase_spends_level_plus_one() {
        let mut player = player_with_points(6);

        assert_eq!(
            purchase(&mut player, Upgrade::Pellets),
            Ok(Purchase {
                level: 1,
                remaining_points: 5
            })
        );
        assert_eq!(
            purchase(&mut player, Upgrade::Pellets),
            Ok(Purchase {
                level: 2,
                remaining_points: 3
            })
        );
        assert_eq!(
            purchase(&mut player, Upgrade::Pellets),
            Ok(Purchase {
                level: 3,
                remaining_points: 0
            })
        );
        assert_eq!(player.loadout().pellets, tuning::SHOTGUN_PELLETS + 3);
    }

    #[test]
    fn capped_upgrade_is_rejected() {
        let mut player = player_with_points(100);
        for _ in 0..3 {
            assert!(purchase(&mut player, Upgrade::Speed).is_ok());
        }
        assert_eq!(
            purchase(&mut player, Upgrade::Speed),
            Err(UpgradeRejection::MaxLevel)
        );
        assert_eq!(player.skill_points, 94);
    }

    #[test]
    fn unaffordable_upgrade_is_rejected_without_changes() {
        let mut player = player_with_points(1);
        assert!(purchase(&mut player, Upgrade::Damage).is_ok());
        assert_eq!(
            purchase(&mut player, Upgrade::Damage),
            Err(UpgradeRejection::InsufficientPoints {
                required: 2,
                available: 0
            })
        );
        assert_eq!(player.levels.level(Upgrade::Damage), 1);
    }

    #[test]
    fn vitality_heals_up_to_new_maximum() {
        let mut player = player_with_points(1);
        let _ = player.take_damage(10);

        assert!(purchase(&mut player, Upgrade::Vitality).is_ok());
        assert_eq!(player.health, tuning::PLAYER_HEALTH + 15);
        assert_eq!(player.loadout().max_health, tuning::PLAYER_HEALTH + 25);
    }
}
