//! Skill-point upgrade catalogue and the loadout it produces.

use serde::{Deserialize, Serialize};

use crate::tuning;

/// Highest level any upgrade can reach.
pub const MAX_UPGRADE_LEVEL: u8 = 3;

/// Player upgrades purchasable with skill points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    /// One extra pellet per shotgun blast.
    Pellets,
    /// One extra damage per pellet.
    Damage,
    /// One extra unit of movement per step.
    Speed,
    /// Fifty extra units of flashlight reach.
    Flashlight,
    /// Twenty-five extra points of maximum health.
    Vitality,
}

impl Upgrade {
    /// Every upgrade in catalogue order.
    pub const ALL: [Upgrade; 5] = [
        Upgrade::Pellets,
        Upgrade::Damage,
        Upgrade::Speed,
        Upgrade::Flashlight,
        Upgrade::Vitality,
    ];
}

/// Reasons an upgrade purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeRejection {
    /// The upgrade already reached [`MAX_UPGRADE_LEVEL`].
    MaxLevel,
    /// The player cannot afford the next level.
    InsufficientPoints {
        /// Skill points the next level costs.
        required: u32,
        /// Skill points the player holds.
        available: u32,
    },
    /// The run already ended.
    RunFinished,
}

/// Purchased level of every upgrade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pellets: u8,
    damage: u8,
    speed: u8,
    flashlight: u8,
    vitality: u8,
}

impl UpgradeLevels {
    /// Current level of the provided upgrade.
    #[must_use]
    pub const fn level(&self, upgrade: Upgrade) -> u8 {
        match upgrade {
            Upgrade::Pellets => self.pellets,
            Upgrade::Damage => self.damage,
            Upgrade::Speed => self.speed,
            Upgrade::Flashlight => self.flashlight,
            Upgrade::Vitality => self.vitality,
        }
    }

    /// Skill points the next level costs, or `None` at the level cap.
    #[must_use]
    pub fn next_cost(&self, upgrade: Upgrade) -> Option<u32> {
        let level = self.level(upgrade);
        (level < MAX_UPGRADE_LEVEL).then(|| u32::from(level) + 1)
    }

    /// Raises the upgrade by one level, returning the new level.
    ///
    /// Returns `None` and leaves the levels untouched at the cap.
    pub fn raise(&mut self, upgrade: Upgrade) -> Option<u8> {
        let slot = match upgrade {
            Upgrade::Pellets => &mut self.pellets,
            Upgrade::Damage => &mut self.damage,
            Upgrade::Speed => &mut self.speed,
            Upgrade::Flashlight => &mut self.flashlight,
            Upgrade::Vitality => &mut self.vitality,
        };
        if *slot >= MAX_UPGRADE_LEVEL {
            return None;
        }
        *slot += 1;
        Some(*slot)
    }

    /// Effective player statistics at these levels.
    #[must_use]
    pub fn loadout(&self) -> Loadout {
        Loadout {
            pellets: tuning::SHOTGUN_PELLETS + u32::from(self.pellets),
            pellet_damage: tuning::SHOTGUN_DAMAGE + u32::from(self.damage),
            speed: tuning::PLAYER_SPEED + f32::from(self.speed),
            flashlight_range: tuning::RAY_LENGTH + 50.0 * f32::from(self.flashlight),
            max_health: tuning::PLAYER_HEALTH + 25 * u32::from(self.vitality),
        }
    }
}

/// Effective player statistics derived from upgrade levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Loadout {
    /// Pellets per shotgun blast.
    pub pellets: u32,
    /// Damage dealt by each pellet.
    pub pellet_damage: u32,
    /// Distance covered per movement step.
    pub speed: f32,
    /// Flashlight reach.
    pub flashlight_range: f32,
    /// Maximum player health.
    pub max_health: u32,
}

impl Default for Loadout {
    fn default() -> Self {
        UpgradeLevels::default().loadout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_grow_with_level_until_cap() {
        let mut levels = UpgradeLevels::default();
        assert_eq!(levels.next_cost(Upgrade::Pellets), Some(1));
        assert_eq!(levels.raise(Upgrade::Pellets), Some(1));
        assert_eq!(levels.next_cost(Upgrade::Pellets), Some(2));
        assert_eq!(levels.raise(Upgrade::Pellets), Some(2));
        assert_eq!(levels.raise(Upgrade::Pellets), Some(3));
        assert_eq!(levels.next_cost(Upgrade::Pellets), None);
        assert_eq!(levels.raise(Upgrade::Pellets), None);
        assert_eq!(levels.level(Upgrade::Pellets), MAX_UPGRADE_LEVEL);
        assert_eq!(levels.level(Upgrade::Damage), 0);
    }

    #[test]
    fn loadout_reflects_levels() {
        let mut levels = UpgradeLevels::default();
        let _ = levels.raise(Upgrade::Flashlight);
        let _ = levels.raise(Upgrade::Vitality);
        let _ = levels.raise(Upgrade::Vitality);

        let loadout = levels.loadout();
        assert_eq!(loadout.pellets, tuning::SHOTGUN_PELLETS);
        assert!((loadout.flashlight_range - (tuning::RAY_LENGTH + 50.0)).abs() < f32::EPSILON);
        assert_eq!(loadout.max_health, tuning::PLAYER_HEALTH + 50);
    }
}
