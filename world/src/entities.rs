//! Player, enemy and boss state owned by the world.

use std::time::Duration;

use glam::Vec2;
use vision_curse_core::{
    tuning, BossSnapshot, EnemyId, EnemySnapshot, Loadout, PlayerSnapshot, Rect, UpgradeLevels,
};

/// Countdown gating a repeatable action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cooldown {
    remaining: Duration,
}

impl Cooldown {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.remaining.is_zero()
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.remaining
    }

    pub(crate) fn restart(&mut self, period: Duration) {
        self.remaining = period;
    }
}

fn square_centered_on(center: Vec2, size: f32) -> Rect {
    Rect::new(0.0, 0.0, size, size).centered_on(center)
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) body: Rect,
    pub(crate) health: u32,
    pub(crate) facing: f32,
    pub(crate) skill_points: u32,
    pub(crate) levels: UpgradeLevels,
    pub(crate) shotgun: Cooldown,
}

impl Player {
    pub(crate) fn spawn(center: Vec2) -> Self {
        Self {
            body: square_centered_on(center, tuning::PLAYER_SIZE),
            health: tuning::PLAYER_HEALTH,
            facing: 0.0,
            skill_points: 0,
            levels: UpgradeLevels::default(),
            shotgun: Cooldown::default(),
        }
    }

    pub(crate) fn loadout(&self) -> Loadout {
        self.levels.loadout()
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtracts damage and returns the health left.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            body: self.body,
            health: self.health,
            facing: self.facing,
            skill_points: self.skill_points,
            levels: self.levels,
            loadout: self.loadout(),
            shotgun_ready_in: self.shotgun.remaining(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) body: Rect,
    pub(crate) health: u32,
    pub(crate) alerted: bool,
    pub(crate) strike: Cooldown,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, center: Vec2) -> Self {
        Self {
            id,
            body: square_centered_on(center, tuning::ENEMY_SIZE),
            health: tuning::ENEMY_HEALTH,
            alerted: false,
            strike: Cooldown::default(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            body: self.body,
            health: self.health,
            alerted: self.alerted,
            strike_ready: self.strike.is_ready(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Boss {
    pub(crate) body: Rect,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) strike: Cooldown,
}

impl Boss {
    pub(crate) fn spawn(center: Vec2) -> Self {
        Self {
            body: square_centered_on(center, tuning::BOSS_SIZE),
            health: tuning::BOSS_HEALTH,
            max_health: tuning::BOSS_HEALTH,
            strike: Cooldown::default(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub(crate) fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            body: self.body,
            health: self.health,
            max_health: self.max_health,
            strike_ready: self.strike.is_ready(),
        }
    }
}
