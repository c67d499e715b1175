#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Vision Curse engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable views such as
//! [`MazeView`], and respond exclusively with new command batches.

mod cells;
mod geometry;
pub mod tuning;
mod upgrades;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use cells::{ArenaBounds, Cell, CellCoord, CellWalls, Direction, MazeView};
pub use geometry::{Rect, Segment, VisionPolygon, MIN_VISIBLE_POINTS};
pub use upgrades::{Loadout, Upgrade, UpgradeLevels, UpgradeRejection, MAX_UPGRADE_LEVEL};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "VisionCurse - The Cave";

/// Describes the active stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// The player explores the generated maze.
    Maze,
    /// The player fights the boss inside the walled arena.
    BossFight,
}

/// Final result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The boss was defeated.
    Victory,
    /// The player ran out of health.
    Defeat,
}

/// Per-frame movement intent expressed as two signed unit axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    dx: i8,
    dy: i8,
}

impl MoveIntent {
    /// Intent that keeps the entity in place.
    pub const IDLE: MoveIntent = MoveIntent { dx: 0, dy: 0 };

    /// Creates an intent, collapsing each axis onto `-1`, `0` or `1`.
    #[must_use]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Intent pointing in a single cardinal direction.
    #[must_use]
    pub const fn toward(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(0, -1),
            Direction::East => Self::new(1, 0),
            Direction::South => Self::new(0, 1),
            Direction::West => Self::new(-1, 0),
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i8 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i8 {
        self.dy
    }

    /// Reports whether the intent requests no movement.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Intent expressed as a per-step delta vector.
    #[must_use]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(f32::from(self.dx), f32::from(self.dy))
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Builds a new grid, generates the maze and populates it.
    ConfigureLevel {
        /// Number of maze columns.
        columns: u32,
        /// Number of maze rows.
        rows: u32,
        /// Seed feeding the maze generator and enemy placement.
        seed: u64,
        /// Number of enemies to place inside the maze.
        enemy_count: u32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player one step along the provided intent.
    MovePlayer {
        /// Signed unit axes requested by the adapter.
        intent: MoveIntent,
    },
    /// Points the player's flashlight and shotgun.
    AimPlayer {
        /// Facing angle in radians.
        angle: f32,
    },
    /// Requests a shotgun blast along the current facing.
    FireShotgun,
    /// Moves an enemy one step along a heading.
    MoveEnemy {
        /// Identifier of the enemy to move.
        enemy: EnemyId,
        /// Unit-length direction of travel.
        heading: Vec2,
    },
    /// Moves the boss one step along a heading.
    MoveBoss {
        /// Unit-length direction of travel.
        heading: Vec2,
    },
    /// Requests a melee strike from an enemy against the player.
    EnemyStrike {
        /// Identifier of the striking enemy.
        enemy: EnemyId,
    },
    /// Requests a melee strike from the boss against the player.
    BossStrike,
    /// Applies hit-scan damage to an enemy.
    DamageEnemy {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Damage to subtract from the enemy's health.
        amount: u32,
    },
    /// Applies hit-scan damage to the boss.
    DamageBoss {
        /// Damage to subtract from the boss's health.
        amount: u32,
    },
    /// Spends skill points on an upgrade.
    PurchaseUpgrade {
        /// Upgrade to purchase.
        upgrade: Upgrade,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new level was generated.
    LevelConfigured {
        /// Number of maze columns.
        columns: u32,
        /// Number of maze rows.
        rows: u32,
        /// Number of wall pairs carved by the generator.
        carved_passages: u32,
        /// Number of enemies placed inside the maze.
        enemies: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports the outcome of a player movement step.
    PlayerMoved {
        /// Upper-left corner of the body before the step.
        from: Vec2,
        /// Upper-left corner of the body after the step.
        to: Vec2,
        /// Whether horizontal movement was rejected.
        blocked_x: bool,
        /// Whether vertical movement was rejected.
        blocked_y: bool,
    },
    /// Announces that the run entered a new play mode.
    PlayModeChanged {
        /// Mode that became active.
        mode: PlayMode,
    },
    /// Confirms a shotgun blast that systems must resolve.
    ShotgunFired {
        /// Point the pellets leave from.
        origin: Vec2,
        /// Facing angle in radians.
        aim: f32,
        /// Number of pellets in the blast.
        pellets: u32,
        /// Total angular spread in degrees.
        spread_degrees: f32,
        /// Maximum pellet travel distance.
        range: f32,
        /// Damage dealt by every pellet that connects.
        damage: u32,
    },
    /// Reports that a blast was requested during the cooldown.
    ShotgunNotReady {
        /// Time left until the next blast is allowed.
        ready_in: Duration,
    },
    /// Reports that an enemy started chasing the player.
    EnemyAlerted {
        /// Identifier of the alerted enemy.
        enemy: EnemyId,
    },
    /// Reports damage applied to an enemy that survived it.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Health left after the hit.
        remaining: u32,
    },
    /// Reports that an enemy's health reached zero.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
    },
    /// Reports that a killed enemy was removed from the world.
    EnemyRemoved {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Reports damage applied to the player.
    PlayerDamaged {
        /// Damage taken.
        amount: u32,
        /// Health left after the hit.
        remaining: u32,
    },
    /// Reports that the player's health reached zero.
    PlayerDied,
    /// Reports damage applied to the boss that survived it.
    BossDamaged {
        /// Health left after the hit.
        remaining: u32,
    },
    /// Reports that the boss's health reached zero.
    BossDefeated,
    /// Reports skill points earned by the player.
    SkillPointsAwarded {
        /// Points earned by this award.
        awarded: u32,
        /// Points held after the award.
        total: u32,
    },
    /// Confirms an upgrade purchase.
    UpgradePurchased {
        /// Upgrade that was purchased.
        upgrade: Upgrade,
        /// Level reached by the purchase.
        level: u8,
        /// Skill points left after paying.
        remaining_points: u32,
    },
    /// Reports that an upgrade purchase was rejected.
    UpgradeRejected {
        /// Upgrade requested for purchase.
        upgrade: Upgrade,
        /// Specific reason the purchase failed.
        reason: UpgradeRejection,
    },
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Collision body in world units.
    pub body: Rect,
    /// Current health.
    pub health: u32,
    /// Facing angle in radians.
    pub facing: f32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Purchased upgrade levels.
    pub levels: UpgradeLevels,
    /// Effective statistics derived from the upgrade levels.
    pub loadout: Loadout,
    /// Time left until the shotgun may fire again.
    pub shotgun_ready_in: Duration,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Collision body in world units.
    pub body: Rect,
    /// Current health.
    pub health: u32,
    /// Whether the enemy already noticed the player.
    pub alerted: bool,
    /// Whether the enemy's strike cooldown elapsed.
    pub strike_ready: bool,
}

impl EnemySnapshot {
    /// Reports whether the enemy still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Read-only snapshot describing all enemies within the maze.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the boss's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossSnapshot {
    /// Collision body in world units.
    pub body: Rect,
    /// Current health.
    pub health: u32,
    /// Health the boss started with.
    pub max_health: u32,
    /// Whether the boss's strike cooldown elapsed.
    pub strike_ready: bool,
}

impl BossSnapshot {
    /// Remaining health as a fraction of the starting health.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, EnemyId, MoveIntent, PlayMode, Upgrade, UpgradeRejection};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn enemy_id_round_trips_through_bincode() {
        assert_round_trip(&EnemyId::new(42));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn upgrade_rejection_round_trips_through_bincode() {
        assert_round_trip(&UpgradeRejection::InsufficientPoints {
            required: 3,
            available: 1,
        });
        assert_round_trip(&Upgrade::Flashlight);
        assert_round_trip(&PlayMode::BossFight);
    }

    #[test]
    fn move_intent_collapses_to_unit_axes() {
        let intent = MoveIntent::new(5, -3);
        assert_eq!((intent.dx(), intent.dy()), (1, -1));
        assert!(MoveIntent::IDLE.is_idle());
        assert_eq!(MoveIntent::toward(Direction::West), MoveIntent::new(-1, 0));
    }
}
