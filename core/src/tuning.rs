//! Gameplay constants shared by the world and its systems.

use std::time::Duration;

/// Side length of the square player body.
pub const PLAYER_SIZE: f32 = 40.0;
/// Corridors are three player widths across.
pub const CELL_SIZE: f32 = PLAYER_SIZE * 3.0;
/// Thickness of every maze wall rectangle.
pub const WALL_THICKNESS: f32 = 3.0;
/// Default number of maze columns.
pub const DEFAULT_COLUMNS: u32 = 40;
/// Default number of maze rows.
pub const DEFAULT_ROWS: u32 = 30;

/// Distance the player covers per movement step before upgrades.
pub const PLAYER_SPEED: f32 = 6.0;
/// Player health before upgrades.
pub const PLAYER_HEALTH: u32 = 100;

/// Flashlight cone aperture in degrees.
pub const FOV_DEGREES: f32 = 60.0;
/// Number of angular intervals in the flashlight fan.
pub const RAY_COUNT: u32 = 60;
/// Flashlight reach before upgrades.
pub const RAY_LENGTH: f32 = 300.0;
/// Radius of the ambient light circle around the player.
pub const AURA_RADIUS: f32 = 50.0;

/// Side length of a square enemy body.
pub const ENEMY_SIZE: f32 = 30.0;
/// Distance an enemy covers per movement step.
pub const ENEMY_SPEED: f32 = 3.0;
/// Hit points of a freshly spawned enemy.
pub const ENEMY_HEALTH: u32 = 3;
/// Centre-to-centre distance at which enemies notice the player.
pub const ENEMY_DETECTION_RANGE: f32 = 400.0;
/// Damage dealt by a single enemy strike.
pub const ENEMY_MELEE_DAMAGE: u32 = 10;
/// Minimum time between two strikes of the same enemy.
pub const ENEMY_ATTACK_COOLDOWN: Duration = Duration::from_millis(1_000);
/// Enemies never spawn closer than this many cells to the entrance.
pub const ENEMY_SPAWN_CLEARANCE: u32 = 3;

/// Side length of the square boss body.
pub const BOSS_SIZE: f32 = 120.0;
/// Distance the boss covers per movement step.
pub const BOSS_SPEED: f32 = 2.5;
/// Hit points of the boss.
pub const BOSS_HEALTH: u32 = 40;
/// Damage dealt by a single boss strike.
pub const BOSS_MELEE_DAMAGE: u32 = 20;
/// Minimum time between two boss strikes.
pub const BOSS_ATTACK_COOLDOWN: Duration = Duration::from_millis(1_500);

/// Outer width of the boss arena.
pub const ARENA_WIDTH: f32 = 1_200.0;
/// Outer height of the boss arena.
pub const ARENA_HEIGHT: f32 = 900.0;
/// Thickness of the arena walls.
pub const ARENA_WALL_THICKNESS: f32 = 20.0;

/// Pellets per shotgun blast before upgrades.
pub const SHOTGUN_PELLETS: u32 = 6;
/// Total angular spread of a blast in degrees.
pub const SHOTGUN_SPREAD_DEGREES: f32 = 20.0;
/// Maximum pellet travel distance.
pub const SHOTGUN_RANGE: f32 = 350.0;
/// Damage dealt by a single pellet before upgrades.
pub const SHOTGUN_DAMAGE: u32 = 1;
/// Minimum time between two blasts.
pub const SHOTGUN_COOLDOWN: Duration = Duration::from_millis(800);

/// Skill points awarded for an enemy kill.
pub const SKILL_POINTS_PER_KILL: u32 = 1;
/// Skill points awarded for defeating the boss.
pub const SKILL_POINTS_PER_BOSS: u32 = 5;

/// Simulated duration of one frame at the intended 60 Hz cadence.
pub const FRAME_DURATION: Duration = Duration::from_micros(16_667);
