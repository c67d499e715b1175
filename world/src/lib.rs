#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Vision Curse.

pub mod collision;
mod entities;
pub mod grid;
pub mod maze;
pub mod navigation;
mod progression;

use glam::Vec2;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vision_curse_core::{
    tuning, ArenaBounds, CellCoord, Command, EnemyId, Event, MoveIntent, Outcome, PlayMode,
    Upgrade, UpgradeRejection, WELCOME_BANNER,
};

use crate::{
    entities::{Boss, Enemy, Player},
    grid::Grid,
    navigation::NavigationField,
};

const DEFAULT_LEVEL_SEED: u64 = 0x7a1e_c0de_5eed_0001;
const DEFAULT_ENEMY_COUNT: u32 = 12;

/// Represents the authoritative Vision Curse world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    seed: u64,
    grid: Grid,
    arena: ArenaBounds,
    exit_field: NavigationField,
    mode: PlayMode,
    outcome: Option<Outcome>,
    player: Player,
    enemies: Vec<Enemy>,
    boss: Option<Boss>,
    tick_index: u64,
}

impl World {
    /// Creates a world holding a freshly generated default level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(
            tuning::DEFAULT_COLUMNS,
            tuning::DEFAULT_ROWS,
            DEFAULT_LEVEL_SEED,
            DEFAULT_ENEMY_COUNT,
        )
    }

    /// Creates a world whose only generated level is the requested one.
    #[must_use]
    pub fn with_level(columns: u32, rows: u32, seed: u64, enemy_count: u32) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            seed: DEFAULT_LEVEL_SEED,
            grid: Grid::new(0, 0, tuning::CELL_SIZE, tuning::WALL_THICKNESS),
            arena: ArenaBounds::new(
                tuning::ARENA_WIDTH,
                tuning::ARENA_HEIGHT,
                tuning::ARENA_WALL_THICKNESS,
            ),
            exit_field: NavigationField::default(),
            mode: PlayMode::Maze,
            outcome: None,
            player: Player::spawn(cell_center(maze::entrance())),
            enemies: Vec::new(),
            boss: None,
            tick_index: 0,
        };
        let _ = world.configure(columns, rows, seed, enemy_count);
        world
    }

    fn configure(&mut self, columns: u32, rows: u32, seed: u64, enemy_count: u32) -> Event {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(columns, rows, tuning::CELL_SIZE, tuning::WALL_THICKNESS);
        let report = maze::generate(&mut grid, &mut rng);

        self.exit_field = NavigationField::toward(&grid.view(), maze::exit(columns, rows));
        self.enemies = spawn_enemies(&grid, &mut rng, enemy_count);
        self.grid = grid;
        self.seed = seed;
        self.mode = PlayMode::Maze;
        self.outcome = None;
        self.player = Player::spawn(cell_center(maze::entrance()));
        self.boss = None;
        self.tick_index = 0;

        let enemies = u32::try_from(self.enemies.len()).unwrap_or(u32::MAX);
        tracing::info!(columns, rows, seed, enemies, "level configured");
        Event::LevelConfigured {
            columns,
            rows,
            carved_passages: report.carved,
            enemies,
        }
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy && candidate.is_alive())
    }

    fn advance_time(&mut self, dt: std::time::Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        self.player.shotgun.advance(dt);
        for enemy in &mut self.enemies {
            enemy.strike.advance(dt);
        }
        if let Some(boss) = self.boss.as_mut() {
            boss.strike.advance(dt);
        }
        out_events.push(Event::TimeAdvanced { dt });

        let fallen: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| !enemy.is_alive())
            .map(|enemy| enemy.id)
            .collect();
        if fallen.is_empty() {
            return;
        }
        self.enemies.retain(Enemy::is_alive);
        for enemy in fallen {
            out_events.push(Event::EnemyRemoved { enemy });
        }
    }

    fn move_player(&mut self, intent: MoveIntent, out_events: &mut Vec<Event>) {
        if intent.is_idle() {
            return;
        }

        let body = self.player.body;
        let speed = self.player.loadout().speed;
        let (to, blocked_x, blocked_y) = match self.mode {
            PlayMode::Maze => {
                let resolution = collision::resolve_movement(
                    &self.grid.view(),
                    body,
                    intent.as_vec2(),
                    speed,
                );
                (resolution.position, resolution.blocked_x, resolution.blocked_y)
            }
            PlayMode::BossFight => {
                let candidate = body.origin() + intent.as_vec2() * speed;
                let clamped = self.arena.clamp_body(body.with_origin(candidate)).origin();
                (
                    clamped,
                    (clamped.x - candidate.x).abs() > f32::EPSILON,
                    (clamped.y - candidate.y).abs() > f32::EPSILON,
                )
            }
        };

        self.player.body = body.with_origin(to);
        out_events.push(Event::PlayerMoved {
            from: body.origin(),
            to,
            blocked_x,
            blocked_y,
        });

        if self.mode == PlayMode::Maze && self.player_left_maze() {
            self.enter_boss_fight(out_events);
        }
    }

    fn player_left_maze(&self) -> bool {
        !self.grid.is_empty() && self.player.body.center().y >= self.grid.view().world_size().y
    }

    fn enter_boss_fight(&mut self, out_events: &mut Vec<Event>) {
        self.mode = PlayMode::BossFight;
        for enemy in self.enemies.drain(..) {
            out_events.push(Event::EnemyRemoved { enemy: enemy.id });
        }

        let thickness = self.arena.wall_thickness();
        let middle = self.arena.width() / 2.0;
        let player_center = Vec2::new(
            middle,
            self.arena.height() - thickness - tuning::PLAYER_SIZE * 2.0,
        );
        self.player.body = self.player.body.centered_on(player_center);
        self.boss = Some(Boss::spawn(Vec2::new(
            middle,
            thickness + tuning::BOSS_SIZE,
        )));

        tracing::info!(tick = self.tick_index, "player escaped the maze, boss fight begins");
        out_events.push(Event::PlayModeChanged {
            mode: PlayMode::BossFight,
        });
    }

    fn fire_shotgun(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.shotgun.is_ready() {
            out_events.push(Event::ShotgunNotReady {
                ready_in: self.player.shotgun.remaining(),
            });
            return;
        }

        self.player.shotgun.restart(tuning::SHOTGUN_COOLDOWN);
        let loadout = self.player.loadout();
        out_events.push(Event::ShotgunFired {
            origin: self.player.body.center(),
            aim: self.player.facing,
            pellets: loadout.pellets,
            spread_degrees: tuning::SHOTGUN_SPREAD_DEGREES,
            range: tuning::SHOTGUN_RANGE,
            damage: loadout.pellet_damage,
        });
    }

    fn move_enemy(&mut self, enemy: EnemyId, heading: Vec2, out_events: &mut Vec<Event>) {
        if self.mode != PlayMode::Maze {
            return;
        }
        let heading = heading.normalize_or_zero();
        if heading == Vec2::ZERO {
            return;
        }

        let view = self.grid.view();
        let Some(enemy) = self
            .enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy && candidate.is_alive())
        else {
            return;
        };
        if !enemy.alerted {
            enemy.alerted = true;
            out_events.push(Event::EnemyAlerted { enemy: enemy.id });
        }

        let resolution =
            collision::resolve_movement(&view, enemy.body, heading, tuning::ENEMY_SPEED);
        enemy.body = enemy.body.with_origin(resolution.position);
    }

    fn move_boss(&mut self, heading: Vec2) {
        let heading = heading.normalize_or_zero();
        let arena = self.arena;
        if let Some(boss) = self.boss.as_mut().filter(|boss| boss.is_alive()) {
            let candidate = boss.body.origin() + heading * tuning::BOSS_SPEED;
            boss.body = arena.clamp_body(boss.body.with_origin(candidate));
        }
    }

    fn enemy_strike(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let player_body = self.player.body;
        let Some(enemy) = self.enemy_mut(enemy) else {
            return;
        };
        if !enemy.strike.is_ready() || !enemy.body.intersects(&player_body) {
            return;
        }
        enemy.strike.restart(tuning::ENEMY_ATTACK_COOLDOWN);
        self.damage_player(tuning::ENEMY_MELEE_DAMAGE, out_events);
    }

    fn boss_strike(&mut self, out_events: &mut Vec<Event>) {
        let player_body = self.player.body;
        let Some(boss) = self.boss.as_mut().filter(|boss| boss.is_alive()) else {
            return;
        };
        if !boss.strike.is_ready() || !boss.body.intersects(&player_body) {
            return;
        }
        boss.strike.restart(tuning::BOSS_ATTACK_COOLDOWN);
        self.damage_player(tuning::BOSS_MELEE_DAMAGE, out_events);
    }

    fn damage_player(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        let remaining = self.player.take_damage(amount);
        out_events.push(Event::PlayerDamaged { amount, remaining });
        if !self.player.is_alive() {
            self.outcome = Some(Outcome::Defeat);
            tracing::info!(tick = self.tick_index, "player died");
            out_events.push(Event::PlayerDied);
        }
    }

    fn damage_enemy(&mut self, enemy: EnemyId, amount: u32, out_events: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }
        let Some(target) = self.enemy_mut(enemy) else {
            return;
        };
        let remaining = target.take_damage(amount);
        if remaining > 0 {
            out_events.push(Event::EnemyDamaged { enemy, remaining });
            return;
        }

        tracing::debug!(enemy = enemy.get(), "enemy killed");
        out_events.push(Event::EnemyKilled { enemy });
        self.award(tuning::SKILL_POINTS_PER_KILL, out_events);
    }

    fn damage_boss(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }
        let Some(boss) = self.boss.as_mut().filter(|boss| boss.is_alive()) else {
            return;
        };
        let remaining = boss.take_damage(amount);
        if remaining > 0 {
            out_events.push(Event::BossDamaged { remaining });
            return;
        }

        self.outcome = Some(Outcome::Victory);
        tracing::info!(tick = self.tick_index, "boss defeated");
        out_events.push(Event::BossDefeated);
        self.award(tuning::SKILL_POINTS_PER_BOSS, out_events);
    }

    fn award(&mut self, awarded: u32, out_events: &mut Vec<Event>) {
        let total = progression::award(&mut self.player, awarded);
        out_events.push(Event::SkillPointsAwarded { awarded, total });
    }

    fn purchase_upgrade(&mut self, upgrade: Upgrade, out_events: &mut Vec<Event>) {
        match progression::purchase(&mut self.player, upgrade) {
            Ok(purchase) => {
                tracing::debug!(?upgrade, level = purchase.level, "upgrade purchased");
                out_events.push(Event::UpgradePurchased {
                    upgrade,
                    level: purchase.level,
                    remaining_points: purchase.remaining_points,
                });
            }
            Err(reason) => out_events.push(Event::UpgradeRejected { upgrade, reason }),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the run has an outcome only level configuration is honoured; upgrade
/// purchases are rejected and every other command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        match command {
            Command::ConfigureLevel { .. } => {}
            Command::PurchaseUpgrade { upgrade } => {
                out_events.push(Event::UpgradeRejected {
                    upgrade,
                    reason: UpgradeRejection::RunFinished,
                });
                return;
            }
            _ => return,
        }
    }

    match command {
        Command::ConfigureLevel {
            columns,
            rows,
            seed,
            enemy_count,
        } => {
            let event = world.configure(columns, rows, seed, enemy_count);
            out_events.push(event);
            out_events.push(Event::PlayModeChanged {
                mode: PlayMode::Maze,
            });
        }
        Command::Tick { dt } => world.advance_time(dt, out_events),
        Command::MovePlayer { intent } => world.move_player(intent, out_events),
        Command::AimPlayer { angle } => {
            if angle.is_finite() {
                world.player.facing = angle;
            }
        }
        Command::FireShotgun => world.fire_shotgun(out_events),
        Command::MoveEnemy { enemy, heading } => world.move_enemy(enemy, heading, out_events),
        Command::MoveBoss { heading } => world.move_boss(heading),
        Command::EnemyStrike { enemy } => world.enemy_strike(enemy, out_events),
        Command::BossStrike => world.boss_strike(out_events),
        Command::DamageEnemy { enemy, amount } => world.damage_enemy(enemy, amount, out_events),
        Command::DamageBoss { amount } => world.damage_boss(amount, out_events),
        Command::PurchaseUpgrade { upgrade } => world.purchase_upgrade(upgrade, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use vision_curse_core::{
        ArenaBounds, BossSnapshot, CellCoord, EnemyView, MazeView, Outcome, PlayMode,
        PlayerSnapshot,
    };

    use super::{grid::Grid, maze, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Seed the current level was generated from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Number of ticks applied since the level was configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Read-only view of the maze used by collision, vision and hit-scan.
    #[must_use]
    pub fn maze_view(world: &World) -> MazeView<'_> {
        world.grid.view()
    }

    /// Bounds of the boss arena.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.arena
    }

    /// Stage of the run currently being played.
    #[must_use]
    pub fn play_mode(world: &World) -> PlayMode {
        world.mode
    }

    /// Final result of the run, once decided.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the enemies inhabiting the maze.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures the boss's state while the boss fight is running.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossSnapshot> {
        world.boss.as_ref().map(|boss| boss.snapshot())
    }

    /// Cell whose southern wall opens onto the arena.
    #[must_use]
    pub fn exit_cell(world: &World) -> CellCoord {
        maze::exit(world.grid.columns(), world.grid.rows())
    }

    /// Cell currently holding the player's centre, if inside the maze.
    #[must_use]
    pub fn player_cell(world: &World) -> Option<CellCoord> {
        world.grid.view().cell_at(world.player.body.center())
    }

    /// Adjacent cell one step closer to the exit along the carved passages.
    #[must_use]
    pub fn next_hop_to_exit(world: &World, from: CellCoord) -> Option<CellCoord> {
        world.exit_field.next_hop(&world.grid.view(), from)
    }

    /// Complete passage route from `from` to the exit, both ends included.
    #[must_use]
    pub fn route_to_exit(world: &World, from: CellCoord) -> Option<Vec<CellCoord>> {
        world.exit_field.route(&world.grid.view(), from)
    }
}

fn cell_center(cell: CellCoord) -> Vec2 {
    Vec2::new(
        (cell.column() as f32 + 0.5) * tuning::CELL_SIZE,
        (cell.row() as f32 + 0.5) * tuning::CELL_SIZE,
    )
}

fn spawn_enemies<R>(grid: &Grid, rng: &mut R, count: u32) -> Vec<Enemy>
where
    R: Rng + ?Sized,
{
    let start = maze::entrance();
    let mut candidates: Vec<CellCoord> = grid
        .view()
        .iter()
        .map(|cell| cell.coord())
        .filter(|cell| cell.manhattan_distance(start) >= tuning::ENEMY_SPAWN_CLEARANCE)
        .collect();
    candidates.shuffle(rng);

    candidates
        .into_iter()
        .take(usize::try_from(count).unwrap_or(usize::MAX))
        .zip(0_u32..)
        .map(|(cell, id)| Enemy::spawn(EnemyId::new(id), cell_center(cell)))
        .collect()
}
