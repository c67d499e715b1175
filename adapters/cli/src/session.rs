use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use vision_curse_core::{Command, Event, Outcome, PlayMode, Upgrade};
use vision_curse_rendering::{
    arena_walls, visible_maze_walls, Aura, BossPresentation, Camera, EnemyPresentation,
    FrameInput, Hud, Scene,
};
use vision_curse_system_pursuit::Pursuit;
use vision_curse_system_vision::{cast_fan, is_lit, FieldOfView, Surroundings};
use vision_curse_system_weapon::Shotgun;
use vision_curse_world::{self as world, query, World};

use crate::{autopilot::Autopilot, config::SessionConfig};

/// Running totals reported once the session ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Summary {
    pub(crate) ticks: u64,
    pub(crate) shots: u32,
    pub(crate) kills: u32,
    pub(crate) damage_taken: u32,
    pub(crate) upgrades: Vec<(Upgrade, u8)>,
    pub(crate) reached_arena: bool,
    pub(crate) outcome: Option<Outcome>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            Some(Outcome::Victory) => "victory",
            Some(Outcome::Defeat) => "defeat",
            None => "unfinished",
        };
        writeln!(f, "outcome: {outcome}")?;
        writeln!(f, "ticks: {}", self.ticks)?;
        writeln!(f, "reached arena: {}", self.reached_arena)?;
        writeln!(f, "shots fired: {}", self.shots)?;
        writeln!(f, "enemies killed: {}", self.kills)?;
        writeln!(f, "damage taken: {}", self.damage_taken)?;
        write!(f, "upgrades:")?;
        if self.upgrades.is_empty() {
            return write!(f, " none");
        }
        for (upgrade, level) in &self.upgrades {
            write!(f, " {upgrade:?}->{level}")?;
        }
        Ok(())
    }
}

/// World plus the systems reacting to it, stepped once per frame.
pub(crate) struct Session {
    world: World,
    pursuit: Pursuit,
    shotgun: Shotgun,
    autopilot: Autopilot,
    summary: Rc<RefCell<Summary>>,
}

impl Session {
    /// Builds the configured level; totals are written into `summary`.
    pub(crate) fn new(config: &SessionConfig, summary: Rc<RefCell<Summary>>) -> Self {
        let level = &config.level;
        Self {
            world: World::with_level(level.columns, level.rows, level.seed, level.enemies),
            pursuit: Pursuit::default(),
            shotgun: Shotgun::new(config.session.pellet_seed),
            autopilot: Autopilot,
            summary,
        }
    }

    /// Scene describing the level before the first frame.
    pub(crate) fn initial_scene(&self, camera: Camera) -> Scene {
        let mut scene = Scene::new(camera, query::maze_view(&self.world).world_size());
        self.refresh(&mut scene);
        scene
    }

    /// Advances one frame; idle input hands control to the autopilot.
    pub(crate) fn step(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        let input = if input.is_idle() {
            self.autopilot.decide(&self.world, &scene.vision)
        } else {
            input
        };

        let mut commands = vec![Command::Tick { dt }];
        if !input.movement.is_idle() {
            commands.push(Command::MovePlayer {
                intent: input.movement,
            });
        }
        if let Some(angle) = input.aim {
            commands.push(Command::AimPlayer { angle });
        }
        if input.fire {
            commands.push(Command::FireShotgun);
        }
        if let Some(upgrade) = input.purchase {
            commands.push(Command::PurchaseUpgrade { upgrade });
        }

        self.pump(commands);
        self.refresh(scene);
    }

    fn pump(&mut self, commands: Vec<Command>) {
        let mut pending = commands;
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.record(&events);

            let play_mode = query::play_mode(&self.world);
            let player = query::player(&self.world);
            let enemies = query::enemy_view(&self.world);
            let boss = query::boss(&self.world);
            let surroundings = Surroundings::for_mode(
                play_mode,
                query::maze_view(&self.world),
                query::arena(&self.world),
            );

            self.pursuit
                .handle(&events, play_mode, &player, &enemies, boss.as_ref(), &mut pending);
            self.shotgun
                .handle(&events, &surroundings, &enemies, boss.as_ref(), &mut pending);
        }
    }

    fn record(&self, events: &[Event]) {
        let mut summary = self.summary.borrow_mut();
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => summary.ticks += 1,
                Event::ShotgunFired { .. } => summary.shots += 1,
                Event::EnemyKilled { .. } => summary.kills += 1,
                Event::PlayerDamaged { amount, remaining } => {
                    summary.damage_taken += amount;
                    tracing::debug!(amount, remaining, "player hit");
                }
                Event::UpgradePurchased {
                    upgrade,
                    level,
                    remaining_points,
                } => {
                    summary.upgrades.push((*upgrade, *level));
                    tracing::info!(?upgrade, level, remaining_points, "upgrade purchased");
                }
                Event::PlayModeChanged {
                    mode: PlayMode::BossFight,
                } => summary.reached_arena = true,
                Event::BossDefeated => summary.outcome = Some(Outcome::Victory),
                Event::PlayerDied => summary.outcome = Some(Outcome::Defeat),
                _ => {}
            }
        }
    }

    fn refresh(&self, scene: &mut Scene) {
        let world = &self.world;
        let play_mode = query::play_mode(world);
        let maze = query::maze_view(world);
        let arena = query::arena(world);
        let player = query::player(world);
        let center = player.body.center();

        scene.play_mode = play_mode;
        scene.world_size = match play_mode {
            PlayMode::Maze => maze.world_size(),
            PlayMode::BossFight => arena.size(),
        };
        scene.camera.follow(center, scene.world_size);
        scene.walls = match play_mode {
            PlayMode::Maze => visible_maze_walls(&maze, scene.camera.bounds()),
            PlayMode::BossFight => arena_walls(&arena).to_vec(),
        };

        let surroundings = Surroundings::for_mode(play_mode, maze, arena);
        scene.vision = cast_fan(
            &surroundings,
            center,
            player.facing,
            FieldOfView::flashlight(player.loadout.flashlight_range),
        );
        scene.aura = Aura::around(center);
        scene.pellets = self
            .shotgun
            .traces()
            .iter()
            .map(|trace| trace.segment)
            .collect();
        scene.player = player.body;
        scene.enemies = query::enemy_view(world)
            .iter()
            .map(|enemy| EnemyPresentation {
                body: enemy.body,
                lit: is_lit(&scene.vision, center, enemy.body.center()),
            })
            .collect();
        scene.boss = query::boss(world).map(|boss| BossPresentation {
            body: boss.body,
            health_fraction: boss.health_fraction(),
        });
        scene.hud = Hud {
            health: player.health,
            max_health: player.loadout.max_health,
            skill_points: player.skill_points,
            levels: player.levels,
            tick: query::tick_index(world),
        };
        scene.outcome = query::outcome(world);
    }
}
