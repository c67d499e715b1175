use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use vision_curse_core::{tuning, Command, Event, MoveIntent};
use vision_curse_system_pursuit::Pursuit;
use vision_curse_system_vision::Surroundings;
use vision_curse_system_weapon::Shotgun;
use vision_curse_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(0x00c0_ffee);
    let second = replay(0x00c0_ffee);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn enemies_close_in_on_an_idle_player() {
    let mut world = World::new();
    let pursuit = Pursuit::default();
    let mut shotgun = Shotgun::new(1);
    let mut log = Vec::new();

    apply_all(
        &mut world,
        &pursuit,
        &mut shotgun,
        vec![Command::ConfigureLevel {
            columns: 4,
            rows: 1,
            seed: 4,
            enemy_count: 1,
        }],
        &mut log,
    );
    let player = query::player(&world).body.center();
    let distance = |world: &World| -> Vec<f32> {
        query::enemy_view(world)
            .iter()
            .map(|enemy| enemy.body.center().distance(player))
            .collect()
    };
    let before = distance(&world);

    for _ in 0..30 {
        apply_all(
            &mut world,
            &pursuit,
            &mut shotgun,
            vec![Command::Tick {
                dt: tuning::FRAME_DURATION,
            }],
            &mut log,
        );
    }

    let after = distance(&world);
    assert_eq!(before.len(), 1);
    assert!(
        (before[0] - after[0] - 30.0 * tuning::ENEMY_SPEED).abs() < 1e-2,
        "enemy did not approach: {before:?} -> {after:?}"
    );
    assert!(log.iter().any(|entry| entry.starts_with("EnemyAlerted")));
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = World::new();
    let pursuit = Pursuit::default();
    let mut shotgun = Shotgun::new(seed);
    let mut log = Vec::new();

    apply_all(
        &mut world,
        &pursuit,
        &mut shotgun,
        vec![Command::ConfigureLevel {
            columns: 6,
            rows: 5,
            seed,
            enemy_count: 6,
        }],
        &mut log,
    );

    for frame in 0..240_u32 {
        let mut commands = vec![Command::Tick {
            dt: tuning::FRAME_DURATION,
        }];
        commands.extend(frame_input(&world, frame));
        apply_all(&mut world, &pursuit, &mut shotgun, commands, &mut log);
        if query::outcome(&world).is_some() {
            break;
        }
    }

    ReplayOutcome {
        player: format!("{:?}", query::player(&world)),
        enemies: query::enemy_view(&world)
            .iter()
            .map(|enemy| format!("{enemy:?}"))
            .collect(),
        events: log,
    }
}

/// Follows the passage route to the exit while aiming at the closest enemy.
fn frame_input(world: &World, frame: u32) -> Vec<Command> {
    let player = query::player(world);
    let center = player.body.center();
    let mut commands = Vec::new();

    if let Some(next) = query::player_cell(world).and_then(|cell| query::next_hop_to_exit(world, cell)) {
        let target = glam::Vec2::new(
            (next.column() as f32 + 0.5) * tuning::CELL_SIZE,
            (next.row() as f32 + 0.5) * tuning::CELL_SIZE,
        );
        let delta = target - center;
        let step = |value: f32| if value.abs() < 3.0 { 0 } else { value.signum() as i8 };
        commands.push(Command::MovePlayer {
            intent: MoveIntent::new(step(delta.x), step(delta.y)),
        });
    }

    let closest = query::enemy_view(world)
        .iter()
        .map(|enemy| enemy.body.center())
        .min_by(|left, right| left.distance(center).total_cmp(&right.distance(center)));
    if let Some(target) = closest {
        let aim = target - center;
        commands.push(Command::AimPlayer {
            angle: aim.y.atan2(aim.x),
        });
    }
    if frame % 10 == 0 {
        commands.push(Command::FireShotgun);
    }
    commands
}

fn apply_all(
    world: &mut World,
    pursuit: &Pursuit,
    shotgun: &mut Shotgun,
    commands: Vec<Command>,
    log: &mut Vec<String>,
) {
    let mut pending = commands;
    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        record_events(&events, log);
        react(world, pursuit, shotgun, &events, &mut pending);
    }
}

fn react(
    world: &World,
    pursuit: &Pursuit,
    shotgun: &mut Shotgun,
    events: &[Event],
    out: &mut Vec<Command>,
) {
    let play_mode = query::play_mode(world);
    let player = query::player(world);
    let enemies = query::enemy_view(world);
    let boss = query::boss(world);
    let surroundings = Surroundings::for_mode(
        play_mode,
        query::maze_view(world),
        query::arena(world),
    );

    pursuit.handle(events, play_mode, &player, &enemies, boss.as_ref(), out);
    shotgun.handle(events, &surroundings, &enemies, boss.as_ref(), out);
}

fn record_events(events: &[Event], log: &mut Vec<String>) {
    log.extend(events.iter().map(|event| format!("{event:?}")));
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    player: String,
    enemies: Vec<String>,
    events: Vec<String>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
