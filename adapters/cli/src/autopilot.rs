use glam::Vec2;
use vision_curse_core::{
    tuning, CellCoord, Direction, MoveIntent, PlayMode, PlayerSnapshot, Upgrade, VisionPolygon,
};
use vision_curse_rendering::FrameInput;
use vision_curse_system_vision::is_lit;
use vision_curse_world::{query, World};

/// Largest sideways offset from a corridor's centre line tolerated before
/// turning into a perpendicular passage.
const ALIGNMENT_TOLERANCE: f32 = 20.0;
/// The autopilot backs away from the boss when closer than this.
const KITING_DISTANCE: f32 = 300.0;

/// Scripted player standing in for keyboard and mouse input.
///
/// In the maze it walks the breadth-first route to the exit one axis at a
/// time, which keeps the body clear of wall corners. In the arena it circles
/// the boss. Either way it aims at the nearest lit target, fires whenever the
/// shotgun is ready and spends points on the cheapest affordable upgrade.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Autopilot;

impl Autopilot {
    /// Chooses this frame's input from the current world and flashlight cone.
    pub(crate) fn decide(&self, world: &World, vision: &VisionPolygon) -> FrameInput {
        let player = query::player(world);
        let center = player.body.center();

        let (movement, target) = match query::play_mode(world) {
            PlayMode::Maze => (route_step(world, center), nearest_lit_enemy(world, vision, center)),
            PlayMode::BossFight => {
                let boss = query::boss(world)
                    .filter(|boss| boss.health > 0)
                    .map(|boss| boss.body.center());
                let movement = boss.map_or(MoveIntent::IDLE, |boss| kite(center, boss));
                (movement, boss)
            }
        };

        let target = target.filter(|target| center.distance(*target) <= tuning::SHOTGUN_RANGE);
        let aim = match target {
            Some(target) => angle_of(target - center),
            None => angle_of(movement.as_vec2()),
        };

        FrameInput {
            movement,
            aim,
            fire: target.is_some() && player.shotgun_ready_in.is_zero(),
            purchase: cheapest_affordable(&player),
        }
    }
}

fn route_step(world: &World, center: Vec2) -> MoveIntent {
    let Some(current) = query::player_cell(world) else {
        return MoveIntent::IDLE;
    };
    let heading = match query::next_hop_to_exit(world, current) {
        Some(next) => current.direction_to(next),
        None if current == query::exit_cell(world) => Some(Direction::South),
        None => None,
    };
    let Some(heading) = heading else {
        return MoveIntent::IDLE;
    };

    let offset = cell_center(current) - center;
    match heading {
        Direction::North | Direction::South if offset.x.abs() > ALIGNMENT_TOLERANCE => {
            MoveIntent::new(axis_step(offset.x), 0)
        }
        Direction::East | Direction::West if offset.y.abs() > ALIGNMENT_TOLERANCE => {
            MoveIntent::new(0, axis_step(offset.y))
        }
        _ => MoveIntent::toward(heading),
    }
}

fn kite(center: Vec2, boss: Vec2) -> MoveIntent {
    let away = (center - boss).normalize_or_zero();
    let around = away.perp();
    let heading = if center.distance(boss) < KITING_DISTANCE {
        around + away
    } else {
        around - away * 0.5
    };
    let step = |value: f32| if value.abs() < 0.3 { 0 } else { axis_step(value) };
    MoveIntent::new(step(heading.x), step(heading.y))
}

fn nearest_lit_enemy(world: &World, vision: &VisionPolygon, center: Vec2) -> Option<Vec2> {
    query::enemy_view(world)
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| enemy.body.center())
        .filter(|enemy| is_lit(vision, center, *enemy))
        .min_by(|left, right| left.distance(center).total_cmp(&right.distance(center)))
}

fn cheapest_affordable(player: &PlayerSnapshot) -> Option<Upgrade> {
    Upgrade::ALL
        .into_iter()
        .filter_map(|upgrade| {
            player
                .levels
                .next_cost(upgrade)
                .map(|cost| (cost, upgrade))
        })
        .filter(|(cost, _)| *cost <= player.skill_points)
        .min_by_key(|(cost, _)| *cost)
        .map(|(_, upgrade)| upgrade)
}

fn cell_center(cell: CellCoord) -> Vec2 {
    Vec2::new(
        (cell.column() as f32 + 0.5) * tuning::CELL_SIZE,
        (cell.row() as f32 + 0.5) * tuning::CELL_SIZE,
    )
}

fn axis_step(value: f32) -> i8 {
    if value < 0.0 {
        -1
    } else {
        1
    }
}

fn angle_of(direction: Vec2) -> Option<f32> {
    (direction != Vec2::ZERO).then(|| direction.y.atan2(direction.x))
}
