#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves shotgun blasts into damage commands.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vision_curse_core::{BossSnapshot, Command, EnemyId, EnemyView, Event, Segment};
use vision_curse_system_vision::{march, Obstruction};

const DEFAULT_SEED: u64 = 0x5107_6a11_9e11_e75a;

/// Entity a pellet connected with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PelletTarget {
    /// A maze enemy.
    Enemy(EnemyId),
    /// The arena boss.
    Boss,
}

/// Path travelled by a single pellet of the latest blast.
#[derive(Clone, Debug, PartialEq)]
pub struct PelletTrace {
    /// Segment from the muzzle to where the pellet stopped.
    pub segment: Segment,
    /// Every target whose rectangle the segment enters, in target order.
    pub hits: Vec<PelletTarget>,
}

/// Shotgun hit-scan system driven by `Event::ShotgunFired`.
///
/// Pellet jitter comes from a seeded ChaCha stream so identical event
/// sequences always produce identical damage.
#[derive(Debug)]
pub struct Shotgun {
    rng: ChaCha8Rng,
    traces: Vec<PelletTrace>,
    hits: BTreeMap<PelletTarget, u32>,
}

impl Default for Shotgun {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Shotgun {
    /// Creates a shotgun system whose pellet jitter is seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            traces: Vec::new(),
            hits: BTreeMap::new(),
        }
    }

    /// Pellet paths of the most recent blast, kept for the renderer.
    #[must_use]
    pub fn traces(&self) -> &[PelletTrace] {
        &self.traces
    }

    /// Resolves every blast in `events` and emits the resulting damage.
    ///
    /// Each pellet is marched through `surroundings`, so walls stop it. The
    /// resulting segment scores one hit on every live target whose rectangle
    /// it enters; bodies do not shield the targets behind them.
    pub fn handle<O>(
        &mut self,
        events: &[Event],
        surroundings: &O,
        enemies: &EnemyView,
        boss: Option<&BossSnapshot>,
        out: &mut Vec<Command>,
    ) where
        O: Obstruction + ?Sized,
    {
        for event in events {
            let Event::ShotgunFired {
                origin,
                aim,
                pellets,
                spread_degrees,
                range,
                damage,
            } = *event
            else {
                continue;
            };

            self.traces.clear();
            self.hits.clear();
            let half_spread = spread_degrees.max(0.0) / 2.0;

            for _ in 0..pellets {
                let jitter = self.rng.gen_range(-half_spread..=half_spread);
                let angle = aim + jitter.to_radians();
                let stop = march(surroundings, origin, angle, range);
                let segment = Segment::new(origin, stop.end);
                let hits = struck_targets(&segment, enemies, boss);
                for target in &hits {
                    *self.hits.entry(*target).or_insert(0) += 1;
                }
                self.traces.push(PelletTrace { segment, hits });
            }

            tracing::debug!(pellets, targets = self.hits.len(), "shotgun blast resolved");
            for (target, hits) in &self.hits {
                let amount = hits.saturating_mul(damage);
                out.push(match *target {
                    PelletTarget::Enemy(enemy) => Command::DamageEnemy { enemy, amount },
                    PelletTarget::Boss => Command::DamageBoss { amount },
                });
            }
        }
    }
}

fn struck_targets(
    segment: &Segment,
    enemies: &EnemyView,
    boss: Option<&BossSnapshot>,
) -> Vec<PelletTarget> {
    let enemy_bodies = enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| (PelletTarget::Enemy(enemy.id), enemy.body));
    let boss_body = boss
        .filter(|boss| boss.health > 0)
        .map(|boss| (PelletTarget::Boss, boss.body));

    let mut struck: Vec<PelletTarget> = enemy_bodies
        .chain(boss_body)
        .filter(|(_, body)| segment.entry_distance(body).is_some())
        .map(|(target, _)| target)
        .collect();
    struck.sort_unstable();
    struck
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use vision_curse_core::{tuning, ArenaBounds, CellCoord, Direction, EnemySnapshot, Rect};
    use vision_curse_world::grid::Grid;

    fn enemy(id: u32, center: Vec2) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            body: Rect::new(0.0, 0.0, 30.0, 30.0).centered_on(center),
            health: 3,
            alerted: false,
            strike_ready: true,
        }
    }

    fn blast_from(origin: Vec2, pellets: u32, spread_degrees: f32) -> Event {
        Event::ShotgunFired {
            origin,
            aim: 0.0,
            pellets,
            spread_degrees,
            range: 350.0,
            damage: 2,
        }
    }

    fn blast(pellets: u32, spread_degrees: f32) -> Event {
        blast_from(Vec2::new(100.0, 300.0), pellets, spread_degrees)
    }

    #[test]
    fn each_pellet_hits_every_rectangle_it_crosses() {
        let arena = ArenaBounds::new(1_200.0, 900.0, 20.0);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(1, Vec2::new(300.0, 300.0)),
            enemy(0, Vec2::new(200.0, 300.0)),
        ]);
        let mut shotgun = Shotgun::new(1);
        let mut commands = Vec::new();

        shotgun.handle(&[blast(6, 0.0)], &arena, &enemies, None, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::DamageEnemy {
                    enemy: EnemyId::new(0),
                    amount: 12
                },
                Command::DamageEnemy {
                    enemy: EnemyId::new(1),
                    amount: 12
                },
            ]
        );
        assert_eq!(shotgun.traces().len(), 6);
        assert!(shotgun.traces().iter().all(|trace| trace.hits
            == vec![
                PelletTarget::Enemy(EnemyId::new(0)),
                PelletTarget::Enemy(EnemyId::new(1))
            ]));
    }

    #[test]
    fn dead_enemies_take_no_hits() {
        let arena = ArenaBounds::new(1_200.0, 900.0, 20.0);
        let mut fallen = enemy(0, Vec2::new(200.0, 300.0));
        fallen.health = 0;
        let enemies = EnemyView::from_snapshots(vec![fallen, enemy(1, Vec2::new(300.0, 300.0))]);
        let mut shotgun = Shotgun::new(1);
        let mut commands = Vec::new();

        shotgun.handle(&[blast(3, 0.0)], &arena, &enemies, None, &mut commands);
        assert_eq!(
            commands,
            vec![Command::DamageEnemy {
                enemy: EnemyId::new(1),
                amount: 6
            }]
        );
    }

    #[test]
    fn walls_stop_pellets_before_the_enemy() {
        let mut grid = Grid::new(3, 1, tuning::CELL_SIZE, tuning::WALL_THICKNESS);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(180.0, 60.0))]);
        let muzzle = Vec2::new(60.0, 60.0);
        let mut commands = Vec::new();

        let mut shotgun = Shotgun::new(2);
        shotgun.handle(
            &[blast_from(muzzle, 6, 20.0)],
            &grid.view(),
            &enemies,
            None,
            &mut commands,
        );
        assert!(commands.is_empty(), "walled pellets dealt damage: {commands:?}");
        for trace in shotgun.traces() {
            assert!(trace.hits.is_empty());
            assert!(trace.segment.end().x < tuning::CELL_SIZE + tuning::WALL_THICKNESS);
        }

        assert!(grid.carve(CellCoord::new(0, 0), Direction::East));
        shotgun.handle(
            &[blast_from(muzzle, 6, 0.0)],
            &grid.view(),
            &enemies,
            None,
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::DamageEnemy {
                enemy: EnemyId::new(0),
                amount: 12
            }]
        );
    }

    #[test]
    fn boss_takes_summed_pellet_damage() {
        let arena = ArenaBounds::new(1_200.0, 900.0, 20.0);
        let boss = BossSnapshot {
            body: Rect::new(0.0, 0.0, 120.0, 120.0).centered_on(Vec2::new(300.0, 300.0)),
            health: 40,
            max_health: 40,
            strike_ready: true,
        };
        let mut shotgun = Shotgun::new(9);
        let mut commands = Vec::new();

        shotgun.handle(
            &[blast(6, 20.0)],
            &arena,
            &EnemyView::default(),
            Some(&boss),
            &mut commands,
        );
        assert_eq!(commands, vec![Command::DamageBoss { amount: 12 }]);
        assert!(shotgun
            .traces()
            .iter()
            .all(|trace| trace.hits == vec![PelletTarget::Boss]));
    }

    #[test]
    fn pellets_stay_inside_the_spread() {
        let arena = ArenaBounds::new(1_200.0, 900.0, 20.0);
        let mut shotgun = Shotgun::new(4);
        let mut commands = Vec::new();
        shotgun.handle(
            &[blast(32, 20.0)],
            &arena,
            &EnemyView::default(),
            None,
            &mut commands,
        );

        assert!(commands.is_empty());
        for trace in shotgun.traces() {
            let direction = trace.segment.end() - trace.segment.start();
            let angle = direction.y.atan2(direction.x).to_degrees();
            assert!(angle.abs() <= 10.0 + 1e-3, "pellet outside spread: {angle}");
        }
    }

    #[test]
    fn identical_seeds_replay_identical_blasts() {
        let arena = ArenaBounds::new(1_200.0, 900.0, 20.0);
        let run = |seed| {
            let mut shotgun = Shotgun::new(seed);
            let mut commands = Vec::new();
            shotgun.handle(
                &[blast(8, 20.0)],
                &arena,
                &EnemyView::default(),
                None,
                &mut commands,
            );
            shotgun.traces().to_vec()
        };
        assert_eq!(run(11), run(11));
    }
}
