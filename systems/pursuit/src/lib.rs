#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that steers enemies and the boss toward the player.

use glam::Vec2;
use vision_curse_core::{
    tuning, BossSnapshot, Command, EnemySnapshot, EnemyView, Event, PlayMode, PlayerSnapshot,
};

/// Chase and melee logic reacting to `Event::TimeAdvanced`.
#[derive(Clone, Copy, Debug)]
pub struct Pursuit {
    detection_range: f32,
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::new(tuning::ENEMY_DETECTION_RANGE)
    }
}

impl Pursuit {
    /// Creates a pursuit system noticing the player within `detection_range`.
    #[must_use]
    pub const fn new(detection_range: f32) -> Self {
        Self { detection_range }
    }

    /// Emits movement and strike commands for every tick in `events`.
    ///
    /// Enemies start chasing once the player centre comes within detection
    /// range and never stop afterwards. The boss always chases. Strikes are
    /// only requested for ready attackers already touching the player.
    pub fn handle(
        &self,
        events: &[Event],
        play_mode: PlayMode,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        boss: Option<&BossSnapshot>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }
        if player.health == 0 {
            return;
        }

        match play_mode {
            PlayMode::Maze => {
                for enemy in enemies.iter().filter(|enemy| enemy.is_alive()) {
                    self.chase_with_enemy(enemy, player, out);
                }
            }
            PlayMode::BossFight => {
                if let Some(boss) = boss.filter(|boss| boss.health > 0) {
                    chase_with_boss(boss, player, out);
                }
            }
        }
    }

    fn chase_with_enemy(&self, enemy: &EnemySnapshot, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        let target = player.body.center();
        let center = enemy.body.center();
        if !enemy.alerted && center.distance(target) > self.detection_range {
            return;
        }

        if let Some(heading) = heading(center, target) {
            out.push(Command::MoveEnemy {
                enemy: enemy.id,
                heading,
            });
        }
        if enemy.strike_ready && enemy.body.intersects(&player.body) {
            out.push(Command::EnemyStrike { enemy: enemy.id });
        }
    }
}

fn chase_with_boss(boss: &BossSnapshot, player: &PlayerSnapshot, out: &mut Vec<Command>) {
    if let Some(heading) = heading(boss.body.center(), player.body.center()) {
        out.push(Command::MoveBoss { heading });
    }
    if boss.strike_ready && boss.body.intersects(&player.body) {
        out.push(Command::BossStrike);
    }
}

fn heading(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vision_curse_core::{EnemyId, Rect, UpgradeLevels};

    fn player_at(center: Vec2) -> PlayerSnapshot {
        let levels = UpgradeLevels::default();
        PlayerSnapshot {
            body: Rect::new(0.0, 0.0, 40.0, 40.0).centered_on(center),
            health: 100,
            facing: 0.0,
            skill_points: 0,
            levels,
            loadout: levels.loadout(),
            shotgun_ready_in: Duration::ZERO,
        }
    }

    fn enemy_at(id: u32, center: Vec2, alerted: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            body: Rect::new(0.0, 0.0, 30.0, 30.0).centered_on(center),
            health: 3,
            alerted,
            strike_ready: true,
        }
    }

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    #[test]
    fn enemies_chase_only_within_detection_range() {
        let player = player_at(Vec2::new(500.0, 500.0));
        let enemies = EnemyView::from_snapshots(vec![
            enemy_at(0, Vec2::new(800.0, 500.0), false),
            enemy_at(1, Vec2::new(1_000.0, 500.0), false),
            enemy_at(2, Vec2::new(1_500.0, 500.0), true),
        ]);
        let mut commands = Vec::new();

        Pursuit::default().handle(&tick(), PlayMode::Maze, &player, &enemies, None, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::MoveEnemy {
                    enemy: EnemyId::new(0),
                    heading: Vec2::new(-1.0, 0.0),
                },
                Command::MoveEnemy {
                    enemy: EnemyId::new(2),
                    heading: Vec2::new(-1.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn touching_enemy_strikes_when_ready() {
        let player = player_at(Vec2::new(500.0, 500.0));
        let mut resting = enemy_at(1, Vec2::new(510.0, 500.0), true);
        resting.strike_ready = false;
        let enemies = EnemyView::from_snapshots(vec![
            enemy_at(0, Vec2::new(500.0, 500.0), true),
            resting,
        ]);
        let mut commands = Vec::new();

        Pursuit::default().handle(&tick(), PlayMode::Maze, &player, &enemies, None, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::EnemyStrike {
                    enemy: EnemyId::new(0)
                },
                Command::MoveEnemy {
                    enemy: EnemyId::new(1),
                    heading: Vec2::new(-1.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn boss_always_chases_in_arena() {
        let player = player_at(Vec2::new(600.0, 800.0));
        let boss = BossSnapshot {
            body: Rect::new(0.0, 0.0, 120.0, 120.0).centered_on(Vec2::new(600.0, 140.0)),
            health: 40,
            max_health: 40,
            strike_ready: true,
        };
        let enemies = EnemyView::from_snapshots(vec![enemy_at(0, Vec2::new(600.0, 700.0), true)]);
        let mut commands = Vec::new();

        Pursuit::default().handle(
            &tick(),
            PlayMode::BossFight,
            &player,
            &enemies,
            Some(&boss),
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::MoveBoss {
                heading: Vec2::new(0.0, 1.0)
            }]
        );
    }

    #[test]
    fn nothing_happens_without_a_tick() {
        let player = player_at(Vec2::new(500.0, 500.0));
        let enemies = EnemyView::from_snapshots(vec![enemy_at(0, Vec2::new(520.0, 500.0), true)]);
        let mut commands = Vec::new();

        Pursuit::default().handle(&[], PlayMode::Maze, &player, &enemies, None, &mut commands);
        assert!(commands.is_empty());
    }
}
