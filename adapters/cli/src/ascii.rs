use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use vision_curse_core::{tuning, Outcome, PlayMode, Rect};
use vision_curse_rendering::{FrameInput, Presentation, RenderingBackend, Scene};

const PELLET_SAMPLES: usize = 24;

/// Backend that prints scenes as text frames instead of opening a window.
///
/// It simulates a fixed number of frames at the nominal frame rate and
/// stops early once the scene reports an outcome.
#[derive(Debug)]
pub(crate) struct AsciiBackend<W> {
    writer: W,
    frames: u64,
    render_every: u64,
    columns: usize,
    rows: usize,
}

impl<W: Write> AsciiBackend<W> {
    pub(crate) fn new(writer: W, frames: u64, render_every: u64, columns: usize, rows: usize) -> Self {
        Self {
            writer,
            frames,
            render_every,
            columns,
            rows,
        }
    }
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            mut writer,
            frames,
            render_every,
            columns,
            rows,
        } = self;
        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;

        writeln!(writer, "== {window_title} ==").context("failed to write session header")?;
        for frame in 0..frames {
            update_scene(tuning::FRAME_DURATION, FrameInput::default(), &mut scene);

            let finished = scene.outcome.is_some();
            let due = render_every > 0 && (frame % render_every == 0 || finished);
            if due {
                writeln!(writer, "{}", render_frame(&scene, columns, rows))
                    .with_context(|| format!("failed to write frame {frame}"))?;
            }
            if finished {
                tracing::debug!(frame, "scene reported an outcome; stopping");
                break;
            }
        }
        writer.flush().context("failed to flush frame output")?;
        Ok(())
    }
}

/// Draws `scene` as `rows` lines of `columns` characters plus a status line.
///
/// `#` wall, `@` player, `e` lit enemy, `B` boss, `*` pellet, `.` lit floor,
/// blank for darkness.
pub(crate) fn render_frame(scene: &Scene, columns: usize, rows: usize) -> String {
    let bounds = scene.camera.bounds();
    let cell = Vec2::new(
        bounds.width() / columns.max(1) as f32,
        bounds.height() / rows.max(1) as f32,
    );

    let mut canvas = vec![vec![' '; columns]; rows];
    for (row, line) in canvas.iter_mut().enumerate() {
        for (column, glyph) in line.iter_mut().enumerate() {
            let area = Rect::from_origin_and_size(
                bounds.origin() + cell * Vec2::new(column as f32, row as f32),
                cell,
            );
            *glyph = glyph_for(scene, area);
        }
    }

    for pellet in &scene.pellets {
        for sample in 0..=PELLET_SAMPLES {
            let point = pellet
                .start()
                .lerp(pellet.end(), sample as f32 / PELLET_SAMPLES as f32);
            let local = (point - bounds.origin()) / cell;
            if local.x < 0.0 || local.y < 0.0 {
                continue;
            }
            let (column, row) = (local.x as usize, local.y as usize);
            if let Some(glyph) = canvas.get_mut(row).and_then(|line| line.get_mut(column)) {
                if matches!(*glyph, ' ' | '.') {
                    *glyph = '*';
                }
            }
        }
    }

    let mut frame = String::with_capacity((columns + 1) * (rows + 1));
    for line in canvas {
        frame.extend(line);
        frame.push('\n');
    }
    frame.push_str(&status_line(scene));
    frame
}

fn glyph_for(scene: &Scene, area: Rect) -> char {
    if area.intersects(&scene.player) {
        return '@';
    }
    if scene
        .boss
        .as_ref()
        .is_some_and(|boss| area.intersects(&boss.body))
    {
        return 'B';
    }
    if scene
        .enemies
        .iter()
        .any(|enemy| enemy.lit && area.intersects(&enemy.body))
    {
        return 'e';
    }
    if scene.walls.iter().any(|wall| area.intersects(wall)) {
        return '#';
    }
    let center = area.center();
    if scene.aura.center.distance(center) <= scene.aura.radius || scene.vision.contains(center) {
        return '.';
    }
    ' '
}

fn status_line(scene: &Scene) -> String {
    let hud = &scene.hud;
    let mode = match scene.play_mode {
        PlayMode::Maze => "maze",
        PlayMode::BossFight => "arena",
    };
    let mut line = format!(
        "[{mode}] tick {} | hp {}/{} | skill points {}",
        hud.tick, hud.health, hud.max_health, hud.skill_points
    );
    if let Some(boss) = &scene.boss {
        line.push_str(&format!(" | boss {:.0}%", boss.health_fraction * 100.0));
    }
    match scene.outcome {
        Some(Outcome::Victory) => line.push_str(" | VICTORY"),
        Some(Outcome::Defeat) => line.push_str(" | DEFEAT"),
        None => {}
    }
    line
}
