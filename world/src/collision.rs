//! Per-axis movement resolution against maze wall rectangles.

use glam::Vec2;
use vision_curse_core::{MazeView, Rect};

/// Outcome of a single movement step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Upper-left corner of the body after the step.
    pub position: Vec2,
    /// Whether the horizontal component was rejected.
    pub blocked_x: bool,
    /// Whether the vertical component was rejected.
    pub blocked_y: bool,
}

impl Resolution {
    /// Reports whether the body did not move at all.
    #[must_use]
    pub fn is_stuck(&self) -> bool {
        self.blocked_x && self.blocked_y
    }
}

/// Resolves one movement step of `body` along `delta` scaled by `speed`.
///
/// Both axes are tested independently against every wall rectangle in the
/// 3×3 block around the body centre, so a blocked axis never cancels the
/// other one and bodies slide along walls. Candidate coordinates never go
/// below zero. Walls further away than one cell are not consulted, which
/// holds as long as a step is shorter than a cell.
#[must_use]
pub fn resolve_movement(view: &MazeView<'_>, body: Rect, delta: Vec2, speed: f32) -> Resolution {
    let candidate_x = (body.x() + delta.x * speed).max(0.0);
    let candidate_y = (body.y() + delta.y * speed).max(0.0);

    let moved_x = body.with_origin(Vec2::new(candidate_x, body.y()));
    let moved_y = body.with_origin(Vec2::new(body.x(), candidate_y));

    let mut blocked_x = false;
    let mut blocked_y = false;
    for coord in view.neighborhood(body.center()) {
        for wall in view.wall_rects(coord) {
            blocked_x |= wall.intersects(&moved_x);
            blocked_y |= wall.intersects(&moved_y);
        }
        if blocked_x && blocked_y {
            break;
        }
    }

    let position = Vec2::new(
        if blocked_x { body.x() } else { candidate_x },
        if blocked_y { body.y() } else { candidate_y },
    );
    if blocked_x || blocked_y {
        tracing::trace!(?position, blocked_x, blocked_y, "movement clipped by walls");
    }

    Resolution {
        position,
        blocked_x,
        blocked_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use vision_curse_core::{CellCoord, Direction};

    fn open_pair() -> Grid {
        let mut grid = Grid::new(2, 1, 120.0, 3.0);
        assert!(grid.carve(CellCoord::new(0, 0), Direction::East));
        grid
    }

    #[test]
    fn free_movement_applies_both_axes() {
        let grid = open_pair();
        let body = Rect::new(40.0, 40.0, 40.0, 40.0);
        let resolution = resolve_movement(&grid.view(), body, Vec2::new(1.0, 1.0), 6.0);

        assert_eq!(resolution.position, Vec2::new(46.0, 46.0));
        assert!(!resolution.blocked_x);
        assert!(!resolution.blocked_y);
    }

    #[test]
    fn carved_wall_lets_bodies_cross_cells() {
        let grid = open_pair();
        let body = Rect::new(110.0, 40.0, 40.0, 40.0);
        let resolution = resolve_movement(&grid.view(), body, Vec2::X, 6.0);
        assert_eq!(resolution.position, Vec2::new(116.0, 40.0));
    }

    #[test]
    fn body_flush_with_wall_slides_along_it() {
        let grid = open_pair();
        let body = Rect::new(40.0, 3.0, 40.0, 40.0);
        let resolution = resolve_movement(&grid.view(), body, Vec2::new(1.0, -1.0), 6.0);

        assert!(resolution.blocked_y);
        assert!(!resolution.blocked_x);
        assert_eq!(resolution.position, Vec2::new(46.0, 3.0));
    }

    #[test]
    fn candidates_are_clamped_at_zero() {
        let cells = vec![vision_curse_core::CellWalls::OPEN; 1];
        let view = MazeView::new(&cells, 1, 1, 120.0, 3.0);
        let body = Rect::new(2.0, 50.0, 40.0, 40.0);
        let resolution = resolve_movement(&view, body, Vec2::new(-1.0, 0.0), 6.0);
        assert_eq!(resolution.position, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn enclosed_cell_blocks_every_direction() {
        let grid = Grid::new(3, 3, 120.0, 3.0);
        let view = grid.view();
        let body = Rect::new(0.0, 0.0, 112.0, 112.0).centered_on(Vec2::new(180.0, 180.0));

        for direction in Direction::ALL {
            let delta = match direction {
                Direction::North => Vec2::new(0.0, -1.0),
                Direction::East => Vec2::new(1.0, 0.0),
                Direction::South => Vec2::new(0.0, 1.0),
                Direction::West => Vec2::new(-1.0, 0.0),
            };
            let resolution = resolve_movement(&view, body, delta, 6.0);
            assert_eq!(resolution.position, body.origin(), "moved {direction:?}");
        }
    }
}
