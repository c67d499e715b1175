//! Randomised depth-first backtracker that carves a perfect maze.

use rand::Rng;
use vision_curse_core::{CellCoord, Direction};

use crate::grid::Grid;

/// Summary of a completed generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of wall pairs removed between neighbouring cells.
    pub carved: u32,
    /// Number of cells reached by the walk.
    pub visited: u32,
}

/// Entrance cell whose northern border wall is always open.
#[must_use]
pub const fn entrance() -> CellCoord {
    CellCoord::new(0, 0)
}

/// Exit cell whose southern border wall is always open.
#[must_use]
pub fn exit(columns: u32, rows: u32) -> CellCoord {
    CellCoord::new(columns.saturating_sub(1), rows.saturating_sub(1))
}

/// Carves a perfect maze into a freshly enclosed grid.
///
/// Every cell ends up reachable from every other cell through exactly one
/// simple path. The walk keeps its own stack, so grid size never bounds the
/// call depth. The random source only influences which spanning tree gets
/// carved, never whether the result is a spanning tree.
pub fn generate<R>(grid: &mut Grid, rng: &mut R) -> GenerationReport
where
    R: Rng + ?Sized,
{
    let (columns, rows) = (grid.columns(), grid.rows());
    if grid.is_empty() {
        return GenerationReport::default();
    }

    let mut visited = vec![false; grid.len()];
    let start = entrance();
    let mut report = GenerationReport {
        carved: 0,
        visited: 1,
    };
    mark_visited(grid, &mut visited, start);

    let mut stack = vec![start];
    let mut current = start;

    loop {
        if let Some((direction, next)) = pick_unvisited(grid, &visited, current, rng) {
            stack.push(current);
            if grid.carve(current, direction) {
                report.carved += 1;
            }
            current = next;
            mark_visited(grid, &mut visited, current);
            report.visited += 1;
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }
    }

    let _ = grid.open_boundary(start, Direction::North);
    let _ = grid.open_boundary(exit(columns, rows), Direction::South);

    tracing::debug!(
        columns,
        rows,
        carved = report.carved,
        visited = report.visited,
        "maze generation complete"
    );
    report
}

fn mark_visited(grid: &Grid, visited: &mut [bool], coord: CellCoord) {
    if let Some(index) = grid.index(coord) {
        visited[index] = true;
    }
}

fn pick_unvisited<R>(
    grid: &Grid,
    visited: &[bool],
    coord: CellCoord,
    rng: &mut R,
) -> Option<(Direction, CellCoord)>
where
    R: Rng + ?Sized,
{
    let mut candidates = [None; 4];
    let mut count = 0;

    for (direction, neighbor) in grid.neighbors(coord) {
        let unvisited = grid
            .index(neighbor)
            .map_or(false, |index| !visited[index]);
        if unvisited {
            candidates[count] = Some((direction, neighbor));
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    candidates[rng.gen_range(0..count)]
}
