//! Breadth-first distance field over the carved passages of the maze.

use std::collections::VecDeque;

use vision_curse_core::{CellCoord, MazeView};

/// Dense passage-distance grid seeded from a single goal cell.
///
/// Distances follow open walls only, so they measure the length of the unique
/// maze path to the goal. Unreachable cells keep `u32::MAX`.
#[derive(Clone, Debug, Default)]
pub struct NavigationField {
    width: u32,
    height: u32,
    goal: Option<CellCoord>,
    distances: Vec<u32>,
}

impl NavigationField {
    /// Builds a field of passage distances toward `goal`.
    #[must_use]
    pub fn toward(view: &MazeView<'_>, goal: CellCoord) -> Self {
        let mut field = Self::default();
        field.rebuild(view, goal);
        field
    }

    /// Rebuilds the distances using a reverse breadth-first search.
    pub fn rebuild(&mut self, view: &MazeView<'_>, goal: CellCoord) {
        let (width, height) = view.dimensions();
        let width_usize = usize::try_from(width).unwrap_or(0);
        let height_usize = usize::try_from(height).unwrap_or(0);
        let cell_count = width_usize.checked_mul(height_usize).unwrap_or(0);

        self.width = width;
        self.height = height;
        self.goal = None;
        self.distances.clear();
        self.distances.resize(cell_count, u32::MAX);

        let Some(goal_index) = index(width, height, goal) else {
            return;
        };
        self.goal = Some(goal);
        self.distances[goal_index] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(goal);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = index(width, height, cell) else {
                continue;
            };
            let next_distance = self.distances[current_index].saturating_add(1);

            for neighbor in view.open_neighbors(cell) {
                let Some(neighbor_index) = index(width, height, neighbor) else {
                    continue;
                };
                if self.distances[neighbor_index] <= next_distance {
                    continue;
                }
                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Goal cell the field was seeded from.
    #[must_use]
    pub fn goal(&self) -> Option<CellCoord> {
        self.goal
    }

    /// Passage distance from `cell` to the goal, if reachable.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        let index = index(self.width, self.height, cell)?;
        self.distances
            .get(index)
            .copied()
            .filter(|distance| *distance != u32::MAX)
    }

    /// Neighbour of `cell` one step closer to the goal.
    #[must_use]
    pub fn next_hop(&self, view: &MazeView<'_>, cell: CellCoord) -> Option<CellCoord> {
        let current = self.distance(cell)?;
        view.open_neighbors(cell)
            .filter_map(|neighbor| self.distance(neighbor).map(|distance| (distance, neighbor)))
            .filter(|(distance, _)| *distance < current)
            .min()
            .map(|(_, neighbor)| neighbor)
    }

    /// Complete route from `start` to the goal, both ends included.
    #[must_use]
    pub fn route(&self, view: &MazeView<'_>, start: CellCoord) -> Option<Vec<CellCoord>> {
        let length = self.distance(start)?;
        let mut route = Vec::with_capacity(usize::try_from(length).unwrap_or(0) + 1);
        let mut cell = start;
        route.push(cell);
        while Some(cell) != self.goal {
            cell = self.next_hop(view, cell)?;
            route.push(cell);
        }
        Some(route)
    }

    /// Number of cells reachable from the goal, the goal included.
    #[must_use]
    pub fn reachable_cells(&self) -> usize {
        self.distances
            .iter()
            .filter(|distance| **distance != u32::MAX)
            .count()
    }
}

fn index(width: u32, height: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= width || cell.row() >= height {
        return None;
    }
    let width = usize::try_from(width).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use vision_curse_core::Direction;

    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 2, 10.0, 1.0);
        assert!(grid.carve(CellCoord::new(0, 0), Direction::East));
        assert!(grid.carve(CellCoord::new(1, 0), Direction::East));
        assert!(grid.carve(CellCoord::new(2, 0), Direction::South));
        grid
    }

    #[test]
    fn distances_follow_open_walls() {
        let grid = corridor();
        let field = NavigationField::toward(&grid.view(), CellCoord::new(2, 1));

        assert_eq!(field.distance(CellCoord::new(2, 1)), Some(0));
        assert_eq!(field.distance(CellCoord::new(2, 0)), Some(1));
        assert_eq!(field.distance(CellCoord::new(0, 0)), Some(3));
        assert_eq!(field.distance(CellCoord::new(0, 1)), None);
        assert_eq!(field.reachable_cells(), 4);
    }

    #[test]
    fn route_walks_down_the_gradient() {
        let grid = corridor();
        let view = grid.view();
        let field = NavigationField::toward(&view, CellCoord::new(2, 1));

        let route = field.route(&view, CellCoord::new(0, 0)).expect("reachable");
        assert_eq!(
            route,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(2, 1),
            ]
        );
        assert_eq!(field.route(&view, CellCoord::new(1, 1)), None);
    }

    #[test]
    fn goal_outside_grid_leaves_field_empty() {
        let grid = corridor();
        let field = NavigationField::toward(&grid.view(), CellCoord::new(9, 9));
        assert_eq!(field.goal(), None);
        assert_eq!(field.reachable_cells(), 0);
    }
}
