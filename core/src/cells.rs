//! Cell model of the maze grid and the read-only view handed to systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Adjacent cell in the provided direction, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        let (column, row) = (column?, row?);
        (column < columns && row < rows).then_some(CellCoord::new(column, row))
    }

    /// Direction leading from `self` to an orthogonally adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        if self.manhattan_distance(other) != 1 {
            return None;
        }

        if other.column > self.column {
            Some(Direction::East)
        } else if other.column < self.column {
            Some(Direction::West)
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Cardinal directions naming the four sides of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Side facing decreasing row indices.
    North,
    /// Side facing increasing column indices.
    East,
    /// Side facing increasing row indices.
    South,
    /// Side facing decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    const fn mask(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// Four independent wall flags of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellWalls(u8);

impl CellWalls {
    /// Every side walled, the state of a freshly built cell.
    pub const ENCLOSED: CellWalls = CellWalls(0b1111);

    /// Every side open.
    pub const OPEN: CellWalls = CellWalls(0);

    /// Reports whether the provided side is walled.
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & direction.mask() != 0
    }

    /// Clears the wall on the provided side.
    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.mask();
    }

    /// Returns a copy with the wall on the provided side raised.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.mask())
    }

    /// Number of walled sides.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl Default for CellWalls {
    fn default() -> Self {
        Self::ENCLOSED
    }
}

/// Snapshot of one grid cell and its wall flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    walls: CellWalls,
}

impl Cell {
    /// Pairs a coordinate with its wall flags.
    #[must_use]
    pub const fn new(coord: CellCoord, walls: CellWalls) -> Self {
        Self { coord, walls }
    }

    /// Coordinate of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Wall flags of the cell.
    #[must_use]
    pub const fn walls(&self) -> CellWalls {
        self.walls
    }

    /// Upper-left corner of the cell in world units.
    #[must_use]
    pub fn origin(&self, cell_size: f32) -> Vec2 {
        Vec2::new(
            self.coord.column() as f32 * cell_size,
            self.coord.row() as f32 * cell_size,
        )
    }

    /// Collidable rectangles for every active wall flag.
    ///
    /// Walls sit on the inside of the cell edge, so each rectangle spans the
    /// full cell length and `thickness` units across.
    pub fn wall_rects(&self, cell_size: f32, thickness: f32) -> impl Iterator<Item = Rect> {
        let origin = self.origin(cell_size);
        let walls = self.walls;
        Direction::ALL.into_iter().filter_map(move |direction| {
            if !walls.has(direction) {
                return None;
            }
            let rect = match direction {
                Direction::North => Rect::new(origin.x, origin.y, cell_size, thickness),
                Direction::East => Rect::new(
                    origin.x + cell_size - thickness,
                    origin.y,
                    thickness,
                    cell_size,
                ),
                Direction::South => Rect::new(
                    origin.x,
                    origin.y + cell_size - thickness,
                    cell_size,
                    thickness,
                ),
                Direction::West => Rect::new(origin.x, origin.y, thickness, cell_size),
            };
            Some(rect)
        })
    }
}

/// Read-only view into the maze grid.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    cells: &'a [CellWalls],
    columns: u32,
    rows: u32,
    cell_size: f32,
    wall_thickness: f32,
}

impl<'a> MazeView<'a> {
    /// Captures a view backed by row-major wall flags.
    #[must_use]
    pub fn new(
        cells: &'a [CellWalls],
        columns: u32,
        rows: u32,
        cell_size: f32,
        wall_thickness: f32,
    ) -> Self {
        Self {
            cells,
            columns,
            rows,
            cell_size,
            wall_thickness,
        }
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Side length of a square cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Thickness of every wall rectangle.
    #[must_use]
    pub const fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    /// Total extent of the grid in world units.
    #[must_use]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        )
    }

    /// Clamps a point to the world rectangle covered by the grid.
    #[must_use]
    pub fn clamp_to_world(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, self.world_size())
    }

    /// Returns the cell at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        let index = self.index(coord)?;
        self.cells
            .get(index)
            .map(|walls| Cell::new(coord, *walls))
    }

    /// Cell containing the world point, or `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, point: Vec2) -> Option<CellCoord> {
        let (column, row) = self.signed_cell_at(point)?;
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        (column < self.columns && row < self.rows).then_some(CellCoord::new(column, row))
    }

    /// Wall rectangles of a cell; empty outside the grid.
    pub fn wall_rects(&self, coord: CellCoord) -> impl Iterator<Item = Rect> {
        let cell_size = self.cell_size;
        let thickness = self.wall_thickness;
        self.cell(coord)
            .into_iter()
            .flat_map(move |cell| cell.wall_rects(cell_size, thickness))
    }

    /// Cells of the 3×3 block centred on the cell containing `point`.
    ///
    /// The block is clamped to the grid, so points just outside the grid still
    /// see the edge cells next to them.
    pub fn neighborhood(&self, point: Vec2) -> impl Iterator<Item = CellCoord> {
        let (columns, rows) = (i64::from(self.columns), i64::from(self.rows));
        let (column, row) = self.signed_cell_at(point).unwrap_or((-2, -2));
        let column_range = (column - 1).max(0)..(column + 2).min(columns);
        let row_range = (row - 1).max(0)..(row + 2).min(rows);

        row_range.flat_map(move |row| {
            column_range.clone().filter_map(move |column| {
                let column = u32::try_from(column).ok()?;
                let row = u32::try_from(row).ok()?;
                Some(CellCoord::new(column, row))
            })
        })
    }

    /// Adjacent cells reachable through an open wall.
    pub fn open_neighbors(&self, coord: CellCoord) -> impl Iterator<Item = CellCoord> + 'a {
        let walls = self.cell(coord).map(|cell| cell.walls());
        let (columns, rows) = (self.columns, self.rows);
        Direction::ALL.into_iter().filter_map(move |direction| {
            let walls = walls?;
            if walls.has(direction) {
                return None;
            }
            coord.neighbor(direction, columns, rows)
        })
    }

    /// Iterates every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + 'a {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, walls)| {
            let index = index as u32;
            Cell::new(CellCoord::new(index % columns, index / columns), *walls)
        })
    }

    fn signed_cell_at(&self, point: Vec2) -> Option<(i64, i64)> {
        if self.cell_size <= 0.0 || !point.is_finite() {
            return None;
        }
        let column = (point.x / self.cell_size).floor() as i64;
        let row = (point.y / self.cell_size).floor() as i64;
        Some((column, row))
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Dimensions of the walled arena hosting the boss fight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaBounds {
    width: f32,
    height: f32,
    wall_thickness: f32,
}

impl ArenaBounds {
    /// Creates arena bounds from outer dimensions and wall thickness.
    #[must_use]
    pub const fn new(width: f32, height: f32, wall_thickness: f32) -> Self {
        Self {
            width,
            height,
            wall_thickness,
        }
    }

    /// Outer width of the arena.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Outer height of the arena.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Thickness of the surrounding walls.
    #[must_use]
    pub const fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    /// Outer extent of the arena.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Walkable interior inside the walls.
    #[must_use]
    pub fn interior(&self) -> Rect {
        let t = self.wall_thickness;
        Rect::new(t, t, self.width - 2.0 * t, self.height - 2.0 * t)
    }

    /// Reports whether the point lies inside the wall band or beyond it.
    #[must_use]
    pub fn is_beyond_wall(&self, point: Vec2) -> bool {
        let t = self.wall_thickness;
        point.x < t || point.x > self.width - t || point.y < t || point.y > self.height - t
    }

    /// Clamps a point onto the interior.
    #[must_use]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        let t = self.wall_thickness;
        Vec2::new(
            point.x.clamp(t, (self.width - t).max(t)),
            point.y.clamp(t, (self.height - t).max(t)),
        )
    }

    /// Moves a body so it fits inside the interior.
    #[must_use]
    pub fn clamp_body(&self, body: Rect) -> Rect {
        let t = self.wall_thickness;
        let max_x = (self.width - body.width() - t).max(t);
        let max_y = (self.height - body.height() - t).max(t);
        body.with_origin(Vec2::new(body.x().clamp(t, max_x), body.y().clamp(t, max_y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn neighbor_respects_grid_bounds() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::North, 4, 4), None);
        assert_eq!(corner.neighbor(Direction::West, 4, 4), None);
        assert_eq!(
            corner.neighbor(Direction::East, 4, 4),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(CellCoord::new(3, 3).neighbor(Direction::South, 4, 4), None);
    }

    #[test]
    fn direction_to_requires_adjacency() {
        let cell = CellCoord::new(2, 2);
        assert_eq!(cell.direction_to(CellCoord::new(2, 1)), Some(Direction::North));
        assert_eq!(cell.direction_to(CellCoord::new(1, 2)), Some(Direction::West));
        assert_eq!(cell.direction_to(CellCoord::new(3, 3)), None);
        assert_eq!(cell.direction_to(cell), None);
    }

    #[test]
    fn wall_rects_follow_flags() {
        let mut walls = CellWalls::ENCLOSED;
        walls.remove(Direction::East);
        let cell = Cell::new(CellCoord::new(1, 2), walls);
        let rects: Vec<_> = cell.wall_rects(120.0, 3.0).collect();

        assert_eq!(
            rects,
            vec![
                Rect::new(120.0, 240.0, 120.0, 3.0),
                Rect::new(120.0, 357.0, 120.0, 3.0),
                Rect::new(120.0, 240.0, 3.0, 120.0),
            ]
        );
    }

    #[test]
    fn open_cell_has_no_wall_rects() {
        let cell = Cell::new(CellCoord::new(0, 0), CellWalls::OPEN);
        assert_eq!(cell.wall_rects(120.0, 3.0).count(), 0);
    }

    #[test]
    fn neighborhood_is_clamped_to_grid() {
        let cells = vec![CellWalls::ENCLOSED; 9];
        let view = MazeView::new(&cells, 3, 3, 10.0, 1.0);

        assert_eq!(view.neighborhood(Vec2::new(15.0, 15.0)).count(), 9);
        assert_eq!(view.neighborhood(Vec2::new(5.0, 5.0)).count(), 4);
        let below: Vec<_> = view.neighborhood(Vec2::new(25.0, 35.0)).collect();
        assert_eq!(below, vec![CellCoord::new(1, 2), CellCoord::new(2, 2)]);
        assert_eq!(view.neighborhood(Vec2::new(100.0, 100.0)).count(), 0);
    }

    #[test]
    fn cell_at_rejects_points_outside_grid() {
        let cells = vec![CellWalls::ENCLOSED; 6];
        let view = MazeView::new(&cells, 3, 2, 10.0, 1.0);

        assert_eq!(view.cell_at(Vec2::new(25.0, 15.0)), Some(CellCoord::new(2, 1)));
        assert_eq!(view.cell_at(Vec2::new(-0.5, 5.0)), None);
        assert_eq!(view.cell_at(Vec2::new(5.0, 20.0)), None);
    }

    #[test]
    fn arena_clamps_bodies_inside_walls() {
        let arena = ArenaBounds::new(200.0, 100.0, 10.0);
        let body = Rect::new(-50.0, 95.0, 20.0, 20.0);
        let clamped = arena.clamp_body(body);
        assert_eq!(clamped, Rect::new(10.0, 70.0, 20.0, 20.0));
        assert!(arena.is_beyond_wall(Vec2::new(5.0, 50.0)));
        assert!(!arena.is_beyond_wall(Vec2::new(100.0, 50.0)));
    }
}
