//! Dense cell grid owned by the world.

use vision_curse_core::{CellCoord, CellWalls, Direction, MazeView};

/// Fixed-size grid of cells, each carrying four wall flags.
///
/// Cells start fully enclosed. Walls between neighbours are only ever removed
/// in pairs through [`Grid::carve`]; the single exception is
/// [`Grid::open_boundary`], which punches through the outer border.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cell_size: f32,
    wall_thickness: f32,
    cells: Vec<CellWalls>,
}

impl Grid {
    /// Creates a grid whose cells are all enclosed.
    #[must_use]
    pub fn new(columns: u32, rows: u32, cell_size: f32, wall_thickness: f32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cell_size,
            wall_thickness,
            cells: vec![CellWalls::ENCLOSED; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view handed to collision, vision and hit-scan queries.
    #[must_use]
    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(
            &self.cells,
            self.columns,
            self.rows,
            self.cell_size,
            self.wall_thickness,
        )
    }

    /// Wall flags of the provided cell.
    #[must_use]
    pub fn walls(&self, coord: CellCoord) -> Option<CellWalls> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// In-bounds orthogonal neighbours of a cell.
    pub fn neighbors(
        &self,
        coord: CellCoord,
    ) -> impl Iterator<Item = (Direction, CellCoord)> {
        let (columns, rows) = (self.columns, self.rows);
        Direction::ALL.into_iter().filter_map(move |direction| {
            coord
                .neighbor(direction, columns, rows)
                .map(|neighbor| (direction, neighbor))
        })
    }

    /// Removes the wall pair between a cell and its neighbour in `direction`.
    ///
    /// Returns `false` without touching the grid when the neighbour lies outside
    /// the grid.
    pub fn carve(&mut self, coord: CellCoord, direction: Direction) -> bool {
        let Some(neighbor) = coord.neighbor(direction, self.columns, self.rows) else {
            return false;
        };
        let (Some(from), Some(to)) = (self.index(coord), self.index(neighbor)) else {
            return false;
        };

        self.cells[from].remove(direction);
        self.cells[to].remove(direction.opposite());
        true
    }

    /// Removes a wall on the outer border of the grid.
    ///
    /// Returns `false` when `direction` does not face the border from `coord`.
    pub fn open_boundary(&mut self, coord: CellCoord, direction: Direction) -> bool {
        if coord.neighbor(direction, self.columns, self.rows).is_some() {
            return false;
        }
        let Some(index) = self.index(coord) else {
            return false;
        };

        self.cells[index].remove(direction);
        true
    }

    /// Counts wall pairs removed between neighbouring cells.
    #[must_use]
    pub fn open_passages(&self) -> u32 {
        let mut passages = 0;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let coord = CellCoord::new(column, row);
                let Some(walls) = self.walls(coord) else {
                    continue;
                };
                for direction in [Direction::East, Direction::South] {
                    if !walls.has(direction)
                        && coord.neighbor(direction, self.columns, self.rows).is_some()
                    {
                        passages += 1;
                    }
                }
            }
        }
        passages
    }

    pub(crate) fn index(&self, coord: CellCoord) -> Option<usize> {
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
