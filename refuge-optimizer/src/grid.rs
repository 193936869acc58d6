//! Grid model: cell kinds, positions and the validated n×n grid.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// A `(row, col)` coordinate inside a grid.
pub type Position = (usize, usize);

/// Kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Walkable, worth nothing
    #[default]
    Empty,
    /// Impassable
    Obstacle,
    /// Walkable, worth one point on arrival
    Collectible,
}

impl Cell {
    /// Text symbol used by [`Grid`]'s `FromStr` and `Display` implementations.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Obstacle => 'B',
            Cell::Collectible => 'R',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'B' => Some(Cell::Obstacle),
            'R' => Some(Cell::Collectible),
            _ => None,
        }
    }

    pub const fn is_obstacle(self) -> bool {
        matches!(self, Cell::Obstacle)
    }

    /// Points collected when arriving on this cell.
    pub const fn value(self) -> u32 {
        match self {
            Cell::Collectible => 1,
            Cell::Empty | Cell::Obstacle => 0,
        }
    }
}

/// An immutable, validated n×n grid.
///
/// Construction guarantees `n >= 1`, a square shape, and that neither the
/// start `(0, 0)` nor the goal `(n-1, n-1)` is an obstacle.
///
/// # Example
///
/// ```rust
/// use refuge_optimizer::{Cell, Grid};
///
/// let grid: Grid = ".R\n..".parse().unwrap();
/// assert_eq!(grid.size(), 2);
/// assert_eq!(grid.max_steps(), 3);
/// assert_eq!(grid.get((0, 1)), Some(Cell::Collectible));
/// assert_eq!(grid.get((2, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from rows of cells, validating its shape and endpoints.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    expected: size,
                    actual: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Self::validated(size, cells)
    }

    /// Builds an empty `size`×`size` grid.
    pub fn empty(size: usize) -> Result<Self, GridError> {
        Self::validated(size, vec![Cell::Empty; size * size])
    }

    fn validated(size: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        let grid = Self { size, cells };
        if grid.cell_at(0, 0).is_obstacle() {
            return Err(GridError::BlockedStart);
        }
        if grid.cell_at(size - 1, size - 1).is_obstacle() {
            return Err(GridError::BlockedGoal(size - 1));
        }
        Ok(grid)
    }

    /// Returns a copy of this grid with one cell replaced.
    ///
    /// Fails with the usual endpoint errors if the replacement blocks the
    /// start or the goal. Out-of-range positions leave the grid unchanged.
    pub fn with_cell(&self, pos: Position, cell: Cell) -> Result<Self, GridError> {
        let mut cells = self.cells.clone();
        if let Some(index) = self.index(pos) {
            cells[index] = cell;
        }
        Self::validated(self.size, cells)
    }

    /// Side length `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Move budget `2n - 1`.
    pub fn max_steps(&self) -> usize {
        2 * self.size - 1
    }

    pub fn start(&self) -> Position {
        (0, 0)
    }

    pub fn goal(&self) -> Position {
        (self.size - 1, self.size - 1)
    }

    /// Returns the cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    fn index(&self, (row, col): Position) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses one row per line using `.`, `R` and `B`.
    ///
    /// Blank lines and whitespace inside a row are ignored, so both `".R"`
    /// and `". R"` describe the same row.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| line.split_whitespace().collect::<String>())
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        Cell::from_symbol(symbol).ok_or(GridError::InvalidCell { row, col, symbol })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let text = ".RB\n...\nB.R\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.count(Cell::Collectible), 2);
        assert_eq!(grid.count(Cell::Obstacle), 2);
    }

    #[test]
    fn test_parse_ignores_spaces_and_blank_lines() {
        let grid: Grid = "\n . R\n\n . .\n".parse().unwrap();
        assert_eq!(grid, ".R\n..".parse().unwrap());
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(Grid::new(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::empty(0), Err(GridError::Empty));
    }

    #[test]
    fn test_rejects_non_square_grid() {
        let result = "..\n...".parse::<Grid>();
        assert_eq!(
            result,
            Err(GridError::NotSquare {
                row: 1,
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rejects_blocked_endpoints() {
        assert_eq!("B.\n..".parse::<Grid>(), Err(GridError::BlockedStart));
        assert_eq!("..\n.B".parse::<Grid>(), Err(GridError::BlockedGoal(1)));
    }

    #[test]
    fn test_rejects_unknown_symbol() {
        assert_eq!(
            ".x\n..".parse::<Grid>(),
            Err(GridError::InvalidCell {
                row: 0,
                col: 1,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_with_cell() {
        let grid = Grid::empty(3).unwrap();
        let updated = grid.with_cell((1, 1), Cell::Collectible).unwrap();
        assert_eq!(updated.get((1, 1)), Some(Cell::Collectible));
        assert_eq!(grid.get((1, 1)), Some(Cell::Empty));
        assert_eq!(
            grid.with_cell((2, 2), Cell::Obstacle),
            Err(GridError::BlockedGoal(2))
        );
    }

    #[test]
    fn test_single_cell_grid() {
        let grid: Grid = "R".parse().unwrap();
        assert_eq!(grid.start(), grid.goal());
        assert_eq!(grid.max_steps(), 1);
    }
}
