//! Movement rules and the terminal cases of the recurrence.

use crate::grid::{Cell, Grid, Position};
use crate::score::Score;

/// One of the four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Exploration order. The first direction reaching the best score wins ties.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(row, col)` offset of the move.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Applies the move, returning `None` if it leaves the top or left edge.
    ///
    /// Bottom and right edges are left to the grid lookup.
    pub fn step(self, (row, col): Position) -> Option<Position> {
        let (dr, dc) = self.delta();
        Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?))
    }
}

/// How a state resolves before any memo lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// Terminal: off-grid, obstacle, over budget, goal, or pruned
    Settled(Score),
    /// Needs the recursive step
    Open(Position, Cell),
}

/// Grid plus budget, shared by the recursive and iterative evaluators.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rules<'g> {
    grid: &'g Grid,
    goal: Position,
    max_steps: usize,
}

impl<'g> Rules<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            goal: grid.goal(),
            max_steps: grid.max_steps(),
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Applies the base cases in order: bounds/obstacle, budget, goal, prune.
    pub fn probe(&self, pos: Option<Position>, steps: usize) -> Probe {
        let Some((pos, cell)) = pos.and_then(|pos| Some((pos, self.grid.get(pos)?))) else {
            return Probe::Settled(Score::Unreachable);
        };
        if cell.is_obstacle() || steps > self.max_steps {
            return Probe::Settled(Score::Unreachable);
        }
        if pos == self.goal {
            return Probe::Settled(Score::Reachable(cell.value()));
        }
        if !self.can_reach_goal(pos, steps) {
            return Probe::Settled(Score::Unreachable);
        }
        Probe::Open(pos, cell)
    }

    /// Whether the remaining budget covers the Manhattan distance to the goal.
    pub fn can_reach_goal(&self, (row, col): Position, steps: usize) -> bool {
        let distance = self.goal.0.abs_diff(row) + self.goal.1.abs_diff(col);
        self.max_steps
            .checked_sub(steps)
            .is_some_and(|remaining| remaining >= distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Up.step((0, 3)), None);
        assert_eq!(Direction::Left.step((2, 0)), None);
        assert_eq!(Direction::Right.step((2, 0)), Some((2, 1)));
        assert_eq!(Direction::Down.step((2, 0)), Some((3, 0)));
    }

    #[test]
    fn test_probe_base_case_order() {
        let grid: Grid = "..B\n...\n..R".parse().unwrap();
        let rules = Rules::new(&grid);
        assert_eq!(rules.max_steps(), 5);

        assert_eq!(rules.probe(None, 0), Probe::Settled(Score::Unreachable));
        assert_eq!(rules.probe(Some((3, 0)), 0), Probe::Settled(Score::Unreachable));
        assert_eq!(rules.probe(Some((0, 2)), 2), Probe::Settled(Score::Unreachable));
        assert_eq!(rules.probe(Some((1, 1)), 6), Probe::Settled(Score::Unreachable));
        // Goal counts even with no slack left
        assert_eq!(rules.probe(Some((2, 2)), 5), Probe::Settled(Score::Reachable(1)));
        // (0,0) needs 4 moves, only 5 - 2 = 3 remain
        assert_eq!(rules.probe(Some((0, 0)), 2), Probe::Settled(Score::Unreachable));
        assert_eq!(rules.probe(Some((0, 0)), 1), Probe::Open((0, 0), Cell::Empty));
    }

    #[test]
    fn test_can_reach_goal() {
        let grid = Grid::empty(4).unwrap();
        let rules = Rules::new(&grid);
        assert!(rules.can_reach_goal((0, 0), 1));
        assert!(!rules.can_reach_goal((0, 0), 2));
        assert!(rules.can_reach_goal((3, 3), 7));
        assert!(!rules.can_reach_goal((3, 3), 8));
    }
}
