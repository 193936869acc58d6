//! Optimal path reconstruction from a filled memo.

use crate::grid::{Grid, Position};
use crate::memo::MemoBackend;

/// Follows the recorded moves from `(0, 0, 0)` towards the goal.
///
/// Returns an empty path when the start state has no reachable entry, and
/// the partial path walked so far if a move is missing before the goal.
pub(crate) fn reconstruct<B: MemoBackend>(grid: &Grid, memo: &B) -> Vec<Position> {
    let start = grid.start();
    let goal = grid.goal();
    if start == goal {
        return vec![start];
    }

    let reachable = memo
        .get(&(start.0, start.1, 0))
        .is_some_and(|entry| entry.score.is_reachable());
    if !reachable {
        return Vec::new();
    }

    let mut path = vec![start];
    let mut current = start;
    let mut steps = 0;
    while current != goal {
        let Some(next) = memo
            .get(&(current.0, current.1, steps))
            .and_then(|entry| entry.next)
        else {
            break;
        };
        path.push(next);
        current = next;
        steps += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{MemoEntry, SparseBackend};
    use crate::score::Score;

    #[test]
    fn test_dead_end_yields_partial_path() {
        let grid = Grid::empty(3).unwrap();
        let mut memo = SparseBackend::new();
        memo.insert(
            (0, 0, 0),
            MemoEntry {
                score: Score::Reachable(0),
                next: Some((0, 1)),
            },
        );
        memo.insert(
            (0, 1, 1),
            MemoEntry {
                score: Score::Reachable(0),
                next: None,
            },
        );
        assert_eq!(reconstruct(&grid, &memo), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_unrecorded_start_yields_empty_path() {
        let grid = Grid::empty(2).unwrap();
        assert!(reconstruct(&grid, &SparseBackend::new()).is_empty());
    }

    #[test]
    fn test_unreachable_start_yields_empty_path() {
        let grid = Grid::empty(2).unwrap();
        let mut memo = SparseBackend::new();
        memo.insert(
            (0, 0, 0),
            MemoEntry {
                score: Score::Unreachable,
                next: None,
            },
        );
        assert!(reconstruct(&grid, &memo).is_empty());
    }

    #[test]
    fn test_single_cell_path() {
        let grid = Grid::empty(1).unwrap();
        assert_eq!(reconstruct(&grid, &SparseBackend::new()), vec![(0, 0)]);
    }
}
