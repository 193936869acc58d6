//! Property-based tests for the path optimizer
//!
//! Every strategy evaluates the same recurrence, so scores must agree on any
//! grid, and the reconstructed paths must be legal and worth the score.

use proptest::prelude::*;
use refuge_optimizer::{
    Cell, Grid, MemoBackend, PathOptimizer, Position, Score, SparseBackend, Strategy as Method,
};

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        5 => Just(Cell::Empty),
        2 => Just(Cell::Obstacle),
        3 => Just(Cell::Collectible),
    ]
}

/// Random grids with open endpoints, up to `max_size` per side.
fn grid(max_size: usize) -> impl Strategy<Value = Grid> {
    (1..=max_size)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(cell(), n), n))
        .prop_map(|mut rows| {
            let last = rows.len() - 1;
            if rows[0][0].is_obstacle() {
                rows[0][0] = Cell::Empty;
            }
            if rows[last][last].is_obstacle() {
                rows[last][last] = Cell::Empty;
            }
            Grid::new(rows).unwrap()
        })
}

/// Exhaustive search over every move sequence, without memo or prune.
fn brute_force(grid: &Grid, pos: Option<Position>, steps: usize) -> Option<u32> {
    let pos = pos?;
    let cell = grid.get(pos)?;
    if cell.is_obstacle() || steps > grid.max_steps() {
        return None;
    }
    if pos == grid.goal() {
        return Some(cell.value());
    }
    let (row, col) = pos;
    let neighbours = [
        row.checked_sub(1).map(|r| (r, col)),
        Some((row, col + 1)),
        Some((row + 1, col)),
        col.checked_sub(1).map(|c| (row, c)),
    ];
    neighbours
        .into_iter()
        .filter_map(|next| brute_force(grid, next, steps + 1))
        .max()
        .map(|best| best + cell.value())
}

fn collected(grid: &Grid, path: &[Position]) -> u32 {
    path.iter()
        .filter_map(|&pos| grid.get(pos))
        .map(Cell::value)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// **Property 1: Cross-strategy consistency**
    /// *For any* grid, dense, sparse and bottom-up report the same outcome.
    #[test]
    fn prop_strategies_agree(grid in grid(10)) {
        let optimizer = PathOptimizer::new(&grid);
        let dense = optimizer.solve(Method::Dense).unwrap();
        for method in [Method::Sparse, Method::BottomUp] {
            let other = optimizer.solve(method).unwrap();
            prop_assert_eq!(other.outcome, dense.outcome, "{}", method);
            prop_assert_eq!(other.score, dense.score);
            prop_assert_eq!(other.path.len(), dense.path.len());
            prop_assert_eq!(collected(&grid, &other.path), collected(&grid, &dense.path));
        }
        prop_assert_eq!(dense.score, dense.outcome.or_zero());
    }

    /// **Property 2: Path legality**
    /// *For any* grid, a non-empty path starts at the origin, moves one
    /// cardinal step at a time, avoids obstacles and fits the budget.
    #[test]
    fn prop_paths_are_legal(grid in grid(10)) {
        let optimizer = PathOptimizer::new(&grid);
        for method in Method::ALL {
            let solution = optimizer.solve(method).unwrap();
            if solution.path.is_empty() {
                prop_assert!(!solution.reached_goal());
                prop_assert_eq!(solution.score, 0);
                continue;
            }
            prop_assert_eq!(solution.path[0], (0, 0));
            prop_assert!(solution.moves() <= grid.max_steps());
            for pair in solution.path.windows(2) {
                let distance = pair[0].0.abs_diff(pair[1].0) + pair[0].1.abs_diff(pair[1].1);
                prop_assert_eq!(distance, 1, "non-unit step {:?}", pair);
            }
            for &pos in &solution.path {
                prop_assert!(!grid.get(pos).unwrap().is_obstacle());
            }
            if solution.reached_goal() {
                prop_assert_eq!(solution.path.last(), Some(&grid.goal()));
                prop_assert_eq!(collected(&grid, &solution.path), solution.score);
            }
        }
    }

    /// **Property 3: Prune soundness**
    /// *For any* grid, no state that cannot reach the goal in the remaining
    /// budget, nor any obstacle or goal state, is ever memoized.
    #[test]
    fn prop_pruned_states_are_never_memoized(grid in grid(10)) {
        let optimizer = PathOptimizer::new(&grid);
        let goal = grid.goal();
        let memoized = optimizer.memoize::<SparseBackend>().unwrap();
        let tabulated = optimizer.tabulate();
        let states = memoized
            .memo
            .entries()
            .chain(tabulated.memo.entries())
            .map(|(state, _)| state)
            .collect::<Vec<_>>();
        for (row, col, steps) in states {
            let distance = goal.0.abs_diff(row) + goal.1.abs_diff(col);
            prop_assert!(steps <= grid.max_steps());
            prop_assert!(grid.max_steps() - steps >= distance, "state {:?}", (row, col, steps));
            prop_assert!((row, col) != goal);
            prop_assert!(!grid.get((row, col)).unwrap().is_obstacle());
        }
    }

    /// **Property 4: Bottom-up equivalence**
    /// *For any* grid, the iterative evaluation breaks ties exactly like the
    /// dense recursion and reconstructs the identical path.
    #[test]
    fn prop_bottom_up_matches_dense(grid in grid(12)) {
        let optimizer = PathOptimizer::new(&grid);
        let dense = optimizer.solve(Method::Dense).unwrap();
        let bottom_up = optimizer.solve(Method::BottomUp).unwrap();
        prop_assert_eq!(bottom_up.outcome, dense.outcome);
        prop_assert_eq!(bottom_up.path, dense.path);
    }

    /// **Property 5: Idempotence**
    /// *For any* grid, solving twice with the same strategy gives the same result.
    #[test]
    fn prop_repeated_solves_are_identical(grid in grid(10)) {
        let optimizer = PathOptimizer::new(&grid);
        for method in Method::ALL {
            let first = optimizer.solve(method).unwrap();
            let second = optimizer.solve(method).unwrap();
            prop_assert_eq!(first.outcome, second.outcome);
            prop_assert_eq!(&first.path, &second.path);
            prop_assert_eq!(first.stats.calls, second.stats.calls);
            prop_assert_eq!(first.stats.memo_entries, second.stats.memo_entries);
        }
    }

    /// **Property 6: Monotonicity**
    /// *For any* grid with a reachable goal, turning an empty cell on the
    /// optimal path into a collectible never lowers the score.
    #[test]
    fn prop_extra_collectible_on_path_never_hurts(grid in grid(10), pick in any::<prop::sample::Index>()) {
        let solution = PathOptimizer::new(&grid).solve(Method::Sparse).unwrap();
        prop_assume!(solution.reached_goal());
        let empties: Vec<Position> = solution
            .path
            .iter()
            .copied()
            .filter(|&pos| grid.get(pos) == Some(Cell::Empty))
            .collect();
        prop_assume!(!empties.is_empty());

        let richer = grid.with_cell(*pick.get(&empties), Cell::Collectible).unwrap();
        let improved = PathOptimizer::new(&richer).solve(Method::Sparse).unwrap();
        prop_assert!(improved.score >= solution.score);
        prop_assert_eq!(improved.score, solution.score + 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// **Property 7: Optimality**
    /// *For any* small grid, the memoized, pruned search matches exhaustive search.
    #[test]
    fn prop_matches_exhaustive_search(grid in grid(4)) {
        let expected = brute_force(&grid, Some((0, 0)), 0);
        let solution = PathOptimizer::new(&grid).solve(Method::Dense).unwrap();
        match expected {
            Some(best) => prop_assert_eq!(solution.outcome, Score::Reachable(best)),
            None => prop_assert_eq!(solution.outcome, Score::Unreachable),
        }
    }
}
