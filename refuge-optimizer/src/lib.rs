//! Budgeted Grid Path Optimizer
//!
//! Finds the maximum number of collectibles on a path from the top-left to
//! the bottom-right cell of an n×n grid, moving in the four cardinal
//! directions, never entering an obstacle, and using at most `2n - 1` moves.
//!
//! # Overview
//!
//! This library provides:
//! - A validated [`Grid`] model with a plain-text form (`.`, `R`, `B`)
//! - A memoized recurrence over `(row, col, steps)` states with a
//!   Manhattan-distance reachability prune
//! - Two interchangeable memo storages behind [`MemoBackend`]: a dense 3D
//!   table and a sparse hash map
//! - An iterative bottom-up evaluation of the same recurrence
//! - Reconstruction of one optimal path with a deterministic tie-break
//!
//! # Quick Example
//!
//! ```
//! use refuge_optimizer::{Grid, PathOptimizer, Score, Strategy};
//!
//! let grid: Grid = "\
//!     .R.
//!     B.R
//!     ...
//! ".parse().unwrap();
//!
//! let optimizer = PathOptimizer::new(&grid);
//! let solution = optimizer.solve(Strategy::Dense).unwrap();
//!
//! assert_eq!(solution.score, 2);
//! assert_eq!(solution.outcome, Score::Reachable(2));
//! // Ties go to the first direction tried: up, right, down, left
//! assert_eq!(solution.path, vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
//!
//! for strategy in [Strategy::Sparse, Strategy::BottomUp] {
//!     assert_eq!(optimizer.solve(strategy).unwrap().score, solution.score);
//! }
//! ```
//!
//! # Key Concepts
//!
//! ## Reachability
//!
//! A goal that cannot be reached is not an error: the reported `score` is 0
//! and the path is empty. [`Solution::outcome`] keeps the raw [`Score`] so
//! callers can tell "collected nothing" apart from "never arrived".
//!
//! ## Recursion Depth
//!
//! The recursive strategies descend up to `2n` levels. Beyond
//! [`DEFAULT_INLINE_DEPTH`] they run on a dedicated thread with a stack sized
//! for the grid; [`Strategy::BottomUp`] never recurses.

mod error;
mod grid;
mod memo;
mod optimizer;
mod score;

// Re-export public API
pub use error::{GridError, OptimizerError};
pub use grid::{Cell, Grid, Position};
pub use memo::{DenseBackend, MemoBackend, MemoEntry, SparseBackend, State};
pub use optimizer::{
    DEFAULT_INLINE_DEPTH, Direction, Memoized, PathOptimizer, Solution, SolveStats, Strategy,
};
pub use score::Score;
