//! The path optimizer.
//!
//! [`PathOptimizer`] finds the maximum number of collectibles on a path from
//! `(0, 0)` to `(n-1, n-1)` using at most `2n - 1` cardinal moves, and
//! reconstructs one optimal path.
//!
//! # Strategies
//!
//! - [`Strategy::Dense`]: top-down recursion memoized in a [`DenseBackend`]
//! - [`Strategy::Sparse`]: top-down recursion memoized in a [`SparseBackend`]
//! - [`Strategy::BottomUp`]: the same recurrence filled iteratively into a
//!   [`DenseBackend`], with no recursion at all
//!
//! All strategies report the same score. Dense and bottom-up also
//! reconstruct the same path, since they break ties identically.
//!
//! # Example
//!
//! ```rust
//! use refuge_optimizer::{Grid, PathOptimizer, Strategy};
//!
//! let grid: Grid = ".R\n..".parse().unwrap();
//! let optimizer = PathOptimizer::new(&grid);
//!
//! let dense = optimizer.solve(Strategy::Dense).unwrap();
//! let sparse = optimizer.solve(Strategy::Sparse).unwrap();
//!
//! assert_eq!(dense.score, 1);
//! assert_eq!(dense.path, vec![(0, 0), (0, 1), (1, 1)]);
//! assert_eq!(sparse.score, dense.score);
//! ```

mod bottom_up;
mod path;
mod rules;
mod search;

pub use rules::Direction;

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::OptimizerError;
use crate::grid::{Grid, Position};
use crate::memo::{DenseBackend, MemoBackend, SparseBackend};
use crate::score::Score;
use rules::Rules;
use search::Search;

/// Deepest recursion run on the calling thread; deeper searches get their own stack.
pub const DEFAULT_INLINE_DEPTH: usize = 1024;

/// Stack reserved per recursion level on a dedicated search thread.
const STACK_PER_LEVEL: usize = 1024;

/// Extra stack on a dedicated search thread, on top of the per-level reservation.
const STACK_BASE: usize = 1 << 20;

/// How the recurrence is evaluated and memoized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    Dense,
    Sparse,
    BottomUp,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Dense, Strategy::Sparse, Strategy::BottomUp];

    pub const fn label(self) -> &'static str {
        match self {
            Strategy::Dense => "Dense 3D table",
            Strategy::Sparse => "Sparse hash map",
            Strategy::BottomUp => "Bottom-up table",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Performance counters for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Recurrence invocations (recursive strategies) or states evaluated (bottom-up)
    pub calls: u64,
    /// States stored in the memo
    pub memo_entries: usize,
    /// Bytes allocated by the memo
    pub memo_bytes: usize,
    /// Wall-clock time of the search, excluding path reconstruction
    pub elapsed: Duration,
}

/// Result of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub strategy: Strategy,
    /// Collectibles gathered on an optimal path; 0 when the goal is unreachable
    pub score: u32,
    /// Raw result of the start state, keeping "unreachable" apart from 0
    pub outcome: Score,
    /// One optimal path from start to goal, or empty when unreachable
    pub path: Vec<Position>,
    pub stats: SolveStats,
}

impl Solution {
    pub fn reached_goal(&self) -> bool {
        self.outcome.is_reachable()
    }

    /// Number of moves on the path.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A filled memo together with the outcome of the search that filled it.
#[derive(Debug)]
pub struct Memoized<B> {
    pub outcome: Score,
    pub memo: B,
    pub calls: u64,
    pub elapsed: Duration,
}

impl<B: MemoBackend> Memoized<B> {
    fn into_solution(self, grid: &Grid, strategy: Strategy) -> Solution {
        let path = path::reconstruct(grid, &self.memo);
        let stats = SolveStats {
            calls: self.calls,
            memo_entries: self.memo.len(),
            memo_bytes: self.memo.footprint_bytes(),
            elapsed: self.elapsed,
        };
        debug!(
            %strategy,
            score = %self.outcome,
            calls = stats.calls,
            memo_entries = stats.memo_entries,
            path_len = path.len(),
            "solve finished"
        );
        Solution {
            strategy,
            score: self.outcome.or_zero(),
            outcome: self.outcome,
            path,
            stats,
        }
    }
}

/// Optimizer over one immutable grid.
///
/// Every solve builds a fresh memo, so an optimizer can be reused and
/// shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct PathOptimizer<'g> {
    grid: &'g Grid,
    inline_depth: usize,
}

impl<'g> PathOptimizer<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            inline_depth: DEFAULT_INLINE_DEPTH,
        }
    }

    /// Sets the deepest recursion allowed on the calling thread.
    pub fn with_inline_depth(mut self, inline_depth: usize) -> Self {
        self.inline_depth = inline_depth;
        self
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Solves the grid with the chosen strategy.
    pub fn solve(&self, strategy: Strategy) -> Result<Solution, OptimizerError> {
        match strategy {
            Strategy::Dense => Ok(self
                .memoize::<DenseBackend>()?
                .into_solution(self.grid, strategy)),
            Strategy::Sparse => Ok(self
                .memoize::<SparseBackend>()?
                .into_solution(self.grid, strategy)),
            Strategy::BottomUp => Ok(self.tabulate().into_solution(self.grid, strategy)),
        }
    }

    /// Runs the memoized recursion from `(0, 0, 0)` into a fresh `B`.
    ///
    /// Recursion depth reaches `2n` frames. When that exceeds the inline
    /// depth the search runs on a scoped thread whose stack is sized for it.
    pub fn memoize<B>(&self) -> Result<Memoized<B>, OptimizerError>
    where
        B: MemoBackend + Send,
    {
        let depth = self.grid.max_steps() + 1;
        if depth <= self.inline_depth {
            return Ok(self.run_search());
        }

        let bytes = STACK_BASE + depth * STACK_PER_LEVEL;
        debug!(depth, bytes, "running search on a dedicated stack");
        std::thread::scope(|scope| {
            let handle = std::thread::Builder::new()
                .name("refuge-search".to_string())
                .stack_size(bytes)
                .spawn_scoped(scope, || self.run_search::<B>())
                .map_err(|source| OptimizerError::StackReservation {
                    depth,
                    bytes,
                    source,
                })?;
            handle.join().map_err(|_| OptimizerError::SearchPanicked)
        })
    }

    /// Fills a dense table bottom-up, from the last step layer to the first.
    pub fn tabulate(&self) -> Memoized<DenseBackend> {
        let _span = tracing::debug_span!("tabulate", size = self.grid.size()).entered();
        let start = Instant::now();
        let (memo, calls, outcome) = bottom_up::tabulate(Rules::new(self.grid));
        Memoized {
            outcome,
            memo,
            calls,
            elapsed: start.elapsed(),
        }
    }

    fn run_search<B: MemoBackend>(&self) -> Memoized<B> {
        let _span = tracing::debug_span!("search", size = self.grid.size(), backend = B::NAME)
            .entered();
        let start = Instant::now();
        let mut search = Search::<B>::new(Rules::new(self.grid));
        let outcome = search.eval(Some(self.grid.start()), 0);
        let (memo, calls) = search.into_parts();
        Memoized {
            outcome,
            memo,
            calls,
            elapsed: start.elapsed(),
        }
    }
}
