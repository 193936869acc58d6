//! Memo storage for the path search.
//!
//! The search memoizes one [`MemoEntry`] per visited [`State`]. Two storage
//! strategies implement the same [`MemoBackend`] interface:
//!
//! - [`DenseBackend`]: a preallocated 3D table, `O(n³)` memory regardless of
//!   how many states the search visits
//! - [`SparseBackend`]: a HashMap holding only the visited states
//!
//! Both must behave identically; only their memory profile differs.
//!
//! # Example
//!
//! ```rust
//! use refuge_optimizer::{MemoBackend, MemoEntry, Score, SparseBackend};
//!
//! let mut memo = SparseBackend::for_grid(3, 5);
//! memo.insert((0, 0, 0), MemoEntry { score: Score::Reachable(1), next: Some((0, 1)) });
//! assert_eq!(memo.get(&(0, 0, 0)).map(|entry| entry.score), Some(Score::Reachable(1)));
//! assert!(memo.get(&(0, 1, 1)).is_none());
//! ```

mod backend;

pub use backend::{DenseBackend, SparseBackend};

use crate::grid::Position;
use crate::score::Score;

/// A search state: `(row, col, steps taken)`.
pub type State = (usize, usize, usize);

/// Memoized result for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoEntry {
    /// Best score from this state onward, counting the state's own cell
    pub score: Score,
    /// Cell chosen by the optimal move, `None` when no move reaches the goal
    pub next: Option<Position>,
}

/// A storage backend for the search memo.
///
/// # Contract
///
/// - `get` returns `None` for states that were never inserted, which is
///   different from an inserted entry whose score is `Unreachable`
/// - `insert` on an existing state replaces its entry without changing `len`
pub trait MemoBackend {
    /// Short label used in logs.
    const NAME: &'static str;

    /// Creates empty storage for a `size`×`size` grid with step counts `0..=max_steps`.
    fn for_grid(size: usize, max_steps: usize) -> Self
    where
        Self: Sized;

    /// Returns the entry for `state` if it has been computed.
    fn get(&self, state: &State) -> Option<&MemoEntry>;

    /// Records the entry for `state`.
    fn insert(&mut self, state: State, entry: MemoEntry);

    /// Number of computed states.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently allocated for storage.
    fn footprint_bytes(&self) -> usize;

    /// Iterates over all computed states, in no particular order.
    fn entries(&self) -> Box<dyn Iterator<Item = (State, MemoEntry)> + '_>;
}
