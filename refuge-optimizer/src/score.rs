//! Score of a search state.

use std::fmt;

/// Best achievable score from a search state, or `Unreachable` when the goal
/// cannot be reached from it within the move budget.
///
/// Ordering places `Unreachable` below every reachable score, so taking the
/// maximum over neighbours works directly.
///
/// ```rust
/// use refuge_optimizer::Score;
///
/// assert!(Score::Unreachable < Score::Reachable(0));
/// assert_eq!(Score::Reachable(2).plus(1), Score::Reachable(3));
/// assert_eq!(Score::Unreachable.plus(1), Score::Unreachable);
/// assert_eq!(Score::Unreachable.or_zero(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Unreachable,
    Reachable(u32),
}

impl Score {
    pub const fn is_reachable(self) -> bool {
        matches!(self, Score::Reachable(_))
    }

    /// Adds the value of the current cell to a reachable score.
    pub const fn plus(self, value: u32) -> Self {
        match self {
            Score::Reachable(score) => Score::Reachable(score + value),
            Score::Unreachable => Score::Unreachable,
        }
    }

    /// Reported score: unreachable counts as nothing collected.
    pub const fn or_zero(self) -> u32 {
        match self {
            Score::Reachable(score) => score,
            Score::Unreachable => 0,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Reachable(score) => write!(f, "{}", score),
            Score::Unreachable => write!(f, "unreachable"),
        }
    }
}
