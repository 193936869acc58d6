//! Error types for the optimizer library

use thiserror::Error;

/// Error type for building or parsing a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has no rows
    #[error("Grid is empty")]
    Empty,
    /// A row length does not match the number of rows
    #[error("Grid is not square: row {row} has {actual} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// The start cell (0,0) is an obstacle
    #[error("Start cell (0,0) is an obstacle")]
    BlockedStart,
    /// The goal cell (n-1,n-1) is an obstacle
    #[error("Goal cell ({0},{0}) is an obstacle")]
    BlockedGoal(usize),
    /// A character in the text form is not a known cell symbol
    #[error("Invalid cell {symbol:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, symbol: char },
}

/// Error type for running a solve
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// The dedicated search thread could not be started with the stack it needs
    #[error("Could not reserve {bytes} bytes of stack for search depth {depth}: {source}")]
    StackReservation {
        depth: usize,
        bytes: usize,
        #[source]
        source: std::io::Error,
    },
    /// The dedicated search thread panicked
    #[error("Search thread panicked")]
    SearchPanicked,
}
