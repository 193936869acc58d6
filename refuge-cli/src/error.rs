//! Error types for the CLI

use std::path::PathBuf;

use refuge_optimizer::{GridError, OptimizerError};
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Grid file error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Grid generation failed
    #[error("Grid generation failed for n={size} trial {trial}: {source}")]
    Generate {
        size: usize,
        trial: usize,
        #[source]
        source: GridError,
    },

    /// A strategy failed to run
    #[error("Solve failed for n={size} trial {trial}: {source}")]
    Solve {
        size: usize,
        trial: usize,
        #[source]
        source: OptimizerError,
    },

    /// Strategies disagreed on the score
    #[error("Inconsistent scores for n={size} trial {trial}: {scores}")]
    Mismatch {
        size: usize,
        trial: usize,
        scores: String,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// One `Multiple` holding the failures of both sides, each flattened
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.flatten();
        errors.extend(second.flatten());
        ExecutorError::Multiple(errors).into()
    }

    /// Folds `error` into the failures collected so far
    pub fn accumulate(collected: &mut Option<ArcExecutorError>, error: ArcExecutorError) {
        *collected = Some(match collected.take() {
            Some(previous) => Self::combine(previous, error),
            None => error,
        });
    }

    /// Individual failures; a `Multiple` yields its members
    pub fn flatten(&self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.clone(),
            _ => vec![self.clone()],
        }
    }
}

/// Grid file errors
#[derive(Error, Debug)]
pub enum InputError {
    /// Reading the file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not describe a valid grid
    #[error("Invalid grid in {}: {source}", path.display())]
    Grid {
        path: PathBuf,
        #[source]
        source: GridError,
    },
}
