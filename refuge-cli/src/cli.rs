//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for trial execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; run every trial in order (default, keeps timings comparable)
    #[default]
    Sequential,
    /// Parallelize across grid sizes; trials of one size run sequentially
    Size,
    /// Parallelize across all size/trial combinations
    Trial,
}

/// Budgeted grid path experiment runner
#[derive(Parser, Debug)]
#[command(
    name = "refuge",
    about = "Compare dense and sparse memoization on the budgeted collectible path problem",
    version
)]
pub struct Args {
    /// Grid sizes to run (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_value = "10,20,30,40")]
    pub sizes: Vec<usize>,

    /// Trials per grid size
    #[arg(short, long, default_value_t = 3)]
    pub trials: usize,

    /// Probability that a generated cell is an obstacle
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub obstacle_probability: f64,

    /// Probability that a generated cell is a collectible
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub collectible_probability: f64,

    /// Seed for grid generation (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Solve the grid in this file instead of generating grids
    #[arg(long, conflicts_with = "sizes")]
    pub grid_file: Option<PathBuf>,

    /// Largest grid size that is printed
    #[arg(long, default_value_t = 10)]
    pub show_grid_max: usize,

    /// Print the reconstructed optimal path
    #[arg(long)]
    pub show_path: bool,

    /// Also run the bottom-up (iterative) strategy
    #[arg(long)]
    pub bottom_up: bool,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, size, or trial
    #[arg(long, value_enum, default_value = "sequential")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output scores
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["refuge"]).unwrap();
        assert_eq!(args.sizes, vec![10, 20, 30, 40]);
        assert_eq!(args.trials, 3);
        assert_eq!(args.parallelize_by, ParallelizeBy::Sequential);
        assert!(args.grid_file.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_sizes_and_verbosity() {
        let args =
            Args::try_parse_from(["refuge", "-s", "5,7", "-vv", "--parallelize-by", "trial"])
                .unwrap();
        assert_eq!(args.sizes, vec![5, 7]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.parallelize_by, ParallelizeBy::Trial);
    }

    #[test]
    fn test_negative_probability_reaches_validation() {
        let args =
            Args::try_parse_from(["refuge", "--collectible-probability", "-0.1"]).unwrap();
        assert_eq!(args.collectible_probability, -0.1);
    }

    #[test]
    fn test_grid_file_conflicts_with_sizes() {
        let result = Args::try_parse_from(["refuge", "--grid-file", "g.txt", "--sizes", "4"]);
        assert!(result.is_err());
    }
}
