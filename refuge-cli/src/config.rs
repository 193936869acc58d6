//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::generator::GridGenerator;
use crate::input::load_grid;
use refuge_optimizer::{Grid, Strategy};
use std::path::{Path, PathBuf};

/// Where trial grids come from
#[derive(Debug, Clone)]
pub enum GridSource {
    /// Seeded random grids, one per size and trial
    Random(GridGenerator),
    /// A single grid loaded from disk
    File(Grid),
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Grid sizes, ascending and deduplicated
    pub sizes: Vec<usize>,
    /// Trials per size
    pub trials: usize,
    /// Grid source
    pub source: GridSource,
    /// Base seed for generated grids
    pub seed: u64,
    /// Strategies compared on every grid
    pub strategies: Vec<Strategy>,
    /// Largest grid that is printed
    pub show_grid_max: usize,
    /// Whether to print reconstructed paths
    pub show_path: bool,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, validating probabilities and sizes
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        if args.trials == 0 {
            return Err(CliError::Config("--trials must be at least 1".to_string()));
        }

        let (source, sizes, trials) = match &args.grid_file {
            Some(path) => {
                let grid = load_grid(&expand_tilde(path))?;
                let size = grid.size();
                (GridSource::File(grid), vec![size], 1)
            }
            None => {
                validate_sizes(&args.sizes)?;
                validate_probabilities(args.obstacle_probability, args.collectible_probability)?;
                let generator =
                    GridGenerator::new(args.obstacle_probability, args.collectible_probability);
                let mut sizes = args.sizes.clone();
                sizes.sort_unstable();
                sizes.dedup();
                (GridSource::Random(generator), sizes, args.trials)
            }
        };

        let mut strategies = vec![Strategy::Dense, Strategy::Sparse];
        if args.bottom_up {
            strategies.push(Strategy::BottomUp);
        }

        Ok(Config {
            sizes,
            trials,
            source,
            seed: args.seed.unwrap_or_else(rand::random),
            strategies,
            show_grid_max: args.show_grid_max,
            show_path: args.show_path,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<(), CliError> {
    if sizes.is_empty() {
        return Err(CliError::Config("at least one grid size is required".to_string()));
    }
    if let Some(bad) = sizes.iter().find(|&&n| n == 0) {
        return Err(CliError::Config(format!("invalid grid size {}", bad)));
    }
    Ok(())
}

fn validate_probabilities(obstacle: f64, collectible: f64) -> Result<(), CliError> {
    for (name, p) in [("obstacle", obstacle), ("collectible", collectible)] {
        if !(0.0..=1.0).contains(&p) {
            return Err(CliError::Config(format!(
                "{} probability {} is outside [0, 1]",
                name, p
            )));
        }
    }
    if obstacle + collectible > 1.0 {
        return Err(CliError::Config(format!(
            "obstacle and collectible probabilities sum to {} (> 1)",
            obstacle + collectible
        )));
    }
    Ok(())
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
