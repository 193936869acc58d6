//! Parallel executor for running trials

use crate::cli::ParallelizeBy;
use crate::config::{Config, GridSource};
use crate::error::{ArcExecutorError, ExecutorError};
use crate::generator::trial_seed;
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use refuge_optimizer::{Grid, PathOptimizer, Solution, Strategy};
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// One grid solved by every configured strategy
#[derive(Debug, Clone)]
pub struct TrialRun {
    pub grid: Grid,
    /// Solutions in strategy order
    pub solutions: Vec<Solution>,
}

impl TrialRun {
    /// Whether every strategy reported the same score
    pub fn scores_agree(&self) -> bool {
        self.solutions.iter().map(|s| s.score).all_equal()
    }

    /// Solution produced by `strategy`, if it was run
    pub fn solution(&self, strategy: Strategy) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.strategy == strategy)
    }
}

/// Result from a single trial
#[derive(Debug)]
pub struct TrialResult {
    pub size: usize,
    pub trial: usize,
    pub run: Result<TrialRun, ArcExecutorError>,
}

/// Work item representing one trial to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub size: usize,
    pub trial: usize,
}

/// Parallel executor for running trials
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    source: GridSource,
    seed: u64,
    strategies: Vec<Strategy>,
    sizes: Vec<usize>,
    trials: usize,
    parallelize_by: ParallelizeBy,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(config: &Config) -> Result<Self, ExecutorError> {
        let threads = match config.parallelize_by {
            ParallelizeBy::Sequential => 1,
            ParallelizeBy::Size | ParallelizeBy::Trial => config.thread_count,
        };
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                source: config.source.clone(),
                seed: config.seed,
                strategies: config.strategies.clone(),
                sizes: config.sizes.clone(),
                trials: config.trials,
                parallelize_by: config.parallelize_by,
            },
            thread_pool,
        })
    }

    /// Every (size, trial) pair, sizes ascending
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.sizes
            .iter()
            .cartesian_product(0..cfg.trials)
            .map(|(&size, trial)| WorkItem { size, trial })
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<TrialResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            items = work_items.len(),
            mode = ?self.sync_executor_config.parallelize_by,
            "dispatching trials"
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_trial(work, &tx, &self.sync_executor_config) {
                        ArcExecutorError::accumulate(&mut collected_error, e);
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Size => {
                let by_size: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.size)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_size, &tx)
            }
            ParallelizeBy::Trial => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<TrialResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .filter_map(|work| run_trial(work, tx, sync_executor_config).err())
                .reduce_with(ArcExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for size-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<TrialResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_trial(work, tx, sync_executor_config) {
                            ArcExecutorError::accumulate(&mut err, e);
                        }
                    }
                    err
                })
                .reduce_with(ArcExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }
}

/// Run one trial and send its result.
///
/// A trial that fails or disagrees is still sent so it can be reported in
/// order; the error is also returned so the run exits non-zero.
fn run_trial(
    work: WorkItem,
    tx: &Sender<TrialResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let run = solve_trial(work, sync_executor_config);

    let failure = match &run {
        Ok(run) if !run.scores_agree() => {
            let scores = run
                .solutions
                .iter()
                .map(|s| format!("{}={}", s.strategy, s.score))
                .join(", ");
            warn!(size = work.size, trial = work.trial, %scores, "strategies disagree");
            Some(ArcExecutorError::from(ExecutorError::Mismatch {
                size: work.size,
                trial: work.trial,
                scores,
            }))
        }
        Ok(_) => None,
        Err(e) => Some(e.clone()),
    };

    tx.send(TrialResult {
        size: work.size,
        trial: work.trial,
        run,
    })
    .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;

    failure.map_or(Ok(()), Err)
}

/// Build the trial grid and solve it with every strategy
fn solve_trial(
    work: WorkItem,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<TrialRun, ArcExecutorError> {
    let WorkItem { size, trial } = work;
    let grid = match &sync_executor_config.source {
        GridSource::File(grid) => grid.clone(),
        GridSource::Random(generator) => {
            let mut rng = StdRng::seed_from_u64(trial_seed(sync_executor_config.seed, size, trial));
            generator
                .generate(&mut rng, size)
                .map_err(|source| ExecutorError::Generate {
                    size,
                    trial,
                    source,
                })?
        }
    };

    let optimizer = PathOptimizer::new(&grid);
    let solutions = sync_executor_config
        .strategies
        .iter()
        .map(|&strategy| {
            optimizer
                .solve(strategy)
                .map_err(|source| ExecutorError::Solve {
                    size,
                    trial,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for solution in &solutions {
        info!(
            size,
            trial,
            strategy = %solution.strategy,
            score = solution.score,
            calls = solution.stats.calls,
            memo_bytes = solution.stats.memo_bytes,
            elapsed = ?solution.stats.elapsed,
            "trial solved"
        );
    }

    Ok(TrialRun { grid, solutions })
}
