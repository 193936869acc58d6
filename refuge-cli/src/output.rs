//! Output formatting for trial results

use crate::config::{Config, GridSource};
use crate::executor::{TrialResult, TrialRun};
use chrono::Local;
use itertools::Itertools;
use refuge_optimizer::{Cell, Position, Solution, Strategy};
use std::cmp::Ordering;
use std::time::{Duration, Instant};

/// Output formatter for trial results
pub struct OutputFormatter {
    quiet: bool,
    show_grid_max: usize,
    show_path: bool,
    strategies: Vec<Strategy>,
    start_time: Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(config: &Config) -> Self {
        Self {
            quiet: config.quiet,
            show_grid_max: config.show_grid_max,
            show_path: config.show_path,
            strategies: config.strategies.clone(),
            start_time: Instant::now(),
        }
    }

    /// Print the run header
    pub fn print_header(&self, config: &Config) {
        if self.quiet {
            return;
        }
        println!(
            "Budgeted collectible path run ({})",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        match &config.source {
            GridSource::File(grid) => println!("Grid file: {}x{}", grid.size(), grid.size()),
            GridSource::Random(_) => println!(
                "Sizes: {}, {} trial(s) each, seed {}",
                config.sizes.iter().join(", "),
                config.trials,
                config.seed
            ),
        }
        println!(
            "Strategies: {}",
            self.strategies.iter().map(|s| s.label()).join(", ")
        );
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &TrialResult) {
        match (&result.run, self.quiet) {
            (Ok(run), true) => println!("{}", run.solutions.first().map_or(0, |s| s.score)),
            (Ok(run), false) => self.print_full(result, run),
            (Err(e), _) => eprintln!("n={} trial {}: Error - {}", result.size, result.trial + 1, e),
        }
    }

    /// Print grid, score, per-strategy table and optional path
    fn print_full(&self, result: &TrialResult, run: &TrialRun) {
        let grid = &run.grid;
        println!();
        println!(
            "=== {}x{} grid, trial {} (budget {} moves) ===",
            result.size,
            result.size,
            result.trial + 1,
            grid.max_steps()
        );
        if grid.size() <= self.show_grid_max {
            print!("{}", grid);
            println!(
                "{} collectible(s), {} obstacle(s)",
                grid.count(Cell::Collectible),
                grid.count(Cell::Obstacle)
            );
        }

        let Some(first) = run.solutions.first() else {
            return;
        };
        if first.reached_goal() {
            println!("Max collectibles: {}", first.score);
        } else {
            println!("Max collectibles: 0 (goal unreachable)");
        }

        println!(
            "{:<18} {:>12} {:>12} {:>10}",
            "Strategy", "Time", "Memo (KB)", "Calls"
        );
        for solution in &run.solutions {
            println!(
                "{:<18} {:>12} {:>12.2} {:>10}",
                solution.strategy.label(),
                format_duration(solution.stats.elapsed),
                kib(solution.stats.memo_bytes),
                solution.stats.calls
            );
        }

        if !run.scores_agree() {
            println!(
                "✗ Scores disagree: {}",
                run.solutions
                    .iter()
                    .map(|s| format!("{}={}", s.strategy, s.score))
                    .join(", ")
            );
        }

        if self.show_path {
            println!("Path ({} moves): {}", first.moves(), format_path(&first.path));
        }
    }

    /// Print per-size averages after all results.
    /// Shows total solve time (sum of durations) and elapsed wall-clock time.
    pub fn print_summary(&self, results: &[TrialResult]) {
        if self.quiet {
            return;
        }

        println!();
        println!("--- Summary ---");
        println!(
            "{:>6} {:<18} {:>12} {:>12} {:>10}",
            "n", "Strategy", "Avg time", "Avg KB", "Avg calls"
        );

        let solved = results.iter().filter_map(|r| Some((r.size, r.run.as_ref().ok()?)));
        for (size, group) in &solved.chunk_by(|(size, _)| *size) {
            let runs: Vec<&TrialRun> = group.map(|(_, run)| run).collect();
            let averages: Vec<Average> = self
                .strategies
                .iter()
                .map(|&strategy| Average::of(strategy, &runs))
                .collect();

            for average in &averages {
                println!(
                    "{:>6} {:<18} {:>12} {:>12.2} {:>10}",
                    size,
                    average.strategy.label(),
                    format_duration(average.time),
                    kib(average.memo_bytes),
                    average.calls
                );
            }

            let find = |strategy| averages.iter().find(|a| a.strategy == strategy);
            if let (Some(dense), Some(sparse)) = (find(Strategy::Dense), find(Strategy::Sparse)) {
                println!(
                    "{:>6} dense/sparse: {:.2}x time, {:.2}x memory",
                    "",
                    ratio(dense.time.as_secs_f64(), sparse.time.as_secs_f64()),
                    ratio(dense.memo_bytes as f64, sparse.memo_bytes as f64)
                );
                println!("{:>6} {}", "", verdict(dense, sparse));
            }
        }

        let failures = results
            .iter()
            .filter(|r| !r.run.as_ref().is_ok_and(TrialRun::scores_agree))
            .count();
        let total_solve_time: Duration = results
            .iter()
            .filter_map(|r| r.run.as_ref().ok())
            .flat_map(|run| &run.solutions)
            .map(|s| s.stats.elapsed)
            .sum();

        println!();
        println!(
            "Trials: {} consistent, {} failed",
            results.len() - failures,
            failures
        );
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_duration(self.start_time.elapsed())
        );
    }
}

/// Per-size averages for one strategy
struct Average {
    strategy: Strategy,
    time: Duration,
    memo_bytes: usize,
    calls: u64,
}

impl Average {
    fn of(strategy: Strategy, runs: &[&TrialRun]) -> Self {
        let solutions: Vec<&Solution> = runs.iter().filter_map(|r| r.solution(strategy)).collect();
        let count = solutions.len().max(1);
        Self {
            strategy,
            time: solutions.iter().map(|s| s.stats.elapsed).sum::<Duration>() / count as u32,
            memo_bytes: solutions.iter().map(|s| s.stats.memo_bytes).sum::<usize>() / count,
            calls: solutions.iter().map(|s| s.stats.calls).sum::<u64>() / count as u64,
        }
    }
}

/// Which backend was faster and which used less memory
fn verdict(dense: &Average, sparse: &Average) -> String {
    let faster = match dense.time.cmp(&sparse.time) {
        Ordering::Less => "dense was faster",
        Ordering::Greater => "sparse was faster",
        Ordering::Equal => "equal speed",
    };
    let leaner = match dense.memo_bytes.cmp(&sparse.memo_bytes) {
        Ordering::Less => "dense used less memory",
        Ordering::Greater => "sparse used less memory",
        Ordering::Equal => "equal memory",
    };
    format!("{}, {}", faster, leaner)
}

fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

fn ratio(a: f64, b: f64) -> f64 {
    if b > 0.0 { a / b } else { f64::NAN }
}

/// Format a path as `(r,c) -> (r,c) -> ...`
fn format_path(path: &[Position]) -> String {
    if path.is_empty() {
        return "(none)".to_string();
    }
    path.iter()
        .map(|(row, col)| format!("({},{})", row, col))
        .join(" -> ")
}

/// Format a Duration for display
fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
