//! Benchmark comparing memo backends on the budgeted collectible path problem.
//!
//! Run with: cargo run --example backend_benchmark --release
//!
//! For each grid size, a batch of seeded random grids is solved with:
//! - Dense 3D table (recursive)
//! - Sparse hash map (recursive)
//! - Bottom-up table (iterative)
//!
//! and the scores are cross-checked.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use refuge_optimizer::{Cell, Grid, PathOptimizer, Solution, Strategy};
use std::time::{Duration, Instant};

const SIZES: [usize; 4] = [10, 20, 30, 40];
const GRIDS_PER_SIZE: usize = 20;
const OBSTACLE_PROBABILITY: f64 = 0.2;
const COLLECTIBLE_PROBABILITY: f64 = 0.3;

/// Generate a random grid with open start and goal
fn generate_random_grid(seed: u64, n: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|row| {
            (0..n)
                .map(|col| {
                    let roll: f64 = rng.random();
                    if (row, col) == (0, 0) || (row, col) == (n - 1, n - 1) {
                        Cell::Empty
                    } else if roll < OBSTACLE_PROBABILITY {
                        Cell::Obstacle
                    } else if roll < OBSTACLE_PROBABILITY + COLLECTIBLE_PROBABILITY {
                        Cell::Collectible
                    } else {
                        Cell::Empty
                    }
                })
                .collect()
        })
        .collect();
    Grid::new(rows).expect("generated grid keeps start and goal open")
}

/// Totals for one strategy over a batch of grids
#[derive(Default)]
struct Totals {
    time: Duration,
    calls: u64,
    memo_bytes: usize,
}

impl Totals {
    fn add(&mut self, solution: &Solution) {
        self.time += solution.stats.elapsed;
        self.calls += solution.stats.calls;
        self.memo_bytes += solution.stats.memo_bytes;
    }
}

fn main() {
    println!("Budgeted Collectible Path Benchmark");
    println!("===================================\n");

    let sample = generate_random_grid(42, 8);
    println!("Sample grid (8x8):\n{}", sample);

    let mut all_match = true;

    for n in SIZES {
        let grids: Vec<Grid> = (0..GRIDS_PER_SIZE)
            .map(|i| generate_random_grid(42 + (n * GRIDS_PER_SIZE + i) as u64, n))
            .collect();

        println!("=== {}x{} grids ({} grids, budget {} moves) ===", n, n, GRIDS_PER_SIZE, 2 * n - 1);

        let mut totals: Vec<(Strategy, Totals)> = Strategy::ALL
            .iter()
            .map(|&strategy| (strategy, Totals::default()))
            .collect();

        let start = Instant::now();
        for (index, grid) in grids.iter().enumerate() {
            let optimizer = PathOptimizer::new(grid);
            let mut scores = Vec::with_capacity(totals.len());
            for (strategy, total) in totals.iter_mut() {
                let solution = optimizer.solve(*strategy).expect("solve failed");
                total.add(&solution);
                scores.push(solution.score);
            }
            if scores.windows(2).any(|pair| pair[0] != pair[1]) {
                println!("Mismatch at grid {}: {:?}", index, scores);
                all_match = false;
            }
        }
        let batch_time = start.elapsed();

        println!(
            "{:<18} {:>12} {:>14} {:>12}",
            "Strategy", "Time", "Memo (KB)", "Calls"
        );
        println!("{}", "-".repeat(60));
        for (strategy, total) in &totals {
            println!(
                "{:<18} {:>12} {:>14.2} {:>12}",
                strategy.label(),
                format!("{:?}", total.time / GRIDS_PER_SIZE as u32),
                total.memo_bytes as f64 / 1024.0 / GRIDS_PER_SIZE as f64,
                total.calls / GRIDS_PER_SIZE as u64
            );
        }

        let dense = &totals[0].1;
        let sparse = &totals[1].1;
        println!(
            "Dense vs sparse: {:.2}x time, {:.2}x memory",
            dense.time.as_secs_f64() / sparse.time.as_secs_f64(),
            dense.memo_bytes as f64 / sparse.memo_bytes.max(1) as f64
        );
        println!("Batch wall-clock: {:?}\n", batch_time);
    }

    if all_match {
        println!("✓ All strategies produce identical scores!");
    } else {
        println!("✗ Strategies disagree on some grids!");
    }
}
