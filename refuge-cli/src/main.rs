//! refuge - experiment runner for the budgeted collectible path optimizer

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod generator;
mod input;
mod output;

use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    let executor = Executor::new(&config).map_err(|e| error::CliError::Config(e.to_string()))?;

    let formatter = OutputFormatter::new(&config);
    formatter.print_header(&config);
    run_executor(executor, &formatter)
}

/// Run the executor and print results in (size, trial) order
fn run_executor(executor: Executor, formatter: &OutputFormatter) -> Result<(), error::CliError> {
    let expected_keys: Vec<aggregator::ResultKey> = executor
        .collect_work_items()
        .iter()
        .map(aggregator::ResultKey::from)
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected trial results were received");
    }

    formatter.print_summary(&results);

    executor_handle
        .join()
        .map_err(|_| error::CliError::Config("Executor thread panicked".to_string()))?
        .map_err(|e| {
            for failure in e.flatten() {
                warn!(%failure, "trial failed");
            }
            error::CliError::Executor(e)
        })
}
