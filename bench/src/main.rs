//! Standalone benchmark runner. Stdout carries exactly one result line per
//! configuration; the run header goes to the log and the comparison summary
//! to stderr.
//!
//! Every configuration is timed `CALLBENCH_ROUNDS` times and the best
//! (minimum) sample is reported. See [`call_bench::config`] for the
//! environment variables that override the defaults.
//!
//! Usage:
//!   cargo run --release -p call-bench
//!   CALLBENCH_NCALLS=1000000 CALLBENCH_LOOKUPS=local cargo run --release -p call-bench

use anyhow::Result;
use bench_core::types::BenchContext;
use call_bench::config::{load_dotenv, BenchConfig};
use call_bench::harness::run_suite;
use call_bench::report::print_summary;
use std::io;
use std::process;

fn run(config: &BenchConfig) -> Result<()> {
    let ctx = BenchContext::standard();

    log::info!(
        "Running call-overhead benchmark: {} calls per run, {} rounds, {} runs per round",
        config.ncalls,
        config.rounds,
        config.number
    );

    let measurements = run_suite(config, &ctx, &mut io::stdout().lock())?;
    print_summary(
        &mut io::stderr().lock(),
        &measurements,
        config.ncalls,
        config.number,
    )?;
    Ok(())
}

fn main() {
    if let Err(e) = load_dotenv() {
        eprintln!("{e:#}. Exiting.");
        process::exit(1);
    }

    let config = BenchConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e:#}. Exiting.");
        process::exit(1);
    });

    bench_core::initialize_logger(config.log_level, config.log_file.as_deref()).unwrap_or_else(
        |e| {
            eprintln!("Failed to initialize logger: {e:#}. Exiting.");
            process::exit(1);
        },
    );

    log::debug!("Configuration: {config:?}");

    if let Err(e) = run(&config) {
        log::error!("Benchmark failed: {e:#}");
        process::exit(1);
    }
}
