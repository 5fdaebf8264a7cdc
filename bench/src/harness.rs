//! Timing harness: repeat a runner under a wall-clock timer and keep the best
//! (minimum) sample, which is the least disturbed by scheduling noise.

use crate::config::BenchConfig;
use crate::report::evaluate;
use crate::runner::{runners_for, Runner};
use crate::workload::Lookup;
use anyhow::Result;
use bench_core::types::BenchContext;
use rand::rngs::StdRng;
use std::io::Write;
use std::time::{Duration, Instant};

/// Measure wall-clock time for a synchronous operation.
pub fn measure<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

/// Timed samples collected for one runner configuration.
#[derive(Debug, Clone)]
pub struct Measurement {
    label: String,
    lookup: Lookup,
    samples: Vec<Duration>,
}

impl Measurement {
    pub fn new(runner_label: &str, lookup: Lookup) -> Self {
        let label = match lookup {
            Lookup::Local => runner_label.to_string(),
            other => format!("{runner_label} [{other}]"),
        };
        Self {
            label,
            lookup,
            samples: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lookup(&self) -> Lookup {
        self.lookup
    }

    pub fn push(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    /// Number of samples taken.
    pub fn rounds(&self) -> usize {
        self.samples.len()
    }

    pub fn best(&self) -> Option<Duration> {
        self.samples.iter().copied().min()
    }

    pub fn best_secs(&self) -> Option<f64> {
        self.best().map(|d| d.as_secs_f64())
    }
}

/// Times a runner configured for `n` calls per execution.
pub struct Timer<'a> {
    runner: &'a dyn Runner,
    n: u64,
}

impl<'a> Timer<'a> {
    pub fn new(runner: &'a dyn Runner, n: u64) -> Self {
        Self { runner, n }
    }

    /// Executes the runner `number` times under a single measurement.
    pub fn timeit(&self, number: usize, rng: &mut StdRng) -> Result<Duration> {
        let (result, elapsed) = measure(|| -> Result<()> {
            for _ in 0..number {
                self.runner.run(self.n, rng)?;
            }
            Ok(())
        });
        result?;
        Ok(elapsed)
    }

    /// Takes `rounds` samples of [`Timer::timeit`].
    pub fn repeat(&self, rounds: usize, number: usize, rng: &mut StdRng) -> Result<Measurement> {
        let mut measurement = Measurement::new(self.runner.label(), self.runner.lookup());
        for round in 0..rounds {
            let sample = self.timeit(number, rng)?;
            log::debug!(
                "{} round {}/{}: {:?}",
                measurement.label(),
                round + 1,
                rounds,
                sample
            );
            measurement.push(sample);
        }
        Ok(measurement)
    }
}

/// Times every runner for each configured lookup pattern, writing one result
/// line per configuration to `out` and nothing else.
pub fn run_suite<W: Write>(
    config: &BenchConfig,
    ctx: &BenchContext,
    out: &mut W,
) -> Result<Vec<Measurement>> {
    let mut rng = config.rng();
    let mut measurements = Vec::new();
    for &lookup in &config.lookups {
        log::info!("Measuring lookup pattern '{lookup}'");
        for runner in runners_for(ctx, lookup) {
            let timer = Timer::new(runner.as_ref(), config.ncalls);
            let measurement = timer.repeat(config.rounds, config.number, &mut rng)?;
            evaluate(out, &measurement)?;
            out.flush()?;
            measurements.push(measurement);
        }
    }
    Ok(measurements)
}
