//! Report module: result lines and the per-lookup comparison table.

use crate::harness::Measurement;
use crate::workload::Lookup;
use anyhow::{anyhow, Result};
use std::io::Write;

/// `"<label>: best of <rounds>: <seconds>"`
pub fn format_result_line(label: &str, rounds: usize, best_secs: f64) -> String {
    format!("{label}: best of {rounds}: {best_secs}")
}

/// Write the result line for one measurement and return its best time in
/// seconds.
pub fn evaluate<W: Write>(out: &mut W, measurement: &Measurement) -> Result<f64> {
    let best = measurement
        .best_secs()
        .ok_or_else(|| anyhow!("no samples recorded for '{}'", measurement.label()))?;
    writeln!(
        out,
        "{}",
        format_result_line(measurement.label(), measurement.rounds(), best)
    )?;
    Ok(best)
}

/// Print a comparison of every measurement against the function-call baseline
/// of the same lookup pattern.
pub fn print_summary<W: Write>(
    out: &mut W,
    measurements: &[Measurement],
    ncalls: u64,
    number: usize,
) -> Result<()> {
    if measurements.len() < 2 {
        return Ok(());
    }

    let calls_per_sample = (ncalls as f64 * number as f64).max(1.0);

    writeln!(out, "\n{}", "=".repeat(72))?;
    writeln!(out, "  Call Overhead Summary ({ncalls} calls x {number} per sample)")?;
    writeln!(out, "{}", "=".repeat(72))?;
    writeln!(
        out,
        "  {:30} {:>12} {:>10} {:>10}",
        "Configuration", "Best (s)", "ns/call", "vs func"
    )?;
    writeln!(out, "  {}", "-".repeat(66))?;

    for lookup in Lookup::ALL {
        let group: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.lookup() == lookup)
            .collect();
        if group.is_empty() {
            continue;
        }

        let baseline = group
            .iter()
            .find(|m| m.label().starts_with("function call"))
            .and_then(|m| m.best_secs());

        for m in group {
            let Some(best) = m.best_secs() else {
                continue;
            };
            let ratio = match baseline {
                Some(base) if base > 0.0 => format!("{:.2}x", best / base),
                _ => "-".to_string(),
            };
            writeln!(
                out,
                "  {:30} {:>12.6} {:>10.2} {:>10}",
                m.label(),
                best,
                best * 1e9 / calls_per_sample,
                ratio
            )?;
        }
    }

    writeln!(out)?;
    Ok(())
}
