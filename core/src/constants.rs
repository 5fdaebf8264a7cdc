//! Constants module - process-wide values shared by every workload variant

// =============================================================================
// External references read by the workloads
// =============================================================================

/// Module-level scale factor read by the `constant` and `holder` workloads.
pub const SCALE: f64 = 0.5;

/// Attributes of the shared constant holder.
pub const HOLDER_NAME: &str = "scale";
pub const HOLDER_VALUE: f64 = 1.5;

// =============================================================================
// Argument generation
// =============================================================================

/// Inclusive upper bound of the integer argument drawn per call.
pub const ARG_INT_MAX: i64 = 100;

// =============================================================================
// Run defaults
// =============================================================================

/// Calls performed by one runner execution
pub const DEFAULT_NCALLS: u64 = 10_000_000;
/// Timed samples taken per configuration
pub const DEFAULT_ROUNDS: usize = 5;
/// Runner executions per timed sample
pub const DEFAULT_NUMBER: usize = 1;
