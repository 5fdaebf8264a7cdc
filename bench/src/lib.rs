//! Call-Overhead Micro-Benchmark
//!
//! Compares what it costs to invoke the same small arithmetic workload through
//! three call shapes:
//! - **function call**: a free function taking every argument positionally
//! - **method call**: a method on an object that captured the constants at
//!   construction
//! - **coroutine.send**: a resumable state object primed once, then fed one
//!   argument pair per resumption
//!
//! Each shape is measured against three lookup patterns (no external
//! reference, a module constant, the constant plus a shared holder) so the
//! cost of reaching outside the call can be compared with the call itself.
//!
//! Run the report: `cargo run --release -p call-bench`
//! Run benchmarks: `cargo bench`
//! Run tests: `cargo test`

pub mod config;
pub mod harness;
pub mod report;
pub mod runner;
pub mod workload;
pub mod wrappers;
