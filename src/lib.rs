//! tdb-bench - TerminusDB Benchmark Harness
//!
//! Builds TerminusDB at a given commit inside Docker, runs external
//! benchmark drivers against it and collects their output.
//!
//! # Benchmarks
//!
//! - **js**: `node bench.js` from the TerminusDB test suite
//! - **lego**: timed load of the lego demo dataset
//! - **k6**: HTTP load test from `terminusdb-http-perf`
//!
//! Any other benchmark name runs all three, in the order js, k6, lego.

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::BenchmarkConfig;
pub use error::{AppError, AppResult};
pub use state::AppState;
