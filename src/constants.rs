//! Application-wide constants
//!
//! This module contains all constant values used throughout the harness.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Name of the per-user configuration file, relative to `$HOME`
pub const CONFIG_FILE_NAME: &str = ".tdb_benchmark_config.json";

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "TDB_BENCHMARK_CONFIG";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "tdb_bench=info";

// =============================================================================
// SOURCE REPOSITORIES
// =============================================================================

/// TerminusDB server repository cloned for every benchmark run
pub const TERMINUSDB_REPO_URL: &str = "https://github.com/terminusdb/terminusdb.git";

/// HTTP performance test suite used by the k6 benchmark
pub const HTTP_PERF_REPO_URL: &str = "https://github.com/terminusdb-labs/terminusdb-http-perf.git";

// =============================================================================
// TARGET NAMING
// =============================================================================

/// Prefix for the container and image name derived from a commit
pub const TARGET_NAME_PREFIX: &str = "terminusdb_";

/// Prefix for the k6 performance suite checkout directory
pub const PERF_DIR_PREFIX: &str = "perf_";

/// Base directory for working directories
pub const WORK_ROOT: &str = "/tmp";

// =============================================================================
// CONTAINER
// =============================================================================

/// Host and container port exposed by the TerminusDB server
pub const SERVER_PORT: u16 = 6363;

/// Mount point of the demo data folder inside the container
pub const DEMO_DATA_MOUNT: &str = "/app/demo_data";

/// Database created by the lego benchmark
pub const LEGO_DATABASE: &str = "admin/lego";

/// Default wait after container start in seconds
pub const DEFAULT_STARTUP_WAIT_SECS: u64 = 5;

/// Default wait after container stop in seconds
pub const DEFAULT_RELEASE_WAIT_SECS: u64 = 30;

// =============================================================================
// BENCHMARK DRIVERS
// =============================================================================

/// Default number of k6 iterations
pub const DEFAULT_K6_ITERATIONS: u32 = 10;

/// k6 entry script, relative to the performance suite checkout
pub const K6_SCRIPT: &str = "response/all.js";

/// File name of the k6 JSON output
pub const K6_OUTPUT_FILE: &str = "k6_output.json";

/// Subdirectory of the TerminusDB checkout holding the JS benchmark
pub const JS_TESTS_DIR: &str = "tests";

/// File name prefix of the JS benchmark output
pub const JS_OUTPUT_PREFIX: &str = "js_benchmark_";

/// File name prefix of the lego timing output
pub const LEGO_OUTPUT_PREFIX: &str = "lego_";

// =============================================================================
// EXIT CODES
// =============================================================================

pub mod exit_codes {
    /// Missing or invalid command line arguments
    pub const USAGE: i32 = 1;

    /// Configuration file unreadable or invalid
    pub const CONFIG: i32 = 3;

    /// Fatal orchestration failure (container could not be stopped)
    pub const FATAL: i32 = 4;
}
