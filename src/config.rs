//! Benchmark configuration management
//!
//! The configuration is a small JSON document in the user's home directory.
//! It is loaded once at startup, before any external process is spawned, and
//! is immutable afterwards.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_K6_ITERATIONS, DEFAULT_RELEASE_WAIT_SECS,
    DEFAULT_STARTUP_WAIT_SECS,
};

/// Benchmark configuration loaded from `~/.tdb_benchmark_config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// Host directory mounted into the container as demo data
    pub lego_demo_folder: PathBuf,
    /// Directory benchmark result files are written into
    #[serde(rename = "benchmark_output_folder")]
    pub output_folder: PathBuf,
    /// Seconds to wait after starting a container
    #[serde(default = "default_startup_wait_secs")]
    pub startup_wait_secs: u64,
    /// Seconds to wait after stopping a container
    #[serde(default = "default_release_wait_secs")]
    pub release_wait_secs: u64,
    /// Iterations passed to `k6 run`
    #[serde(default = "default_k6_iterations")]
    pub k6_iterations: u32,
}

fn default_startup_wait_secs() -> u64 {
    DEFAULT_STARTUP_WAIT_SECS
}

fn default_release_wait_secs() -> u64 {
    DEFAULT_RELEASE_WAIT_SECS
}

fn default_k6_iterations() -> u32 {
    DEFAULT_K6_ITERATIONS
}

impl BenchmarkConfig {
    /// Resolve the configuration path.
    ///
    /// An explicit path wins, then `TDB_BENCHMARK_CONFIG`, then the file in
    /// `$HOME`.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingHome)?;
        Ok(PathBuf::from(home).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the resolved path
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::resolve_path(explicit)?;
        Self::from_file(&path)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Reading benchmark configuration");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn startup_wait(&self) -> Duration {
        Duration::from_secs(self.startup_wait_secs)
    }

    pub fn release_wait(&self) -> Duration {
        Duration::from_secs(self.release_wait_secs)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOME is not set; cannot locate .tdb_benchmark_config.json")]
    MissingHome,

    #[error("Could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
