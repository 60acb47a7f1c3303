//! Custom error types and handling
//!
//! Every external process call returns a typed result. Errors are logged by
//! the orchestrator and mapped to process exit codes by `main`.

use std::path::PathBuf;

use crate::{config::ConfigError, constants::exit_codes};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // External process errors
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}: {stderr}", exit_label(.exit_code))]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    // Filesystem errors
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Lifecycle errors
    #[error("Provisioning failed at {step}: {source}")]
    Provision {
        step: &'static str,
        #[source]
        source: Box<AppError>,
    },

    #[error("Could not stop container {container}: {source}")]
    ContainerStop {
        container: String,
        #[source]
        source: Box<AppError>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "signal".to_string(),
    }
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Spawn { .. } => "SPAWN_ERROR",
            Self::CommandFailed { .. } => "COMMAND_FAILED",
            Self::Io { .. } => "IO_ERROR",
            Self::Provision { .. } => "PROVISION_ERROR",
            Self::ContainerStop { .. } => "CONTAINER_STOP_ERROR",
        }
    }

    /// Whether this error makes the whole run fail.
    ///
    /// A failed container stop ends its own variant only; the remaining
    /// variants and cleanup still run before the process exits non-zero.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ContainerStop { .. })
    }

    /// Process exit code for errors that end the run
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_codes::CONFIG,
            _ => exit_codes::FATAL,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
