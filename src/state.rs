//! Shared run state
//!
//! Handles passed to every lifecycle step: the loaded configuration, the
//! process runner and the git and docker wrappers built on top of it.

use std::sync::Arc;

use crate::benchmark::{
    container::ContainerManager,
    process::CommandRunner,
    source::SourceControl,
    wait::{ContainerWaiter, FixedDelay},
};
use crate::config::BenchmarkConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Benchmark configuration
    config: BenchmarkConfig,

    /// Runner for tools invoked directly (npm, node, k6, timejson)
    runner: Arc<dyn CommandRunner>,

    /// Docker CLI wrapper
    containers: ContainerManager,

    /// Git CLI wrapper
    git: SourceControl,
}

impl AppState {
    /// Create state with fixed-delay waits taken from the configuration
    pub fn new(config: BenchmarkConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let waiter = Arc::new(FixedDelay::from_config(&config));
        Self::with_waiter(config, runner, waiter)
    }

    /// Create state with a custom container waiter
    pub fn with_waiter(
        config: BenchmarkConfig,
        runner: Arc<dyn CommandRunner>,
        waiter: Arc<dyn ContainerWaiter>,
    ) -> Self {
        let containers =
            ContainerManager::new(runner.clone(), waiter, config.lego_demo_folder.clone());
        let git = SourceControl::new(runner.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                runner,
                containers,
                git,
            }),
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &BenchmarkConfig {
        &self.inner.config
    }

    /// Get a reference to the process runner
    pub fn runner(&self) -> &dyn CommandRunner {
        self.inner.runner.as_ref()
    }

    /// Get a reference to the container manager
    pub fn containers(&self) -> &ContainerManager {
        &self.inner.containers
    }

    /// Get a reference to the git wrapper
    pub fn git(&self) -> &SourceControl {
        &self.inner.git
    }
}
