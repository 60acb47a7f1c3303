//! Docker container management for benchmarking
//!
//! The TerminusDB image is built from the checkout and run detached with the
//! demo data folder mounted. All calls go through the `docker` CLI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    constants::{DEMO_DATA_MOUNT, SERVER_PORT},
    error::{AppError, AppResult},
    models::Target,
};

use super::{
    process::{CommandOutput, CommandRunner, CommandSpec},
    wait::ContainerWaiter,
};

/// Docker container manager for benchmark execution
#[derive(Clone)]
pub struct ContainerManager {
    runner: Arc<dyn CommandRunner>,
    waiter: Arc<dyn ContainerWaiter>,
    demo_data: PathBuf,
}

impl ContainerManager {
    /// Create a new container manager
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        waiter: Arc<dyn ContainerWaiter>,
        demo_data: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            waiter,
            demo_data: demo_data.into(),
        }
    }

    /// Build the image for `target` from its checkout
    pub async fn build_image(&self, target: &Target) -> AppResult<()> {
        tracing::info!(image = %target, "Building Docker image");
        let spec = CommandSpec::new("docker")
            .args(["buildx", "build", ".", "--tag", target.name()])
            .current_dir(target.work_dir());
        let output = self.runner.run(&spec).await?;

        let log = output.stdout_lossy();
        if !log.trim().is_empty() {
            tracing::info!(image = %target, "{}", log.trim_end());
        }
        Ok(())
    }

    /// Start a detached container and wait for the server to come up
    pub async fn start(&self, target: &Target) -> AppResult<()> {
        tracing::info!(container = %target, "Starting container");
        let spec = CommandSpec::new("docker").args([
            "run".to_string(),
            "--rm".to_string(),
            "--detach".to_string(),
            "-v".to_string(),
            format!("{}:{}", self.demo_data.display(), DEMO_DATA_MOUNT),
            "--name".to_string(),
            target.name().to_string(),
            "-p".to_string(),
            format!("{SERVER_PORT}:{SERVER_PORT}"),
            target.name().to_string(),
        ]);
        self.runner.run(&spec).await?;

        self.waiter.wait_for_ready(target.name()).await;
        Ok(())
    }

    /// `docker exec <container> <command...>` as a spec, for wrapping by
    /// other tools
    pub fn exec_spec<I, S>(&self, target: &Target, command: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new("docker")
            .args(["exec", target.name()])
            .args(command)
    }

    /// Run a command inside the running container
    pub async fn exec<I, S>(&self, target: &Target, command: I) -> AppResult<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = self.exec_spec(target, command);
        tracing::debug!(container = %target, cmd = %spec, "Executing in container");
        self.runner.run(&spec).await
    }

    /// Stop the container and wait for its resources to be released.
    ///
    /// Failure is reported as [`AppError::ContainerStop`].
    pub async fn stop(&self, target: &Target) -> AppResult<()> {
        tracing::info!(container = %target, "Stopping container");
        let spec = CommandSpec::new("docker").args(["stop", target.name()]);
        self.runner
            .run(&spec)
            .await
            .map_err(|source| AppError::ContainerStop {
                container: target.name().to_string(),
                source: Box::new(source),
            })?;

        self.waiter.wait_for_release(target.name()).await;
        Ok(())
    }

    /// Start the container, run `body`, then stop the container.
    ///
    /// The container is stopped whether or not `body` succeeds. A failed stop
    /// takes precedence over the body's result.
    pub async fn with_running<F, Fut, T>(&self, target: &Target, body: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.start(target).await?;

        let result = body().await;
        if let Err(e) = &result {
            tracing::error!(container = %target, error = %e, "Benchmark step failed");
        }

        self.stop(target).await?;
        result
    }

    /// Force-remove the image built for `target`
    pub async fn remove_image(&self, target: &Target) -> AppResult<()> {
        tracing::info!(image = %target, "Removing Docker image");
        let spec = CommandSpec::new("docker").args(["rmi", "--force", target.name()]);
        self.runner.run(&spec).await?;
        Ok(())
    }
}
