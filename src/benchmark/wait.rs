//! Waits around container start and stop
//!
//! TerminusDB exposes no readiness signal to the harness, so both waits are
//! fixed delays. They sit behind [`ContainerWaiter`] so a polling
//! implementation can replace them without touching the variants.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::BenchmarkConfig;

#[async_trait]
pub trait ContainerWaiter: Send + Sync {
    /// Wait until a freshly started container accepts requests
    async fn wait_for_ready(&self, container: &str);

    /// Wait until a stopped container has released its port
    async fn wait_for_release(&self, container: &str);
}

/// Unconditional sleeps of fixed length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pub ready: Duration,
    pub release: Duration,
}

impl FixedDelay {
    pub fn new(ready: Duration, release: Duration) -> Self {
        Self { ready, release }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.startup_wait(), config.release_wait())
    }
}

#[async_trait]
impl ContainerWaiter for FixedDelay {
    async fn wait_for_ready(&self, container: &str) {
        tracing::debug!(container, delay = ?self.ready, "Waiting for server startup");
        tokio::time::sleep(self.ready).await;
    }

    async fn wait_for_release(&self, container: &str) {
        tracing::debug!(container, delay = ?self.release, "Waiting for port release");
        tokio::time::sleep(self.release).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delays_sleep_for_configured_time() {
        let waiter = FixedDelay::new(Duration::from_secs(5), Duration::from_secs(30));

        let start = tokio::time::Instant::now();
        waiter.wait_for_ready("terminusdb_abc").await;
        let after_ready = start.elapsed();
        assert!(after_ready >= Duration::from_secs(5));
        assert!(after_ready < Duration::from_secs(6));

        waiter.wait_for_release("terminusdb_abc").await;
        let after_release = start.elapsed();
        assert!(after_release >= Duration::from_secs(35));
        assert!(after_release < Duration::from_secs(36));
    }
}
