//! Benchmark orchestrator - drives one invocation from clone to cleanup
//!
//! `Idle -> Provisioning -> Running(kind) -> Stopped -> Cleaned`
//!
//! Provisioning failures are logged and dispatch still runs. Any failure
//! inside a variant ends that variant only; the remaining variants still
//! run. A container that cannot be stopped makes the whole run fail once
//! dispatch and cleanup are done.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    constants::TERMINUSDB_REPO_URL,
    error::{AppError, AppResult},
    models::{BenchmarkKind, Outcome, RunReport, Target, Variant, VariantReport},
    state::AppState,
};

use super::{js, k6, lego};

/// Runs the full benchmark lifecycle for one target
pub struct Orchestrator {
    state: AppState,
}

impl Orchestrator {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Provision `target`, run the variants selected by `kind` and clean up.
    ///
    /// Returns the run report, or the first fatal error seen during dispatch.
    pub async fn run(&self, target: &Target, kind: BenchmarkKind) -> AppResult<RunReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id, commit = target.commit(), %kind);
        self.run_inner(run_id, target, kind).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        target: &Target,
        kind: BenchmarkKind,
    ) -> AppResult<RunReport> {
        let started_at = Utc::now();
        tracing::info!(name = %target, work_dir = %target.work_dir().display(), "Provisioning");

        let provision = match self.provision(target).await {
            Ok(()) => Outcome::Succeeded,
            Err(e) => {
                tracing::error!(error = %e, "Provisioning failed, continuing with dispatch");
                Outcome::failed(&e)
            }
        };

        let mut variants = Vec::with_capacity(kind.variants().len());
        let mut fatal = None;
        for &variant in kind.variants() {
            let started = Instant::now();
            let result = self.dispatch(variant, target).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            let (outcome, artifact) = match result {
                Ok(path) => {
                    tracing::info!(%variant, artifact = %path.display(), elapsed_ms, "Benchmark finished");
                    (Outcome::Succeeded, Some(path))
                }
                Err(e) => {
                    tracing::error!(%variant, error = %e, "Benchmark failed");
                    let outcome = Outcome::failed(&e);
                    if e.is_fatal() && fatal.is_none() {
                        fatal = Some(e);
                    }
                    (outcome, None)
                }
            };
            variants.push(VariantReport {
                variant,
                outcome,
                artifact,
                elapsed_ms,
            });
        }

        let cleanup = self.cleanup(target).await;

        let report = RunReport {
            run_id,
            commit: target.commit().to_string(),
            target: target.name().to_string(),
            kind,
            started_at,
            provision,
            variants,
            cleanup,
        };
        log_report(&report);

        match fatal {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Clone, check out and build the target image
    pub async fn provision(&self, target: &Target) -> AppResult<()> {
        let git = self.state.git();
        git.clone_repo(TERMINUSDB_REPO_URL, target.work_dir())
            .await
            .map_err(|e| provision_error("clone", e))?;
        git.checkout(target.work_dir(), target.commit())
            .await
            .map_err(|e| provision_error("checkout", e))?;
        self.state
            .containers()
            .build_image(target)
            .await
            .map_err(|e| provision_error("build", e))?;
        Ok(())
    }

    /// Run a single variant
    pub async fn dispatch(&self, variant: Variant, target: &Target) -> AppResult<PathBuf> {
        match variant {
            Variant::Js => js::run(&self.state, target).await,
            Variant::Lego => lego::run(&self.state, target).await,
            Variant::K6 => k6::run(&self.state, target).await,
        }
    }

    /// Remove the working directory and the image. Both are always attempted.
    pub async fn cleanup(&self, target: &Target) -> Outcome {
        tracing::info!(name = %target, "Cleaning up");
        let mut outcome = Outcome::Succeeded;

        let work_dir = target.work_dir();
        match tokio::fs::remove_dir_all(work_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %work_dir.display(), "Working directory already gone");
            }
            Err(e) => {
                let err = AppError::io(work_dir, e);
                tracing::warn!(error = %err, "Failed to remove working directory");
                outcome = Outcome::failed(&err);
            }
        }

        if let Err(e) = self.state.containers().remove_image(target).await {
            tracing::error!(error = %e, "Error deleting Docker image");
            if outcome.is_success() {
                outcome = Outcome::failed(&e);
            }
        }
        outcome
    }
}

fn provision_error(step: &'static str, source: AppError) -> AppError {
    AppError::Provision {
        step,
        source: Box::new(source),
    }
}

fn log_report(report: &RunReport) {
    for v in &report.variants {
        tracing::info!(
            variant = %v.variant,
            success = v.outcome.is_success(),
            elapsed_ms = v.elapsed_ms,
            "Variant summary"
        );
    }
    match serde_json::to_string(report) {
        Ok(json) => tracing::info!(report = %json, "Run finished"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize run report"),
    }
}
