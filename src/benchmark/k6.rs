//! k6 benchmark: HTTP load test from the terminusdb-http-perf suite

use std::path::{Path, PathBuf};

use crate::{
    constants::{HTTP_PERF_REPO_URL, K6_OUTPUT_FILE, K6_SCRIPT},
    error::{AppError, AppResult},
    models::Target,
    state::AppState,
};

use super::process::CommandSpec;

/// Path of the k6 JSON output. Not namespaced by target.
pub fn output_path(output_folder: &Path) -> PathBuf {
    output_folder.join(K6_OUTPUT_FILE)
}

fn load_test(iterations: u32, report: &Path, script: &Path) -> CommandSpec {
    CommandSpec::new("k6").args([
        "run".to_string(),
        "--no-summary".to_string(),
        "--no-usage-report".to_string(),
        "--iterations".to_string(),
        iterations.to_string(),
        "--out".to_string(),
        format!("json={}", report.display()),
        script.to_string_lossy().into_owned(),
    ])
}

/// Clone the perf suite, run k6 against a running container and remove the
/// checkout again.
///
/// The checkout is left in place only when the container could not be
/// stopped.
pub async fn run(state: &AppState, target: &Target) -> AppResult<PathBuf> {
    tracing::info!("[K6 BENCHMARK]");
    let perf_dir = target.perf_dir();
    state.git().clone_repo(HTTP_PERF_REPO_URL, perf_dir).await?;

    let report = output_path(&state.config().output_folder);
    let spec = load_test(state.config().k6_iterations, &report, &perf_dir.join(K6_SCRIPT));

    let result = state
        .containers()
        .with_running(target, || async {
            state.runner().run(&spec).await?;
            tracing::info!(report = %report.display(), "k6 run finished");
            Ok::<_, AppError>(report.clone())
        })
        .await;

    if matches!(&result, Err(e) if e.is_fatal()) {
        return result;
    }

    if let Err(e) = tokio::fs::remove_dir_all(perf_dir).await {
        tracing::warn!(dir = %perf_dir.display(), error = %e, "Failed to remove perf checkout");
    }
    result
}
