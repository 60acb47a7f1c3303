//! Lego benchmark: timed load of the lego demo dataset
//!
//! The database and schema are created first; only the document load is
//! timed, by wrapping it in `timejson`, which writes its own report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::{
    constants::{DEMO_DATA_MOUNT, LEGO_DATABASE, LEGO_OUTPUT_PREFIX},
    error::{AppError, AppResult},
    models::Target,
    state::AppState,
};

use super::process::CommandSpec;

/// Path of the timing report for `target`
pub fn output_path(output_folder: &Path, target: &Target) -> PathBuf {
    output_folder.join(format!("{LEGO_OUTPUT_PREFIX}{}.json", target.name()))
}

fn schema_insert() -> String {
    format!("./terminusdb doc insert {LEGO_DATABASE} -f -g schema < {DEMO_DATA_MOUNT}/schema.json")
}

fn objects_insert() -> String {
    format!("./terminusdb doc insert {LEGO_DATABASE} < {DEMO_DATA_MOUNT}/objs.json")
}

pub async fn run(state: &AppState, target: &Target) -> AppResult<PathBuf> {
    tracing::info!("[LEGO BENCHMARK]");
    let docker = state.containers();
    let report = output_path(&state.config().output_folder, target);

    docker
        .with_running(target, || async {
            docker
                .exec(target, ["./terminusdb", "db", "create", LEGO_DATABASE])
                .await?;
            tracing::info!(database = LEGO_DATABASE, "Lego DB created");

            docker.exec(target, ["bash".to_string(), "-c".to_string(), schema_insert()]).await?;
            tracing::info!("Schema inserted");

            let load = docker.exec_spec(target, ["bash".to_string(), "-c".to_string(), objects_insert()]);
            let timed = CommandSpec::new("timejson")
                .arg(report.to_string_lossy())
                .arg(load.program)
                .args(load.args);

            let started = Instant::now();
            let output = state.runner().run(&timed).await?;
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                tracing::debug!(stderr = %stderr.trim_end(), "timejson stderr");
            }
            tracing::info!(
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                report = %report.display(),
                "Timejson finished"
            );
            Ok::<_, AppError>(report.clone())
        })
        .await
}
