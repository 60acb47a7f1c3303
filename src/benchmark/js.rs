//! JS benchmark: `bench.js` from the TerminusDB test suite

use std::path::{Path, PathBuf};

use crate::{
    constants::{JS_OUTPUT_PREFIX, JS_TESTS_DIR},
    error::{AppError, AppResult},
    models::Target,
    state::AppState,
};

use super::process::CommandSpec;

/// Path of the JSON report for `target`
pub fn output_path(output_folder: &Path, target: &Target) -> PathBuf {
    output_folder.join(format!("{JS_OUTPUT_PREFIX}{}.json", target.name()))
}

/// Install the test suite dependencies, run `node bench.js --json` against a
/// running container and store its stdout.
pub async fn run(state: &AppState, target: &Target) -> AppResult<PathBuf> {
    tracing::info!("[JS BENCHMARK]");
    let tests_dir = target.work_dir().join(JS_TESTS_DIR);
    let report = output_path(&state.config().output_folder, target);

    state
        .containers()
        .with_running(target, || async {
            state
                .runner()
                .run(&CommandSpec::new("npm").arg("ci").current_dir(&tests_dir))
                .await?;

            let bench = CommandSpec::new("node")
                .args(["bench.js", "--json"])
                .current_dir(&tests_dir);
            let output = state.runner().run(&bench).await?;

            tokio::fs::write(&report, &output.stdout)
                .await
                .map_err(|e| AppError::io(&report, e))?;
            tracing::info!(report = %report.display(), "JS benchmark written");
            Ok::<_, AppError>(report.clone())
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingWaiter, ScriptedRunner};
    use std::sync::Arc;

    fn state(runner: Arc<ScriptedRunner>, out: &Path) -> AppState {
        let config = serde_json::from_value(serde_json::json!({
            "lego_demo_folder": "/data/lego",
            "benchmark_output_folder": out,
        }))
        .unwrap();
        AppState::with_waiter(config, runner, Arc::new(RecordingWaiter::default()))
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/out"), &Target::new("abc123")),
            PathBuf::from("/out/js_benchmark_terminusdb_abc123.json")
        );
    }

    #[tokio::test]
    async fn test_writes_bench_stdout() {
        let out = tempfile::tempdir().unwrap();
        let runner = Arc::new(
            ScriptedRunner::new().stdout_on(&["node", "bench.js"], br#"{"ops": 42}"#),
        );
        let target = Target::with_root("abc123", "/work");

        let report = run(&state(runner.clone(), out.path()), &target).await.unwrap();

        assert_eq!(report, out.path().join("js_benchmark_terminusdb_abc123.json"));
        assert_eq!(std::fs::read_to_string(&report).unwrap(), r#"{"ops": 42}"#);

        let calls = runner.calls();
        let lines = runner.lines();
        assert!(lines[0].starts_with("docker run"));
        assert_eq!(lines[1], "npm ci");
        assert_eq!(lines[2], "node bench.js --json");
        assert_eq!(lines[3], "docker stop terminusdb_abc123");
        assert_eq!(lines.len(), 4);
        let tests_dir = Path::new("/work/terminusdb_abc123/tests");
        assert_eq!(calls[1].current_dir.as_deref(), Some(tests_dir));
        assert_eq!(calls[2].current_dir.as_deref(), Some(tests_dir));
    }

    #[tokio::test]
    async fn test_bench_failure_writes_nothing_but_stops() {
        let out = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new().fail_on(&["node"]));
        let target = Target::new("abc123");

        let err = run(&state(runner.clone(), out.path()), &target).await.unwrap_err();

        assert!(matches!(err, AppError::CommandFailed { ref program, .. } if program == "node"));
        assert!(!output_path(out.path(), &target).exists());
        assert_eq!(runner.count(&["docker", "stop"]), 1);
    }

    #[tokio::test]
    async fn test_start_failure_skips_benchmark() {
        let out = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new().fail_on(&["docker", "run"]));

        let result = run(&state(runner.clone(), out.path()), &Target::new("abc123")).await;

        assert!(result.is_err());
        assert_eq!(runner.lines().len(), 1);
    }
}
