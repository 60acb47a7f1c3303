//! tdb-bench - Application Entry Point
//!
//! `tdb-bench <commit_id> <benchmark_type>`

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tdb_bench::{
    AppState, BenchmarkConfig,
    benchmark::{Orchestrator, SystemCommandRunner},
    cli::{CliArgs, LogFormat},
    constants::{DEFAULT_LOG_FILTER, exit_codes},
    error::AppError,
};

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_codes::USAGE as u8);
        }
    };

    dotenvy::dotenv().ok();
    if let Err(e) = init_tracing(args.log_format) {
        eprintln!("Failed to initialize logging: {e}");
    }

    tracing::info!("Starting tdb-bench");

    // Load configuration before touching git or docker
    let config = match BenchmarkConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::from(e);
            tracing::error!(error = %err, "Could not read config json");
            return ExitCode::from(err.exit_code() as u8);
        }
    };
    tracing::info!(
        demo_data = %config.lego_demo_folder.display(),
        output = %config.output_folder.display(),
        "Configuration loaded"
    );

    let state = AppState::new(config, Arc::new(SystemCommandRunner));
    let orchestrator = Orchestrator::new(state);

    match orchestrator.run(&args.target(), args.kind()).await {
        Ok(_) => {
            tracing::info!("tdb-bench finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Benchmark run failed");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
