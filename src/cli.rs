//! Command line interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::models::{BenchmarkKind, Target};

#[derive(Debug, Parser)]
#[command(
    name = "tdb-bench",
    version,
    about = "Build TerminusDB at a commit and benchmark it",
    long_about = None,
    after_help = "Benchmark types: js, lego, k6. Any other value runs all of them."
)]
pub struct CliArgs {
    /// Commit or ref to build and benchmark. It becomes part of the Docker
    /// image name, so Docker's lowercase tag rules apply.
    #[arg(value_name = "COMMIT_ID", value_parser = parse_commit)]
    pub commit_hash: String,

    /// Benchmark to run
    #[arg(value_name = "BENCHMARK_TYPE")]
    pub benchmark_type: String,

    /// Config file to use instead of ~/.tdb_benchmark_config.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl CliArgs {
    pub fn kind(&self) -> BenchmarkKind {
        BenchmarkKind::from_arg(&self.benchmark_type)
    }

    pub fn target(&self) -> Target {
        Target::new(&self.commit_hash)
    }
}

/// Commit references end up in image tags and directory names under /tmp
fn parse_commit(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("commit id must not be empty".to_string());
    }
    if raw.starts_with('-') {
        return Err("commit id must not start with '-'".to_string());
    }
    if raw.split('/').any(|part| part == "..") {
        return Err("commit id must not contain '..' components".to_string());
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("tdb-bench").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["abc123", "lego"]).unwrap();
        assert_eq!(args.commit_hash, "abc123");
        assert_eq!(args.kind(), BenchmarkKind::Single(Variant::Lego));
        assert_eq!(args.target().name(), "terminusdb_abc123");
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    fn test_unknown_type_runs_all() {
        assert_eq!(parse(&["abc123", "bench"]).unwrap().kind(), BenchmarkKind::All);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["abc123"]).is_err());
    }

    #[test]
    fn test_rejects_path_escaping_commit() {
        assert!(parse(&["../etc", "k6"]).is_err());
        assert!(parse(&["main/../../etc", "k6"]).is_err());
        assert!(parse(&["", "k6"]).is_err());
        assert!(parse(&["--", "-rf", "k6"]).is_err());
    }

    #[test]
    fn test_accepts_git_refs() {
        assert_eq!(parse(&["origin/main", "k6"]).unwrap().commit_hash, "origin/main");
        assert!(parse(&["v1.0-rc_2", "k6"]).is_ok());
        assert!(parse(&["v1..2", "k6"]).is_ok());
    }

    #[test]
    fn test_options() {
        let args = parse(&["abc", "js", "--config", "/etc/bench.json", "--log-format", "json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/bench.json")));
        assert_eq!(args.log_format, LogFormat::Json);
    }
}
