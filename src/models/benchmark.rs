//! Benchmark selection and run report models

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One benchmark driver run against a started container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// `node bench.js` from the TerminusDB test suite
    Js,
    /// Lego demo dataset load timed with `timejson`
    Lego,
    /// k6 HTTP load test
    K6,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Js => write!(f, "js"),
            Variant::Lego => write!(f, "lego"),
            Variant::K6 => write!(f, "k6"),
        }
    }
}

/// Benchmark kind selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkKind {
    /// Run every variant
    All,
    Single(Variant),
}

impl BenchmarkKind {
    /// Map the command line argument to a kind. Unknown values select `All`.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "js" => Self::Single(Variant::Js),
            "lego" => Self::Single(Variant::Lego),
            "k6" => Self::Single(Variant::K6),
            _ => Self::All,
        }
    }

    /// Variants to execute, in dispatch order
    pub fn variants(&self) -> &'static [Variant] {
        match self {
            // Order is fixed: js, k6, lego.
            Self::All => &[Variant::Js, Variant::K6, Variant::Lego],
            Self::Single(Variant::Js) => &[Variant::Js],
            Self::Single(Variant::Lego) => &[Variant::Lego],
            Self::Single(Variant::K6) => &[Variant::K6],
        }
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Single(variant) => write!(f, "{variant}"),
        }
    }
}

/// Result of one lifecycle step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed { code: &'static str, message: String },
}

impl Outcome {
    pub fn failed(err: &crate::error::AppError) -> Self {
        Self::Failed {
            code: err.error_code(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Outcome of a single variant
#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub variant: Variant,
    pub outcome: Outcome,
    /// Result file, when the variant produced one
    pub artifact: Option<PathBuf>,
    pub elapsed_ms: u64,
}

/// Summary of one invocation, logged when the run ends
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub commit: String,
    pub target: String,
    pub kind: BenchmarkKind,
    pub started_at: DateTime<Utc>,
    pub provision: Outcome,
    pub variants: Vec<VariantReport>,
    pub cleanup: Outcome,
}

impl RunReport {
    /// Variants in the order they were dispatched
    pub fn dispatched(&self) -> Vec<Variant> {
        self.variants.iter().map(|v| v.variant).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_arg() {
        assert_eq!(BenchmarkKind::from_arg("js"), BenchmarkKind::Single(Variant::Js));
        assert_eq!(BenchmarkKind::from_arg("lego"), BenchmarkKind::Single(Variant::Lego));
        assert_eq!(BenchmarkKind::from_arg("k6"), BenchmarkKind::Single(Variant::K6));
        assert_eq!(BenchmarkKind::from_arg("all"), BenchmarkKind::All);
        assert_eq!(BenchmarkKind::from_arg("K6"), BenchmarkKind::All);
        assert_eq!(BenchmarkKind::from_arg(""), BenchmarkKind::All);
    }

    #[test]
    fn test_default_order() {
        assert_eq!(
            BenchmarkKind::All.variants(),
            &[Variant::Js, Variant::K6, Variant::Lego]
        );
    }

    #[test]
    fn test_single_variant() {
        assert_eq!(BenchmarkKind::from_arg("lego").variants(), &[Variant::Lego]);
    }

    #[test]
    fn test_display() {
        assert_eq!(BenchmarkKind::All.to_string(), "all");
        assert_eq!(BenchmarkKind::Single(Variant::K6).to_string(), "k6");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::Failed {
            code: "COMMAND_FAILED",
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], "COMMAND_FAILED");
        assert_eq!(serde_json::to_value(Outcome::Succeeded).unwrap()["status"], "succeeded");
    }

    #[test]
    fn test_variant_report_serialization() {
        let report = VariantReport {
            variant: Variant::Lego,
            outcome: Outcome::Succeeded,
            artifact: Some(PathBuf::from("/out/lego_terminusdb_abc.json")),
            elapsed_ms: 1_250,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "lego");
        assert_eq!(json["elapsed_ms"].as_u64(), Some(1_250));
        assert_eq!(json["artifact"], "/out/lego_terminusdb_abc.json");
    }
}
