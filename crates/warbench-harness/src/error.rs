//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Error taxonomy shared by the harness components."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

use crate::state::StateKey;

/// Rejections raised before any timing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("number of {what} must be positive, got {value}")]
    NonPositiveCount { what: String, value: i64 },
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ValidationError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Lookup failures on a [`crate::ScenarioState`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("value for key '{key}' not found in scenario state")]
    Missing { key: StateKey },
    #[error("value for key '{key}' in scenario state is not of type {expected}: {found}")]
    TypeMismatch {
        key: StateKey,
        expected: &'static str,
        found: &'static str,
    },
}

impl StateError {
    pub fn key(&self) -> StateKey {
        match self {
            StateError::Missing { key } | StateError::TypeMismatch { key, .. } => *key,
        }
    }
}

/// Verdict failures produced by the threshold assertions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("target count ({label}) is zero, cannot calculate per-item performance")]
    ZeroTargetCount { label: String },
    #[error("benchmark recorded zero iterations, ns/op is undefined")]
    EmptyBenchmark,
    #[error(
        "expected {metric} to be less than {expected_ms} ms ({expected_ns}ns), but was {observed_ms:.4} ms ({observed_ns}ns)"
    )]
    PerItemExceeded {
        metric: String,
        expected_ms: u64,
        expected_ns: u64,
        observed_ms: f64,
        observed_ns: u64,
    },
    #[error("expected {metric} to be within {expected_secs:.2} seconds, but was {observed_secs:.4} seconds")]
    PerOperationExceeded {
        metric: String,
        expected_secs: f64,
        observed_secs: f64,
    },
}

/// Failure of a single scenario step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{requirement} not available: {source}")]
    Linkage {
        requirement: String,
        #[source]
        source: StateError,
    },
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
    #[error(
        "expected all '{operation}' operations to complete without error, but found {count} errors{}. First error: {first}",
        dropped_note(.dropped)
    )]
    OperationsFailed {
        operation: String,
        count: usize,
        dropped: u64,
        first: String,
    },
    #[error("argument {index} of step '{step}' is invalid: {reason}")]
    InvalidArgument {
        step: String,
        index: usize,
        reason: String,
    },
    #[error("step is undefined: {text}")]
    Undefined { text: String },
    #[error("invalid step pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl StepError {
    /// Stable category label, used for metrics and reports.
    pub fn category(&self) -> &'static str {
        match self {
            StepError::Validation(_) => "validation",
            StepError::Linkage { .. } => "linkage",
            StepError::Threshold(_) => "threshold",
            StepError::OperationsFailed { .. } => "operations",
            StepError::InvalidArgument { .. } => "argument",
            StepError::Undefined { .. } => "undefined",
            StepError::InvalidPattern { .. } => "pattern",
        }
    }
}

fn dropped_note(dropped: &u64) -> String {
    if *dropped == 0 {
        String::new()
    } else {
        format!(" ({dropped} dropped)")
    }
}

/// Failures loading suites or writing reports.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unable to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse suite {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("scenario '{scenario}' step {index} does not start with Given/When/Then/And/But: {line}")]
    InvalidStep {
        scenario: String,
        index: usize,
        line: String,
    },
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Converts state lookups into step linkage failures.
pub trait RequireState<T> {
    fn required(self, requirement: &str) -> Result<T, StepError>;
}

impl<T> RequireState<T> for Result<T, StateError> {
    fn required(self, requirement: &str) -> Result<T, StepError> {
        self.map_err(|source| StepError::Linkage {
            requirement: requirement.to_owned(),
            source,
        })
    }
}

pub type Result<T, E = StepError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkage_errors_keep_their_state_cause() {
        let missing: std::result::Result<i64, StateError> = Err(StateError::Missing {
            key: StateKey::PlayerLevel,
        });
        let err = missing.required("player level").unwrap_err();
        assert_eq!(err.category(), "linkage");
        assert!(err.to_string().starts_with("player level not available"));
        match err {
            StepError::Linkage { source, .. } => assert_eq!(source.key(), StateKey::PlayerLevel),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn operations_failure_reports_dropped_errors() {
        let failed = |dropped| StepError::OperationsFailed {
            operation: "fight".into(),
            count: 4,
            dropped,
            first: "enemy 1 of 3 escaped".into(),
        };
        assert_eq!(
            failed(17).to_string(),
            "expected all 'fight' operations to complete without error, but found 4 errors (17 dropped). First error: enemy 1 of 3 escaped"
        );
        assert!(failed(0).to_string().contains("found 4 errors. First error"));
    }

    #[test]
    fn validation_message_names_the_count() {
        let err = ValidationError::NonPositiveCount {
            what: "guards".into(),
            value: 0,
        };
        assert_eq!(err.to_string(), "number of guards must be positive, got 0");
        assert_eq!(StepError::from(err).category(), "validation");
    }
}
