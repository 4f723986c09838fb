//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Contract every benchmarked workload satisfies."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::fmt;
use std::num::NonZeroU64;

use serde::Serialize;
use thiserror::Error;

use crate::error::ValidationError;

/// Error returned by a workload call or recorded for one of its sub-operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct WorkloadError {
    message: String,
}

impl WorkloadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Positive repetition count. Construction is the only validation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Repetitions(NonZeroU64);

impl Repetitions {
    /// Validate a raw count coming from step text. `what` names the counted items.
    pub fn new(what: &str, value: i64) -> Result<Self, ValidationError> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| ValidationError::NonPositiveCount {
                what: what.to_owned(),
                value,
            })
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Repetitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receiver for sub-operation failures observed inside a workload call.
pub trait ErrorSink {
    /// Must return promptly; implementations may drop the error but not block.
    fn record(&mut self, error: WorkloadError);
}

/// One repeatable unit of simulated work.
///
/// A single `run` may perform many sub-repetitions (fighting 100 enemies is one
/// call). Failures are returned as values; a workload must not panic.
pub trait Workload {
    /// Operation label used in logs and assertions, e.g. `fight`.
    fn label(&self) -> &str;

    /// Number of items processed per call.
    fn repetitions(&self) -> Repetitions;

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError>;
}

impl<W: Workload + ?Sized> Workload for Box<W> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn repetitions(&self) -> Repetitions {
        (**self).repetitions()
    }

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError> {
        (**self).run(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetitions_reject_zero_and_negative_counts() {
        assert_eq!(
            Repetitions::new("enemies", 0),
            Err(ValidationError::NonPositiveCount {
                what: "enemies".into(),
                value: 0
            })
        );
        assert!(Repetitions::new("hits", -3).is_err());
        assert_eq!(Repetitions::new("guards", 12).unwrap().get(), 12);
    }

    #[test]
    fn workload_error_displays_its_message() {
        let err = WorkloadError::new("the wall phased out of existence");
        assert_eq!(err.to_string(), "the wall phased out of existence");
        assert_eq!(err.message(), "the wall phased out of existence");
    }
}
