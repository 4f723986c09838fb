//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Per-item and per-operation timing assertions."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use serde::Serialize;
use tracing::info;
use warbench_common::time::{millis_to_nanos, nanos_to_millis_f64, nanos_to_secs_f64};

use crate::error::ThresholdError;
use crate::runner::BenchmarkResult;

/// Upper bound on the average time spent per item, in whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerItemBound {
    /// Human-readable metric, e.g. `average time per enemy`.
    pub metric: String,
    /// Counted items, used in the zero-count message, e.g. `numEnemies`.
    pub item_label: String,
    pub max_millis: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerItemVerdict {
    pub target_count: u64,
    pub ns_per_op: u64,
    pub observed_ns_per_item: u64,
    pub expected_max_ns_per_item: u64,
}

impl PerItemBound {
    pub fn new(metric: impl Into<String>, item_label: impl Into<String>, max_millis: u64) -> Self {
        Self {
            metric: metric.into(),
            item_label: item_label.into(),
            max_millis,
        }
    }

    /// Pass iff `ns_per_op / target_count <= max_millis` converted to ns.
    pub fn check(
        &self,
        result: &BenchmarkResult,
        target_count: u64,
    ) -> Result<PerItemVerdict, ThresholdError> {
        if target_count == 0 {
            return Err(ThresholdError::ZeroTargetCount {
                label: self.item_label.clone(),
            });
        }
        let ns_per_op = result.ns_per_op().ok_or(ThresholdError::EmptyBenchmark)?;
        let observed_ns_per_item = ns_per_op / target_count;
        let expected_max_ns_per_item = millis_to_nanos(self.max_millis);

        info!(
            metric = %self.metric,
            target_count,
            ns_per_op,
            observed_ns_per_item,
            observed_ms_per_item = nanos_to_millis_f64(observed_ns_per_item),
            expected_max_ns_per_item,
            expected_max_ms_per_item = self.max_millis,
            "per-item benchmark metric"
        );

        if observed_ns_per_item > expected_max_ns_per_item {
            return Err(ThresholdError::PerItemExceeded {
                metric: self.metric.clone(),
                expected_ms: self.max_millis,
                expected_ns: expected_max_ns_per_item,
                observed_ms: nanos_to_millis_f64(observed_ns_per_item),
                observed_ns: observed_ns_per_item,
            });
        }
        Ok(PerItemVerdict {
            target_count,
            ns_per_op,
            observed_ns_per_item,
            expected_max_ns_per_item,
        })
    }
}

/// Upper bound on one whole operation, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PerOperationBound {
    pub metric: String,
    pub max_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerOperationVerdict {
    pub ns_per_op: u64,
    pub observed_seconds: f64,
    pub expected_seconds: f64,
}

impl PerOperationBound {
    pub fn new(metric: impl Into<String>, max_seconds: f64) -> Self {
        Self {
            metric: metric.into(),
            max_seconds,
        }
    }

    pub fn check(&self, result: &BenchmarkResult) -> Result<PerOperationVerdict, ThresholdError> {
        let ns_per_op = result.ns_per_op().ok_or(ThresholdError::EmptyBenchmark)?;
        let observed_seconds = nanos_to_secs_f64(ns_per_op);

        info!(
            metric = %self.metric,
            ns_per_op,
            observed_seconds,
            expected_seconds = self.max_seconds,
            "per-operation benchmark metric"
        );

        if observed_seconds > self.max_seconds {
            return Err(ThresholdError::PerOperationExceeded {
                metric: self.metric.clone(),
                expected_secs: self.max_seconds,
                observed_secs: observed_seconds,
            });
        }
        Ok(PerOperationVerdict {
            ns_per_op,
            observed_seconds,
            expected_seconds: self.max_seconds,
        })
    }
}
