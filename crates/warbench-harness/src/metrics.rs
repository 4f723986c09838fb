//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Prometheus instrumentation for benchmark runs and step verdicts."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::sync::Arc;

use prometheus::{self, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::runner::ErrorSet;

/// Shared registry type used across the harness.
pub type SharedRegistry = Arc<Registry>;

/// Produce a new shared registry.
pub fn new_registry() -> SharedRegistry {
    Arc::new(Registry::new())
}

/// Metrics published by the harness.
#[derive(Clone)]
pub struct HarnessMetrics {
    registry: SharedRegistry,
    benchmark_runs_total: IntCounterVec,
    ns_per_op: HistogramVec,
    structural_failures_total: IntCounterVec,
    dropped_errors_total: IntCounterVec,
    step_outcomes_total: IntCounterVec,
}

impl HarnessMetrics {
    /// Register the harness metric family against the provided registry.
    pub fn new(registry: SharedRegistry) -> prometheus::Result<Self> {
        let benchmark_runs_total = IntCounterVec::new(
            Opts::new(
                "warbench_benchmark_runs_total",
                "Completed benchmark runs per workload",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(benchmark_runs_total.clone()))?;

        let histogram_opts = HistogramOpts::new(
            "warbench_benchmark_ns_per_op",
            "Mean nanoseconds per workload call in the final benchmark round",
        )
        .buckets(prometheus::exponential_buckets(1_000.0, 4.0, 14)?);
        let ns_per_op = HistogramVec::new(histogram_opts, &["operation"])?;
        registry.register(Box::new(ns_per_op.clone()))?;

        let structural_failures_total = IntCounterVec::new(
            Opts::new(
                "warbench_structural_failures_total",
                "Workload calls that returned an error during benchmarking",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(structural_failures_total.clone()))?;

        let dropped_errors_total = IntCounterVec::new(
            Opts::new(
                "warbench_dropped_errors_total",
                "Sub-operation errors discarded by a full aggregator",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(dropped_errors_total.clone()))?;

        let step_outcomes_total = IntCounterVec::new(
            Opts::new(
                "warbench_step_outcomes_total",
                "Scenario steps by outcome and failure category",
            ),
            &["outcome", "category"],
        )?;
        registry.register(Box::new(step_outcomes_total.clone()))?;

        Ok(Self {
            registry,
            benchmark_runs_total,
            ns_per_op,
            structural_failures_total,
            dropped_errors_total,
            step_outcomes_total,
        })
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn observe_run(&self, operation: &str, ns_per_op: u64, errors: &ErrorSet) {
        let labels = [operation];
        self.benchmark_runs_total.with_label_values(&labels).inc();
        self.ns_per_op
            .with_label_values(&labels)
            .observe(ns_per_op as f64);
        if errors.failed_iterations > 0 {
            self.structural_failures_total
                .with_label_values(&labels)
                .inc_by(errors.failed_iterations);
        }
        if errors.dropped > 0 {
            self.dropped_errors_total
                .with_label_values(&labels)
                .inc_by(errors.dropped);
        }
    }

    /// `category` is empty for passing steps.
    pub fn record_step(&self, outcome: &str, category: &str) {
        self.step_outcomes_total
            .with_label_values(&[outcome, category])
            .inc();
    }
}

impl std::fmt::Debug for HarnessMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessMetrics").finish_non_exhaustive()
    }
}
