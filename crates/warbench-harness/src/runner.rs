//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Adaptive doubling benchmark loop."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! The runner executes a workload `n` times per round, timing only the
//! workload calls, and doubles `n` until a round lasts at least the configured
//! minimum duration or `n` reaches the iteration cap. The final round is the
//! reported result.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;
use warbench_common::config::{AggregatorConfig, BenchmarkConfig};
use warbench_common::time::duration_to_nanos;
use warbench_logging::{wb_debug, wb_error, wb_info, LogContext};

use crate::aggregator::{DrainedErrors, ErrorAggregator};
use crate::error::ValidationError;
use crate::metrics::HarnessMetrics;
use crate::workload::{Repetitions, Workload, WorkloadError};

/// Prefix applied to the structural error when it is reported with the others.
pub const STRUCTURAL_ERROR_PREFIX: &str = "benchmark function structure error";

/// Timing of the final benchmark round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkResult {
    pub iterations: u64,
    pub elapsed_ns: u64,
}

impl BenchmarkResult {
    pub fn new(iterations: u64, elapsed: Duration) -> Self {
        Self {
            iterations,
            elapsed_ns: duration_to_nanos(elapsed),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }

    /// Mean nanoseconds per workload call; `None` when no iteration ran.
    pub fn ns_per_op(&self) -> Option<u64> {
        self.elapsed_ns.checked_div(self.iterations)
    }
}

/// Errors observed during one benchmark run, as stored in scenario state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorSet {
    /// First error returned by the workload call itself.
    pub structural: Option<WorkloadError>,
    /// Calls that returned an error, including the structural one.
    pub failed_iterations: u64,
    /// Sub-operation errors recorded through the aggregator, in order.
    pub aggregated: Vec<WorkloadError>,
    /// Sub-operation errors discarded because the aggregator was full.
    pub dropped: u64,
}

impl ErrorSet {
    pub fn len(&self) -> usize {
        usize::from(self.structural.is_some()) + self.aggregated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structural.is_none() && self.aggregated.is_empty() && self.dropped == 0
    }

    /// Messages with the structural error first, then aggregated errors.
    pub fn messages(&self) -> Vec<String> {
        self.structural
            .iter()
            .map(|err| format!("{STRUCTURAL_ERROR_PREFIX}: {err}"))
            .chain(self.aggregated.iter().map(ToString::to_string))
            .collect()
    }
}

/// Everything a benchmark run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkOutcome {
    pub label: String,
    pub repetitions: Repetitions,
    pub result: BenchmarkResult,
    pub rounds: u32,
    pub errors: ErrorSet,
}

impl BenchmarkOutcome {
    pub fn structural_error(&self) -> Option<&WorkloadError> {
        self.errors.structural.as_ref()
    }

    pub fn aggregated_errors(&self) -> &[WorkloadError] {
        &self.errors.aggregated
    }
}

/// Sequential adaptive benchmark runner.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    benchmark: BenchmarkConfig,
    aggregator: AggregatorConfig,
    metrics: Option<HarnessMetrics>,
}

impl BenchmarkRunner {
    pub fn new(benchmark: BenchmarkConfig, aggregator: AggregatorConfig) -> Self {
        Self {
            benchmark,
            aggregator,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: HarnessMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.benchmark
    }

    /// Validate `count`, build the workload and benchmark it with a fresh aggregator.
    ///
    /// Nothing is timed when the count or the workload parameters are rejected.
    pub fn run_counted<W, F>(
        &self,
        what: &str,
        count: i64,
        build: F,
    ) -> Result<BenchmarkOutcome, ValidationError>
    where
        W: Workload,
        F: FnOnce(Repetitions) -> Result<W, ValidationError>,
    {
        let repetitions = Repetitions::new(what, count)?;
        let mut workload = build(repetitions)?;
        let aggregator = ErrorAggregator::for_repetitions(
            workload.label().to_owned(),
            workload.repetitions(),
            self.aggregator.slack,
        );
        Ok(self.run(&mut workload, aggregator))
    }

    /// Benchmark `workload`, recording sub-operation errors into `aggregator`.
    ///
    /// The first error returned by the workload call is kept as the structural
    /// error; later failing calls are only counted. Iterations always run to
    /// completion so the timing reaches its minimum duration.
    pub fn run<W>(&self, workload: &mut W, mut aggregator: ErrorAggregator) -> BenchmarkOutcome
    where
        W: Workload + ?Sized,
    {
        let label = workload.label().to_owned();
        let repetitions = workload.repetitions();
        let max_iterations = self.benchmark.max_iterations.max(1);
        let mut iterations = self.benchmark.initial_iterations.clamp(1, max_iterations);
        let mut structural: Option<WorkloadError> = None;
        let mut failed_iterations = 0_u64;
        let mut rounds = 0_u32;

        let result = loop {
            rounds += 1;
            let started = Instant::now();
            for _ in 0..iterations {
                if let Err(err) = workload.run(&mut aggregator) {
                    failed_iterations += 1;
                    if structural.is_none() {
                        wb_error!(
                            context = LogContext::new()
                                .with_workload(&label)
                                .with_iterations(iterations),
                            "workload call failed, later failures are only counted: {}",
                            err
                        );
                        structural = Some(err);
                    }
                }
            }
            let elapsed = started.elapsed();

            if elapsed >= self.benchmark.min_duration || iterations >= max_iterations {
                break BenchmarkResult::new(iterations, elapsed);
            }
            wb_debug!(
                context = LogContext::new()
                    .with_workload(&label)
                    .with_iterations(iterations),
                "round too short ({:?} < {:?}), doubling",
                elapsed,
                self.benchmark.min_duration
            );
            iterations = iterations.saturating_mul(2).min(max_iterations);
        };

        let DrainedErrors { errors, dropped } = aggregator.drain();
        let errors = ErrorSet {
            structural,
            failed_iterations,
            aggregated: errors,
            dropped,
        };

        let ns_per_op = result.ns_per_op().unwrap_or_default();
        wb_info!(
            context = LogContext::new()
                .with_workload(&label)
                .with_iterations(result.iterations),
            "{label} Result\t{label},{},{}",
            result.iterations,
            ns_per_op
        );
        debug!(
            operation = %label,
            repetitions = repetitions.get(),
            rounds,
            failed_iterations,
            aggregated = errors.aggregated.len(),
            dropped,
            "benchmark run finished"
        );
        if let Some(metrics) = &self.metrics {
            metrics.observe_run(&label, ns_per_op, &errors);
        }

        BenchmarkOutcome {
            label,
            repetitions,
            result,
            rounds,
            errors,
        }
    }
}
