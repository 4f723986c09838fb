//! ---
//! wb_section: "02-harness"
//! wb_subsection: "integration-tests"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Runner, aggregator, state and thresholds wired together through the public API."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::time::Duration;

use warbench_common::config::{AggregatorConfig, BenchmarkConfig};
use warbench_harness::{
    new_registry, BenchmarkRunner, ErrorSink, HarnessMetrics, PerItemBound, RequireState,
    Repetitions, Scenario, ScenarioState, ScenarioStatus, ScenarioStep, StateKey, StepError,
    StepOrchestrator, StepRegistry, ValidationError, Workload, WorkloadError,
};

/// Sleeps per item and reports every `flaky_every`-th item as a sub-operation failure.
struct Batch {
    items: Repetitions,
    per_item: Duration,
    flaky_every: Option<u64>,
    processed: u64,
}

impl Workload for Batch {
    fn label(&self) -> &str {
        "batch"
    }

    fn repetitions(&self) -> Repetitions {
        self.items
    }

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError> {
        for _ in 0..self.items.get() {
            self.processed += 1;
            if !self.per_item.is_zero() {
                std::thread::sleep(self.per_item);
            }
            if let Some(every) = self.flaky_every {
                if self.processed % every == 0 {
                    sink.record(WorkloadError::new(format!("item {} dropped", self.processed)));
                }
            }
        }
        Ok(())
    }
}

fn runner(metrics: Option<HarnessMetrics>) -> BenchmarkRunner {
    let runner = BenchmarkRunner::new(
        BenchmarkConfig {
            min_duration: Duration::from_secs(3600),
            initial_iterations: 1,
            max_iterations: 8,
        },
        AggregatorConfig { slack: 2 },
    );
    match metrics {
        Some(metrics) => runner.with_metrics(metrics),
        None => runner,
    }
}

#[test]
fn sub_operation_errors_are_bounded_by_repetitions_plus_slack() {
    let outcome = runner(None)
        .run_counted("items", 4, |items| {
            Ok(Batch {
                items,
                per_item: Duration::ZERO,
                flaky_every: Some(1),
                processed: 0,
            })
        })
        .unwrap();
    // Capacity is 4 items + 2 slack; every processed item fails.
    assert_eq!(outcome.errors.aggregated.len(), 6);
    let total = outcome.errors.aggregated.len() as u64 + outcome.errors.dropped;
    assert_eq!(total, 4 * (1 + 2 + 4 + 8));
    assert_eq!(outcome.aggregated_errors()[0].message(), "item 1 dropped");
    assert!(outcome.structural_error().is_none());
}

#[test]
fn invalid_workload_parameters_surface_as_validation_errors() {
    let err = runner(None)
        .run_counted("items", 3, |_| -> Result<Batch, ValidationError> {
            Err(ValidationError::invalid("batch size", "too large"))
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid batch size: too large");
}

#[test]
fn per_item_verdict_follows_stored_state() {
    let metrics = HarnessMetrics::new(new_registry()).unwrap();
    let outcome = runner(Some(metrics.clone()))
        .run_counted("items", 5, |items| {
            Ok(Batch {
                items,
                per_item: Duration::from_micros(50),
                flaky_every: None,
                processed: 0,
            })
        })
        .unwrap();
    let state = ScenarioState::new()
        .with(StateKey::TargetCount, outcome.repetitions.get())
        .with(StateKey::BenchmarkResult, outcome.result);

    let result = state.benchmark_result().unwrap();
    let verdict = PerItemBound::new("average time per item", "numItems", 100)
        .check(result, state.target_count().unwrap())
        .unwrap();
    assert_eq!(
        verdict.observed_ns_per_item,
        result.ns_per_op().unwrap() / 5
    );
    assert!(verdict.observed_ns_per_item >= 50_000);

    let families = metrics.registry().gather();
    assert!(families
        .iter()
        .any(|family| family.get_name() == "warbench_benchmark_runs_total"));
}

#[test]
fn custom_registry_drives_a_scenario() {
    let mut registry = StepRegistry::new();
    registry
        .when("a batch of {int} items runs", |state, args, ctx| {
            let outcome = ctx.runner().run_counted("items", args.int(0)?, |items| {
                Ok(Batch {
                    items,
                    per_item: Duration::ZERO,
                    flaky_every: Some(3),
                    processed: 0,
                })
            })?;
            Ok(state
                .with(StateKey::TargetCount, outcome.repetitions.get())
                .with(StateKey::ErrorSet, outcome.errors))
        })
        .unwrap()
        .then("no batch item is dropped", |state, _, _| {
            let errors = state.error_set().required("batch errors")?;
            if errors.is_empty() {
                return Ok(());
            }
            Err(StepError::OperationsFailed {
                operation: "batch".into(),
                count: errors.len(),
                dropped: errors.dropped,
                first: errors.messages().into_iter().next().unwrap_or_default(),
            })
        })
        .unwrap();

    let orchestrator = StepOrchestrator::new(registry, runner(None));
    let scenario = Scenario {
        name: "batches".into(),
        steps: vec![
            ScenarioStep::parse("When a batch of 3 items runs").unwrap(),
            ScenarioStep::parse("Then no batch item is dropped").unwrap(),
        ],
    };
    let report = orchestrator.run_scenario(&scenario);
    assert_eq!(report.status, ScenarioStatus::Failed);
    let message = report.failure().unwrap().error.clone().unwrap();
    assert!(message.contains("First error: item 3 dropped"), "{message}");
}
