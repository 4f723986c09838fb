//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "integration-tests"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Scenario flows over the reference workloads."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use warbench_common::config::{AggregatorConfig, BenchmarkConfig, SimulationConfig};
use warbench_harness::{
    new_registry, BenchmarkRunner, HarnessMetrics, Scenario, ScenarioStatus, ScenarioStep,
    StateKey, StepOrchestrator, StepStatus,
};
use warbench_sim::{game_registry, FailureMode, WorkloadCosts, WorkloadFactory};

fn runner() -> BenchmarkRunner {
    BenchmarkRunner::new(
        BenchmarkConfig {
            min_duration: Duration::from_millis(5),
            initial_iterations: 1,
            max_iterations: 64,
        },
        AggregatorConfig::default(),
    )
}

fn orchestrator(mode: FailureMode, per_item: Duration) -> StepOrchestrator {
    let factory = WorkloadFactory::new(SimulationConfig::default())
        .with_costs(WorkloadCosts::uniform(per_item))
        .with_failure_mode(mode);
    StepOrchestrator::new(game_registry(Arc::new(factory)).unwrap(), runner())
}

fn scenario(lines: &[&str]) -> Scenario {
    Scenario {
        name: "flow".into(),
        steps: lines
            .iter()
            .map(|line| ScenarioStep::parse(line).unwrap())
            .collect(),
    }
}

#[test]
fn fight_stores_target_count_result_and_errors() {
    let orchestrator = orchestrator(FailureMode::Never, Duration::from_micros(1));
    let report = orchestrator.run_scenario(&scenario(&[
        "Given the player has a level of 2",
        "And the player is in the 'Hulao Gate' area",
        "When the player fights 10 enemies",
        "Then all fight operations should complete without error",
    ]));
    assert_eq!(report.status, ScenarioStatus::Passed, "{:?}", report.failure());
    let state = &report.final_state;
    assert_eq!(state.target_count(), Ok(10));
    assert_eq!(state.area(), Ok("Hulao Gate"));
    assert!(state.benchmark_result().unwrap().iterations >= 1);
    assert!(state.error_set().unwrap().is_empty());
}

#[test]
fn fighting_without_a_level_is_a_linkage_failure() {
    let orchestrator = orchestrator(FailureMode::Never, Duration::ZERO);
    let report = orchestrator.run_scenario(&scenario(&[
        "When the player fights 10 enemies",
        "Then the average time per enemy defeated should be less than 5 milliseconds",
    ]));
    let failure = report.failure().unwrap();
    assert_eq!(failure.category, Some("linkage"));
    assert!(failure.error.as_deref().unwrap().contains("playerLevel"));
    assert_eq!(report.steps[1].status, StepStatus::Skipped);
}

#[test]
fn non_positive_level_is_rejected_before_timing() {
    let metrics = HarnessMetrics::new(new_registry()).unwrap();
    let factory = WorkloadFactory::new(SimulationConfig::default())
        .with_costs(WorkloadCosts::uniform(Duration::ZERO));
    let orchestrator = StepOrchestrator::new(
        game_registry(Arc::new(factory)).unwrap(),
        runner().with_metrics(metrics.clone()),
    );
    let report = orchestrator.run_scenario(&scenario(&[
        "Given the player has a level of 0",
        "When the player fights 10 enemies",
    ]));
    assert_eq!(report.failure().unwrap().category, Some("validation"));
    assert!(!report.final_state.contains(StateKey::BenchmarkResult));
    let runs = metrics
        .registry()
        .gather()
        .into_iter()
        .find(|family| family.get_name() == "warbench_benchmark_runs_total");
    assert!(runs.map_or(true, |family| family.get_metric().is_empty()));
}

#[test]
fn guard_reaction_uses_per_operation_bound() {
    let orchestrator = orchestrator(FailureMode::Never, Duration::from_micros(1));
    let passing = orchestrator.run_scenario(&scenario(&[
        "When 1 guard spawns near the player",
        "Then the player reacts to all guards within 5 seconds",
    ]));
    assert!(passing.passed(), "{:?}", passing.failure());

    let failing = orchestrator.run_scenario(&scenario(&[
        "When 3 guards spawn around the player",
        "Then the player reacts to all guards within 0 seconds",
    ]));
    let failure = failing.failure().unwrap();
    assert_eq!(failure.category, Some("threshold"));
    assert!(failure
        .error
        .as_deref()
        .unwrap()
        .starts_with("expected reaction to all guards to be within 0.00 seconds"));
}

#[test]
fn zero_hits_are_rejected() {
    let orchestrator = orchestrator(FailureMode::Never, Duration::ZERO);
    let report = orchestrator.run_scenario(&scenario(&["When the player hits a wall 0 times"]));
    let failure = report.failure().unwrap();
    assert_eq!(
        failure.error.as_deref(),
        Some("number of hits must be positive, got 0")
    );
}

#[test]
fn per_enemy_failures_are_aggregated_and_dropped_past_capacity() {
    let factory = WorkloadFactory::new(SimulationConfig::default())
        .with_costs(WorkloadCosts::uniform(Duration::ZERO))
        .with_failure_mode(FailureMode::Never)
        .with_item_failure_mode(FailureMode::Always);
    let runner = BenchmarkRunner::new(
        BenchmarkConfig {
            min_duration: Duration::from_secs(3600),
            initial_iterations: 1,
            max_iterations: 4,
        },
        AggregatorConfig { slack: 1 },
    );
    let orchestrator = StepOrchestrator::new(game_registry(Arc::new(factory)).unwrap(), runner);
    let report = orchestrator.run_scenario(&scenario(&[
        "Given the player has a level of 1",
        "When the player fights 3 enemies",
        "Then all fight operations should complete without error",
    ]));

    assert_eq!(report.steps[1].status, StepStatus::Passed);
    let errors = report.final_state.error_set().unwrap();
    // 1 + 2 + 4 calls of 3 enemies each; capacity is 3 enemies + 1 slack.
    assert!(errors.structural.is_none());
    assert_eq!(errors.aggregated.len(), 4);
    assert_eq!(errors.dropped, 17);
    assert_eq!(
        errors.aggregated[0].message(),
        "enemy 1 of 3 fled the battlefield before it was defeated"
    );

    let failure = report.failure().unwrap();
    assert_eq!(failure.category, Some("operations"));
    let message = failure.error.as_deref().unwrap();
    assert!(message.contains("found 4 errors (17 dropped)"), "{message}");
}
