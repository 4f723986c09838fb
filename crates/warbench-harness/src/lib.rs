//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Scenario-driven performance acceptance harness."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! Scenarios are sequences of Given/When/Then steps. Given steps place inputs
//! into an immutable [`ScenarioState`], When steps benchmark a [`Workload`]
//! through the [`BenchmarkRunner`], and Then steps compare the stored result
//! against a threshold or the collected errors.

pub mod aggregator;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod state;
pub mod suite;
pub mod threshold;
pub mod workload;

pub use aggregator::{DrainedErrors, ErrorAggregator, MAX_PREALLOCATED_ERRORS};
pub use error::{HarnessError, RequireState, Result, StateError, StepError, ThresholdError, ValidationError};
pub use metrics::{new_registry, HarnessMetrics, SharedRegistry};
pub use orchestrator::{
    compile_pattern, Scenario, ScenarioPhase, ScenarioReport, ScenarioStatus, ScenarioStep,
    StepArgs, StepContext, StepKeyword, StepKind, StepOrchestrator, StepRegistry, StepReport,
    StepStatus, SuiteReport,
};
pub use report::{cucumber_json, render_pretty, write_cucumber_json, FeatureRun, CUCUMBER_REPORT_FILE};
pub use runner::{BenchmarkOutcome, BenchmarkResult, BenchmarkRunner, ErrorSet, STRUCTURAL_ERROR_PREFIX};
pub use state::{ScenarioState, StateKey, StateValue};
pub use suite::Suite;
pub use threshold::{PerItemBound, PerItemVerdict, PerOperationBound, PerOperationVerdict};
pub use workload::{ErrorSink, Repetitions, Workload, WorkloadError};
