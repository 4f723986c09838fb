//! ---
//! wb_section: "03-logging"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Structured logging adapters for scenario execution."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
#![warn(missing_docs)]

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for tests and development.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_test_writer())
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Scenario name the event belongs to.
    pub scenario: Option<&'a str>,
    /// Step text currently executing.
    pub step: Option<&'a str>,
    /// Workload label (e.g. `fight`).
    pub workload: Option<&'a str>,
    /// Benchmark round or iteration count.
    pub iterations: Option<u64>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scenario name.
    pub fn with_scenario(mut self, scenario: &'a str) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Attach the executing step text.
    pub fn with_step(mut self, step: &'a str) -> Self {
        self.step = Some(step);
        self
    }

    /// Attach a workload label.
    pub fn with_workload(mut self, workload: &'a str) -> Self {
        self.workload = Some(workload);
        self
    }

    /// Attach an iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }
}

/// Outcome attached to step lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEventOutcome {
    /// The step completed and handed on a valid state.
    Passed,
    /// The step failed; the scenario stops here.
    Failed,
    /// The step was not executed.
    Skipped,
}

impl StepEventOutcome {
    /// Static label used in structured fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepEventOutcome::Passed => "passed",
            StepEventOutcome::Failed => "failed",
            StepEventOutcome::Skipped => "skipped",
        }
    }
}

/// Emit a standardized step lifecycle event.
pub fn log_step_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: StepEventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    // `tracing::event!` needs a constant level.
    macro_rules! emit {
        ($level:expr) => {
            tracing::event!(
                $level,
                event,
                outcome = outcome.as_str(),
                scenario = ctx.scenario.unwrap_or(""),
                step = ctx.step.unwrap_or(""),
                workload = ctx.workload.unwrap_or(""),
                iterations = ctx.iterations.unwrap_or_default(),
                message = %message
            )
        };
    }
    match outcome {
        StepEventOutcome::Failed => emit!(Level::ERROR),
        StepEventOutcome::Passed => emit!(Level::INFO),
        StepEventOutcome::Skipped => emit!(Level::DEBUG),
    }
}
