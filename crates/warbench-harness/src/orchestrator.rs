//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Binds scenario step text to state updates, benchmark runs and assertions."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! Step patterns are plain phrases with placeholders:
//!
//! * `{int}` a signed integer
//! * `{word}` a run of word characters
//! * `{string}` a single-quoted string, captured without the quotes
//! * `{a|b|c}` one of the listed alternatives
//! * `(s)` optional literal text
//!
//! Each scenario walks `Idle -> Given -> When -> Then -> Passed | Failed`. The
//! first failing step ends the scenario and the remaining steps are skipped.

use std::fmt;
use std::time::Instant;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use warbench_logging::{log_step_event, LogContext, StepEventOutcome};

use crate::error::{Result, StepError};
use crate::metrics::HarnessMetrics;
use crate::runner::BenchmarkRunner;
use crate::state::ScenarioState;

/// Keyword a step line starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        }
    }

    fn kind(&self) -> Option<StepKind> {
        match self {
            StepKeyword::Given => Some(StepKind::Given),
            StepKeyword::When => Some(StepKind::When),
            StepKeyword::Then => Some(StepKind::Then),
            StepKeyword::And | StepKeyword::But => None,
        }
    }
}

/// What a bound step does: establish state, run a workload, or assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StepKind {
    Given,
    When,
    Then,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Given => "given",
            StepKind::When => "when",
            StepKind::Then => "then",
        };
        f.write_str(label)
    }
}

/// Per-scenario state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPhase {
    Idle,
    Given,
    When,
    Then,
    Passed,
    Failed,
}

impl ScenarioPhase {
    fn rank(&self) -> u8 {
        match self {
            ScenarioPhase::Idle => 0,
            ScenarioPhase::Given => 1,
            ScenarioPhase::When => 2,
            ScenarioPhase::Then => 3,
            ScenarioPhase::Passed | ScenarioPhase::Failed => 4,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenarioPhase::Passed | ScenarioPhase::Failed)
    }

    /// Move to the phase of the next step. Going backwards is allowed but reported.
    pub fn advance(self, kind: StepKind) -> (ScenarioPhase, bool) {
        let next = match kind {
            StepKind::Given => ScenarioPhase::Given,
            StepKind::When => ScenarioPhase::When,
            StepKind::Then => ScenarioPhase::Then,
        };
        (next, next.rank() >= self.rank())
    }
}

/// One step line of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioStep {
    pub keyword: StepKeyword,
    pub text: String,
}

impl ScenarioStep {
    pub fn new(keyword: StepKeyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
        }
    }

    /// Split `"Given the player ..."` into keyword and text.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace)?;
        let keyword = match head {
            "Given" => StepKeyword::Given,
            "When" => StepKeyword::When,
            "Then" => StepKeyword::Then,
            "And" => StepKeyword::And,
            "But" => StepKeyword::But,
            _ => return None,
        };
        let text = rest.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self::new(keyword, text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

/// Values captured from step text by the pattern placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepArgs {
    step: String,
    captures: Vec<String>,
}

impl StepArgs {
    pub fn new(step: impl Into<String>, captures: Vec<String>) -> Self {
        Self {
            step: step.into(),
            captures,
        }
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn text(&self, index: usize) -> Result<&str> {
        self.captures
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.invalid(index, "missing argument".to_owned()))
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        let raw = self.text(index)?;
        raw.parse::<i64>()
            .map_err(|err| self.invalid(index, format!("'{raw}' is not an integer: {err}")))
    }

    fn invalid(&self, index: usize, reason: String) -> StepError {
        StepError::InvalidArgument {
            step: self.step.clone(),
            index,
            reason,
        }
    }
}

/// Ambient data available to a step handler.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    scenario: &'a str,
    step: &'a str,
    runner: &'a BenchmarkRunner,
}

impl<'a> StepContext<'a> {
    pub fn new(scenario: &'a str, step: &'a str, runner: &'a BenchmarkRunner) -> Self {
        Self {
            scenario,
            step,
            runner,
        }
    }

    pub fn scenario(&self) -> &'a str {
        self.scenario
    }

    pub fn step(&self) -> &'a str {
        self.step
    }

    pub fn runner(&self) -> &'a BenchmarkRunner {
        self.runner
    }

    pub fn log_context(&self) -> LogContext<'a> {
        LogContext::new()
            .with_scenario(self.scenario)
            .with_step(self.step)
    }
}

type Handler =
    dyn Fn(&ScenarioState, &StepArgs, &StepContext<'_>) -> Result<ScenarioState> + Send + Sync;

pub struct StepBinding {
    kind: StepKind,
    pattern: String,
    regex: Regex,
    handler: Box<Handler>,
}

impl StepBinding {
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for StepBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepBinding")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Ordered set of step bindings. The first matching binding wins.
#[derive(Debug, Default)]
pub struct StepRegistry {
    bindings: Vec<StepBinding>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn given<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&ScenarioState, &StepArgs, &StepContext<'_>) -> Result<ScenarioState>
            + Send
            + Sync
            + 'static,
    {
        self.register(StepKind::Given, pattern, Box::new(handler))
    }

    pub fn when<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&ScenarioState, &StepArgs, &StepContext<'_>) -> Result<ScenarioState>
            + Send
            + Sync
            + 'static,
    {
        self.register(StepKind::When, pattern, Box::new(handler))
    }

    /// Assertions read the state and hand it on unchanged.
    pub fn then<F>(&mut self, pattern: &str, assertion: F) -> Result<&mut Self>
    where
        F: Fn(&ScenarioState, &StepArgs, &StepContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.register(
            StepKind::Then,
            pattern,
            Box::new(move |state, args, ctx| {
                assertion(state, args, ctx)?;
                Ok(state.clone())
            }),
        )
    }

    fn register(
        &mut self,
        kind: StepKind,
        pattern: &str,
        handler: Box<Handler>,
    ) -> Result<&mut Self> {
        let regex = compile_pattern(pattern)?;
        self.bindings.push(StepBinding {
            kind,
            pattern: pattern.to_owned(),
            regex,
            handler,
        });
        Ok(self)
    }

    pub fn bindings(&self) -> &[StepBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn find(&self, text: &str) -> Result<(&StepBinding, StepArgs)> {
        for binding in &self.bindings {
            if let Some(captures) = binding.regex.captures(text) {
                let values = captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_owned())
                    .collect();
                return Ok((binding, StepArgs::new(text, values)));
            }
        }
        Err(StepError::Undefined {
            text: text.to_owned(),
        })
    }
}

/// Translate a step phrase into an anchored regular expression.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut source = String::from("^");
    let mut literal = String::new();
    let mut chars = pattern.chars();

    let flush = |literal: &mut String, source: &mut String| {
        source.push_str(&regex::escape(literal));
        literal.clear();
    };

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                flush(&mut literal, &mut source);
                let inner: String = chars.by_ref().take_while(|c| *c != '}').collect();
                match inner.as_str() {
                    "int" => source.push_str(r"(-?\d+)"),
                    "word" => source.push_str(r"(\w+)"),
                    "string" => source.push_str(r"'([^']*)'"),
                    alternatives if alternatives.contains('|') => {
                        let escaped: Vec<String> =
                            alternatives.split('|').map(regex::escape).collect();
                        source.push('(');
                        source.push_str(&escaped.join("|"));
                        source.push(')');
                    }
                    other => {
                        literal.push('{');
                        literal.push_str(other);
                        literal.push('}');
                    }
                }
            }
            '(' => {
                flush(&mut literal, &mut source);
                let inner: String = chars.by_ref().take_while(|c| *c != ')').collect();
                source.push_str("(?:");
                source.push_str(&regex::escape(&inner));
                source.push_str(")?");
            }
            other => literal.push(other),
        }
    }
    flush(&mut literal, &mut source);
    source.push('$');

    Regex::new(&source).map_err(|source_err| StepError::InvalidPattern {
        pattern: pattern.to_owned(),
        source: source_err,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
    Undefined,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub keyword: StepKeyword,
    pub text: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    pub duration_ns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Undefined,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub status: ScenarioStatus,
    pub steps: Vec<StepReport>,
    pub final_state: ScenarioState,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// The failing step, if any.
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
    /// Scenarios never started because an earlier one failed.
    pub not_run: usize,
}

impl SuiteReport {
    pub fn count(&self, status: ScenarioStatus) -> usize {
        self.scenarios
            .iter()
            .filter(|scenario| scenario.status == status)
            .count()
    }

    /// True when any scenario failed. Undefined scenarios do not count.
    pub fn has_failures(&self) -> bool {
        self.count(ScenarioStatus::Failed) > 0
    }

    pub fn success(&self) -> bool {
        self.not_run == 0
            && self
                .scenarios
                .iter()
                .all(|scenario| scenario.status == ScenarioStatus::Passed)
    }
}

/// Composes step bindings with the benchmark runner and executes scenarios.
#[derive(Debug)]
pub struct StepOrchestrator {
    registry: StepRegistry,
    runner: BenchmarkRunner,
    strict: bool,
    stop_on_failure: bool,
    metrics: Option<HarnessMetrics>,
}

impl StepOrchestrator {
    pub fn new(registry: StepRegistry, runner: BenchmarkRunner) -> Self {
        Self {
            registry,
            runner,
            strict: true,
            stop_on_failure: true,
            metrics: None,
        }
    }

    /// Undefined steps fail the scenario when strict, otherwise mark it undefined.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_stop_on_failure(mut self, stop_on_failure: bool) -> Self {
        self.stop_on_failure = stop_on_failure;
        self
    }

    pub fn with_metrics(mut self, metrics: HarnessMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn runner(&self) -> &BenchmarkRunner {
        &self.runner
    }

    /// Run one step against `state`, returning the next snapshot.
    pub fn run_step(
        &self,
        scenario: &str,
        state: &ScenarioState,
        text: &str,
    ) -> Result<ScenarioState> {
        let (binding, args) = self.registry.find(text)?;
        let ctx = StepContext::new(scenario, text, &self.runner);
        debug!(scenario, step = text, pattern = %binding.pattern, kind = %binding.kind, "running step");
        (binding.handler)(state, &args, &ctx)
    }

    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let mut state = ScenarioState::new();
        let mut phase = ScenarioPhase::Idle;
        let mut status = ScenarioStatus::Passed;
        let mut previous_kind = StepKind::Given;
        let mut reports = Vec::with_capacity(scenario.steps.len());

        for step in &scenario.steps {
            let log_ctx = LogContext::new()
                .with_scenario(&scenario.name)
                .with_step(&step.text);
            if status != ScenarioStatus::Passed {
                log_step_event(Some(&log_ctx), "step.skipped", "earlier step did not pass", StepEventOutcome::Skipped);
                reports.push(StepReport {
                    keyword: step.keyword,
                    text: step.text.clone(),
                    status: StepStatus::Skipped,
                    error: None,
                    category: None,
                    duration_ns: 0,
                });
                continue;
            }

            let started = Instant::now();
            let outcome = self.run_step(&scenario.name, &state, &step.text);
            let duration_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

            let kind = step.keyword.kind().unwrap_or(previous_kind);
            previous_kind = kind;

            let (step_status, error) = match outcome {
                Ok(next) => {
                    state = next;
                    let (next_phase, in_order) = phase.advance(kind);
                    if !in_order {
                        warn!(scenario = %scenario.name, step = %step.text, from = ?phase, to = ?next_phase, "step keyword out of order");
                    }
                    phase = next_phase;
                    log_step_event(Some(&log_ctx), "step.finished", "step handed on state", StepEventOutcome::Passed);
                    self.record_metric("passed", "");
                    (StepStatus::Passed, None)
                }
                Err(err @ StepError::Undefined { .. }) if !self.strict => {
                    status = ScenarioStatus::Undefined;
                    log_step_event(Some(&log_ctx), "step.undefined", &err.to_string(), StepEventOutcome::Skipped);
                    self.record_metric("undefined", err.category());
                    (StepStatus::Undefined, Some(err))
                }
                Err(err) => {
                    status = ScenarioStatus::Failed;
                    phase = ScenarioPhase::Failed;
                    log_step_event(Some(&log_ctx), "step.failed", &err.to_string(), StepEventOutcome::Failed);
                    self.record_metric("failed", err.category());
                    (StepStatus::Failed, Some(err))
                }
            };

            reports.push(StepReport {
                keyword: step.keyword,
                text: step.text.clone(),
                status: step_status,
                category: error.as_ref().map(StepError::category),
                error: error.map(|err| err.to_string()),
                duration_ns,
            });
        }

        if status == ScenarioStatus::Passed {
            phase = ScenarioPhase::Passed;
        }
        debug!(scenario = %scenario.name, ?phase, ?status, "scenario finished");

        ScenarioReport {
            name: scenario.name.clone(),
            status,
            steps: reports,
            final_state: state,
        }
    }

    pub fn run_suite(&self, scenarios: &[Scenario]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for (idx, scenario) in scenarios.iter().enumerate() {
            let result = self.run_scenario(scenario);
            let failed = result.status == ScenarioStatus::Failed;
            report.scenarios.push(result);
            if failed && self.stop_on_failure {
                report.not_run = scenarios.len() - idx - 1;
                if report.not_run > 0 {
                    warn!(
                        scenario = %scenario.name,
                        not_run = report.not_run,
                        "stopping suite after first failed scenario"
                    );
                }
                break;
            }
        }
        report
    }

    fn record_metric(&self, outcome: &str, category: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_step(outcome, category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateKey;

    #[test]
    fn compiles_placeholders_and_optional_text() {
        let regex = compile_pattern("the player hits a wall {int} time(s)").unwrap();
        assert!(regex.is_match("the player hits a wall 1 time"));
        assert!(regex.is_match("the player hits a wall 30 times"));
        assert!(regex.is_match("the player hits a wall -2 times"));
        assert!(!regex.is_match("the player hits a wall many times"));

        let regex = compile_pattern("all {fight|guard spawning|hit wall} operations should complete without error").unwrap();
        let caps = regex
            .captures("all guard spawning operations should complete without error")
            .unwrap();
        assert_eq!(&caps[1], "guard spawning");
        assert!(!regex.is_match("all dance operations should complete without error"));

        let regex = compile_pattern("the player is in the {string} area").unwrap();
        let caps = regex.captures("the player is in the 'Hulao Gate' area").unwrap();
        assert_eq!(&caps[1], "Hulao Gate");
    }

    #[test]
    fn literal_regex_characters_are_escaped() {
        let regex = compile_pattern("latency is 1.5 ms? {int}").unwrap();
        assert!(regex.is_match("latency is 1.5 ms? 3"));
        assert!(!regex.is_match("latency is 105 m 3"));
    }

    #[test]
    fn parses_step_lines() {
        let step = ScenarioStep::parse("  And the player fights 10 enemies ").unwrap();
        assert_eq!(step.keyword, StepKeyword::And);
        assert_eq!(step.text, "the player fights 10 enemies");
        assert!(ScenarioStep::parse("Maybe the player fights").is_none());
        assert!(ScenarioStep::parse("Given").is_none());
    }

    #[test]
    fn args_parse_ints_and_report_bad_input() {
        let args = StepArgs::new("step", vec!["42".into(), "x".into()]);
        assert_eq!(args.int(0).unwrap(), 42);
        let err = args.int(1).unwrap_err();
        assert_eq!(err.category(), "argument");
        assert!(args.text(2).is_err());
    }

    #[test]
    fn phase_advances_and_flags_regressions() {
        let (phase, in_order) = ScenarioPhase::Idle.advance(StepKind::Given);
        assert_eq!(phase, ScenarioPhase::Given);
        assert!(in_order);
        let (phase, _) = phase.advance(StepKind::Then);
        let (phase, in_order) = phase.advance(StepKind::Given);
        assert_eq!(phase, ScenarioPhase::Given);
        assert!(!in_order);
        assert!(!phase.is_terminal());
    }

    fn registry() -> StepRegistry {
        let mut registry = StepRegistry::new();
        registry
            .given("the player has a level of {int}", |state, args, _| {
                Ok(state.with(StateKey::PlayerLevel, args.int(0)?))
            })
            .unwrap()
            .then("the player level is {int}", |state, args, _| {
                let level = state.player_level().map_err(|source| StepError::Linkage {
                    requirement: "player level".into(),
                    source,
                })?;
                if level != args.int(0)? {
                    return Err(StepError::InvalidArgument {
                        step: "level".into(),
                        index: 0,
                        reason: format!("level is {level}"),
                    });
                }
                Ok(())
            })
            .unwrap();
        registry
    }

    fn scenario(name: &str, lines: &[&str]) -> Scenario {
        Scenario {
            name: name.into(),
            steps: lines
                .iter()
                .map(|line| ScenarioStep::parse(line).unwrap())
                .collect(),
        }
    }

    #[test]
    fn scenario_threads_state_and_skips_after_failure() {
        let orchestrator = StepOrchestrator::new(registry(), BenchmarkRunner::default());
        let report = orchestrator.run_scenario(&scenario(
            "levels",
            &[
                "Given the player has a level of 3",
                "Then the player level is 4",
                "And the player level is 3",
            ],
        ));
        assert_eq!(report.status, ScenarioStatus::Failed);
        let statuses: Vec<_> = report.steps.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![StepStatus::Passed, StepStatus::Failed, StepStatus::Skipped]
        );
        assert_eq!(report.final_state.player_level(), Ok(3));
        assert_eq!(report.failure().unwrap().category, Some("argument"));
    }

    #[test]
    fn missing_prerequisite_is_a_linkage_failure() {
        let orchestrator = StepOrchestrator::new(registry(), BenchmarkRunner::default());
        let report = orchestrator.run_scenario(&scenario("no level", &["Then the player level is 3"]));
        assert_eq!(report.failure().unwrap().category, Some("linkage"));
    }

    #[test]
    fn undefined_steps_depend_on_strictness() {
        let lines = ["Given the player has a level of 1", "When the player dances"];
        let strict = StepOrchestrator::new(registry(), BenchmarkRunner::default());
        let report = strict.run_scenario(&scenario("strict", &lines));
        assert_eq!(report.status, ScenarioStatus::Failed);
        assert_eq!(report.failure().unwrap().category, Some("undefined"));

        let lenient = StepOrchestrator::new(registry(), BenchmarkRunner::default()).with_strict(false);
        let report = lenient.run_scenario(&scenario("lenient", &lines));
        assert_eq!(report.status, ScenarioStatus::Undefined);
        assert_eq!(report.steps[1].status, StepStatus::Undefined);
    }

    #[test]
    fn suite_stops_on_first_failure_when_configured() {
        let scenarios = vec![
            scenario("fails", &["Then the player level is 1"]),
            scenario("passes", &["Given the player has a level of 1"]),
        ];
        let stopping = StepOrchestrator::new(registry(), BenchmarkRunner::default());
        let report = stopping.run_suite(&scenarios);
        assert_eq!(report.scenarios.len(), 1);
        assert_eq!(report.not_run, 1);
        assert!(!report.success());

        let continuing =
            StepOrchestrator::new(registry(), BenchmarkRunner::default()).with_stop_on_failure(false);
        let report = continuing.run_suite(&scenarios);
        assert_eq!(report.scenarios.len(), 2);
        assert_eq!(report.count(ScenarioStatus::Passed), 1);
        assert_eq!(report.count(ScenarioStatus::Failed), 1);
    }

    #[test]
    fn undefined_scenarios_do_not_stop_a_lenient_suite() {
        let scenarios = vec![
            scenario("undefined", &["When the player dances"]),
            scenario("passes", &["Given the player has a level of 1"]),
        ];
        let lenient = StepOrchestrator::new(registry(), BenchmarkRunner::default()).with_strict(false);
        let report = lenient.run_suite(&scenarios);
        assert_eq!(report.scenarios.len(), 2);
        assert_eq!(report.not_run, 0);
        assert!(!report.has_failures());
        assert!(!report.success());
    }
}
