//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Pretty text and cucumber JSON renderings of suite results."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::HarnessError;
use crate::orchestrator::{ScenarioStatus, StepStatus, SuiteReport};
use crate::suite::Suite;

/// File name written inside the results directory.
pub const CUCUMBER_REPORT_FILE: &str = "cucumber.json";

/// A suite together with the result of running it.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRun<'a> {
    pub suite: &'a Suite,
    pub report: &'a SuiteReport,
}

#[derive(Debug, Serialize)]
struct CucumberFeature<'a> {
    uri: String,
    id: String,
    keyword: &'static str,
    name: &'a str,
    description: &'a str,
    elements: Vec<CucumberScenario<'a>>,
}

#[derive(Debug, Serialize)]
struct CucumberScenario<'a> {
    id: String,
    keyword: &'static str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    steps: Vec<CucumberStep<'a>>,
}

#[derive(Debug, Serialize)]
struct CucumberStep<'a> {
    keyword: String,
    name: &'a str,
    result: CucumberResult<'a>,
}

#[derive(Debug, Serialize)]
struct CucumberResult<'a> {
    status: StepStatus,
    duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_alphanumeric() { ch.to_ascii_lowercase() } else { '-' })
        .collect()
}

fn to_cucumber<'a>(run: &FeatureRun<'a>) -> CucumberFeature<'a> {
    let feature_id = slug(&run.suite.name);
    let elements = run
        .report
        .scenarios
        .iter()
        .map(|scenario| CucumberScenario {
            id: format!("{feature_id};{}", slug(&scenario.name)),
            keyword: "Scenario",
            name: &scenario.name,
            kind: "scenario",
            steps: scenario
                .steps
                .iter()
                .map(|step| CucumberStep {
                    keyword: format!("{} ", step.keyword.as_str()),
                    name: &step.text,
                    result: CucumberResult {
                        status: step.status,
                        duration: step.duration_ns,
                        error_message: step.error.as_deref(),
                    },
                })
                .collect(),
        })
        .collect();
    CucumberFeature {
        uri: run.suite.uri(),
        id: feature_id,
        keyword: "Feature",
        name: &run.suite.name,
        description: run.suite.description.as_deref().unwrap_or(""),
        elements,
    }
}

/// Encode runs as a cucumber JSON document.
pub fn cucumber_json(runs: &[FeatureRun<'_>]) -> Result<String, HarnessError> {
    let features: Vec<_> = runs.iter().map(to_cucumber).collect();
    Ok(serde_json::to_string_pretty(&features)?)
}

/// Write `cucumber.json` into `dir`, creating the directory when needed.
pub fn write_cucumber_json(dir: &Path, runs: &[FeatureRun<'_>]) -> Result<PathBuf, HarnessError> {
    fs::create_dir_all(dir).map_err(|source| HarnessError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(CUCUMBER_REPORT_FILE);
    let body = cucumber_json(runs)?;
    fs::write(&path, body).map_err(|source| HarnessError::Io {
        path: path.clone(),
        source,
    })?;
    info!(report = %path.display(), features = runs.len(), "cucumber report written");
    Ok(path)
}

/// Human-readable summary, one block per feature.
pub fn render_pretty(runs: &[FeatureRun<'_>]) -> String {
    let mut out = String::new();
    let mut totals = [0_usize; 3];
    let mut not_run = 0;

    for run in runs {
        let _ = writeln!(out, "Feature: {}", run.suite.name);
        for scenario in &run.report.scenarios {
            let _ = writeln!(out, "\n  Scenario: {}", scenario.name);
            for step in &scenario.steps {
                let mark = match step.status {
                    StepStatus::Passed => "ok",
                    StepStatus::Failed => "FAIL",
                    StepStatus::Skipped => "skip",
                    StepStatus::Undefined => "undef",
                };
                let _ = writeln!(out, "    [{mark:>5}] {} {}", step.keyword.as_str(), step.text);
                if let Some(error) = &step.error {
                    let _ = writeln!(out, "            {error}");
                }
            }
        }
        totals[0] += run.report.count(ScenarioStatus::Passed);
        totals[1] += run.report.count(ScenarioStatus::Failed);
        totals[2] += run.report.count(ScenarioStatus::Undefined);
        not_run += run.report.not_run;
        out.push('\n');
    }

    let [passed, failed, undefined] = totals;
    let _ = write!(
        out,
        "{} scenarios ({passed} passed, {failed} failed, {undefined} undefined",
        passed + failed + undefined
    );
    if not_run > 0 {
        let _ = write!(out, ", {not_run} not run");
    }
    out.push_str(")\n");
    out
}
