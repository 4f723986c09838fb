//! ---
//! wb_section: "05-cli"
//! wb_subsection: "binary"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Loads configuration and suites, runs them and writes the report."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use prometheus::{Encoder, TextEncoder};
use tracing::{info, warn};
use warbench_common::config::HarnessConfig;
use warbench_common::logging::init_tracing;
use warbench_harness::{
    new_registry, render_pretty, write_cucumber_json, BenchmarkRunner, FeatureRun, HarnessMetrics,
    StepOrchestrator, Suite, SuiteReport,
};
use warbench_sim::{game_registry, WorkloadFactory};

const SERVICE_NAME: &str = "warbench";
const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["warbench.toml", "configs/warbench.toml"];

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Suite files to execute, in order.
    #[arg(required = true, value_name = "SUITE")]
    suites: Vec<PathBuf>,
    /// Configuration file; takes precedence over WARBENCH_CONFIG and the default locations.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for the simulated failure draws.
    #[arg(long)]
    seed: Option<u64>,
    /// Write cucumber.json here instead of printing to stdout.
    #[arg(long, value_name = "DIR")]
    results_dir: Option<PathBuf>,
    /// Report undefined steps instead of failing on them.
    #[arg(long)]
    no_strict: bool,
    /// Keep running scenarios after one fails.
    #[arg(long)]
    keep_going: bool,
    /// Disable simulated failures.
    #[arg(long)]
    no_failures: bool,
    /// Write prometheus metrics in text format to this file after the run.
    #[arg(long, value_name = "FILE")]
    metrics_out: Option<PathBuf>,
}

fn load_config(explicit: Option<&Path>) -> Result<HarnessConfig> {
    match explicit {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?
            .parse::<HarnessConfig>()
            .with_context(|| format!("failed to load config file {}", path.display())),
        None => Ok(HarnessConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES)?.config),
    }
}

fn apply_cli_overrides(config: &mut HarnessConfig, args: &RunArgs) {
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(dir) = &args.results_dir {
        config.runner.results_dir = Some(dir.clone());
    }
    if args.no_strict {
        config.runner.strict = false;
    }
    if args.keep_going {
        config.runner.stop_on_failure = false;
    }
    if args.no_failures {
        config.simulation.inject_failures = false;
    }
}

pub fn run(args: RunArgs) -> Result<ExitCode> {
    let mut config = load_config(args.config.as_deref())?;
    config.apply_env_overrides();
    apply_cli_overrides(&mut config, &args);
    config.validate()?;
    init_tracing(SERVICE_NAME, &config.logging)?;

    let suites = args
        .suites
        .iter()
        .map(|path| Suite::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = new_registry();
    let metrics = HarnessMetrics::new(registry.clone()).context("failed to register metrics")?;
    let factory = Arc::new(WorkloadFactory::new(config.simulation.clone()));
    let runner = BenchmarkRunner::new(config.benchmark.clone(), config.aggregator.clone())
        .with_metrics(metrics.clone());
    let orchestrator = StepOrchestrator::new(game_registry(factory)?, runner)
        .with_strict(config.runner.strict)
        .with_stop_on_failure(config.runner.stop_on_failure)
        .with_metrics(metrics);

    info!(
        started_at = %Utc::now().to_rfc3339(),
        suites = suites.len(),
        seed = config.simulation.seed,
        strict = config.runner.strict,
        "starting warbench run"
    );

    let mut reports: Vec<SuiteReport> = Vec::with_capacity(suites.len());
    for suite in &suites {
        let report = orchestrator.run_suite(&suite.scenarios);
        let stop = config.runner.stop_on_failure && report.has_failures();
        reports.push(report);
        if stop {
            warn!(suite = %suite.name, "suite failed, remaining suites are not run");
            break;
        }
    }

    let runs: Vec<FeatureRun<'_>> = suites
        .iter()
        .zip(&reports)
        .map(|(suite, report)| FeatureRun { suite, report })
        .collect();
    match &config.runner.results_dir {
        Some(dir) => {
            write_cucumber_json(dir, &runs)?;
        }
        None => print!("{}", render_pretty(&runs)),
    }

    if let Some(path) = &args.metrics_out {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .context("failed to encode metrics")?;
        fs::write(path, buffer)
            .with_context(|| format!("unable to write metrics to {}", path.display()))?;
    }

    let skipped_suites = suites.len() - reports.len();
    let success = skipped_suites == 0 && reports.iter().all(SuiteReport::success);
    info!(success, skipped_suites, "warbench run finished");
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn list_steps() -> Result<()> {
    let factory = Arc::new(WorkloadFactory::new(HarnessConfig::default().simulation));
    let registry = game_registry(factory)?;
    for binding in registry.bindings() {
        println!("{:<5} {}", binding.kind().to_string(), binding.pattern());
    }
    Ok(())
}
