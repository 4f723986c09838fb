//! ---
//! wb_section: "01-core-functionality"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Shared primitives and utilities for the harness runtime."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_min_duration() -> Duration {
    Duration::from_secs(1)
}

fn default_initial_iterations() -> u64 {
    1
}

fn default_max_iterations() -> u64 {
    1_000_000_000
}

fn default_aggregator_slack() -> usize {
    10
}

fn default_simulation_seed() -> u64 {
    0x5EED_u64
}

fn default_failure_one_in() -> u32 {
    1000
}

fn default_item_failure_one_in() -> u32 {
    100_000
}

fn default_failure_sentinel() -> u32 {
    7
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a harness run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Metadata describing where a [`HarnessConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedHarnessConfig {
    pub config: HarnessConfig,
    /// `None` when no candidate existed and built-in defaults were used.
    pub source: Option<PathBuf>,
}

impl HarnessConfig {
    pub const ENV_CONFIG_PATH: &'static str = "WARBENCH_CONFIG";
    pub const ENV_RESULTS_DIR: &'static str = "BENCHMARK_RESULTS_DIR";

    /// Load configuration from disk, respecting the `WARBENCH_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// Falls back to defaults when neither the environment override nor any
    /// candidate exists. An override that points to a missing file is an error.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedHarnessConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedHarnessConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedHarnessConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!(
            inspected = %candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            "no configuration file found, using defaults"
        );
        Ok(LoadedHarnessConfig {
            config: Self::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        contents
            .parse::<Self>()
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Apply `BENCHMARK_RESULTS_DIR` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_results_dir_override(std::env::var(Self::ENV_RESULTS_DIR).ok());
    }

    /// Point report output at `dir` when it is set and non-empty.
    pub fn apply_results_dir_override(&mut self, dir: Option<String>) {
        if let Some(dir) = dir.filter(|value| !value.trim().is_empty()) {
            self.runner.results_dir = Some(PathBuf::from(dir));
        }
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.benchmark.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for HarnessConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: HarnessConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Adaptive benchmark loop settings.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Elapsed time a round must reach before its timing is trusted.
    #[serde(default = "default_min_duration", rename = "min_duration_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub min_duration: Duration,
    #[serde(default = "default_initial_iterations")]
    pub initial_iterations: u64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            min_duration: default_min_duration(),
            initial_iterations: default_initial_iterations(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_iterations == 0 {
            return Err(anyhow!("benchmark.initial_iterations must be at least 1"));
        }
        if self.max_iterations < self.initial_iterations {
            return Err(anyhow!(
                "benchmark.max_iterations ({}) must not be below initial_iterations ({})",
                self.max_iterations,
                self.initial_iterations
            ));
        }
        Ok(())
    }
}

/// Sizing of the per-run error aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Extra slots allocated on top of the repetition count.
    #[serde(default = "default_aggregator_slack")]
    pub slack: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            slack: default_aggregator_slack(),
        }
    }
}

/// Failure injection settings for the reference workloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_simulation_seed")]
    pub seed: u64,
    #[serde(default = "default_true")]
    pub inject_failures: bool,
    /// A call fails when a draw in `0..failure_one_in` equals `failure_sentinel`.
    #[serde(default = "default_failure_one_in")]
    pub failure_one_in: u32,
    #[serde(default = "default_failure_sentinel")]
    pub failure_sentinel: u32,
    /// Same draw per processed item; a hit is recorded as a sub-operation error.
    #[serde(default = "default_item_failure_one_in")]
    pub item_failure_one_in: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_simulation_seed(),
            inject_failures: true,
            failure_one_in: default_failure_one_in(),
            failure_sentinel: default_failure_sentinel(),
            item_failure_one_in: default_item_failure_one_in(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.failure_one_in == 0 {
            return Err(anyhow!("simulation.failure_one_in must be at least 1"));
        }
        if self.failure_sentinel >= self.failure_one_in {
            return Err(anyhow!(
                "simulation.failure_sentinel ({}) must be below failure_one_in ({})",
                self.failure_sentinel,
                self.failure_one_in
            ));
        }
        if self.failure_sentinel >= self.item_failure_one_in {
            return Err(anyhow!(
                "simulation.failure_sentinel ({}) must be below item_failure_one_in ({})",
                self.failure_sentinel,
                self.item_failure_one_in
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log file. Stdout only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

/// Suite runner behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Treat steps without a binding as failures.
    #[serde(default = "default_true")]
    pub strict: bool,
    #[serde(default = "default_true")]
    pub stop_on_failure: bool,
    /// When set, the JSON report is written here instead of printing to stdout.
    #[serde(default)]
    pub results_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            strict: true,
            stop_on_failure: true,
            results_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_reference_harness() {
        let config = HarnessConfig::default();
        assert_eq!(config.benchmark.min_duration, Duration::from_secs(1));
        assert_eq!(config.benchmark.initial_iterations, 1);
        assert_eq!(config.aggregator.slack, 10);
        assert_eq!(config.simulation.failure_one_in, 1000);
        assert_eq!(config.simulation.failure_sentinel, 7);
        assert_eq!(config.simulation.item_failure_one_in, 100_000);
        assert!(config.runner.strict);
        assert!(config.runner.stop_on_failure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config: HarnessConfig = r#"
            [benchmark]
            min_duration_ms = 25
            max_iterations = 64

            [simulation]
            seed = 99
            inject_failures = false
        "#
        .parse()
        .unwrap();
        assert_eq!(config.benchmark.min_duration, Duration::from_millis(25));
        assert_eq!(config.benchmark.max_iterations, 64);
        assert_eq!(config.benchmark.initial_iterations, 1);
        assert_eq!(config.simulation.seed, 99);
        assert!(!config.simulation.inject_failures);
    }

    #[test]
    fn rejects_inverted_iteration_bounds() {
        let err = r#"
            [benchmark]
            initial_iterations = 8
            max_iterations = 4
        "#
        .parse::<HarnessConfig>()
        .unwrap_err();
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn rejects_zero_failure_range() {
        let err = "[simulation]\nfailure_one_in = 0\n"
            .parse::<HarnessConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("failure_one_in"));
    }

    #[test]
    fn rejects_unreachable_item_sentinel() {
        let err = "[simulation]\nitem_failure_one_in = 5\n"
            .parse::<HarnessConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("item_failure_one_in"));
    }

    #[test]
    fn results_dir_override_ignores_blank_values() {
        let mut config = HarnessConfig::default();
        config.apply_results_dir_override(Some("   ".into()));
        assert!(config.runner.results_dir.is_none());
        config.apply_results_dir_override(Some("target/results".into()));
        assert_eq!(
            config.runner.results_dir.as_deref(),
            Some(Path::new("target/results"))
        );
    }

    #[test]
    fn loads_first_existing_candidate() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[runner]\nstrict = false")?;
        file.flush()?;
        let missing = PathBuf::from("does/not/exist.toml");
        let loaded =
            HarnessConfig::load_with_source(&[missing, file.path().to_path_buf()])?;
        assert!(!loaded.config.runner.strict);
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
        Ok(())
    }
}
