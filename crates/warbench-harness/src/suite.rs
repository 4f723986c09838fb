//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "TOML scenario suite files."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! A suite file names a feature and lists its scenarios:
//!
//! ```toml
//! name = "Combat performance"
//!
//! [[scenarios]]
//! name = "Fighting a horde at level 2"
//! steps = [
//!     "Given the player has a level of 2",
//!     "When the player fights 100 enemies",
//!     "Then the average time per enemy defeated should be less than 5 milliseconds",
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::HarnessError;
use crate::orchestrator::{Scenario, ScenarioStep};

#[derive(Debug, Deserialize)]
struct RawSuite {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    scenarios: Vec<RawScenario>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    name: String,
    #[serde(default)]
    steps: Vec<String>,
}

/// A feature: a named group of scenarios loaded from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub name: String,
    pub description: Option<String>,
    /// File the suite came from, used as the report URI.
    pub source: Option<PathBuf>,
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn from_path(path: &Path) -> Result<Self, HarnessError> {
        let contents = fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawSuite = toml::from_str(&contents).map_err(|source| HarnessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut suite = Self::from_raw(raw)?;
        suite.source = Some(path.to_path_buf());
        Ok(suite)
    }

    fn from_raw(raw: RawSuite) -> Result<Self, HarnessError> {
        let scenarios = raw
            .scenarios
            .into_iter()
            .map(|scenario| {
                let steps = scenario
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(index, line)| {
                        ScenarioStep::parse(line).ok_or_else(|| HarnessError::InvalidStep {
                            scenario: scenario.name.clone(),
                            index,
                            line: line.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Scenario {
                    name: scenario.name,
                    steps,
                })
            })
            .collect::<Result<Vec<_>, HarnessError>>()?;
        Ok(Self {
            name: raw.name,
            description: raw.description,
            source: None,
            scenarios,
        })
    }

    /// Report URI: the source path, or the suite name for in-memory suites.
    pub fn uri(&self) -> String {
        self.source
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| self.name.clone())
    }
}

impl FromStr for Suite {
    type Err = HarnessError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let raw: RawSuite = toml::from_str(contents).map_err(|source| HarnessError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::StepKeyword;
    use std::io::Write;

    const SUITE: &str = r#"
name = "Guards"
description = "Guard spawning stays responsive"

[[scenarios]]
name = "A handful of guards"
steps = [
    "Given the player has a level of 1",
    "When 5 guards spawn around the player",
    "Then the player reacts to all guards within 1 seconds",
    "And all guard spawning operations should complete without error",
]
"#;

    #[test]
    fn parses_inline_suite() {
        let suite: Suite = SUITE.parse().unwrap();
        assert_eq!(suite.name, "Guards");
        assert_eq!(suite.scenarios.len(), 1);
        let steps = &suite.scenarios[0].steps;
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].keyword, StepKeyword::When);
        assert_eq!(steps[3].keyword, StepKeyword::And);
        assert_eq!(suite.uri(), "Guards");
    }

    #[test]
    fn rejects_lines_without_keyword() {
        let err = r#"
name = "Broken"
[[scenarios]]
name = "bad"
steps = ["the player fights 3 enemies"]
"#
        .parse::<Suite>()
        .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidStep { index: 0, .. }));
    }

    #[test]
    fn loads_from_disk_and_records_source() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SUITE.as_bytes())?;
        let suite = Suite::from_path(file.path())?;
        assert_eq!(suite.source.as_deref(), Some(file.path()));
        assert_eq!(suite.uri(), file.path().display().to_string());
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Suite::from_path(Path::new("/nonexistent/warbench/suite.toml")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
