//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Immutable scenario state threaded through step calls."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! Scenario state is a copy-on-write map over a closed set of keys. Every
//! update produces a new snapshot; earlier snapshots stay valid, so a step can
//! never observe changes made by a later one.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::StateError;
use crate::runner::{BenchmarkResult, ErrorSet};

/// Keys a scenario may carry between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKey {
    PlayerLevel,
    Area,
    PlayerSpeed,
    TargetCount,
    BenchmarkResult,
    ErrorSet,
}

impl StateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::PlayerLevel => "playerLevel",
            StateKey::Area => "areaName",
            StateKey::PlayerSpeed => "playerSpeed",
            StateKey::TargetCount => "targetCount",
            StateKey::BenchmarkResult => "benchmarkResult",
            StateKey::ErrorSet => "benchmarkError",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StateValue {
    Int(i64),
    Count(u64),
    Text(String),
    Benchmark(BenchmarkResult),
    Errors(ErrorSet),
}

impl StateValue {
    pub fn kind(&self) -> &'static str {
        match self {
            StateValue::Int(_) => "int",
            StateValue::Count(_) => "count",
            StateValue::Text(_) => "text",
            StateValue::Benchmark(_) => "benchmark result",
            StateValue::Errors(_) => "error set",
        }
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<u64> for StateValue {
    fn from(value: u64) -> Self {
        StateValue::Count(value)
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_owned())
    }
}

impl From<BenchmarkResult> for StateValue {
    fn from(value: BenchmarkResult) -> Self {
        StateValue::Benchmark(value)
    }
}

impl From<ErrorSet> for StateValue {
    fn from(value: ErrorSet) -> Self {
        StateValue::Errors(value)
    }
}

/// Immutable snapshot of everything a scenario has established so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioState {
    entries: Arc<IndexMap<StateKey, StateValue>>,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: StateKey) -> Result<&StateValue, StateError> {
        self.entries.get(&key).ok_or(StateError::Missing { key })
    }

    /// Return a new snapshot with `key` set. The receiver is left untouched.
    pub fn with(&self, key: StateKey, value: impl Into<StateValue>) -> Self {
        let mut entries = IndexMap::clone(&self.entries);
        entries.insert(key, value.into());
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn contains(&self, key: StateKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in the order they were first set.
    pub fn keys(&self) -> impl Iterator<Item = StateKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn get_int(&self, key: StateKey) -> Result<i64, StateError> {
        match self.get(key)? {
            StateValue::Int(value) => Ok(*value),
            other => Err(mismatch(key, "int", other)),
        }
    }

    pub fn get_count(&self, key: StateKey) -> Result<u64, StateError> {
        match self.get(key)? {
            StateValue::Count(value) => Ok(*value),
            other => Err(mismatch(key, "count", other)),
        }
    }

    pub fn get_text(&self, key: StateKey) -> Result<&str, StateError> {
        match self.get(key)? {
            StateValue::Text(value) => Ok(value.as_str()),
            other => Err(mismatch(key, "text", other)),
        }
    }

    pub fn player_level(&self) -> Result<i64, StateError> {
        self.get_int(StateKey::PlayerLevel)
    }

    pub fn area(&self) -> Result<&str, StateError> {
        self.get_text(StateKey::Area)
    }

    pub fn player_speed(&self) -> Result<&str, StateError> {
        self.get_text(StateKey::PlayerSpeed)
    }

    pub fn target_count(&self) -> Result<u64, StateError> {
        self.get_count(StateKey::TargetCount)
    }

    pub fn benchmark_result(&self) -> Result<&BenchmarkResult, StateError> {
        match self.get(StateKey::BenchmarkResult)? {
            StateValue::Benchmark(result) => Ok(result),
            other => Err(mismatch(StateKey::BenchmarkResult, "benchmark result", other)),
        }
    }

    pub fn error_set(&self) -> Result<&ErrorSet, StateError> {
        match self.get(StateKey::ErrorSet)? {
            StateValue::Errors(errors) => Ok(errors),
            other => Err(mismatch(StateKey::ErrorSet, "error set", other)),
        }
    }
}

impl Serialize for ScenarioState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.entries.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

fn mismatch(key: StateKey, expected: &'static str, found: &StateValue) -> StateError {
    StateError::TypeMismatch {
        key,
        expected,
        found: found.kind(),
    }
}
