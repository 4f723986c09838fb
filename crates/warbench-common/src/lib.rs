//! ---
//! wb_section: "01-core-functionality"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Shared primitives and utilities for the harness runtime."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
//! Core shared primitives for the warbench workspace.
//! This crate exposes configuration loading, tracing bootstrap, and the
//! duration conversions used when turning benchmark timings into verdicts.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{
    AggregatorConfig, BenchmarkConfig, HarnessConfig, LoadedHarnessConfig, LoggingConfig,
    RunnerConfig, SimulationConfig,
};
pub use logging::{init_tracing, LogFormat};
