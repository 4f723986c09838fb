//! ---
//! wb_section: "01-core-functionality"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Shared primitives and utilities for the harness runtime."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "WARBENCH_LOG";

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
static STDOUT_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Available log formats for harness output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Initialize the tracing subscriber based on configuration and environment variables.
///
/// * `WARBENCH_LOG` overrides the log filter (e.g. `info`, `warbench_harness=debug`).
///   When unset the standard `RUST_LOG` variable is honoured, finally defaulting to
///   `info`.
/// * Stdout receives either pretty or structured JSON lines. When a log directory
///   is configured a daily rolling JSON file is written as well.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let _ = STDOUT_GUARD.set(stdout_guard);

    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to info logging",
                LOG_ENV, err
            );
            EnvFilter::new("info")
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let fmt_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(stdout_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stdout_writer)
            .boxed(),
    };

    let file_layer = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let prefix = config
                .file_prefix
                .clone()
                .unwrap_or_else(|| service_name.to_owned());
            let file_appender = daily(directory, format!("{}-{}.log", prefix, service_name));
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(file_guard);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .json()
                    .with_writer(file_writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .ok();

    info!(
        service = %service_name,
        log_dir = ?config.directory.as_ref().map(|dir| dir.display().to_string()),
        format = ?config.format,
        "tracing initialised"
    );
    Ok(())
}
