// src/logging.rs

//! Logging setup for `sitepipe` using `tracing` + `tracing-subscriber`.
//!
//! The effective filter is chosen in this order:
//! 1. `--log-level`, applied as a plain maximum level
//! 2. `SITEPIPE_LOG`, a full filter string, so per-target directives work
//!    (e.g. `SITEPIPE_LOG=warn,sitepipe::watch=debug`)
//! 3. `info`

use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

const FILTER_ENV_VAR: &str = "SITEPIPE_LOG";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level_directive(level)),
        None => EnvFilter::try_from_env(FILTER_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    fmt().with_env_filter(filter).with_target(true).init();
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
