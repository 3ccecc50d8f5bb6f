// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitepipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitepipe",
    version,
    about = "Run static-site build pipelines, one-shot or on file change.",
    long_about = None
)]
pub struct CliArgs {
    /// Alias to run one-shot (e.g. `test`, `deploy`).
    ///
    /// Required unless `--watch` or `--dry-run` is given.
    #[arg(value_name = "ALIAS")]
    pub alias: Option<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Sitepipe.toml` in the current working directory. A missing
    /// file means "all defaults".
    #[arg(long, value_name = "PATH", default_value = "Sitepipe.toml")]
    pub config: String,

    /// Watch the configured paths and re-run the watch alias on change,
    /// until Ctrl-C.
    #[arg(long)]
    pub watch: bool,

    /// Parse + validate, print tasks/aliases/watch spec, but don't execute
    /// anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
