// src/errors.rs

//! Crate-wide error types.
//!
//! Two families, matching the two failure domains:
//!
//! - [`ConfigError`]: configuration-time problems (bad alias references,
//!   duplicate task names, invalid globs). These are fatal and reported at
//!   startup before any task runs.
//! - [`TaskError`]: runtime problems inside a single task handler. These
//!   abort the current pipeline run only; in watch mode the engine logs them
//!   and keeps watching.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-time errors. All of these abort startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate task '{0}' in registry")]
    DuplicateTask(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("unknown alias '{0}'")]
    UnknownAlias(String),

    #[error("alias '{0}' resolves to an empty task sequence")]
    EmptyAlias(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
}

/// A single lint finding: which rule fired, where, and how severe it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: &'static str,
    pub file: PathBuf,
    pub line: usize,
    pub severity: u8,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] (severity {}) {}",
            self.file.display(),
            self.line,
            self.rule,
            self.severity,
            self.message
        )
    }
}

/// Runtime errors from a single task handler.
///
/// `Interrupted` is not a failure in the usual sense: it is how a handler
/// reports that it observed the run's cancel flag and stopped early. The
/// runner maps it to `RunResult::Interrupted` rather than `Failed`.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{} lint violation(s) at or above threshold", violations.len())]
    LintViolations { violations: Vec<Violation> },

    #[error("input globs matched no files")]
    NoInputs,

    #[error("missing source file {0}")]
    MissingSource(PathBuf),

    #[error("command exited with status {0}")]
    CommandFailed(i32),

    #[error("task interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskError {
    /// Whether this error came from a cooperative cancellation rather than a
    /// genuine failure.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, TaskError::Interrupted)
    }
}
