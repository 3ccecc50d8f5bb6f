// src/tasks/mod.rs

//! Task handlers.
//!
//! Tasks are data ([`TaskSpec`] variants); this module interprets them:
//!
//! - [`lint`] runs the built-in stylesheet checks.
//! - [`concat`] byte-concatenates an ordered source list into one file.
//! - [`minify`] writes a minified copy of a stylesheet.
//! - [`shell`] runs external commands (the site generator, custom tasks).
//! - [`files`] is shared glob-expansion plumbing.
//!
//! Handlers own their edge-case policy: the pipeline layer does not care
//! whether a task's globs matched zero files, but the lint handler fails on
//! that when configured to require inputs.

pub mod concat;
pub mod files;
pub mod lint;
pub mod minify;
pub mod shell;

use crate::errors::TaskError;
use crate::pipeline::runner::RunContext;
use crate::pipeline::task::{Task, TaskSpec};

/// Execute one task against the shared run context.
pub async fn execute(task: &Task, ctx: &mut RunContext) -> Result<(), TaskError> {
    match &task.spec {
        TaskSpec::Lint(opts) => lint::run(opts, ctx).await,
        TaskSpec::Concat(opts) => concat::run(opts, ctx).await,
        TaskSpec::Minify(opts) => minify::run(opts, ctx).await,
        TaskSpec::Shell(opts) => shell::run(opts, ctx).await,
    }
}
