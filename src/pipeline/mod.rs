// src/pipeline/mod.rs

//! Task registry, alias resolution, and the sequential pipeline runner.
//!
//! - [`task`] defines the data model: a [`Task`] is a name plus typed
//!   per-kind options; the handlers live in `crate::tasks`.
//! - [`registry`] holds the unique-by-name task set.
//! - [`alias`] expands named aliases into ordered task sequences.
//! - [`runner`] executes a sequence strictly in order, stopping at the first
//!   failure, with cooperative cancellation.

pub mod alias;
pub mod registry;
pub mod runner;
pub mod task;

pub use alias::AliasResolver;
pub use registry::TaskRegistry;
pub use runner::{run_pipeline, CancelFlag, RunContext, RunResult};
pub use task::{
    ConcatOptions, LintOptions, MinifyOptions, ShellOptions, Task, TaskName, TaskSpec,
};
