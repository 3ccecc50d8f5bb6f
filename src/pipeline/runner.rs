// src/pipeline/runner.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::errors::TaskError;
use crate::pipeline::task::{Task, TaskName};
use crate::tasks;

/// Cooperative cancellation token for a single pipeline run.
///
/// Cheap to clone; all clones observe the same flag. Handlers poll
/// [`CancelFlag::is_cancelled`] at safe points (between file reads, between
/// tasks) and the shell handler `select!`s on [`CancelFlag::cancelled`] to
/// kill its child process. Cancellation is not preemptive: a handler that
/// never checks runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake anything waiting in [`cancelled`].
    ///
    /// [`cancelled`]: CancelFlag::cancelled
    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    /// Resolve once cancellation has been requested.
    pub async fn cancelled(&self) {
        loop {
            // Register interest before checking the flag, so a cancel between
            // the check and the await cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Per-run scratch state shared by all tasks in one [`run_pipeline`] call.
///
/// Created at the start of a run, dropped when the run completes or is
/// interrupted. Handlers append warnings and the paths they wrote.
#[derive(Debug)]
pub struct RunContext {
    pub cancel: CancelFlag,
    pub warnings: Vec<String>,
    pub outputs: Vec<PathBuf>,
}

impl RunContext {
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            cancel,
            warnings: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn record_output(&mut self, path: impl Into<PathBuf>) {
        self.outputs.push(path.into());
    }
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub enum RunResult {
    /// Every task succeeded. `outputs` lists the files written, in order.
    Succeeded { outputs: Vec<PathBuf> },

    /// A task failed; tasks after it never executed.
    Failed { failed_at: TaskName, error: TaskError },

    /// The run's cancel flag was set and the run stopped early.
    /// `interrupted_at` names the task that observed the flag, or `None` if
    /// the flag was already set before the next task started.
    Interrupted { interrupted_at: Option<TaskName> },
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Succeeded { .. })
    }
}

/// Execute a resolved task sequence strictly in order.
///
/// One [`RunContext`] is shared across all tasks of the run. The first
/// failing task aborts the run; the remaining tasks are not executed. An
/// empty sequence is a no-op success. There is no intra-run parallelism:
/// downstream tasks consume upstream outputs (concatenation feeds
/// minification), so order is the contract.
///
/// Warnings accumulated by tasks are logged on every exit path, so a run
/// that fails or is interrupted still surfaces what earlier tasks found.
pub async fn run_pipeline(sequence: &[Task], cancel: CancelFlag) -> RunResult {
    let mut ctx = RunContext::new(cancel);
    let result = execute_sequence(sequence, &mut ctx).await;

    for warning in &ctx.warnings {
        warn!("{warning}");
    }

    result
}

async fn execute_sequence(sequence: &[Task], ctx: &mut RunContext) -> RunResult {
    if sequence.is_empty() {
        debug!("empty task sequence; nothing to run");
        return RunResult::Succeeded { outputs: Vec::new() };
    }

    for task in sequence {
        if ctx.cancel.is_cancelled() {
            info!("run cancelled before task '{}'", task.name);
            return RunResult::Interrupted { interrupted_at: None };
        }

        info!(task = %task.name, kind = task.spec.kind(), "running task");

        match tasks::execute(task, ctx).await {
            Ok(()) => {
                debug!(task = %task.name, "task succeeded");
            }
            Err(err) if err.is_interrupted() => {
                info!(task = %task.name, "task interrupted");
                return RunResult::Interrupted {
                    interrupted_at: Some(task.name.clone()),
                };
            }
            Err(err) => {
                warn!(task = %task.name, error = %err, "task failed; aborting run");
                return RunResult::Failed {
                    failed_at: task.name.clone(),
                    error: err,
                };
            }
        }
    }

    RunResult::Succeeded {
        outputs: std::mem::take(&mut ctx.outputs),
    }
}
