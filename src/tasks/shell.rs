// src/tasks/shell.rs

use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::TaskError;
use crate::pipeline::runner::RunContext;
use crate::pipeline::task::ShellOptions;

/// Run an external command through the platform shell and surface its exit
/// status. This is how the site generator is invoked (`jekyll build`,
/// `jekyll serve`) and how `[shell.<name>]` tasks execute.
///
/// The child's stdout/stderr are streamed into tracing at debug level. If the
/// run's cancel flag is set while the child is running, the child is killed
/// and the task reports `TaskError::Interrupted`; this is what lets watch
/// mode restart a long-running serve command on the next change.
///
/// There is no timeout: if the command hangs, the run hangs (a known
/// limitation; in watch mode `interrupt` still recovers it).
pub async fn run(opts: &ShellOptions, ctx: &mut RunContext) -> Result<(), TaskError> {
    info!(cmd = %opts.cmd, "starting external command");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&opts.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&opts.cmd);
        c
    };

    cmd.current_dir(&opts.cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning command '{}'", opts.cmd))
        .map_err(TaskError::Other)?;

    // Always consume both pipes so OS buffers don't fill.
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("stdout: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("stderr: {}", line);
            }
        });
    }

    let cancel = ctx.cancel.clone();

    // Wait for exit or cancellation; the kill happens after the select so
    // the wait future's borrow of the child has ended.
    let waited = tokio::select! {
        status = child.wait() => Some(status),
        _ = cancel.cancelled() => None,
    };

    let Some(status) = waited else {
        warn!(cmd = %opts.cmd, "cancelling external command");
        if let Err(err) = child.kill().await {
            warn!(error = %err, "failed to kill cancelled command");
        }
        return Err(TaskError::Interrupted);
    };

    let status = status
        .with_context(|| format!("waiting for command '{}'", opts.cmd))
        .map_err(TaskError::Other)?;

    let code = status.code().unwrap_or(-1);
    info!(cmd = %opts.cmd, exit_code = code, success = status.success(), "command exited");

    if status.success() {
        Ok(())
    } else {
        Err(TaskError::CommandFailed(code))
    }
}
