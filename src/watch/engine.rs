// src/watch/engine.rs

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, trace, warn};

use crate::pipeline::alias::AliasResolver;
use crate::pipeline::registry::TaskRegistry;
use crate::pipeline::runner::{run_pipeline, CancelFlag, RunResult};
use crate::watch::patterns::WatchSpec;

/// What happened to a changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
    Other,
}

/// Events driving the watch engine. Produced by the filesystem watcher, by
/// the engine's own spawned pipeline runs, and by the Ctrl-C handler.
#[derive(Debug)]
pub enum EngineEvent {
    FileChanged { path: String, kind: ChangeKind },
    RunFinished { result: RunResult },
    Shutdown,
}

/// The watch-mode state machine.
///
/// Conceptually three states:
///
/// - Idle: no run in flight, no debounce pending. Waiting for changes.
/// - Debouncing: a matching change was seen; a run starts once the quiet
///   window elapses. Every further matching change restarts the window.
/// - Running: a pipeline run is in flight. A matching change either cancels
///   it (`interrupt_in_flight`) and returns to Debouncing, or is queued so a
///   new window is armed when the run finishes.
///
/// Change events that arrive during the quiet window coalesce into a single
/// run. A failed run is logged and the engine keeps watching; nothing short
/// of shutdown stops it.
pub struct WatchEngine {
    spec: WatchSpec,
    registry: TaskRegistry,
    aliases: AliasResolver,

    /// Unified event stream from the watcher, spawned runs, and Ctrl-C.
    events_rx: mpsc::Receiver<EngineEvent>,

    /// Sender handed to spawned runs so their completion comes back through
    /// the same event stream.
    events_tx: mpsc::Sender<EngineEvent>,

    /// Debounce timer deadline, when armed.
    deadline: Option<Instant>,

    /// Cancel flag of the in-flight run, if one is active.
    in_flight: Option<CancelFlag>,

    /// A matching change arrived while running (without interruption, or
    /// after an interrupted run's debounce expired too early); a new window
    /// is armed as soon as the current run finishes.
    pending_changes: bool,
}

impl WatchEngine {
    pub fn new(
        spec: WatchSpec,
        registry: TaskRegistry,
        aliases: AliasResolver,
        events_rx: mpsc::Receiver<EngineEvent>,
        events_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            spec,
            registry,
            aliases,
            events_rx,
            events_tx,
            deadline: None,
            in_flight: None,
            pending_changes: false,
        }
    }

    /// Main event loop. Runs until shutdown is requested or every event
    /// producer has gone away.
    pub async fn run(mut self) -> Result<()> {
        info!(
            alias = %self.spec.reaction_alias,
            debounce_ms = self.spec.debounce.as_millis() as u64,
            interrupt = self.spec.interrupt_in_flight,
            "watch engine started"
        );

        if self.spec.run_immediately_on_start {
            self.start_run();
        }

        loop {
            // The timer branch is only enabled while the debounce window is
            // armed; the placeholder deadline is never awaited.
            let deadline = self.deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        Some(EngineEvent::FileChanged { path, kind }) => {
                            self.handle_file_changed(&path, kind);
                        }
                        Some(EngineEvent::RunFinished { result }) => {
                            self.handle_run_finished(result);
                        }
                        Some(EngineEvent::Shutdown) => {
                            info!("shutdown requested, stopping watch engine");
                            self.cancel_in_flight();
                            break;
                        }
                        None => {
                            debug!("all event producers dropped; stopping watch engine");
                            self.cancel_in_flight();
                            break;
                        }
                    }
                }
                _ = sleep_until(deadline), if self.deadline.is_some() => {
                    self.handle_debounce_expired();
                }
            }
        }

        info!("watch engine exiting");
        Ok(())
    }

    fn handle_file_changed(&mut self, path: &str, kind: ChangeKind) {
        if !self.spec.matches(path) {
            trace!(path = %path, ?kind, "change does not match watch patterns; ignoring");
            return;
        }

        debug!(path = %path, ?kind, "watched file changed");

        if self.in_flight.is_some() {
            if self.spec.interrupt_in_flight {
                info!(path = %path, "change during run; interrupting in-flight run");
                self.cancel_in_flight();
                self.arm_debounce();
            } else {
                debug!(path = %path, "change during run; queueing for after completion");
                self.pending_changes = true;
            }
        } else {
            // Idle or already debouncing: every matching change restarts the
            // quiet window.
            self.arm_debounce();
        }
    }

    fn handle_debounce_expired(&mut self) {
        self.deadline = None;

        if self.in_flight.is_some() {
            // An interrupted run is still winding down. Remember the change;
            // RunFinished will arm a fresh window.
            debug!("debounce expired while a run is still in flight; deferring");
            self.pending_changes = true;
        } else {
            self.start_run();
        }
    }

    fn handle_run_finished(&mut self, result: RunResult) {
        self.in_flight = None;

        match result {
            RunResult::Succeeded { outputs } => {
                info!(outputs = outputs.len(), "pipeline run succeeded");
            }
            RunResult::Failed { failed_at, error } => {
                // Deliberate resilience: a failed run never stops the watcher.
                warn!(
                    failed_at = %failed_at,
                    error = %error,
                    "pipeline run failed; continuing to watch"
                );
            }
            RunResult::Interrupted { interrupted_at } => {
                info!(?interrupted_at, "pipeline run interrupted");
            }
        }

        if self.pending_changes {
            self.pending_changes = false;
            self.arm_debounce();
        }
    }

    /// Resolve the reaction alias afresh and start a pipeline run on a
    /// spawned task; its result comes back as [`EngineEvent::RunFinished`].
    fn start_run(&mut self) {
        let tasks = match self.aliases.resolve(&self.spec.reaction_alias, &self.registry) {
            Ok(tasks) => tasks,
            Err(err) => {
                // Validation catches this at startup; it can only recur if the
                // alias table changed underneath us. Keep watching either way.
                error!(alias = %self.spec.reaction_alias, error = %err, "cannot resolve reaction alias");
                return;
            }
        };

        let cancel = CancelFlag::new();
        self.in_flight = Some(cancel.clone());

        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = run_pipeline(&tasks, cancel).await;
            // The engine may already be gone during shutdown.
            let _ = tx.send(EngineEvent::RunFinished { result }).await;
        });
    }

    fn arm_debounce(&mut self) {
        self.deadline = Some(Instant::now() + self.spec.debounce);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(cancel) = &self.in_flight {
            cancel.cancel();
        }
    }
}
