// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod tasks;
pub mod watch;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::{load_project, LoadedProject};
use crate::pipeline::runner::{run_pipeline, CancelFlag, RunResult};
use crate::watch::{spawn_watcher, EngineEvent, WatchEngine, WatchSpec};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (registry + alias table, validated)
/// - one-shot alias runs (`sitepipe test`, `sitepipe deploy`)
/// - the watch engine + file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let project = load_project(&args.config)?;

    if args.dry_run {
        // Compiling the watch spec here means a dry run also surfaces
        // malformed watch globs.
        let watch = WatchSpec::from_config(&project.config.watch)?;
        print_dry_run(&project, &watch);
        return Ok(());
    }

    if args.watch {
        return run_watch(project).await;
    }

    let alias = args.alias.as_deref().ok_or_else(|| {
        anyhow!("no alias given; try `sitepipe test`, `sitepipe deploy`, or `sitepipe --watch`")
    })?;

    run_once(&project, alias).await
}

/// Resolve an alias and run its pipeline exactly once.
///
/// A failed task becomes the command's failure: the error names the failing
/// task and the process exits non-zero.
async fn run_once(project: &LoadedProject, alias: &str) -> Result<()> {
    let tasks = project.aliases.resolve(alias, &project.registry)?;

    match run_pipeline(&tasks, CancelFlag::new()).await {
        RunResult::Succeeded { outputs } => {
            info!(alias = %alias, outputs = outputs.len(), "alias completed");
            Ok(())
        }
        RunResult::Failed { failed_at, error } => {
            Err(anyhow!("task '{failed_at}' failed: {error}"))
        }
        RunResult::Interrupted { .. } => Err(anyhow!("run interrupted")),
    }
}

/// Watch the configured paths and re-run the reaction alias on change, until
/// Ctrl-C.
async fn run_watch(project: LoadedProject) -> Result<()> {
    let spec = WatchSpec::from_config(&project.config.watch)?;

    // Unified event channel: file watcher, spawned runs and Ctrl-C all feed
    // the engine through it.
    let (events_tx, events_rx) = mpsc::channel::<EngineEvent>(64);

    let _watcher_handle = spawn_watcher(project.root.clone(), events_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(EngineEvent::Shutdown).await;
        });
    }

    let engine = WatchEngine::new(spec, project.registry, project.aliases, events_rx, events_tx);
    engine.run().await
}

/// Simple dry-run output: print tasks, aliases and the watch spec.
fn print_dry_run(project: &LoadedProject, watch: &WatchSpec) {
    println!("sitepipe dry-run");
    println!("  root: {}", project.root.display());
    println!();

    println!("tasks ({}):", project.registry.len());
    for task in project.registry.tasks() {
        println!("  - {} ({})", task.name, task.spec.kind());
        if !task.input_globs.is_empty() {
            println!("      inputs: {:?}", task.input_globs);
        }
        if let Some(ref out) = task.output {
            println!("      output: {}", out.display());
        }
    }
    println!();

    println!("aliases:");
    for name in project.aliases.names() {
        // names() only yields known aliases, so steps() cannot fail here.
        let steps = project.aliases.steps(name).unwrap_or(&[]);
        println!("  - {name} = {steps:?}");
    }
    println!();

    println!("watch:");
    println!("  paths: {:?}", watch.patterns());
    println!("  alias: {}", watch.reaction_alias);
    println!("  debounce_ms: {}", watch.debounce.as_millis());
    println!("  interrupt: {}", watch.interrupt_in_flight);
    println!("  run_at_start: {}", watch.run_immediately_on_start);
}
