use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use sitepipe::config::model::WatchSection;
use sitepipe::pipeline::{AliasResolver, TaskRegistry};
use sitepipe::watch::{ChangeKind, EngineEvent, WatchEngine, WatchSpec};

mod common;
use common::{aliases_of, registry_of, shell_task};

type TestResult = Result<(), Box<dyn Error>>;

const DEBOUNCE_MS: u64 = 80;

fn spec(alias: &str, interrupt: bool, run_at_start: bool) -> WatchSpec {
    WatchSpec::from_config(&WatchSection {
        paths: vec!["css/*.css".to_string()],
        alias: alias.to_string(),
        debounce_ms: DEBOUNCE_MS,
        interrupt,
        run_at_start,
    })
    .expect("valid watch section")
}

fn start_engine(
    spec: WatchSpec,
    registry: TaskRegistry,
    aliases: AliasResolver,
) -> (mpsc::Sender<EngineEvent>, tokio::task::JoinHandle<anyhow::Result<()>>) {
    let (tx, rx) = mpsc::channel::<EngineEvent>(64);
    let engine = WatchEngine::new(spec, registry, aliases, rx, tx.clone());
    let handle = tokio::spawn(engine.run());
    (tx, handle)
}

async fn send_change(tx: &mpsc::Sender<EngineEvent>, path: &str) {
    tx.send(EngineEvent::FileChanged {
        path: path.to_string(),
        kind: ChangeKind::Modified,
    })
    .await
    .expect("engine alive");
}

fn line_count(path: &Path) -> usize {
    fs::read_to_string(path)
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

#[tokio::test]
async fn change_burst_coalesces_into_one_run() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    let registry = registry_of(vec![shell_task(
        "mark",
        &format!("echo run >> {}", marker.display()),
        tmp.path(),
    )]);
    let aliases = aliases_of(&[("dev", &["mark"])]);

    let (tx, handle) = start_engine(spec("dev", true, false), registry, aliases);

    // Five changes inside the debounce window.
    for _ in 0..5 {
        send_change(&tx, "css/main.css").await;
        sleep(Duration::from_millis(15)).await;
    }

    sleep(Duration::from_millis(DEBOUNCE_MS * 5)).await;
    assert_eq!(line_count(&marker), 1, "burst must trigger exactly one run");

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn non_matching_paths_never_trigger_a_run() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    let registry = registry_of(vec![shell_task(
        "mark",
        &format!("echo run >> {}", marker.display()),
        tmp.path(),
    )]);
    let aliases = aliases_of(&[("dev", &["mark"])]);

    let (tx, handle) = start_engine(spec("dev", true, false), registry, aliases);

    send_change(&tx, "notes/todo.txt").await;
    send_change(&tx, "css/main.scss").await;

    sleep(Duration::from_millis(DEBOUNCE_MS * 4)).await;
    assert_eq!(line_count(&marker), 0);

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn run_at_start_runs_once_without_any_change() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    let registry = registry_of(vec![shell_task(
        "mark",
        &format!("echo run >> {}", marker.display()),
        tmp.path(),
    )]);
    let aliases = aliases_of(&[("dev", &["mark"])]);

    let (tx, handle) = start_engine(spec("dev", true, true), registry, aliases);

    sleep(Duration::from_millis(DEBOUNCE_MS * 4)).await;
    assert_eq!(line_count(&marker), 1);

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn failed_run_does_not_stop_the_watcher() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    // Every run leaves a marker line, then fails.
    let registry = registry_of(vec![
        shell_task(
            "mark",
            &format!("echo run >> {}", marker.display()),
            tmp.path(),
        ),
        shell_task("fail", "exit 1", tmp.path()),
    ]);
    let aliases = aliases_of(&[("dev", &["mark", "fail"])]);

    let (tx, handle) = start_engine(spec("dev", true, false), registry, aliases);

    send_change(&tx, "css/main.css").await;
    sleep(Duration::from_millis(DEBOUNCE_MS * 4)).await;
    assert_eq!(line_count(&marker), 1);

    // A later change still triggers a fresh run after the failure.
    send_change(&tx, "css/main.css").await;
    sleep(Duration::from_millis(DEBOUNCE_MS * 4)).await;
    assert_eq!(line_count(&marker), 2);

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn change_during_run_interrupts_it_when_configured() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    // A slow task: records that it started, then sleeps far longer than the
    // test. Only an interrupt (or shutdown) gets rid of it.
    let registry = registry_of(vec![shell_task(
        "slow",
        &format!("echo start >> {0} && sleep 30 && echo done >> {0}", marker.display()),
        tmp.path(),
    )]);
    let aliases = aliases_of(&[("dev", &["slow"])]);

    let (tx, handle) = start_engine(spec("dev", true, false), registry, aliases);

    send_change(&tx, "css/main.css").await;
    // Let the debounce expire and the slow run start.
    sleep(Duration::from_millis(DEBOUNCE_MS * 3)).await;
    assert_eq!(line_count(&marker), 1);

    // A change mid-run cancels it and schedules a fresh one.
    send_change(&tx, "css/main.css").await;
    sleep(Duration::from_millis(DEBOUNCE_MS * 3)).await;

    let contents = fs::read_to_string(&marker)?;
    let starts = contents.lines().filter(|l| *l == "start").count();
    let dones = contents.lines().filter(|l| *l == "done").count();
    assert_eq!(starts, 2, "interrupted run must be replaced by a fresh one");
    assert_eq!(dones, 0, "neither slow run may have completed");

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn change_during_run_is_queued_when_interrupt_is_off() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let marker = tmp.path().join("runs");

    // Each run takes ~300ms.
    let registry = registry_of(vec![shell_task(
        "slowish",
        &format!("echo run >> {} && sleep 0.3", marker.display()),
        tmp.path(),
    )]);
    let aliases = aliases_of(&[("dev", &["slowish"])]);

    let (tx, handle) = start_engine(spec("dev", false, false), registry, aliases);

    send_change(&tx, "css/main.css").await;
    sleep(Duration::from_millis(DEBOUNCE_MS + 100)).await;
    // First run is in flight; this change must be queued, not dropped.
    send_change(&tx, "css/main.css").await;
    assert_eq!(line_count(&marker), 1);

    // First run finishes, the queued change debounces, second run starts.
    sleep(Duration::from_millis(600)).await;
    assert_eq!(line_count(&marker), 2);

    tx.send(EngineEvent::Shutdown).await?;
    handle.await??;
    Ok(())
}
