use std::error::Error;
use std::path::Path;

use sitepipe::config::model::{ConfigFile, ShellTaskConfig};
use sitepipe::config::validate::validate_config;
use sitepipe::errors::ConfigError;
use sitepipe::pipeline::{AliasResolver, TaskRegistry};

mod common;
use common::{aliases_of, registry_of, shell_task};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn default_config_registers_builtin_tasks_and_aliases() -> TestResult {
    let cfg = ConfigFile::default();
    let registry = TaskRegistry::from_config(&cfg, Path::new("."))?;
    let aliases = AliasResolver::from_config(&cfg);

    for name in ["lint", "concat", "minify", "site-build", "site-serve"] {
        assert!(registry.contains(name), "missing builtin task {name}");
    }

    let test = aliases.resolve("test", &registry)?;
    assert_eq!(test.len(), 1);
    assert_eq!(test[0].name, "lint");

    let deploy = aliases.resolve("deploy", &registry)?;
    let names: Vec<&str> = deploy.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["concat", "minify", "site-build"]);

    Ok(())
}

#[test]
fn resolution_preserves_declared_order_and_duplicates() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let registry = registry_of(vec![
        shell_task("a", "true", tmp.path()),
        shell_task("b", "true", tmp.path()),
    ]);
    let aliases = aliases_of(&[("loop", &["b", "a", "b", "b"])]);

    let tasks = aliases.resolve("loop", &registry)?;
    let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "b", "b"]);

    Ok(())
}

#[test]
fn unknown_alias_is_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let registry = registry_of(vec![shell_task("a", "true", tmp.path())]);
    let aliases = aliases_of(&[("known", &["a"])]);

    let err = aliases.resolve("nope", &registry).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownAlias(name) if name == "nope"));

    Ok(())
}

#[test]
fn alias_with_unregistered_step_is_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let registry = registry_of(vec![shell_task("a", "true", tmp.path())]);
    let aliases = aliases_of(&[("broken", &["a", "ghost"])]);

    let err = aliases.resolve("broken", &registry).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTask(name) if name == "ghost"));

    Ok(())
}

#[test]
fn duplicate_task_registration_is_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let mut registry = registry_of(vec![shell_task("a", "true", tmp.path())]);

    let err = registry
        .register(shell_task("a", "false", tmp.path()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTask(name) if name == "a"));

    Ok(())
}

#[test]
fn shell_task_may_not_shadow_a_builtin() -> TestResult {
    let mut cfg = ConfigFile::default();
    cfg.shell.insert(
        "lint".to_string(),
        ShellTaskConfig {
            cmd: "true".to_string(),
        },
    );

    let err = TaskRegistry::from_config(&cfg, Path::new(".")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTask(name) if name == "lint"));

    Ok(())
}

#[test]
fn watch_reaction_alias_must_exist_and_be_non_empty() -> TestResult {
    let mut cfg = ConfigFile::default();
    cfg.watch.alias = "missing".to_string();

    let registry = TaskRegistry::from_config(&cfg, Path::new("."))?;
    let aliases = AliasResolver::from_config(&cfg);
    let err = validate_config(&cfg, &registry, &aliases).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownAlias(name) if name == "missing"));

    let mut cfg = ConfigFile::default();
    cfg.alias.insert("dev".to_string(), Vec::new());

    let registry = TaskRegistry::from_config(&cfg, Path::new("."))?;
    let aliases = AliasResolver::from_config(&cfg);
    let err = validate_config(&cfg, &registry, &aliases).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAlias(name) if name == "dev"));

    Ok(())
}
