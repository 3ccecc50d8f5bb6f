use std::collections::BTreeMap;
use std::path::Path;

use sitepipe::pipeline::{AliasResolver, ShellOptions, Task, TaskRegistry, TaskSpec};

/// Build a shell task for tests.
pub fn shell_task(name: &str, cmd: &str, cwd: &Path) -> Task {
    Task {
        name: name.to_string(),
        spec: TaskSpec::Shell(ShellOptions {
            cmd: cmd.to_string(),
            cwd: cwd.to_path_buf(),
        }),
        input_globs: Vec::new(),
        output: None,
    }
}

/// Build a registry from a list of tasks.
pub fn registry_of(tasks: Vec<Task>) -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    for task in tasks {
        registry.register(task).expect("unique task names in test registry");
    }
    registry
}

/// Build an alias table from `(name, steps)` pairs.
pub fn aliases_of(entries: &[(&str, &[&str])]) -> AliasResolver {
    let mut map = BTreeMap::new();
    for (name, steps) in entries {
        map.insert(
            name.to_string(),
            steps.iter().map(|s| s.to_string()).collect(),
        );
    }
    AliasResolver::new(map)
}
