// src/pipeline/registry.rs

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::ConfigError;
use crate::pipeline::task::{
    ConcatOptions, LintOptions, MinifyOptions, ShellOptions, Task, TaskName, TaskSpec,
};

/// Registry of named tasks.
///
/// [`TaskRegistry::register`] is the only mutator; everything downstream
/// (alias resolution, the runner, the watch engine) only reads. Task names
/// are unique.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<TaskName, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Fails with [`ConfigError::DuplicateTask`] if a task with
    /// the same name is already registered.
    pub fn register(&mut self, task: Task) -> Result<(), ConfigError> {
        if self.tasks.contains_key(&task.name) {
            return Err(ConfigError::DuplicateTask(task.name));
        }
        debug!(task = %task.name, kind = task.spec.kind(), "registered task");
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    /// Look up a task by name.
    pub fn get(&self, name: &str) -> Result<&Task, ConfigError> {
        self.tasks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTask(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// All registered tasks in name order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Build the registry for a loaded config file.
    ///
    /// Registers the built-in tasks (`lint`, `concat`, `minify`,
    /// `site-build`, `site-serve`) from their sections plus one shell task per
    /// `[shell.<name>]` entry. Relative paths in the config are resolved
    /// against `root`, the directory containing the config file.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        registry.register(Task {
            name: "lint".to_string(),
            spec: TaskSpec::Lint(LintOptions {
                root: root.to_path_buf(),
                src: cfg.lint.src.clone(),
                strictness: cfg.lint.strictness,
                require_inputs: cfg.lint.require_inputs,
            }),
            input_globs: cfg.lint.src.clone(),
            output: None,
        })?;

        registry.register(Task {
            name: "concat".to_string(),
            spec: TaskSpec::Concat(ConcatOptions {
                src: cfg.concat.src.iter().map(|s| root.join(s)).collect(),
                dest: root.join(&cfg.concat.dest),
            }),
            input_globs: cfg.concat.src.clone(),
            output: Some(root.join(&cfg.concat.dest)),
        })?;

        registry.register(Task {
            name: "minify".to_string(),
            spec: TaskSpec::Minify(MinifyOptions {
                src: root.join(&cfg.minify.src),
                dest: root.join(&cfg.minify.dest),
            }),
            input_globs: vec![cfg.minify.src.clone()],
            output: Some(root.join(&cfg.minify.dest)),
        })?;

        registry.register(Task {
            name: "site-build".to_string(),
            spec: TaskSpec::Shell(ShellOptions {
                cmd: cfg.site.build_cmd.clone(),
                cwd: root.to_path_buf(),
            }),
            input_globs: Vec::new(),
            output: None,
        })?;

        registry.register(Task {
            name: "site-serve".to_string(),
            spec: TaskSpec::Shell(ShellOptions {
                cmd: cfg.site.serve_cmd.clone(),
                cwd: root.to_path_buf(),
            }),
            input_globs: Vec::new(),
            output: None,
        })?;

        for (name, shell) in cfg.shell.iter() {
            registry.register(Task {
                name: name.clone(),
                spec: TaskSpec::Shell(ShellOptions {
                    cmd: shell.cmd.clone(),
                    cwd: root.to_path_buf(),
                }),
                input_globs: Vec::new(),
                output: None,
            })?;
        }

        Ok(registry)
    }
}
