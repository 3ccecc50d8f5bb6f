// src/pipeline/alias.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::ConfigError;
use crate::pipeline::registry::TaskRegistry;
use crate::pipeline::task::{Task, TaskName};

/// Named, ordered task sequences.
///
/// Resolution is a pure function of the alias table and the registry at call
/// time. There is no memoization: the watch engine re-resolves its reaction
/// alias before every run, so a registry swapped in an interactive session is
/// picked up without restarting the watcher.
#[derive(Debug, Default)]
pub struct AliasResolver {
    aliases: BTreeMap<String, Vec<TaskName>>,
}

impl AliasResolver {
    pub fn new(aliases: BTreeMap<String, Vec<TaskName>>) -> Self {
        Self { aliases }
    }

    /// Build the resolver from a loaded config file: declared `[alias]`
    /// entries layered over the default `test` / `deploy` / `dev` table.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.effective_aliases())
    }

    /// The declared step names for an alias, in order.
    pub fn steps(&self, name: &str) -> Result<&[TaskName], ConfigError> {
        self.aliases
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| ConfigError::UnknownAlias(name.to_string()))
    }

    /// All alias names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(|s| s.as_str())
    }

    /// Expand an alias into its task sequence.
    ///
    /// Steps come back in declared order, duplicates preserved. Fails with
    /// [`ConfigError::UnknownAlias`] for an absent alias and propagates
    /// [`ConfigError::UnknownTask`] from the registry lookup; either way, no
    /// task has executed yet when this returns.
    pub fn resolve(
        &self,
        name: &str,
        registry: &TaskRegistry,
    ) -> Result<Vec<Task>, ConfigError> {
        let steps = self.steps(name)?;

        let mut tasks = Vec::with_capacity(steps.len());
        for step in steps {
            tasks.push(registry.get(step)?.clone());
        }

        debug!(alias = %name, steps = tasks.len(), "resolved alias");
        Ok(tasks)
    }
}
