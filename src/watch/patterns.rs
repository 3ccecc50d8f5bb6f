// src/watch/patterns.rs

use std::fmt;
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::WatchSection;
use crate::errors::ConfigError;

/// Compiled watch configuration: which paths to react to, which alias to run,
/// and how (debounce window, interruption, run-at-start).
///
/// Patterns are evaluated against paths relative to the project root, with
/// forward slashes (e.g. `"css/main.css"`).
#[derive(Clone)]
pub struct WatchSpec {
    patterns: Vec<String>,
    globs: GlobSet,

    /// Alias resolved afresh before every triggered run.
    pub reaction_alias: String,

    /// Quiet period after the last matching change before a run starts.
    pub debounce: Duration,

    /// Cancel an in-flight run when a new matching change arrives.
    pub interrupt_in_flight: bool,

    /// Run the reaction once immediately when watching starts.
    pub run_immediately_on_start: bool,
}

impl fmt::Debug for WatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSpec")
            .field("patterns", &self.patterns)
            .field("reaction_alias", &self.reaction_alias)
            .field("debounce", &self.debounce)
            .field("interrupt_in_flight", &self.interrupt_in_flight)
            .field("run_immediately_on_start", &self.run_immediately_on_start)
            .finish()
    }
}

impl WatchSpec {
    /// Compile a `[watch]` section. Fails with [`ConfigError::InvalidGlob`]
    /// on a malformed pattern.
    pub fn from_config(section: &WatchSection) -> Result<Self, ConfigError> {
        let globs = build_globset(&section.paths)?;

        Ok(Self {
            patterns: section.paths.clone(),
            globs,
            reaction_alias: section.alias.clone(),
            debounce: Duration::from_millis(section.debounce_ms),
            interrupt_in_flight: section.interrupt,
            run_immediately_on_start: section.run_at_start,
        })
    }

    /// Whether a changed path (relative to the project root) is watched.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.globs.is_match(rel_path)
    }

    /// The raw patterns, for dry-run output.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|source| ConfigError::InvalidGlob {
            pattern: pat.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })
}
