// src/config/validate.rs

use globset::Glob;

use crate::config::model::ConfigFile;
use crate::errors::ConfigError;
use crate::pipeline::alias::AliasResolver;
use crate::pipeline::registry::TaskRegistry;

/// Run semantic validation against a loaded configuration and the registry /
/// alias table built from it.
///
/// This checks:
/// - every alias step refers to a registered task
/// - the watch reaction alias exists and is non-empty
/// - the lint and watch glob patterns compile
///
/// All failures here are fatal: they are reported at startup before any task
/// runs. (Duplicate task names are already rejected while the registry is
/// being built.)
pub fn validate_config(
    cfg: &ConfigFile,
    registry: &TaskRegistry,
    aliases: &AliasResolver,
) -> Result<(), ConfigError> {
    validate_alias_references(registry, aliases)?;
    validate_watch_reaction(cfg, aliases)?;
    validate_globs(cfg)?;
    Ok(())
}

fn validate_alias_references(
    registry: &TaskRegistry,
    aliases: &AliasResolver,
) -> Result<(), ConfigError> {
    let names: Vec<String> = aliases.names().map(|s| s.to_string()).collect();
    for name in names {
        for step in aliases.steps(&name)? {
            registry.get(step)?;
        }
    }
    Ok(())
}

fn validate_watch_reaction(cfg: &ConfigFile, aliases: &AliasResolver) -> Result<(), ConfigError> {
    let steps = aliases.steps(&cfg.watch.alias)?;
    if steps.is_empty() {
        return Err(ConfigError::EmptyAlias(cfg.watch.alias.clone()));
    }
    Ok(())
}

fn validate_globs(cfg: &ConfigFile) -> Result<(), ConfigError> {
    for pat in cfg.lint.src.iter().chain(cfg.watch.paths.iter()) {
        Glob::new(pat).map_err(|source| ConfigError::InvalidGlob {
            pattern: pat.clone(),
            source,
        })?;
    }
    Ok(())
}
