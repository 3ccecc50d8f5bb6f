// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::pipeline::alias::AliasResolver;
use crate::pipeline::registry::TaskRegistry;

/// A fully loaded and validated project: the parsed config, the directory it
/// lives in (all relative paths resolve against it), and the registry and
/// alias table built from it.
///
/// The registry and aliases are constructed once here and passed by value /
/// reference into the CLI and watch entry points; there is no ambient global
/// configuration.
#[derive(Debug)]
pub struct LoadedProject {
    pub config: ConfigFile,
    pub root: PathBuf,
    pub registry: TaskRegistry,
    pub aliases: AliasResolver,
}

/// Load a configuration file from a given path and return the raw
/// [`ConfigFile`].
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_project`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();

    // A missing config file means "all defaults": the defaults alone
    // describe a complete Jekyll-blog build.
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file, build the task registry and alias table from
/// it, and validate the result.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML (defaults apply when the file or sections are absent).
/// - Registers the built-in tasks plus `[shell.<name>]` tasks (duplicate
///   names are rejected here).
/// - Checks alias references, the watch reaction alias, and glob patterns.
pub fn load_project(path: impl AsRef<Path>) -> Result<LoadedProject> {
    let path = path.as_ref();
    let config = load_from_path(path)?;
    let root = config_root_dir(path);

    let registry = TaskRegistry::from_config(&config, &root)
        .with_context(|| format!("building task registry from {:?}", path))?;
    let aliases = AliasResolver::from_config(&config);

    validate_config(&config, &registry, &aliases)
        .with_context(|| format!("validating config from {:?}", path))?;

    Ok(LoadedProject {
        config,
        root,
        registry,
        aliases,
    })
}

/// Figure out a sensible project root: the directory containing the config
/// file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
