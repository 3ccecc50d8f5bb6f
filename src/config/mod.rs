// src/config/mod.rs

//! Configuration: TOML model, loading, and semantic validation.
//!
//! `Sitepipe.toml` has one section per build step plus `[alias]` and
//! `[watch]`; every section is optional, so an empty (or absent) config is a
//! working Jekyll-blog setup.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_project, LoadedProject};
pub use model::{
    ConcatSection, ConfigFile, LintSection, MinifySection, ShellTaskConfig, SiteSection,
    WatchSection,
};
pub use validate::validate_config;
