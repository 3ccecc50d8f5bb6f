// src/tasks/files.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Expand glob patterns into the files under `root` that match them.
///
/// Patterns are matched against paths relative to `root`, with forward
/// slashes (the same convention the watcher uses). Results are sorted so the
/// expansion is stable across runs and platforms.
pub fn expand_globs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let set = build_globset(patterns)?;

    let mut matches = Vec::new();
    walk(root, root, &set, &mut matches)
        .with_context(|| format!("walking {:?} for glob expansion", root))?;
    matches.sort();
    Ok(matches)
}

fn walk(root: &Path, dir: &Path, set: &GlobSet, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            walk(root, &path, set, out)?;
        } else if let Some(rel) = relative_str(root, &path) {
            if set.is_match(&rel) {
                out.push(path);
            }
        }
    }

    Ok(())
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root` and cannot be relativized.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}
