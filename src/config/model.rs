// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from `Sitepipe.toml`.
///
/// This maps the classic static-site build file one-to-one:
///
/// ```toml
/// [lint]
/// src = ["css/main.css"]
/// strictness = 2
///
/// [concat]
/// src = ["css/normalize.css", "_site/css/main.css"]
/// dest = "build/main.css"
///
/// [minify]
/// src = "build/main.css"
/// dest = "_site/css/main.min.css"
///
/// [site]
/// build_cmd = "jekyll build"
/// serve_cmd = "jekyll serve"
///
/// [alias]
/// deploy = ["concat", "minify", "site-build"]
///
/// [watch]
/// paths = ["css/*.css", "_posts/*.markdown"]
/// alias = "dev"
/// ```
///
/// All sections are optional; the defaults describe a standard Jekyll-blog
/// build.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Stylesheet lint task from `[lint]`.
    #[serde(default)]
    pub lint: LintSection,

    /// Concatenation task from `[concat]`.
    #[serde(default)]
    pub concat: ConcatSection,

    /// Minification task from `[minify]`.
    #[serde(default)]
    pub minify: MinifySection,

    /// Site generator commands from `[site]`.
    #[serde(default)]
    pub site: SiteSection,

    /// Extra user-defined shell tasks from `[shell.<name>]`.
    ///
    /// Keys are task names; they may not collide with built-in task names.
    #[serde(default)]
    pub shell: BTreeMap<String, ShellTaskConfig>,

    /// Named task sequences from `[alias]`. Keys are alias names, values are
    /// ordered lists of task names. Merged over [`default_aliases`].
    #[serde(default)]
    pub alias: BTreeMap<String, Vec<String>>,

    /// Watch-mode behaviour from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[lint]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LintSection {
    /// Glob patterns for the stylesheets to lint, relative to the config root.
    #[serde(default = "default_lint_src")]
    pub src: Vec<String>,

    /// Minimum violation severity that fails the task (1 = warning, 2 = error).
    #[serde(default = "default_strictness")]
    pub strictness: u8,

    /// Fail the task when the globs match zero files (strict-mode behaviour).
    #[serde(default = "default_true")]
    pub require_inputs: bool,
}

fn default_lint_src() -> Vec<String> {
    vec!["css/main.css".to_string()]
}

fn default_strictness() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            src: default_lint_src(),
            strictness: default_strictness(),
            require_inputs: true,
        }
    }
}

/// `[concat]` section. `src` is an ordered list, not a glob: concatenation
/// order matters (normalize.css must come first).
#[derive(Debug, Clone, Deserialize)]
pub struct ConcatSection {
    #[serde(default = "default_concat_src")]
    pub src: Vec<String>,

    #[serde(default = "default_concat_dest")]
    pub dest: String,
}

fn default_concat_src() -> Vec<String> {
    vec!["css/normalize.css".to_string(), "_site/css/main.css".to_string()]
}

fn default_concat_dest() -> String {
    "build/main.css".to_string()
}

impl Default for ConcatSection {
    fn default() -> Self {
        Self {
            src: default_concat_src(),
            dest: default_concat_dest(),
        }
    }
}

/// `[minify]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MinifySection {
    #[serde(default = "default_minify_src")]
    pub src: String,

    #[serde(default = "default_minify_dest")]
    pub dest: String,
}

fn default_minify_src() -> String {
    "build/main.css".to_string()
}

fn default_minify_dest() -> String {
    "_site/css/main.min.css".to_string()
}

impl Default for MinifySection {
    fn default() -> Self {
        Self {
            src: default_minify_src(),
            dest: default_minify_dest(),
        }
    }
}

/// `[site]` section: the external site generator invocations.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_build_cmd")]
    pub build_cmd: String,

    #[serde(default = "default_serve_cmd")]
    pub serve_cmd: String,
}

fn default_build_cmd() -> String {
    "jekyll build".to_string()
}

fn default_serve_cmd() -> String {
    "jekyll serve".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            build_cmd: default_build_cmd(),
            serve_cmd: default_serve_cmd(),
        }
    }
}

/// `[shell.<name>]` section: an arbitrary extra command exposed as a task.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellTaskConfig {
    pub cmd: String,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Glob patterns to watch, relative to the config root.
    #[serde(default = "default_watch_paths")]
    pub paths: Vec<String>,

    /// Alias to run when a watched file changes.
    #[serde(default = "default_watch_alias")]
    pub alias: String,

    /// Quiet period after the last change event before a run starts.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Cancel an in-flight run when a new change arrives (vs. queueing the
    /// change until the run completes).
    #[serde(default = "default_true")]
    pub interrupt: bool,

    /// Run the reaction alias once immediately when watching starts.
    #[serde(default = "default_true")]
    pub run_at_start: bool,
}

fn default_watch_paths() -> Vec<String> {
    vec![
        "_layouts/*.html".to_string(),
        "_posts/*.markdown".to_string(),
        "css/*.css".to_string(),
        "_config.yml".to_string(),
        "index.html".to_string(),
    ]
}

fn default_watch_alias() -> String {
    "dev".to_string()
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            paths: default_watch_paths(),
            alias: default_watch_alias(),
            debounce_ms: default_debounce_ms(),
            interrupt: true,
            run_at_start: true,
        }
    }
}

/// The alias table used when `[alias]` is empty or partial: `test`,
/// `deploy`, and the watch reaction `dev`.
pub fn default_aliases() -> BTreeMap<String, Vec<String>> {
    let mut aliases = BTreeMap::new();
    aliases.insert("test".to_string(), vec!["lint".to_string()]);
    aliases.insert(
        "deploy".to_string(),
        vec![
            "concat".to_string(),
            "minify".to_string(),
            "site-build".to_string(),
        ],
    );
    aliases.insert(
        "dev".to_string(),
        vec![
            "concat".to_string(),
            "minify".to_string(),
            "site-serve".to_string(),
        ],
    );
    aliases
}

impl ConfigFile {
    /// Effective alias table: declared aliases layered over the defaults.
    /// A declared alias with the same name replaces the default entirely.
    pub fn effective_aliases(&self) -> BTreeMap<String, Vec<String>> {
        let mut aliases = default_aliases();
        for (name, steps) in self.alias.iter() {
            aliases.insert(name.clone(), steps.clone());
        }
        aliases
    }
}
