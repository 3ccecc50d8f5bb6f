// src/pipeline/task.rs

use std::path::PathBuf;

/// Public type alias for task names throughout the pipeline.
pub type TaskName = String;

/// A single named build step.
///
/// Tasks are data: the handler for each [`TaskSpec`] variant lives in
/// `crate::tasks` and is dispatched by the runner. Tasks are immutable after
/// registration.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: TaskName,
    pub spec: TaskSpec,

    /// Glob patterns describing the files this task reads. Informational for
    /// most kinds (dry-run output); the lint handler expands them itself.
    pub input_globs: Vec<String>,

    /// The file this task writes, if it writes exactly one.
    pub output: Option<PathBuf>,
}

/// Typed per-kind task options. One variant per recognised task kind, rather
/// than an open-ended key-value bag.
#[derive(Debug, Clone)]
pub enum TaskSpec {
    Lint(LintOptions),
    Concat(ConcatOptions),
    Minify(MinifyOptions),
    Shell(ShellOptions),
}

impl TaskSpec {
    /// Short kind label for logging and dry-run output.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskSpec::Lint(_) => "lint",
            TaskSpec::Concat(_) => "concat",
            TaskSpec::Minify(_) => "minify",
            TaskSpec::Shell(_) => "shell",
        }
    }
}

/// Options for the stylesheet lint task.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Directory the `src` globs are evaluated against.
    pub root: PathBuf,

    /// Glob patterns for the stylesheets to check.
    pub src: Vec<String>,

    /// Minimum violation severity that fails the task.
    pub strictness: u8,

    /// Fail when the globs match zero files.
    pub require_inputs: bool,
}

/// Options for the ordered byte-concatenation task.
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    /// Source files, in concatenation order. Every listed file must exist.
    pub src: Vec<PathBuf>,

    /// Destination file; overwritten on every run.
    pub dest: PathBuf,
}

/// Options for the CSS minification task.
#[derive(Debug, Clone)]
pub struct MinifyOptions {
    pub src: PathBuf,

    /// Destination file; overwritten on every run.
    pub dest: PathBuf,
}

/// Options for an external command task (site build/serve, custom shell).
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Command line, run through the platform shell.
    pub cmd: String,

    /// Working directory for the command.
    pub cwd: PathBuf,
}
