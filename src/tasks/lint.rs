// src/tasks/lint.rs

//! Built-in stylesheet checks.
//!
//! This is deliberately a small rule set, not a full lint engine: each rule
//! is a line-level pattern with a fixed id and severity, and the task fails
//! when any finding's severity reaches the configured strictness threshold.
//! Findings below the threshold are reported as run warnings.

use regex::Regex;
use tracing::debug;

use crate::errors::{TaskError, Violation};
use crate::pipeline::runner::RunContext;
use crate::pipeline::task::LintOptions;
use crate::tasks::files::expand_globs;

/// Severity 2 findings fail the default configuration (`strictness = 2`).
const SEVERITY_ERROR: u8 = 2;
const SEVERITY_WARNING: u8 = 1;

struct Rule {
    id: &'static str,
    severity: u8,
    pattern: Regex,
    message: &'static str,
}

fn rules() -> Vec<Rule> {
    // The patterns are infallible literals; panicking here would be a bug in
    // this table, not a runtime condition.
    vec![
        Rule {
            id: "import",
            severity: SEVERITY_ERROR,
            pattern: Regex::new(r"@import\b").unwrap(),
            message: "@import prevents parallel stylesheet downloads",
        },
        Rule {
            id: "empty-rules",
            severity: SEVERITY_WARNING,
            pattern: Regex::new(r"\{\s*\}").unwrap(),
            message: "rule is empty",
        },
        Rule {
            id: "zero-units",
            severity: SEVERITY_WARNING,
            pattern: Regex::new(r"(?i):\s*0(px|em|rem|pt|pc|ex|cm|mm|in)\b").unwrap(),
            message: "values of 0 do not need units",
        },
    ]
}

/// Run the lint task: expand the input globs, scan every matched stylesheet,
/// and fail with the findings at or above the strictness threshold.
pub async fn run(opts: &LintOptions, ctx: &mut RunContext) -> Result<(), TaskError> {
    let files = expand_globs(&opts.root, &opts.src).map_err(TaskError::Other)?;

    if files.is_empty() {
        return if opts.require_inputs {
            Err(TaskError::NoInputs)
        } else {
            debug!("lint globs matched no files; nothing to check");
            Ok(())
        };
    }

    let rules = rules();
    let mut failing: Vec<Violation> = Vec::new();

    for file in &files {
        if ctx.cancel.is_cancelled() {
            return Err(TaskError::Interrupted);
        }

        let contents = tokio::fs::read_to_string(file).await?;
        debug!(file = %file.display(), "linting stylesheet");

        for (idx, line) in contents.lines().enumerate() {
            for rule in &rules {
                if !rule.pattern.is_match(line) {
                    continue;
                }

                let violation = Violation {
                    rule: rule.id,
                    file: file.clone(),
                    line: idx + 1,
                    severity: rule.severity,
                    message: rule.message.to_string(),
                };

                if violation.severity >= opts.strictness {
                    failing.push(violation);
                } else {
                    ctx.warn(format!("lint: {violation}"));
                }
            }
        }
    }

    if failing.is_empty() {
        debug!(files = files.len(), "lint passed");
        Ok(())
    } else {
        Err(TaskError::LintViolations { violations: failing })
    }
}
