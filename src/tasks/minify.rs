// src/tasks/minify.rs

//! CSS minification: strip comments and collapse insignificant whitespace.
//!
//! The transform is semantics-preserving and deterministic, and it is a fixed
//! point (minifying already-minified output changes nothing), so repeated
//! pipeline runs on unchanged sources produce byte-identical destinations.

use tracing::debug;

use crate::errors::TaskError;
use crate::pipeline::runner::RunContext;
use crate::pipeline::task::MinifyOptions;

/// Read `src`, minify, write `dest` (overwriting, creating parent dirs).
pub async fn run(opts: &MinifyOptions, ctx: &mut RunContext) -> Result<(), TaskError> {
    if !opts.src.is_file() {
        return Err(TaskError::MissingSource(opts.src.clone()));
    }

    let input = tokio::fs::read_to_string(&opts.src).await?;

    if ctx.cancel.is_cancelled() {
        return Err(TaskError::Interrupted);
    }

    let output = minify_css(&input);
    debug!(
        src = %opts.src.display(),
        before = input.len(),
        after = output.len(),
        "minified stylesheet"
    );

    if let Some(parent) = opts.dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&opts.dest, output.as_bytes()).await?;
    ctx.record_output(&opts.dest);
    Ok(())
}

/// Characters a preceding space can always be dropped before.
///
/// `(` and `:` are deliberately absent: the space in `and (min-width: ...)`
/// separates the media-query keyword from the condition (without it `and(`
/// lexes as a function token), and the space in `ul :hover` is a descendant
/// combinator (`ul:hover` is a different selector).
fn no_space_before(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ',' | '>' | '~' | ')')
}

/// Characters a following space can always be dropped after.
///
/// `)` is deliberately absent: the space in `(min-width: 10px) and (...)`
/// separates the condition from the next keyword.
fn no_space_after(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ',' | '>' | '~' | '(' | ':')
}

/// Minify a stylesheet: drop `/* ... */` comments, collapse whitespace runs
/// to single spaces, drop spaces where CSS never needs them, and drop
/// semicolons that immediately precede a closing brace. Spaces that carry
/// meaning (descendant combinators, media-query keyword separators) are
/// preserved; string literals pass through intact.
pub fn minify_css(input: &str) -> String {
    let stripped = strip_comments(input);

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    let mut in_string: Option<char> = None;

    for c in stripped.chars() {
        if let Some(quote) = in_string {
            out.push(c);
            if c == quote {
                in_string = None;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !no_space_before(c) && !last_forbids_space(&out) {
            out.push(' ');
        }
        pending_space = false;

        if c == '}' && out.ends_with(';') {
            out.pop();
        }

        if c == '"' || c == '\'' {
            in_string = Some(c);
        }
        out.push(c);
    }

    out
}

/// Whether a pending space can be dropped given the last emitted character.
fn last_forbids_space(out: &str) -> bool {
    match out.chars().last() {
        None => true,
        Some(c) => no_space_after(c),
    }
}

/// Remove `/* ... */` comments, leaving string literals untouched.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(quote) = in_string {
            out.push(c);
            if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                in_string = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                // Skip to the closing `*/`; an unterminated comment swallows
                // the rest of the input, matching standard CSS tokenization.
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                // A comment acts as a token separator.
                out.push(' ');
            }
            c => out.push(c),
        }
    }

    out
}
