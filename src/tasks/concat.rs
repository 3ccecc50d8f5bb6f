// src/tasks/concat.rs

use tracing::debug;

use crate::errors::TaskError;
use crate::pipeline::runner::RunContext;
use crate::pipeline::task::ConcatOptions;

/// Concatenate the listed sources into the destination file, in order.
///
/// The source list is explicit and ordered (base stylesheet first), so a
/// missing entry is an error rather than a silent skip. The destination is
/// overwritten; its parent directories are created as needed.
pub async fn run(opts: &ConcatOptions, ctx: &mut RunContext) -> Result<(), TaskError> {
    let mut combined: Vec<u8> = Vec::new();

    for src in &opts.src {
        if ctx.cancel.is_cancelled() {
            return Err(TaskError::Interrupted);
        }

        if !src.is_file() {
            return Err(TaskError::MissingSource(src.clone()));
        }

        let bytes = tokio::fs::read(src).await?;
        debug!(src = %src.display(), len = bytes.len(), "read concat source");
        combined.extend_from_slice(&bytes);
    }

    if let Some(parent) = opts.dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&opts.dest, &combined).await?;
    debug!(dest = %opts.dest.display(), len = combined.len(), "wrote concatenated file");

    ctx.record_output(&opts.dest);
    Ok(())
}
