//! Implementations of `devflow --analyze` and `devflow --format`.

use crate::analysis::{AnalysisPolicy, format_sources, run_static_analysis};
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::Result;

/// Run the preferred analyzer; reported issues do not fail the command.
pub fn cmd_analyze(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    run_static_analysis(ctx, AnalysisPolicy::Advisory, flags.verbose).map(|_| ())
}

/// Format sources in place, or list files needing it with `--dry-run`.
pub fn cmd_format(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    let summary = format_sources(ctx, flags.dry_run)?;
    if flags.dry_run && !summary.would_reformat.is_empty() {
        println!(
            "{} of {} files would be reformatted.",
            summary.would_reformat.len(),
            summary.checked.len()
        );
    }
    Ok(())
}
