//! Source formatting with clang-format.

use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::fs::collect_sources;
use crate::process::{Invocation, require_tool};
use std::path::PathBuf;
use tracing::info;

/// Result of a formatting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSummary {
    /// Files handed to the formatter.
    pub checked: Vec<PathBuf>,
    /// Files the formatter would change (dry runs only).
    pub would_reformat: Vec<PathBuf>,
}

/// Format every source file under the configured format directories.
///
/// With `dry_run` the files are only checked, and files that would change
/// are listed without failing. Otherwise the first formatter failure stops
/// the pass.
pub fn format_sources(ctx: &DevContext<'_>, dry_run: bool) -> Result<FormatSummary> {
    let formatter = &ctx.config.tools.formatter;
    require_tool(ctx.runner, formatter, "Install clang-format and make sure it is on PATH.")?;

    println!("Formatting code using {}...", formatter);

    let globs = ctx.config.source_globset()?;
    let files: Vec<PathBuf> = ctx
        .config
        .format_dirs
        .iter()
        .flat_map(|dir| collect_sources(&ctx.layout.root.join(dir), &globs))
        .collect();

    let mut summary = FormatSummary::default();
    if files.is_empty() {
        println!("No source files found.");
        return Ok(summary);
    }

    for file in files {
        let rel = file
            .strip_prefix(&ctx.layout.root)
            .unwrap_or(&file)
            .to_path_buf();

        if dry_run {
            let inv = Invocation::new(formatter)
                .args(["--dry-run", "--Werror"])
                .path_arg(&file)
                .current_dir(&ctx.layout.root)
                .captured();
            let status = ctx.runner.run(&inv)?;
            if !status.success() {
                println!("Would reformat {}", rel.display());
                summary.would_reformat.push(file.clone());
            }
        } else {
            println!("Formatting {}", rel.display());
            let inv = Invocation::new(formatter)
                .arg("-i")
                .path_arg(&file)
                .current_dir(&ctx.layout.root);
            let status = ctx.runner.run(&inv)?;
            if !status.success() {
                return Err(DevError::ToolFailed {
                    tool: format!("{} on {}", formatter, rel.display()),
                    code: status.exit_code(),
                });
            }
        }
        summary.checked.push(file);
    }

    info!(
        checked = summary.checked.len(),
        would_reformat = summary.would_reformat.len(),
        dry_run,
        "formatting complete"
    );
    println!("Code formatting complete.");
    Ok(summary)
}
