//! Implementation of `devflow --clean`.
//!
//! Removes every variant build directory, plus `models/` and `results/` with
//! `--clean-all` and the generated documentation with `--clean-docs`. A
//! directory that cannot be removed is reported and skipped. The output
//! directories are always recreated afterwards.

use crate::build::VariantId;
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Summary of a clean pass.
#[derive(Debug, Default)]
pub(crate) struct CleanResult {
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

pub fn cmd_clean(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    clean_project(ctx, flags.clean_all, flags.clean_docs).map(|_| ())
}

/// Directories removed for the given options, in removal order.
pub(crate) fn clean_targets(ctx: &DevContext<'_>, all: bool, docs: bool) -> Vec<PathBuf> {
    let layout = &ctx.layout;
    let mut targets: Vec<PathBuf> = VariantId::ALL
        .iter()
        .map(|id| layout.build_dir(id.dir_name()))
        .collect();
    if all {
        targets.push(layout.models_dir());
        targets.push(layout.results_dir());
    }
    if docs {
        targets.push(layout.docs_output_dir());
    }
    targets
}

pub(crate) fn clean_project(ctx: &DevContext<'_>, all: bool, docs: bool) -> Result<CleanResult> {
    let mut result = CleanResult::default();

    for dir in clean_targets(ctx, all, docs) {
        if !dir.exists() {
            continue;
        }
        println!("Removing {}", dir.display());
        match fs::remove_dir_all(&dir) {
            Ok(()) => result.removed.push(dir),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to remove directory; skipping");
                result.skipped.push((dir, e.to_string()));
            }
        }
    }

    if result.removed.is_empty() && result.skipped.is_empty() {
        println!("Nothing to clean.");
    } else {
        println!(
            "Removed {} director{}.",
            result.removed.len(),
            if result.removed.len() == 1 { "y" } else { "ies" }
        );
    }

    ctx.ensure_output_dirs()?;
    Ok(result)
}
