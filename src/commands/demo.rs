//! Implementation of `devflow --demo`.
//!
//! Cleans the build trees, rebuilds the artifact and walks through the
//! configured demo steps. Step arguments may use `{root}`, `{models}` and
//! `{results}`, which expand to the corresponding project directories.

use super::clean::clean_project;
use super::ensure_executable;
use super::run::launch;
use crate::cli::Flags;
use crate::config::DemoStep;
use crate::context::{DevContext, ProjectLayout};
use crate::error::{DevError, Result};
use crate::fs::with_scoped_config;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn cmd_demo(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    println!("=== devflow demo ===\n");
    clean_project(ctx, false, false)?;
    let exe = ensure_executable(ctx, flags)?;

    let total = ctx.config.demo_steps.len();
    let mut failed = 0;
    for (index, step) in ctx.config.demo_steps.iter().enumerate() {
        println!("\n--- Step {}/{}: {} ---", index + 1, total, step.title);
        if let Err(e) = run_step(ctx, exe.path(), step, flags.verbose) {
            warn!(step = %step.title, error = %e, "demo step failed; continuing");
            failed += 1;
        }
    }

    println!("\nGenerated files:");
    for dir in [ctx.layout.models_dir(), ctx.layout.results_dir()] {
        let files = list_files(&dir);
        println!("  {}/ ({} files)", dir.display(), files.len());
        for file in files {
            println!("    {}", file.display());
        }
    }

    if failed == 0 {
        println!("\nDemo completed successfully.");
    } else {
        println!("\nDemo completed with {} failed step(s).", failed);
    }
    Ok(())
}

/// Run one step, writing inline configuration to a temporary file if present.
///
/// Step output is captured unless `verbose` is set.
fn run_step(ctx: &DevContext<'_>, exe: &Path, step: &DemoStep, verbose: bool) -> Result<()> {
    let args = step_args(&ctx.layout, step)?;
    let stdin = step.stdin.as_deref();
    let capture = !verbose;

    match step.config.as_deref() {
        Some(contents) => with_scoped_config(contents, |config| {
            launch(ctx, exe, Some(config), &args, stdin, capture)
        }),
        None => launch(ctx, exe, None, &args, stdin, capture),
    }
}

/// Split the step command and expand directory placeholders.
pub(crate) fn step_args(layout: &ProjectLayout, step: &DemoStep) -> Result<Vec<String>> {
    let words = shell_words::split(&step.command).map_err(|e| {
        DevError::UserError(format!(
            "demo step '{}' has an unparsable command: {}",
            step.title, e
        ))
    })?;

    let root = layout.root.display().to_string();
    let models = layout.models_dir().display().to_string();
    let results = layout.results_dir().display().to_string();

    Ok(words
        .into_iter()
        .map(|word| {
            word.replace("{root}", &root)
                .replace("{models}", &models)
                .replace("{results}", &results)
        })
        .collect())
}

/// Regular files directly inside `dir`, sorted. A missing directory is empty.
fn list_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| path.file_name().map(PathBuf::from))
        .collect();
    files.sort();
    files
}
