//! API documentation generation with Doxygen.
//!
//! Runs the documentation generator against the project's `Doxyfile`, then
//! copies theme and branding assets next to the generated HTML in
//! `web/docs/`. Missing assets are warnings, never failures.

use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::process::{Invocation, require_tool};
use crate::viewer::open_in_viewer;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Theme file extensions copied from `doxytheme/`.
pub const THEME_EXTENSIONS: [&str; 3] = ["css", "html", "js"];

/// What a documentation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsOutcome {
    /// Assets copied into the output directory (destination paths).
    pub copied: Vec<PathBuf>,
    /// Entry page, when the generator produced one.
    pub index: Option<PathBuf>,
}

/// Generate documentation and optionally open it.
pub fn generate_docs(ctx: &DevContext<'_>, open: bool) -> Result<DocsOutcome> {
    let layout = &ctx.layout;
    let generator = &ctx.config.tools.doc_generator;
    let docs_dir = layout.docs_output_dir();

    require_tool(
        ctx.runner,
        generator,
        "See https://www.doxygen.nl/download.html for installation instructions.",
    )?;
    info!(generator = %generator, version = %generator_version(ctx), "documentation generator");

    let doxyfile = layout.doxyfile();
    if !doxyfile.is_file() {
        return Err(DevError::UserError(format!(
            "Doxyfile not found at {}\nCreate a Doxyfile in the project root directory.",
            doxyfile.display()
        )));
    }

    std::fs::create_dir_all(&docs_dir).map_err(|e| {
        DevError::UserError(format!(
            "failed to create documentation directory '{}': {}",
            docs_dir.display(),
            e
        ))
    })?;
    println!("Documentation output directory: {}", docs_dir.display());

    println!("Running {} with configuration file: {}", generator, doxyfile.display());
    let status = ctx.runner.run(
        &Invocation::new(generator)
            .path_arg(&doxyfile)
            .current_dir(&layout.root)
            .captured(),
    )?;
    if !status.success() {
        if !status.stderr.is_empty() {
            println!("{} output:\n{}", generator, status.stderr);
        }
        return Err(DevError::ToolFailed {
            tool: generator.clone(),
            code: status.exit_code(),
        });
    }
    if !status.stderr.trim().is_empty() {
        println!("{} warnings:\n{}", generator, status.stderr.trim_end());
    }

    println!("Copying theme files to documentation directory...");
    let mut outcome = DocsOutcome::default();
    copy_theme_files(&layout.doc_theme_dir(), &docs_dir, &mut outcome.copied);

    let logo_name = format!("{}.webp", ctx.artifact_name());
    copy_asset(
        &layout.media_dir().join(&logo_name),
        &docs_dir.join(&logo_name),
        &mut outcome.copied,
    );
    copy_asset(
        &layout.web_dir().join("favicon.ico"),
        &docs_dir.join("favicon.ico"),
        &mut outcome.copied,
    );

    let index = docs_dir.join("index.html");
    if index.is_file() {
        println!("Documentation generated successfully to {}", docs_dir.display());
        if open {
            open_in_viewer(ctx, &index);
        }
        outcome.index = Some(index);
    } else {
        warn!(
            path = %index.display(),
            "documentation index not found; the generator may have written elsewhere"
        );
    }

    Ok(outcome)
}

fn generator_version(ctx: &DevContext<'_>) -> String {
    let probe = Invocation::new(&ctx.config.tools.doc_generator)
        .arg("--version")
        .captured();
    match ctx.runner.run(&probe) {
        Ok(status) if status.success() => status.stdout.trim().to_string(),
        _ => "unknown version".to_string(),
    }
}

fn copy_theme_files(theme_dir: &Path, docs_dir: &Path, copied: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(theme_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %theme_dir.display(), error = %e, "theme directory unavailable");
            return;
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| THEME_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();

    for source in files {
        if let Some(name) = source.file_name() {
            copy_asset(&source, &docs_dir.join(name), copied);
        }
    }
}

fn copy_asset(source: &Path, dest: &Path, copied: &mut Vec<PathBuf>) {
    if !source.is_file() {
        warn!(path = %source.display(), "documentation asset missing");
        return;
    }
    match std::fs::copy(source, dest) {
        Ok(_) => {
            println!("Copied {} to {}", source.display(), dest.display());
            copied.push(dest.to_path_buf());
        }
        Err(e) => warn!(
            source = %source.display(),
            error = %e,
            "failed to copy documentation asset"
        ),
    }
}
