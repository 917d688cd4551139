//! Coverage-instrumented test run and HTML report generation.

use super::runner::{TestSelection, run_test_harness};
use crate::build::{BuildOptions, BuildVariant, VariantId, build_variant};
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::process::{Invocation, require_tool};
use crate::viewer::open_in_viewer;
use std::path::PathBuf;
use tracing::{info, warn};

pub const COVERAGE_TOOLS_HINT: &str =
    "Coverage reports need lcov and genhtml (e.g. `sudo apt-get install lcov`).";

/// Where a finished coverage run left its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Filtered tracefile fed to the renderer.
    pub tracefile: PathBuf,
    /// Entry page of the rendered HTML report.
    pub index: PathBuf,
    /// Whether every selected test passed during the instrumented run.
    pub tests_passed: bool,
}

/// Build the coverage variant, run the selected tests, and render a report.
///
/// A failing test run is logged and tolerated: the report is still produced.
/// Collection and rendering failures are fatal. When `open_report` is set the
/// report is opened in a viewer; failing to open it is not an error.
pub fn run_coverage(
    ctx: &DevContext<'_>,
    selection: &TestSelection,
    opts: BuildOptions,
    open_report: bool,
) -> Result<CoverageReport> {
    let tools = &ctx.config.tools;
    require_tool(ctx.runner, &tools.coverage_collector, COVERAGE_TOOLS_HINT)?;
    require_tool(ctx.runner, &tools.coverage_renderer, COVERAGE_TOOLS_HINT)?;

    let variant = BuildVariant::for_id(&ctx.layout, &ctx.config, VariantId::Coverage, true);
    build_variant(ctx, &variant, opts)?;

    let status = run_test_harness(ctx, &variant, selection, opts.verbose)?;
    let tests_passed = status.success();
    if !tests_passed {
        warn!(
            code = status.exit_code(),
            "some tests failed during coverage measurement; generating the report anyway"
        );
    }

    let coverage_dir = variant.build_dir().join("coverage");
    std::fs::create_dir_all(&coverage_dir).map_err(|e| {
        DevError::UserError(format!(
            "failed to create coverage directory '{}': {}",
            coverage_dir.display(),
            e
        ))
    })?;
    let raw = coverage_dir.join("coverage.info");
    let filtered = coverage_dir.join("coverage_filtered.info");

    println!("Generating coverage report...");
    let capture = Invocation::new(&tools.coverage_collector)
        .arg("--directory")
        .path_arg(variant.build_dir())
        .arg("--capture")
        .arg("--output-file")
        .path_arg(&raw)
        .current_dir(&ctx.layout.root);
    run_post_processor(ctx, &capture)?;

    let remove = Invocation::new(&tools.coverage_collector)
        .arg("--remove")
        .path_arg(&raw)
        .args(ctx.config.coverage_excludes.iter().cloned())
        .arg("--output-file")
        .path_arg(&filtered)
        .current_dir(&ctx.layout.root);
    run_post_processor(ctx, &remove)?;

    let render = Invocation::new(&tools.coverage_renderer)
        .path_arg(&filtered)
        .arg("--output-directory")
        .path_arg(&coverage_dir)
        .current_dir(&ctx.layout.root);
    run_post_processor(ctx, &render)?;

    let index = coverage_dir.join("index.html");
    info!(report = %index.display(), tests_passed, "coverage report generated");
    println!("\nCoverage report generated: {}", index.display());

    if open_report {
        open_in_viewer(ctx, &index);
    }

    Ok(CoverageReport {
        tracefile: filtered,
        index,
        tests_passed,
    })
}

fn run_post_processor(ctx: &DevContext<'_>, invocation: &Invocation) -> Result<()> {
    let status = ctx.runner.run(invocation)?;
    if status.success() {
        Ok(())
    } else {
        Err(DevError::ToolFailed {
            tool: invocation.program.clone(),
            code: status.exit_code(),
        })
    }
}
