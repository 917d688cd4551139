//! Static analysis with clang-tidy or cppcheck.

use crate::build::BUILD_TOOL_HINT;
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::fs::{collect_sources, existing_dirs};
use crate::process::{Invocation, require_tool};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Name of the compilation database clang-tidy reads.
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// How detected issues and missing tools affect the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPolicy {
    /// Report issues and keep going; no analyzer installed is a warning.
    Advisory,
    /// Issues fail the run; no analyzer installed is `ToolMissing`.
    Strict,
}

/// Analyzer families devflow knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    ClangTidy,
    Cppcheck,
}

impl AnalyzerKind {
    /// Recognize a configured program name such as `clang-tidy-18`.
    pub fn from_program(program: &str) -> Option<Self> {
        let stem = Path::new(program)
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())?;
        if stem.starts_with("clang-tidy") {
            Some(AnalyzerKind::ClangTidy)
        } else if stem.starts_with("cppcheck") {
            Some(AnalyzerKind::Cppcheck)
        } else {
            None
        }
    }
}

/// Summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// The analyzer that ran, or `None` when analysis was skipped.
    pub analyzer: Option<String>,
    /// Exit status of the first invocation that reported issues.
    pub issue_code: Option<i32>,
}

impl AnalysisOutcome {
    fn skipped() -> Self {
        Self {
            analyzer: None,
            issue_code: None,
        }
    }

    #[cfg(test)]
    pub fn issues_found(&self) -> bool {
        self.issue_code.is_some()
    }
}

/// Run the first installed analyzer over the configured source directories.
pub fn run_static_analysis(
    ctx: &DevContext<'_>,
    policy: AnalysisPolicy,
    verbose: bool,
) -> Result<AnalysisOutcome> {
    println!("Running static analysis...");

    let Some((program, kind)) = pick_analyzer(ctx) else {
        let tried = ctx.config.tools.analyzers.join(" or ");
        return match policy {
            AnalysisPolicy::Advisory => {
                warn!(tried = %tried, "no static analysis tool found; skipping analysis");
                Ok(AnalysisOutcome::skipped())
            }
            AnalysisPolicy::Strict => Err(DevError::tool_missing(
                tried,
                "Install clang-tidy and/or cppcheck.",
            )),
        };
    };

    let dirs = existing_dirs(&ctx.layout.root, &ctx.config.source_dirs);
    if dirs.is_empty() {
        warn!("no source directories found; nothing to analyze");
        return Ok(AnalysisOutcome {
            analyzer: Some(program),
            issue_code: None,
        });
    }

    let issue_code = match kind {
        AnalyzerKind::ClangTidy => run_clang_tidy(ctx, &program, &dirs, verbose)?,
        AnalyzerKind::Cppcheck => run_cppcheck(ctx, &program, &dirs, verbose)?,
    };

    let outcome = AnalysisOutcome {
        analyzer: Some(program.clone()),
        issue_code,
    };

    match (outcome.issue_code, policy) {
        (None, _) => {
            println!("{} analysis complete: no issues reported.", program);
            Ok(outcome)
        }
        (Some(code), AnalysisPolicy::Advisory) => {
            warn!(analyzer = %program, code, "static analysis reported issues");
            println!("{} analysis complete: issues reported (see above).", program);
            Ok(outcome)
        }
        (Some(code), AnalysisPolicy::Strict) => Err(DevError::ToolFailed {
            tool: program,
            code,
        }),
    }
}

fn pick_analyzer(ctx: &DevContext<'_>) -> Option<(String, AnalyzerKind)> {
    ctx.config.tools.analyzers.iter().find_map(|program| {
        let kind = AnalyzerKind::from_program(program)?;
        ctx.runner.find_tool(program)?;
        Some((program.clone(), kind))
    })
}

fn run_clang_tidy(
    ctx: &DevContext<'_>,
    program: &str,
    dirs: &[PathBuf],
    verbose: bool,
) -> Result<Option<i32>> {
    let build_dir = ctx.layout.build_dir(crate::build::VariantId::Standard.dir_name());
    ensure_compilation_database(ctx, &build_dir)?;

    let globs = ctx.config.source_globset()?;
    let mut issue_code = None;

    for dir in dirs {
        let files = collect_sources(dir, &globs);
        if files.is_empty() {
            continue;
        }

        let rel = dir.strip_prefix(&ctx.layout.root).unwrap_or(dir);
        println!("Analyzing {}...", rel.display());

        let mut inv = Invocation::new(program)
            .arg(format!("-checks={}", ctx.config.tidy_checks))
            .arg("-p")
            .path_arg(&build_dir)
            .current_dir(&ctx.layout.root);
        for file in &files {
            inv = inv.path_arg(file);
        }

        let status = ctx.runner.run(&inv)?;
        if !status.success() {
            println!("{} found issues in {}.", program, rel.display());
            if !verbose {
                println!("Run with --verbose for detailed output.");
            }
            issue_code.get_or_insert(status.exit_code());
        }
    }

    Ok(issue_code)
}

fn ensure_compilation_database(ctx: &DevContext<'_>, build_dir: &Path) -> Result<()> {
    if build_dir.join(COMPILE_COMMANDS).is_file() {
        return Ok(());
    }

    info!(dir = %build_dir.display(), "generating compilation database");
    println!("Compilation database not found; configuring to generate it...");
    require_tool(ctx.runner, &ctx.config.tools.build, BUILD_TOOL_HINT)?;

    std::fs::create_dir_all(build_dir).map_err(|e| {
        DevError::UserError(format!(
            "failed to create build directory '{}': {}",
            build_dir.display(),
            e
        ))
    })?;

    let inv = Invocation::new(&ctx.config.tools.build)
        .arg("-S")
        .path_arg(&ctx.layout.root)
        .arg("-B")
        .path_arg(build_dir)
        .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON")
        .current_dir(&ctx.layout.root);
    let status = ctx.runner.run(&inv)?;
    if status.success() {
        Ok(())
    } else {
        Err(DevError::ConfigurationFailure {
            variant: crate::build::VariantId::Standard.label().to_string(),
            code: status.exit_code(),
        })
    }
}

fn run_cppcheck(
    ctx: &DevContext<'_>,
    program: &str,
    dirs: &[PathBuf],
    verbose: bool,
) -> Result<Option<i32>> {
    let mut inv = Invocation::new(program)
        .args([
            "--enable=all",
            "--suppress=missingIncludeSystem",
            "--inline-suppr",
            "--error-exitcode=1",
            "--template={file}:{line}: {severity}: {message}",
        ])
        .arg(format!("--std={}", ctx.config.cppcheck_std))
        .current_dir(&ctx.layout.root);
    if verbose {
        inv = inv.arg("--verbose");
    }
    for dir in dirs {
        inv = inv.path_arg(dir);
    }

    let status = ctx.runner.run(&inv)?;
    Ok((!status.success()).then(|| status.exit_code()))
}
