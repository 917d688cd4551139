//! Configure and compile one build variant.

use super::generator::select_generator;
use super::variant::BuildVariant;
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::process::{Invocation, require_tool};
use tracing::info;

/// Hint shown when the build tool is not installed.
pub const BUILD_TOOL_HINT: &str = "Install CMake (3.20 or newer) and make sure it is on PATH.";

/// Knobs shared by every build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Parallel jobs for the compile step; 0 leaves it to the build tool.
    pub jobs: u32,
    pub verbose: bool,
}

/// The configure invocation for `variant`.
pub fn configure_invocation(
    ctx: &DevContext<'_>,
    variant: &BuildVariant,
    generator: &str,
    opts: BuildOptions,
) -> Invocation {
    let mut inv = Invocation::new(&ctx.config.tools.build)
        .arg("-S")
        .path_arg(&ctx.layout.root)
        .arg("-B")
        .path_arg(variant.build_dir())
        .arg(format!("-DCMAKE_BUILD_TYPE={}", variant.build_type()))
        .arg("-G")
        .arg(generator)
        .args(variant.define_args())
        .current_dir(&ctx.layout.root);

    if opts.verbose {
        inv = inv.arg("-DCMAKE_VERBOSE_MAKEFILE=ON");
    }
    inv
}

/// The compile invocation for `variant`.
pub fn compile_invocation(
    ctx: &DevContext<'_>,
    variant: &BuildVariant,
    opts: BuildOptions,
) -> Invocation {
    let mut inv = Invocation::new(&ctx.config.tools.build)
        .arg("--build")
        .path_arg(variant.build_dir())
        .arg("--config")
        .arg(variant.build_type().as_str())
        .current_dir(&ctx.layout.root);

    if opts.jobs > 0 {
        inv = inv.arg("-j").arg(opts.jobs.to_string());
    }
    inv
}

/// Produce a compiled artifact for `variant`.
///
/// Creates the build directory, configures, compiles, and on success
/// recreates the `models/` and `results/` output directories. Configure and
/// compile failures are distinct and never retried.
pub fn build_variant(ctx: &DevContext<'_>, variant: &BuildVariant, opts: BuildOptions) -> Result<()> {
    require_tool(ctx.runner, &ctx.config.tools.build, BUILD_TOOL_HINT)?;

    std::fs::create_dir_all(variant.build_dir()).map_err(|e| {
        DevError::UserError(format!(
            "failed to create build directory '{}': {}",
            variant.build_dir().display(),
            e
        ))
    })?;

    let generator = select_generator(ctx);
    info!(
        variant = %variant.id(),
        build_type = %variant.build_type(),
        generator = %generator,
        dir = %variant.build_dir().display(),
        "configuring build"
    );
    println!(
        "Configuring {} build ({}) in {}",
        variant.id(),
        variant.build_type(),
        variant.build_dir().display()
    );

    let status = ctx
        .runner
        .run(&configure_invocation(ctx, variant, &generator, opts))?;
    if !status.success() {
        return Err(DevError::ConfigurationFailure {
            variant: variant.id().label().to_string(),
            code: status.exit_code(),
        });
    }

    println!("Building {} variant...", variant.id());
    let status = ctx.runner.run(&compile_invocation(ctx, variant, opts))?;
    if !status.success() {
        return Err(DevError::CompileFailure {
            variant: variant.id().label().to_string(),
            code: status.exit_code(),
        });
    }

    ctx.ensure_output_dirs()?;

    println!("Build completed: {}", variant.build_dir().display());
    Ok(())
}
