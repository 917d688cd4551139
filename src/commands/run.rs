//! Implementation of `devflow --run`.

use super::ensure_executable;
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::locate::resolve_run_config;
use crate::process::{Invocation, OUTPUT_TAIL_MAX_CHARS, OUTPUT_TAIL_MAX_LINES, truncate_output};
use std::path::Path;
use tracing::info;

/// Launch the artifact with the resolved configuration and passthrough args.
///
/// The artifact's exit status is returned unchanged.
pub fn cmd_run(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    let exe = ensure_executable(ctx, flags)?;

    let config = flags
        .config
        .as_deref()
        .and_then(|name| resolve_run_config(&ctx.layout, &ctx.config, name));

    launch(ctx, exe.path(), config.as_deref(), &flags.args, None, false)
}

/// Run the artifact at `exe` in the project root.
///
/// With `capture` the artifact's output is held back and only the tail of a
/// failing run is printed; otherwise stdio is inherited.
pub(crate) fn launch(
    ctx: &DevContext<'_>,
    exe: &Path,
    config: Option<&Path>,
    args: &[String],
    stdin: Option<&str>,
    capture: bool,
) -> Result<()> {
    let mut inv = Invocation::new(exe.to_string_lossy()).current_dir(&ctx.layout.root);
    if let Some(config) = config {
        inv = inv.arg("--config").path_arg(config);
    }
    inv = inv.args(args.iter().cloned());
    if let Some(input) = stdin {
        inv = inv.stdin(input);
    }
    if capture {
        inv = inv.captured();
    }

    info!(command = %inv.command_line(), "launching");
    println!("Running: {}", inv.command_line());

    let status = ctx.runner.run(&inv)?;
    if status.success() {
        Ok(())
    } else {
        if capture {
            let tail = truncate_output(
                &status.combined_output(),
                OUTPUT_TAIL_MAX_LINES,
                OUTPUT_TAIL_MAX_CHARS,
            );
            if !tail.is_empty() {
                println!("{}", tail);
            }
        }
        Err(DevError::RunFailed {
            program: exe
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| exe.display().to_string()),
            code: status.exit_code(),
        })
    }
}
