//! Command implementations for devflow.
//!
//! This module resolves the parsed flag set to exactly one command from the
//! [`registry`] and runs its handler. Handlers live in one file per concern.

mod analyze;
mod build;
mod clean;
mod demo;
mod docs;
pub mod registry;
mod run;


pub use registry::CommandDescriptor;

use registry::{OptionDescriptor, REGISTRY, ValueKind};

use crate::build::{BuildOptions, BuildVariant, VariantId, build_variant};
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::locate::{ResolvedExecutable, locate_executable};
use tracing::{debug, info};

/// Identify the single command requested by `flags`.
///
/// An explicit action flag wins, first in registry order. Without one, the
/// command owning every set option is selected. No set option is
/// [`DevError::NoAction`]; options owned by different commands are
/// [`DevError::AmbiguousAction`].
pub fn resolve(flags: &Flags) -> Result<&'static CommandDescriptor> {
    if let Some(cmd) = REGISTRY.iter().find(|cmd| (cmd.is_requested)(flags)) {
        debug!(command = %cmd.id, "explicit action");
        return Ok(cmd);
    }

    let owners: Vec<&'static CommandDescriptor> = REGISTRY
        .iter()
        .filter(|cmd| cmd.has_option_set(flags))
        .collect();

    match owners.as_slice() {
        [] => Err(DevError::NoAction),
        [only] => {
            debug!(
                command = %only.id,
                options = ?only.set_options(flags),
                "action implied by options"
            );
            Ok(*only)
        }
        many => Err(DevError::AmbiguousAction(
            many.iter()
                .map(|cmd| format!("--{}", cmd.flag))
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

/// Run the handler of an already resolved command.
pub fn run_command(
    ctx: &DevContext<'_>,
    command: &CommandDescriptor,
    flags: &Flags,
) -> Result<()> {
    info!(command = %command.id, "running command");
    (command.handler)(ctx, flags)
}

/// Per command, its group heading followed by one line listing its action
/// flag and owned options.
pub fn usage_overview() -> String {
    let mut lines = Vec::with_capacity(REGISTRY.len() * 2);
    for cmd in &REGISTRY {
        lines.push(format!("{}:", cmd.group));
        let mut line = format!("  --{:<15}", cmd.flag);
        for opt in cmd.options {
            line.push(' ');
            line.push_str(&option_usage(opt));
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn option_usage(opt: &OptionDescriptor) -> String {
    let mut spelling = format!("--{}", opt.name);
    for extra in opt.extra_flags {
        spelling.push('|');
        if !extra.starts_with('-') {
            spelling.push_str("--");
        }
        spelling.push_str(extra);
    }
    match (opt.value_kind, opt.default) {
        (ValueKind::Boolean, _) => format!("[{}]", spelling),
        (ValueKind::Integer, Some(default)) => format!("[{} <N>={}]", spelling, default),
        (ValueKind::Integer, None) => format!("[{} <N>]", spelling),
        (ValueKind::String, _) => format!("[{} <VALUE>]", spelling),
    }
}

/// Build knobs read by every handler that compiles.
pub(crate) fn build_options(flags: &Flags) -> BuildOptions {
    BuildOptions {
        jobs: flags.jobs,
        verbose: flags.verbose,
    }
}

/// The standard variant as selected by `--debug`.
pub(crate) fn standard_variant(ctx: &DevContext<'_>, flags: &Flags) -> BuildVariant {
    BuildVariant::for_id(&ctx.layout, &ctx.config, VariantId::Standard, flags.debug)
}

/// Locate the artifact, building the standard variant first when absent.
pub(crate) fn ensure_executable(ctx: &DevContext<'_>, flags: &Flags) -> Result<ResolvedExecutable> {
    let variant = standard_variant(ctx, flags);
    let name = ctx.artifact_name();

    if let Some(exe) = locate_executable(variant.build_dir(), ctx.platform, &name) {
        return Ok(exe);
    }

    println!("Executable not found. Building project first...");
    build_variant(ctx, &variant, build_options(flags))?;

    locate_executable(variant.build_dir(), ctx.platform, &name).ok_or_else(|| {
        DevError::ExecutableNotFound {
            name,
            build_dir: variant.build_dir().to_path_buf(),
        }
    })
}
