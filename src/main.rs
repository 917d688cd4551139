//! devflow: development workflow orchestrator for CMake projects.
//!
//! This is the main entry point for the `devflow` CLI. It parses flags,
//! resolves them to a single command, and maps errors to exit codes.

mod analysis;
mod build;
mod cli;
mod commands;
pub mod config;
pub mod context;
mod docs;
pub mod error;
pub mod exit_codes;
pub mod fs;
mod locate;
mod pipeline;
pub mod process;
mod testing;
mod viewer;

#[cfg(test)]
mod test_support;

use clap::CommandFactory;
use cli::{Cli, Flags};
use config::Config;
use context::{DevContext, ProjectLayout, project_version};
use error::{DevError, Result};
use process::SystemRunner;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.flags.verbose);

    let command = match commands::resolve(&cli.flags) {
        Ok(command) => command,
        Err(DevError::NoAction) => {
            eprintln!("Error: {}", DevError::NoAction);
            Cli::command().print_help().ok();
            println!("\nActions and their options:\n{}", commands::usage_overview());
            return exit_code(exit_codes::FAILURE);
        }
        Err(err) => return report(err),
    };

    match run(command, &cli.flags) {
        Ok(()) => exit_code(exit_codes::SUCCESS),
        Err(err) => report(err),
    }
}

fn run(command: &commands::CommandDescriptor, flags: &Flags) -> Result<()> {
    let layout = ProjectLayout::discover()?;
    let config = Config::load_or_default(layout.config_file())?;
    let runner = SystemRunner::new();
    let ctx = DevContext::new(layout, config, &runner);

    println!("Project root: {}", ctx.layout.root.display());
    println!("Project version: {}", project_version(&ctx.layout));

    commands::run_command(&ctx, command, flags)
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is info.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

fn report(err: DevError) -> ExitCode {
    eprintln!("Error: {}", err);
    exit_code(err.exit_code())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::FAILURE as u8))
}
