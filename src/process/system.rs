//! Process runner backed by `std::process::Command`.

use super::{Invocation, ProcessRunner, ProcessStatus};
use crate::error::{DevError, Result};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs real processes and searches PATH with the `which` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessStatus> {
        debug!(command = %invocation.command_line(), "spawning process");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }
        if invocation.capture {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
        if invocation.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        }

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DevError::tool_missing(
                    &invocation.program,
                    "Install it and make sure it is on PATH.",
                )
            } else {
                DevError::UserError(format!(
                    "failed to execute '{}': {}",
                    invocation.command_line(),
                    e
                ))
            }
        })?;

        if let Some(input) = &invocation.stdin
            && let Some(mut pipe) = child.stdin.take()
        {
            // A child that exits without reading its input is not our failure.
            if let Err(e) = pipe.write_all(input.as_bytes()) {
                debug!(error = %e, "child closed stdin early");
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            DevError::UserError(format!(
                "failed to wait for '{}': {}",
                invocation.command_line(),
                e
            ))
        })?;

        Ok(ProcessStatus {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}
