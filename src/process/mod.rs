//! External process seam.
//!
//! Every external tool devflow drives (build tool, test harness, coverage
//! and analysis tools, the project's own artifact) is launched through a
//! [`ProcessRunner`]. Production code uses [`SystemRunner`]; tests substitute
//! a scripted fake that records invocations.

mod output;
mod system;

pub use output::{OUTPUT_TAIL_MAX_CHARS, OUTPUT_TAIL_MAX_LINES, truncate_output};
pub use system::SystemRunner;

use crate::error::{DevError, Result};
use std::path::{Path, PathBuf};

/// A single external command, described but not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Capture stdout/stderr instead of streaming them to the terminal.
    pub capture: bool,
    /// Text written to the child's stdin.
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: false,
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument (lossy on non-UTF-8 paths).
    pub fn path_arg(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().into_owned();
        self.arg(arg)
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Shell-quoted rendering for log output.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)))
    }

    /// Whether `arg` appears verbatim among the arguments.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// The argument following `flag`, if both are present.
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Termination status of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty unless the invocation was captured).
    pub stdout: String,
    /// Captured stderr (empty unless the invocation was captured).
    pub stderr: String,
}

impl ProcessStatus {
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code with signal termination reported as `-1`.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }

    /// Captured stdout followed by captured stderr.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Launches external processes and looks up tools on PATH.
pub trait ProcessRunner {
    /// Run `invocation` to completion.
    ///
    /// A non-zero exit is reported through [`ProcessStatus`], not as an error.
    /// A program that cannot be spawned because it does not exist is
    /// [`DevError::ToolMissing`].
    fn run(&self, invocation: &Invocation) -> Result<ProcessStatus>;

    /// Absolute path of `name` if it is installed.
    fn find_tool(&self, name: &str) -> Option<PathBuf>;
}

/// Look up a required tool, failing with an actionable message when absent.
pub fn require_tool(runner: &dyn ProcessRunner, name: &str, hint: &str) -> Result<PathBuf> {
    runner
        .find_tool(name)
        .ok_or_else(|| DevError::tool_missing(name, hint))
}
