//! Error types for the devflow CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for devflow operations.
///
/// Each variant maps to a process exit code. Variants that wrap an external
/// tool's failure keep the tool's raw exit status so that test and pipeline
/// paths can propagate it unchanged.
#[derive(Error, Debug)]
pub enum DevError {
    /// No action flag (and no option owned by a command) was set.
    #[error("no action specified")]
    NoAction,

    /// Option flags owned by more than one command were set without an action flag.
    #[error("ambiguous action: the given options belong to {0}; pass the action flag explicitly")]
    AmbiguousAction(String),

    /// User provided invalid input or the project is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A required external executable is not installed.
    #[error("required tool '{tool}' not found. {hint}")]
    ToolMissing { tool: String, hint: String },

    /// The build tool's configure step returned non-zero.
    #[error("configure step failed for the {variant} build (exit code {code})")]
    ConfigurationFailure { variant: String, code: i32 },

    /// The build tool's compile step returned non-zero.
    #[error("compile step failed for the {variant} build (exit code {code})")]
    CompileFailure { variant: String, code: i32 },

    /// The test harness returned non-zero.
    #[error("tests failed (exit code {code})")]
    TestFailure { code: i32 },

    /// No built artifact was found, even after an on-demand build.
    #[error("executable '{name}' not found under {}", .build_dir.display())]
    ExecutableNotFound { name: String, build_dir: PathBuf },

    /// A post-processing or analysis tool returned non-zero.
    #[error("{tool} failed (exit code {code})")]
    ToolFailed { tool: String, code: i32 },

    /// The verification pipeline stopped at a failing stage.
    #[error("verification failed at stage '{stage}' (exit code {code})")]
    StageFailed { stage: String, code: i32 },

    /// The launched project artifact returned non-zero.
    #[error("{program} exited with code {code}")]
    RunFailed { program: String, code: i32 },
}

impl DevError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DevError::TestFailure { code }
            | DevError::StageFailed { code, .. }
            | DevError::RunFailed { code, .. } => exit_codes::verbatim(*code),
            DevError::NoAction
            | DevError::AmbiguousAction(_)
            | DevError::UserError(_)
            | DevError::ToolMissing { .. }
            | DevError::ConfigurationFailure { .. }
            | DevError::CompileFailure { .. }
            | DevError::ExecutableNotFound { .. }
            | DevError::ToolFailed { .. } => exit_codes::FAILURE,
        }
    }

    /// The raw exit status of the external tool behind this error, if any.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            DevError::ConfigurationFailure { code, .. }
            | DevError::CompileFailure { code, .. }
            | DevError::TestFailure { code }
            | DevError::ToolFailed { code, .. }
            | DevError::StageFailed { code, .. }
            | DevError::RunFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Convenience constructor for a missing tool.
    pub fn tool_missing(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        DevError::ToolMissing {
            tool: tool.into(),
            hint: hint.into(),
        }
    }
}

/// Result type alias for devflow operations.
pub type Result<T> = std::result::Result<T, DevError>;
