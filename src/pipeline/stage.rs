//! Pipeline stages and their results.

use crate::build::VariantId;
use crate::error::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// The fixed stages of full verification, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Standard,
    AddressSanitizer,
    UndefinedBehaviorSanitizer,
    Coverage,
    StaticAnalysis,
}

impl StageKind {
    pub const ALL: [StageKind; 5] = [
        StageKind::Standard,
        StageKind::AddressSanitizer,
        StageKind::UndefinedBehaviorSanitizer,
        StageKind::Coverage,
        StageKind::StaticAnalysis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::Standard => "Standard",
            StageKind::AddressSanitizer => "AddressSanitizer",
            StageKind::UndefinedBehaviorSanitizer => "UndefinedBehaviorSanitizer",
            StageKind::Coverage => "Coverage",
            StageKind::StaticAnalysis => "StaticAnalysis",
        }
    }

    /// Heading printed when the stage starts.
    pub fn title(self) -> &'static str {
        match self {
            StageKind::Standard => "Running standard tests",
            StageKind::AddressSanitizer => "Running Address Sanitizer tests",
            StageKind::UndefinedBehaviorSanitizer => "Running Undefined Behavior Sanitizer tests",
            StageKind::Coverage => "Measuring test coverage",
            StageKind::StaticAnalysis => "Running static analysis",
        }
    }

    /// The build variant this stage builds and tests, if any.
    pub fn variant(self) -> Option<VariantId> {
        match self {
            StageKind::Standard => Some(VariantId::Standard),
            StageKind::AddressSanitizer => Some(VariantId::AddressSanitizer),
            StageKind::UndefinedBehaviorSanitizer => Some(VariantId::UndefinedBehaviorSanitizer),
            StageKind::Coverage => Some(VariantId::Coverage),
            StageKind::StaticAnalysis => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one executed stage. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    stage: StageKind,
    succeeded: bool,
    exit_code: i32,
    elapsed: Duration,
    message: Option<String>,
}

impl StageResult {
    pub fn passed(stage: StageKind, elapsed: Duration) -> Self {
        Self {
            stage,
            succeeded: true,
            exit_code: 0,
            elapsed,
            message: None,
        }
    }

    pub fn failed(
        stage: StageKind,
        exit_code: i32,
        elapsed: Duration,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            succeeded: false,
            exit_code,
            elapsed,
            message: Some(message.into()),
        }
    }

    pub fn stage(&self) -> StageKind {
        self.stage
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

type StageBody<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// A stage ready to run once. Its failure stops the pipeline.
pub struct PipelineStage<'a> {
    kind: StageKind,
    body: StageBody<'a>,
}

impl<'a> PipelineStage<'a> {
    pub fn new(kind: StageKind, body: impl FnOnce() -> Result<()> + 'a) -> Self {
        Self {
            kind,
            body: Box::new(body),
        }
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Run the stage body and time it.
    ///
    /// A failing body's exit code is the underlying tool's status when there
    /// is one, otherwise the error's own exit code.
    pub fn execute(self) -> StageResult {
        info!(stage = %self.kind, "executing stage");
        let start = Instant::now();
        let result = (self.body)();
        let elapsed = start.elapsed();

        match result {
            Ok(()) => StageResult::passed(self.kind, elapsed),
            Err(e) => {
                let code = e.tool_exit_code().unwrap_or_else(|| e.exit_code());
                StageResult::failed(self.kind, code, elapsed, e.to_string())
            }
        }
    }
}
