//! Full verification pipeline.
//!
//! Runs `Standard → AddressSanitizer → UndefinedBehaviorSanitizer → Coverage
//! → StaticAnalysis`, each build stage in its own build directory, stopping
//! at the first stage that fails. Nothing carries over between
//! invocations except the build trees themselves (incremental builds).

mod report;
mod stage;


pub use report::{RunRecord, append_run_log};
pub use stage::StageKind;

#[cfg(test)]
pub use report::read_run_log;

use stage::{PipelineStage, StageResult};

use crate::analysis::{AnalysisPolicy, run_static_analysis};
use crate::build::{BuildOptions, BuildVariant, build_variant};
use crate::context::DevContext;
use crate::error::{DevError, Result};
use crate::testing::{TestSelection, run_coverage, run_tests};
use std::time::{Duration, Instant};
use tracing::info;

/// Inputs shared by every stage.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub selection: TestSelection,
    pub build: BuildOptions,
    /// Build type of the standard stage (instrumented stages are always Debug).
    pub debug: bool,
}

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    AllPassed,
    FailedAt { stage: StageKind, exit_code: i32 },
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub outcome: PipelineOutcome,
    pub results: Vec<StageResult>,
    pub elapsed: Duration,
}

impl PipelineRun {
    /// Convert the terminal state into the command result.
    pub fn into_result(self) -> Result<()> {
        match self.outcome {
            PipelineOutcome::AllPassed => Ok(()),
            PipelineOutcome::FailedAt { stage, exit_code } => Err(DevError::StageFailed {
                stage: stage.name().to_string(),
                code: exit_code,
            }),
        }
    }
}

/// An ordered list of stages, created fresh for each run.
pub struct VerificationPipeline<'a> {
    stages: Vec<PipelineStage<'a>>,
}

impl<'a> VerificationPipeline<'a> {
    pub fn new(stages: Vec<PipelineStage<'a>>) -> Self {
        Self { stages }
    }

    /// The standard five-stage pipeline.
    pub fn full(ctx: &'a DevContext<'_>, settings: &'a PipelineSettings) -> Self {
        let stages = StageKind::ALL
            .iter()
            .map(|&kind| PipelineStage::new(kind, move || run_stage(ctx, kind, settings)))
            .collect();
        Self::new(stages)
    }

    #[cfg(test)]
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|s| s.kind()).collect()
    }

    /// Execute stages in order until one fails.
    pub fn run(self) -> PipelineRun {
        let start = Instant::now();
        let total = self.stages.len();
        let mut results = Vec::with_capacity(total);
        let mut outcome = PipelineOutcome::AllPassed;

        println!("Running full verification...");
        for (index, stage) in self.stages.into_iter().enumerate() {
            let kind = stage.kind();
            println!("\n=== Step {}/{}: {} ===", index + 1, total, kind.title());

            let result = stage.execute();
            if result.succeeded() {
                results.push(result);
                continue;
            }

            println!(
                "{} stage failed: {}",
                kind,
                result.message().unwrap_or("no details")
            );
            outcome = PipelineOutcome::FailedAt {
                stage: kind,
                exit_code: result.exit_code(),
            };
            results.push(result);
            break;
        }

        let elapsed = start.elapsed();
        match outcome {
            PipelineOutcome::AllPassed => {
                info!(elapsed_ms = elapsed.as_millis() as u64, "verification passed");
                println!("\n=== All checks passed! ===");
            }
            PipelineOutcome::FailedAt { stage, exit_code } => {
                info!(stage = %stage, exit_code, "verification stopped");
                println!("\n=== Verification failed at {} ===", stage);
            }
        }

        PipelineRun {
            outcome,
            results,
            elapsed,
        }
    }
}

/// Run the body of a single stage.
///
/// Build stages build their variant and run the selected tests strictly. The
/// coverage stage succeeds once its report is produced, even if tests failed
/// while measuring. Static analysis runs under the strict policy.
pub fn run_stage(ctx: &DevContext<'_>, kind: StageKind, settings: &PipelineSettings) -> Result<()> {
    match kind {
        StageKind::Coverage => {
            run_coverage(ctx, &settings.selection, settings.build, false).map(|_| ())
        }
        StageKind::StaticAnalysis => {
            run_static_analysis(ctx, AnalysisPolicy::Strict, settings.build.verbose).map(|_| ())
        }
        StageKind::Standard | StageKind::AddressSanitizer | StageKind::UndefinedBehaviorSanitizer => {
            let Some(id) = kind.variant() else {
                return Ok(());
            };
            let variant = BuildVariant::for_id(&ctx.layout, &ctx.config, id, settings.debug);
            build_variant(ctx, &variant, settings.build)?;
            run_tests(ctx, &variant, &settings.selection, settings.build.verbose)
        }
    }
}
