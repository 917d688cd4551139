//! Append-only run log for full verification.
//!
//! Each pipeline run appends one JSON object per line (NDJSON) to
//! `results/verification.ndjson`:
//! - `ts`: RFC3339 timestamp
//! - `actor`: `user@HOST`
//! - `outcome`: `all_passed` or `failed`
//! - `failed_stage` / `exit_code`: present on failure
//! - `stages`: every executed StageResult, in order

use super::{PipelineOutcome, PipelineRun};
use crate::error::{DevError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// One executed stage as recorded in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: String,
    pub succeeded: bool,
    pub exit_code: i32,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One pipeline run as recorded in the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub ts: DateTime<Utc>,
    pub actor: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub elapsed_ms: u64,
    pub stages: Vec<StageRecord>,
}

impl RunRecord {
    /// Snapshot a finished run, stamped with the current time and actor.
    pub fn from_run(run: &PipelineRun) -> Self {
        let (outcome, failed_stage, exit_code) = match run.outcome {
            PipelineOutcome::AllPassed => ("all_passed", None, None),
            PipelineOutcome::FailedAt { stage, exit_code } => {
                ("failed", Some(stage.name().to_string()), Some(exit_code))
            }
        };

        Self {
            ts: Utc::now(),
            actor: actor_string(),
            outcome: outcome.to_string(),
            failed_stage,
            exit_code,
            elapsed_ms: run.elapsed.as_millis() as u64,
            stages: run
                .results
                .iter()
                .map(|r| StageRecord {
                    stage: r.stage().name().to_string(),
                    succeeded: r.succeeded(),
                    exit_code: r.exit_code(),
                    elapsed_ms: r.elapsed().as_millis() as u64,
                    message: r.message().map(str::to_string),
                })
                .collect(),
        }
    }

    /// Serialize to a single JSON line (no trailing newline).
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DevError::UserError(format!("failed to serialize run record: {}", e)))
    }
}

/// `user@host` for the run log.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append `record` as one line to the log at `path`, creating it if needed.
pub fn append_run_log(path: &Path, record: &RunRecord) -> Result<()> {
    let line = record.to_ndjson_line()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DevError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            DevError::UserError(format!(
                "failed to open run log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", line).map_err(|e| {
        DevError::UserError(format!(
            "failed to write run log '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read every record from the log at `path`. A missing log has no records.
#[cfg(test)]
pub fn read_run_log(path: &Path) -> Result<Vec<RunRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        DevError::UserError(format!("failed to read run log '{}': {}", path.display(), e))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                DevError::UserError(format!(
                    "failed to parse run log line {}: {}",
                    i + 1,
                    e
                ))
            })
        })
        .collect()
}
