//! Run report.

use std::time::Duration;

use contracts::{AbortCause, ComponentName, PipelineState, RunOutcome, StageId};
use observability::StageMetricsAggregator;
use serde::Serialize;
use tracing::{info, warn};

/// Summary of one launcher invocation
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal pipeline state
    pub final_state: PipelineState,

    /// Done, or the abort site and reason
    pub outcome: RunOutcome,

    /// Stages attempted, in order
    pub stages: StageMetricsAggregator,

    /// Captured from the argument parser, if it got that far
    pub config_file_name: Option<String>,

    /// Components bound during the run, sorted
    pub bound: Vec<ComponentName>,

    /// Total duration of the run
    pub duration: Duration,
}

#[derive(Serialize)]
struct StageSummary {
    stage: StageId,
    result: &'static str,
    duration_ms: f64,
}

impl RunReport {
    /// Report for a run whose task never returned
    pub fn fault(reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            final_state: PipelineState::Aborted,
            outcome: RunOutcome::aborted(AbortCause::Fault, reason),
            stages: StageMetricsAggregator::new(),
            config_file_name: None,
            bound: Vec::new(),
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Machine-readable form, used with JSON logging
    pub fn to_json(&self) -> serde_json::Value {
        let stages: Vec<StageSummary> = self
            .stages
            .records()
            .iter()
            .map(|r| StageSummary {
                stage: r.stage,
                result: r.result.as_str(),
                duration_ms: r.duration.as_secs_f64() * 1000.0,
            })
            .collect();

        serde_json::json!({
            "final_state": self.final_state,
            "outcome": self.outcome,
            "stages": stages,
            "config_file_name": self.config_file_name,
            "bound": self.bound,
            "duration_ms": self.duration.as_secs_f64() * 1000.0,
        })
    }

    /// Emit the final diagnostic for the run
    pub fn log(&self) {
        match &self.outcome {
            RunOutcome::Success => info!(
                stages = self.stages.passed(),
                duration_ms = self.duration.as_millis() as u64,
                "pipeline done"
            ),
            RunOutcome::Aborted { cause, reason } => warn!(
                cause = ?cause,
                status = self.outcome.status_code(),
                passed = self.stages.passed(),
                failed_stage = ?self.stages.failure().map(|r| r.stage),
                "pipeline aborted: {reason}"
            ),
        }
    }

    /// Print detailed summary to stderr
    pub fn print_summary(&self) {
        eprintln!("\nLauncher run summary");
        eprintln!("   ├─ State: {}", self.final_state);
        eprintln!("   ├─ Duration: {:.2}ms", self.duration.as_secs_f64() * 1000.0);
        eprintln!(
            "   ├─ Config file: {}",
            self.config_file_name.as_deref().unwrap_or("-")
        );
        eprintln!("   └─ Bound components: {}", self.bound.len());

        let records = self.stages.records();
        if !records.is_empty() {
            eprintln!(
                "\nStages ({:.2}ms)",
                self.stages.total_duration().as_secs_f64() * 1000.0
            );
            for (i, record) in records.iter().enumerate() {
                eprintln!(
                    "   {} {}: {} ({:.2}ms)",
                    tree_branch(i, records.len()),
                    record.stage,
                    record.result.as_str(),
                    record.duration.as_secs_f64() * 1000.0
                );
            }
        }

        eprintln!();
    }
}

/// Tree glyph for entry `index` of `len`
fn tree_branch(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "└─"
    } else {
        "├─"
    }
}
