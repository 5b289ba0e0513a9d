//! 启动流水线指标收集模块
//!
//! 记录每个阶段的结果与耗时，以及整次运行的结果。

use std::time::Duration;

use contracts::{RunOutcome, StageId};
use metrics::{counter, gauge, histogram};

/// Result of one stage, as recorded in metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageResult {
    /// Every contract call succeeded
    Passed,
    /// Artifact verification failed
    VerifyFailed,
    /// Binding failed
    LoadFailed,
    /// Contract call returned false
    Declined,
    /// Contract call returned an error
    Failed,
}

impl StageResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::VerifyFailed => "verify_failed",
            Self::LoadFailed => "load_failed",
            Self::Declined => "declined",
            Self::Failed => "failed",
        }
    }
}

/// 记录阶段结果与耗时
pub fn record_stage(stage: StageId, result: StageResult, duration: Duration) {
    counter!(
        "launcher_stage_total",
        "stage" => stage.as_str(),
        "result" => result.as_str()
    )
    .increment(1);

    histogram!("launcher_stage_duration_ms", "stage" => stage.as_str())
        .record(duration.as_secs_f64() * 1000.0);
}

/// 记录组件绑定
pub fn record_component_bound(component: &str) {
    counter!("launcher_components_bound_total", "component" => component.to_string()).increment(1);
}

/// 记录整次运行结果
pub fn record_run(outcome: &RunOutcome, duration: Duration) {
    counter!("launcher_runs_total", "outcome" => outcome.label()).increment(1);
    gauge!("launcher_last_status_code").set(outcome.status_code() as f64);
    histogram!("launcher_run_duration_ms").record(duration.as_secs_f64() * 1000.0);
}

/// One stage's entry in the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct StageRecord {
    pub stage: StageId,
    pub result: StageResult,
    pub duration: Duration,
}

/// 阶段指标聚合器
///
/// 在内存中保存本次运行各阶段的结果，便于输出摘要。
#[derive(Debug, Clone, Default)]
pub struct StageMetricsAggregator {
    records: Vec<StageRecord>,
}

impl StageMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record in memory and forward to the metrics recorder
    pub fn push(&mut self, stage: StageId, result: StageResult, duration: Duration) {
        record_stage(stage, result, duration);
        self.records.push(StageRecord {
            stage,
            result,
            duration,
        });
    }

    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    /// Stages whose every call succeeded
    pub fn passed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.result == StageResult::Passed)
            .count()
    }

    /// Sum of recorded stage durations
    pub fn total_duration(&self) -> Duration {
        self.records.iter().map(|r| r.duration).sum()
    }

    /// Last recorded record that did not pass
    pub fn failure(&self) -> Option<&StageRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| r.result != StageResult::Passed)
    }
}
