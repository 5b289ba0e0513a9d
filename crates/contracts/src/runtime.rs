//! Pipeline runtime state and terminal outcome

use std::fmt;

use serde::Serialize;

use crate::StageId;

/// Orchestrator state machine
///
/// `Init -> ResolvingLibraryPath -> Stage(..) x4 -> Done`, with `Aborted`
/// reachable from every non-`Done` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Init,
    ResolvingLibraryPath,
    Stage(StageId),
    Done,
    Aborted,
}

impl PipelineState {
    /// Done or Aborted
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::ResolvingLibraryPath => f.write_str("resolving_library_path"),
            Self::Stage(id) => write!(f, "stage({id})"),
            Self::Done => f.write_str("done"),
            Self::Aborted => f.write_str("aborted"),
        }
    }
}

/// Where an abort originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortCause {
    /// Library directory absent
    LibraryPath,
    /// A stage failed verification, loading, or its contract call
    Stage(StageId),
    /// Fault caught by the outermost boundary
    Fault,
}

/// Terminal state of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    Aborted { cause: AbortCause, reason: String },
}

impl RunOutcome {
    /// Create an abort outcome
    pub fn aborted(cause: AbortCause, reason: impl Into<String>) -> Self {
        Self::Aborted {
            cause,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Distinct process status per abort site.
    ///
    /// 0 done, 10 library path, 11..=14 stage by ordinal, 70 fault.
    pub fn status_code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Aborted { cause, .. } => match cause {
                AbortCause::LibraryPath => 10,
                AbortCause::Stage(id) => 11 + id.ordinal() as u8,
                AbortCause::Fault => 70,
            },
        }
    }

    /// Stable label used in metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Aborted { .. } => "aborted",
        }
    }
}
