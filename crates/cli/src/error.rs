//! Error types for pipeline runs.

use std::any::Any;

use artifact_resolver::ArtifactError;
use component_loader::LoadError;
use contracts::{AbortCause, ComponentName, ContractError, RunOutcome, StageId};
use observability::StageResult;
use thiserror::Error;
use tokio::task::JoinError;

/// Why a run was aborted
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Library directory could not be resolved
    #[error("{0}")]
    LibraryPath(#[from] ArtifactError),

    /// The stage's artifact did not pass verification
    #[error("stage '{stage}': component '{component}' failed verification")]
    Verification {
        stage: StageId,
        component: ComponentName,
    },

    /// Binding the component failed
    #[error("stage '{stage}': {source}")]
    Load {
        stage: StageId,
        #[source]
        source: LoadError,
    },

    /// A contract call returned false
    #[error("stage '{stage}': '{operation}' declined")]
    Declined {
        stage: StageId,
        operation: &'static str,
    },

    /// A contract call returned an error
    #[error("stage '{stage}': '{operation}' failed: {source}")]
    Failed {
        stage: StageId,
        operation: &'static str,
        #[source]
        source: ContractError,
    },

    /// The argument parser accepted the arguments but reported no config file
    #[error("stage '{stage}': no configuration file name was provided")]
    MissingConfigFileName { stage: StageId },

    /// `process` was reached without a set up streamer
    #[error("stage '{stage}': video streamer is not set up")]
    StreamerNotSetUp { stage: StageId },
}

impl PipelineError {
    pub fn cause(&self) -> AbortCause {
        match self {
            Self::LibraryPath(_) => AbortCause::LibraryPath,
            Self::Verification { stage, .. }
            | Self::Load { stage, .. }
            | Self::Declined { stage, .. }
            | Self::Failed { stage, .. }
            | Self::MissingConfigFileName { stage }
            | Self::StreamerNotSetUp { stage } => AbortCause::Stage(*stage),
        }
    }

    /// Metrics label for the stage that produced this error
    pub fn stage_result(&self) -> StageResult {
        match self {
            Self::Verification { .. } => StageResult::VerifyFailed,
            Self::Load { .. } => StageResult::LoadFailed,
            Self::Declined { .. } => StageResult::Declined,
            _ => StageResult::Failed,
        }
    }

    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome::aborted(self.cause(), self.to_string())
    }
}

/// Map a contract call result onto the pipeline: `false` and `Err` both abort
pub fn check_call(
    stage: StageId,
    operation: &'static str,
    call: Result<bool, ContractError>,
) -> Result<(), PipelineError> {
    match call {
        Ok(true) => Ok(()),
        Ok(false) => Err(PipelineError::Declined { stage, operation }),
        Err(source) => Err(PipelineError::Failed {
            stage,
            operation,
            source,
        }),
    }
}

/// Reason reported when the pipeline task did not return normally
pub fn fault_reason(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        format!("unknown fault: {}", panic_message(payload.as_ref()))
    } else {
        format!("unknown fault: pipeline task {err}")
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "panic with a non-string payload"
    }
}
