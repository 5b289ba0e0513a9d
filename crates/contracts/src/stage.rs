//! PipelineStage - stateless stage descriptors
//!
//! The launcher runs exactly these four stages, in this order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ComponentKind, ComponentName};

/// Stage identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    ArgsParser,
    VersionPrinter,
    VideoStreamerSetup,
    VideoStreamerProcess,
}

impl StageId {
    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArgsParser => "args_parser",
            Self::VersionPrinter => "version_printer",
            Self::VideoStreamerSetup => "video_streamer_setup",
            Self::VideoStreamerProcess => "video_streamer_process",
        }
    }

    /// Zero-based position in the pipeline
    pub fn ordinal(&self) -> usize {
        match self {
            Self::ArgsParser => 0,
            Self::VersionPrinter => 1,
            Self::VideoStreamerSetup => 2,
            Self::VideoStreamerProcess => 3,
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the fixed pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStage {
    /// Stage identifier
    pub id: StageId,
    /// Component the stage depends on
    pub component: &'static str,
    /// Entry type the stage needs from the component
    pub kind: ComponentKind,
    /// Contract operations invoked, in order
    pub operations: &'static [&'static str],
}

impl PipelineStage {
    /// Name of the required component
    pub fn component_name(&self) -> ComponentName {
        ComponentName::new(self.component)
    }
}

/// The pipeline, in execution order
pub const PIPELINE_STAGES: [PipelineStage; 4] = [
    PipelineStage {
        id: StageId::ArgsParser,
        component: ComponentName::ARGS_PARSER,
        kind: ComponentKind::ArgsParser,
        operations: &["parse", "config_file_name"],
    },
    PipelineStage {
        id: StageId::VersionPrinter,
        component: ComponentName::VERSION_PRINTER,
        kind: ComponentKind::VersionPrinter,
        operations: &["print_libraries_versions"],
    },
    PipelineStage {
        id: StageId::VideoStreamerSetup,
        component: ComponentName::VIDEO_STREAMER,
        kind: ComponentKind::VideoStreamer,
        operations: &["setup"],
    },
    PipelineStage {
        id: StageId::VideoStreamerProcess,
        component: ComponentName::VIDEO_STREAMER,
        kind: ComponentKind::VideoStreamer,
        operations: &["process"],
    },
];
