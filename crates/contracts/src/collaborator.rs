//! Collaborator traits - the contract every pluggable component implements
//!
//! The orchestrator only ever talks to components through these traits.
//! Every operation returns `Result`; `Ok(false)` is a declined call and
//! `Err` a fault. The orchestrator aborts the run on either.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// ABI revision of the collaborator traits.
///
/// Bumped whenever a trait in this module changes shape. The loader refuses
/// components registered against a different revision.
pub const COMPONENT_ABI_VERSION: u32 = 1;

/// Entry type a component exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Constructible argument parser
    ArgsParser,
    /// Free-standing version reporter
    VersionPrinter,
    /// Constructible video streamer
    VideoStreamer,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ArgsParser => "ArgsParser",
            Self::VersionPrinter => "VersionPrinter",
            Self::VideoStreamer => "VideoStreamer",
        };
        f.write_str(s)
    }
}

/// Command line argument parser.
///
/// `parse` must be called before `config_file_name`.
pub trait ArgsParser: Send {
    /// Parse the raw process invocation arguments (program name first).
    ///
    /// Returns `Ok(false)` when the arguments were understood but the run
    /// should not continue (e.g. help was requested).
    fn parse(&mut self, raw_args: &[String]) -> Result<bool, ContractError>;

    /// Configuration file name captured by a successful `parse`.
    fn config_file_name(&self) -> Option<String>;
}

/// Reports the versions of the libraries backing the components.
///
/// Callable without construction; has no result value.
pub trait VersionPrinter: Send + Sync {
    fn print_libraries_versions(&self) -> Result<(), ContractError>;
}

/// Video streamer.
///
/// `setup` then `process`, each meaningfully called once per run.
pub trait VideoStreamer: Send {
    /// Prepare the streaming session from the named configuration file.
    fn setup(&mut self, config_file_name: &str) -> Result<bool, ContractError>;

    /// Run the streaming session prepared by `setup`.
    fn process(&mut self) -> Result<bool, ContractError>;
}
