//! Launcher settings, read from the environment using clap.
//!
//! The process arguments belong to the argument-parser component, so the
//! launcher never parses argv itself: every setting has an `env` source.

use clap::{Parser, ValueEnum};
use contracts::RunOutcome;
use observability::ObservabilityConfig;
use std::process::ExitCode;

/// Launcher - verifies, binds and runs the streaming components
#[derive(Parser, Debug, Clone)]
#[command(
    name = "launcher",
    about = "Verifies, binds and runs the streaming components",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct LauncherSettings {
    /// Directory holding the component artifacts, relative to the working directory
    #[arg(long, default_value = "libraries", env = "LAUNCHER_LIBRARY_DIR")]
    pub library_dir: String,

    /// Logging verbosity (0 info, 1 debug, 2+ trace)
    #[arg(long, default_value_t = 0, env = "LAUNCHER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except warnings and errors
    #[arg(long, env = "LAUNCHER_QUIET")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "LAUNCHER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value_t = 0, env = "LAUNCHER_METRICS_PORT")]
    pub metrics_port: u16,

    /// Exit with a distinct status per abort site instead of always 0
    #[arg(long, env = "LAUNCHER_STRICT_EXIT")]
    pub strict_exit: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl LauncherSettings {
    /// Read the settings from the environment only
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["launcher"])
    }

    pub fn observability_config(&self) -> ObservabilityConfig {
        let default_log_level = if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };

        ObservabilityConfig {
            log_format: match self.log_format {
                LogFormat::Json => observability::LogFormat::Json,
                LogFormat::Pretty => observability::LogFormat::Pretty,
                LogFormat::Compact => observability::LogFormat::Compact,
            },
            metrics_port: (self.metrics_port != 0).then_some(self.metrics_port),
            default_log_level: default_log_level.to_string(),
        }
    }

    /// Process status for a finished run
    pub fn exit_code(&self, outcome: &RunOutcome) -> ExitCode {
        if self.strict_exit {
            ExitCode::from(outcome.status_code())
        } else {
            ExitCode::SUCCESS
        }
    }
}
