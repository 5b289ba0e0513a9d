//! StreamerSettings - content of the configuration file named on the command line
//!
//! Key names follow the established file layout (`programSettings`,
//! `ffmpegSettings`, camelCase fields).

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Root of the streamer configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StreamerSettings {
    /// Stream endpoints and overlay
    #[validate(nested)]
    pub program_settings: ProgramSettings,

    /// Encoder library tuning (optional section)
    #[serde(default)]
    pub ffmpeg_settings: FfmpegSettings,
}

/// `programSettings` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSettings {
    /// Input stream (capture device or file)
    #[validate(length(min = 1, message = "input stream name is empty"))]
    pub input: String,

    /// Output stream URL
    #[validate(length(min = 1, message = "output url is empty"))]
    pub output: String,

    /// Watermark overlay
    #[validate(nested)]
    pub watermark: WatermarkSettings,
}

/// `programSettings.watermark` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkSettings {
    pub enabled: bool,

    /// Required and non-empty when `enabled` is true, ignored otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_file_name: Option<String>,
}

/// `ffmpegSettings` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FfmpegSettings {
    #[serde(default)]
    pub log_level: StreamLogLevel,
}

/// Encoder library log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamLogLevel {
    Quiet,
    Panic,
    Fatal,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
    #[default]
    Trace,
}

impl fmt::Display for StreamLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Quiet => "quiet",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_trace() {
        let json = r#"{
            "programSettings": {
                "input": "/dev/video0",
                "output": "rtmp://localhost/live",
                "watermark": { "enabled": false }
            }
        }"#;
        let settings: StreamerSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.ffmpeg_settings.log_level, StreamLogLevel::Trace);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_input_fails_validation() {
        let settings = StreamerSettings {
            program_settings: ProgramSettings {
                input: String::new(),
                output: "rtmp://localhost/live".to_string(),
                watermark: WatermarkSettings {
                    enabled: false,
                    full_file_name: None,
                },
            },
            ffmpeg_settings: FfmpegSettings::default(),
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let json = r#"{ "logLevel": "loud" }"#;
        assert!(serde_json::from_str::<FfmpegSettings>(json).is_err());
    }
}
