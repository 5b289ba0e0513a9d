//! Video streamer component.
//!
//! Media handling is out of scope for the launcher: this streamer loads and
//! checks the streaming configuration in `setup`, and `process` reports the
//! planned session without opening any stream.

use std::path::{Path, PathBuf};

use config_loader::ConfigLoader;
use contracts::{ContractError, StreamerSettings, VideoStreamer};
use tracing::{info, instrument};

/// A session prepared by a successful `setup`
#[derive(Debug, Clone)]
pub struct StreamSession {
    pub config_file: PathBuf,
    pub settings: StreamerSettings,
}

/// Dry-run video streamer
#[derive(Debug, Default)]
pub struct DryRunVideoStreamer {
    session: Option<StreamSession>,
    processed: bool,
}

impl DryRunVideoStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&StreamSession> {
        self.session.as_ref()
    }

    fn check_sources(settings: &StreamerSettings) -> Result<(), ContractError> {
        let input = Path::new(&settings.program_settings.input);
        if !input.exists() {
            return Err(ContractError::streamer_setup(format!(
                "input stream '{}' does NOT exist",
                input.display()
            )));
        }

        let watermark = &settings.program_settings.watermark;
        if watermark.enabled {
            let location = watermark.full_file_name.as_deref().unwrap_or_default();
            if !Path::new(location).is_file() {
                return Err(ContractError::streamer_setup(format!(
                    "watermark '{location}' is not a regular file"
                )));
            }
        }
        Ok(())
    }
}

impl VideoStreamer for DryRunVideoStreamer {
    #[instrument(name = "VideoStreamer::setup", skip(self))]
    fn setup(&mut self, config_file_name: &str) -> Result<bool, ContractError> {
        if config_file_name.is_empty() {
            return Err(ContractError::streamer_setup("configuration file name is empty"));
        }
        if self.session.is_some() {
            return Err(ContractError::out_of_order("setup", "streamer is already set up"));
        }

        let config_file = PathBuf::from(config_file_name);
        let settings = ConfigLoader::load_from_path(&config_file)?;
        Self::check_sources(&settings)?;

        info!(
            input = %settings.program_settings.input,
            output = %settings.program_settings.output,
            watermark = settings.program_settings.watermark.enabled,
            log_level = %settings.ffmpeg_settings.log_level,
            "streamer configured"
        );

        self.session = Some(StreamSession {
            config_file,
            settings,
        });
        Ok(true)
    }

    #[instrument(name = "VideoStreamer::process", skip(self))]
    fn process(&mut self) -> Result<bool, ContractError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| ContractError::out_of_order("process", "setup has not succeeded"))?;
        if self.processed {
            return Err(ContractError::out_of_order(
                "process",
                "session was already processed",
            ));
        }

        let program = &session.settings.program_settings;
        info!(
            config = %session.config_file.display(),
            input = %program.input,
            output = %program.output,
            watermark = ?program.watermark.full_file_name,
            "dry run: streaming session planned, no media processed"
        );

        self.processed = true;
        Ok(true)
    }
}
