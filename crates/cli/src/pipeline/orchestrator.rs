//! Pipeline orchestrator - drives the fixed launch sequence.
//!
//! For each stage: verify the component's artifact, bind it, invoke its
//! contract operations. The first failure aborts the run; no later stage is
//! verified, loaded or invoked.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use artifact_resolver::{ArtifactResolver, LibraryPath};
use component_loader::{BoundComponent, ComponentLoader, ComponentRegistry, LoadError};
use contracts::{
    PipelineStage, PipelineState, RunOutcome, StageId, VideoStreamer, PIPELINE_STAGES,
};
use observability::{record_component_bound, StageMetricsAggregator, StageResult};
use tracing::{debug, error, info, instrument, warn};

use super::RunReport;
use crate::error::{check_call, fault_reason, PipelineError};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the library directory is resolved against
    pub working_dir: PathBuf,

    /// Library directory name
    pub library_dir: String,

    /// Raw process arguments, handed to the argument parser as is
    pub raw_args: Vec<String>,
}

impl PipelineConfig {
    /// Configuration for the current process
    pub fn from_env(library_dir: impl Into<String>) -> Self {
        let working_dir = std::env::current_dir().unwrap_or_else(|e| {
            warn!(error = %e, "working directory unavailable, resolving relative paths");
            PathBuf::new()
        });

        Self::with_args(working_dir, library_dir, std::env::args_os())
    }

    /// 参数按原样传递；非 UTF-8 字节替换为 U+FFFD
    pub fn with_args<I, S>(working_dir: PathBuf, library_dir: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let raw_args = args
            .into_iter()
            .map(|arg| {
                let arg: OsString = arg.into();
                arg.to_string_lossy().into_owned()
            })
            .collect();

        Self {
            working_dir,
            library_dir: library_dir.into(),
            raw_args,
        }
    }
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
    loader: ComponentLoader,
    state: PipelineState,
    stages: StageMetricsAggregator,
    config_file_name: Option<String>,
    streamer: Option<Box<dyn VideoStreamer>>,
}

impl Pipeline {
    /// Create a new pipeline binding components from `registry`
    pub fn new(config: PipelineConfig, registry: ComponentRegistry) -> Self {
        Self {
            config,
            loader: ComponentLoader::new(registry),
            state: PipelineState::Init,
            stages: StageMetricsAggregator::new(),
            config_file_name: None,
            streamer: None,
        }
    }

    /// Run the pipeline to a terminal state
    #[instrument(name = "launcher", skip_all)]
    pub fn run(mut self) -> RunReport {
        let started = Instant::now();

        let outcome = match self.execute() {
            Ok(()) => {
                self.transition(PipelineState::Done);
                RunOutcome::Success
            }
            Err(e) => {
                error!("{e}");
                self.transition(PipelineState::Aborted);
                e.into_outcome()
            }
        };

        RunReport {
            final_state: self.state,
            outcome,
            stages: std::mem::take(&mut self.stages),
            config_file_name: self.config_file_name.take(),
            bound: self.loader.bound_names(),
            duration: started.elapsed(),
        }
    }

    /// Capture the process environment and run, all on the blocking pool
    pub async fn launch(library_dir: String, registry: ComponentRegistry) -> RunReport {
        Self::on_blocking_pool(move || {
            Self::new(PipelineConfig::from_env(library_dir), registry).run()
        })
        .await
    }

    /// A panic in `task` becomes an unknown-fault abort
    async fn on_blocking_pool<F>(task: F) -> RunReport
    where
        F: FnOnce() -> RunReport + Send + 'static,
    {
        let started = Instant::now();
        match tokio::task::spawn_blocking(task).await {
            Ok(report) => report,
            Err(e) => {
                let reason = fault_reason(e);
                error!("{reason}");
                RunReport::fault(reason, started.elapsed())
            }
        }
    }

    fn execute(&mut self) -> Result<(), PipelineError> {
        self.transition(PipelineState::ResolvingLibraryPath);
        let library = LibraryPath::resolve(&self.config.working_dir, &self.config.library_dir)?;
        info!(library = %library, "library path resolved");

        for stage in &PIPELINE_STAGES {
            self.transition(PipelineState::Stage(stage.id));

            let started = Instant::now();
            let result = self.run_stage(&library, stage);
            let stage_result = match &result {
                Ok(()) => StageResult::Passed,
                Err(e) => e.stage_result(),
            };
            self.stages.push(stage.id, stage_result, started.elapsed());

            result?;
        }

        Ok(())
    }

    fn run_stage(
        &mut self,
        library: &LibraryPath,
        stage: &PipelineStage,
    ) -> Result<(), PipelineError> {
        let component = self.bind(library, stage)?;
        debug!(stage = %stage.id, operations = ?stage.operations, "invoking stage");

        match stage.id {
            StageId::ArgsParser => self.parse_args(&component),
            StageId::VersionPrinter => self.print_versions(&component),
            StageId::VideoStreamerSetup => self.setup_streamer(&component),
            StageId::VideoStreamerProcess => self.process_stream(),
        }
    }

    /// Verify then load the stage's component
    fn bind(
        &mut self,
        library: &LibraryPath,
        stage: &PipelineStage,
    ) -> Result<Arc<BoundComponent>, PipelineError> {
        let name = stage.component_name();

        if !ArtifactResolver::verify_component(library, &name) {
            return Err(PipelineError::Verification {
                stage: stage.id,
                component: name,
            });
        }

        let first_bind = !self.loader.is_bound(name.as_str());
        let component = self
            .loader
            .load(library, &name)
            .map_err(|source| PipelineError::Load {
                stage: stage.id,
                source,
            })?;

        if component.kind() != stage.kind {
            return Err(PipelineError::Load {
                stage: stage.id,
                source: LoadError::EntryMissing {
                    name: name.to_string(),
                    expected: stage.kind,
                    found: component.kind(),
                },
            });
        }

        if first_bind {
            record_component_bound(name.as_str());
        }

        Ok(component)
    }

    #[instrument(name = "parse_args", skip_all)]
    fn parse_args(&mut self, component: &BoundComponent) -> Result<(), PipelineError> {
        let stage = StageId::ArgsParser;
        let mut parser = component
            .construct_args_parser()
            .map_err(|source| PipelineError::Load { stage, source })?;

        check_call(stage, "parse", parser.parse(&self.config.raw_args))?;

        let config_file_name = parser
            .config_file_name()
            .ok_or(PipelineError::MissingConfigFileName { stage })?;
        info!(config = %config_file_name, "configuration file name captured");
        self.config_file_name = Some(config_file_name);
        Ok(())
    }

    #[instrument(name = "print_libraries_versions", skip_all)]
    fn print_versions(&self, component: &BoundComponent) -> Result<(), PipelineError> {
        let stage = StageId::VersionPrinter;
        let printer = component
            .version_printer()
            .map_err(|source| PipelineError::Load { stage, source })?;

        printer
            .print_libraries_versions()
            .map_err(|source| PipelineError::Failed {
                stage,
                operation: "print_libraries_versions",
                source,
            })
    }

    #[instrument(name = "setup", skip_all)]
    fn setup_streamer(&mut self, component: &BoundComponent) -> Result<(), PipelineError> {
        let stage = StageId::VideoStreamerSetup;
        let config_file_name = self
            .config_file_name
            .clone()
            .ok_or(PipelineError::MissingConfigFileName { stage })?;

        let mut streamer = component
            .construct_video_streamer()
            .map_err(|source| PipelineError::Load { stage, source })?;

        check_call(stage, "setup", streamer.setup(&config_file_name))?;
        self.streamer = Some(streamer);
        Ok(())
    }

    /// Runs on the instance that passed `setup`
    #[instrument(name = "process", skip_all)]
    fn process_stream(&mut self) -> Result<(), PipelineError> {
        let stage = StageId::VideoStreamerProcess;
        let streamer = self
            .streamer
            .as_mut()
            .ok_or(PipelineError::StreamerNotSetUp { stage })?;

        check_call(stage, "process", streamer.process())
    }

    fn transition(&mut self, next: PipelineState) {
        debug_assert!(
            !self.state.is_terminal(),
            "transition out of terminal state {}",
            self.state
        );
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }
}
