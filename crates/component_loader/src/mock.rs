//! Mock 组件
//!
//! 用于单元测试的 mock 实现，支持注入失败场景，并记录调用顺序。

use std::sync::{Arc, Mutex};

use contracts::{ArgsParser, ComponentName, ContractError, VersionPrinter, VideoStreamer};

use crate::registry::ComponentRegistry;

/// How a mocked contract call behaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MockBehavior {
    /// Return success
    #[default]
    Succeed,
    /// Return `Ok(false)` (for `()`-returning calls, same as `Fail`)
    Decline,
    /// Return an error
    Fail,
    /// Panic inside the call
    Panic,
}

/// Shared, ordered record of contract calls
#[derive(Debug, Clone, Default)]
pub struct CallJournal(Arc<Mutex<Vec<String>>>);

impl CallJournal {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn contains(&self, call: &str) -> bool {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).iter().any(|c| c == call)
    }
}

/// Mock 配置
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Config file name the parser reports
    pub config_file_name: String,
    pub parse: MockBehavior,
    pub print_versions: MockBehavior,
    pub setup: MockBehavior,
    pub process: MockBehavior,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            config_file_name: "cfg.json".to_string(),
            parse: MockBehavior::Succeed,
            print_versions: MockBehavior::Succeed,
            setup: MockBehavior::Succeed,
            process: MockBehavior::Succeed,
        }
    }
}

fn outcome(call: &str, behavior: MockBehavior) -> Result<bool, ContractError> {
    match behavior {
        MockBehavior::Succeed => Ok(true),
        MockBehavior::Decline => Ok(false),
        MockBehavior::Fail => Err(ContractError::Other(format!("mock {call} failed"))),
        MockBehavior::Panic => panic!("mock {call} panicked"),
    }
}

/// Mock argument parser
pub struct MockArgsParser {
    config: MockConfig,
    journal: CallJournal,
    parsed: Option<String>,
}

impl MockArgsParser {
    pub fn new(config: MockConfig, journal: CallJournal) -> Self {
        Self {
            config,
            journal,
            parsed: None,
        }
    }
}

impl ArgsParser for MockArgsParser {
    fn parse(&mut self, raw_args: &[String]) -> Result<bool, ContractError> {
        self.journal.record(format!("parse:{}", raw_args.join(" ")));
        let ok = outcome("parse", self.config.parse)?;
        if ok {
            self.parsed = Some(self.config.config_file_name.clone());
        }
        Ok(ok)
    }

    fn config_file_name(&self) -> Option<String> {
        self.journal.record("config_file_name");
        self.parsed.clone()
    }
}

/// Mock version printer
pub struct MockVersionPrinter {
    behavior: MockBehavior,
    journal: CallJournal,
}

impl MockVersionPrinter {
    pub fn new(behavior: MockBehavior, journal: CallJournal) -> Self {
        Self { behavior, journal }
    }
}

impl VersionPrinter for MockVersionPrinter {
    fn print_libraries_versions(&self) -> Result<(), ContractError> {
        self.journal.record("print_libraries_versions");
        match outcome("print_libraries_versions", self.behavior)? {
            true => Ok(()),
            false => Err(ContractError::Other(
                "mock print_libraries_versions declined".to_string(),
            )),
        }
    }
}

/// Mock video streamer
pub struct MockVideoStreamer {
    config: MockConfig,
    journal: CallJournal,
}

impl MockVideoStreamer {
    pub fn new(config: MockConfig, journal: CallJournal) -> Self {
        Self { config, journal }
    }
}

impl VideoStreamer for MockVideoStreamer {
    fn setup(&mut self, config_file_name: &str) -> Result<bool, ContractError> {
        self.journal.record(format!("setup:{config_file_name}"));
        outcome("setup", self.config.setup)
    }

    fn process(&mut self) -> Result<bool, ContractError> {
        self.journal.record("process");
        outcome("process", self.config.process)
    }
}

/// Register the three mock components under the launcher's component names
pub fn register_mocks(registry: &mut ComponentRegistry, config: MockConfig, journal: CallJournal) {
    {
        let config = config.clone();
        let journal = journal.clone();
        registry.register_args_parser(ComponentName::ARGS_PARSER, move || {
            journal.record("construct:args_parser");
            Box::new(MockArgsParser::new(config.clone(), journal.clone()))
        });
    }

    registry.register_version_printer(
        ComponentName::VERSION_PRINTER,
        MockVersionPrinter::new(config.print_versions, journal.clone()),
    );

    registry.register_video_streamer(ComponentName::VIDEO_STREAMER, move || {
        journal.record("construct:video_streamer");
        Box::new(MockVideoStreamer::new(config.clone(), journal.clone()))
    });
}
