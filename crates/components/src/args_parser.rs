//! Command line argument parser component.
//!
//! Grammar: `-c/--config <FILE>` (required) or `-h/--help`, never both.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use contracts::{ArgsParser, ContractError};
use tracing::{debug, instrument};

/// Launcher arguments as seen by the parser component
#[derive(Parser, Debug)]
#[command(
    name = "launcher",
    about = "Verifies, loads and runs the streaming components",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct ParserArgs {
    /// Display help message
    #[arg(short, long)]
    help: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// clap-backed argument parser
#[derive(Debug, Default)]
pub struct CommandLineArgsParser {
    config_file_name: Option<String>,
}

impl CommandLineArgsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usage text shown for `--help`
    pub fn usage() -> String {
        ParserArgs::command().render_help().to_string()
    }
}

impl ArgsParser for CommandLineArgsParser {
    #[instrument(name = "CommandLineArgsParser::parse", skip_all, fields(argc = raw_args.len()))]
    fn parse(&mut self, raw_args: &[String]) -> Result<bool, ContractError> {
        if self.config_file_name.is_some() {
            return Err(ContractError::out_of_order(
                "parse",
                "configuration file name is already set",
            ));
        }
        if raw_args.is_empty() {
            return Err(ContractError::invalid_arguments("argument list is empty"));
        }
        if raw_args.iter().any(String::is_empty) {
            return Err(ContractError::invalid_arguments("string argument is empty"));
        }

        let args = ParserArgs::try_parse_from(raw_args)
            .map_err(|e| ContractError::invalid_arguments(e.to_string().trim().to_string()))?;

        let config = match (args.help, args.config) {
            (true, Some(_)) => {
                return Err(ContractError::invalid_arguments(
                    "select only one option: '--help' or '--config'",
                ));
            }
            (true, None) => {
                println!("{}", Self::usage());
                return Ok(false);
            }
            (false, None) => {
                return Err(ContractError::invalid_arguments(
                    "the option '--config' is required",
                ));
            }
            (false, Some(config)) => config,
        };

        let meta = std::fs::metadata(&config).map_err(|_| {
            ContractError::invalid_arguments(format!(
                "file '{}' does NOT exist",
                config.display()
            ))
        })?;
        if !meta.is_file() {
            return Err(ContractError::invalid_arguments(format!(
                "'{}' is not a regular file",
                config.display()
            )));
        }

        let name = config.to_string_lossy().into_owned();
        debug!(config = %name, "configuration file accepted");
        self.config_file_name = Some(name);
        Ok(true)
    }

    fn config_file_name(&self) -> Option<String> {
        self.config_file_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config_file() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "{}").unwrap();
        let name = path.to_string_lossy().into_owned();
        (dir, name)
    }

    #[test]
    fn test_parse_config() {
        let (_dir, cfg) = config_file();
        let mut parser = CommandLineArgsParser::new();
        assert!(parser.parse(&args(&["launcher", "--config", &cfg])).unwrap());
        assert_eq!(parser.config_file_name(), Some(cfg));
    }

    #[test]
    fn test_parse_short_flag() {
        let (_dir, cfg) = config_file();
        let mut parser = CommandLineArgsParser::new();
        assert!(parser.parse(&args(&["launcher", "-c", &cfg])).unwrap());
    }

    #[test]
    fn test_second_parse_rejected() {
        let (_dir, cfg) = config_file();
        let mut parser = CommandLineArgsParser::new();
        let argv = args(&["launcher", "-c", &cfg]);
        assert!(parser.parse(&argv).unwrap());
        let err = parser.parse(&argv).unwrap_err();
        assert!(err.to_string().contains("already set"));
    }

    #[test]
    fn test_help_declines() {
        let mut parser = CommandLineArgsParser::new();
        assert!(!parser.parse(&args(&["launcher", "--help"])).unwrap());
        assert!(parser.config_file_name().is_none());
    }

    #[test]
    fn test_help_and_config_conflict() {
        let (_dir, cfg) = config_file();
        let mut parser = CommandLineArgsParser::new();
        let err = parser.parse(&args(&["launcher", "-h", "-c", &cfg])).unwrap_err();
        assert!(err.to_string().contains("select only one option"));
    }

    #[test]
    fn test_config_required() {
        let mut parser = CommandLineArgsParser::new();
        let err = parser.parse(&args(&["launcher"])).unwrap_err();
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn test_empty_inputs() {
        let mut parser = CommandLineArgsParser::new();
        assert!(parser.parse(&[]).is_err());
        assert!(parser.parse(&args(&["launcher", ""])).is_err());
    }

    #[test]
    fn test_unknown_option() {
        let mut parser = CommandLineArgsParser::new();
        assert!(parser.parse(&args(&["launcher", "--verbose"])).is_err());
    }

    #[test]
    fn test_config_must_be_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_name = dir.path().to_string_lossy().into_owned();
        let mut parser = CommandLineArgsParser::new();
        let err = parser.parse(&args(&["launcher", "-c", &dir_name])).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));

        let missing = dir.path().join("absent.json").to_string_lossy().into_owned();
        let err = parser.parse(&args(&["launcher", "-c", &missing])).unwrap_err();
        assert!(err.to_string().contains("does NOT exist"));
    }

    #[test]
    fn test_usage_lists_options() {
        let usage = CommandLineArgsParser::usage();
        assert!(usage.contains("--config"));
        assert!(usage.contains("--help"));
    }
}
