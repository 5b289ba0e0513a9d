//! # Component Launcher
//!
//! 启动器入口点。
//!
//! 提供：
//! - 组件产物校验与绑定
//! - 固定顺序的四阶段启动流程
//! - 未知故障兜底（panic 转为 Aborted）

mod cli;
mod error;
mod pipeline;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use cli::{LauncherSettings, LogFormat};
use pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let settings = LauncherSettings::from_env().context("invalid launcher settings")?;

    observability::init_with_config(settings.observability_config())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        library_dir = %settings.library_dir,
        "launcher starting"
    );

    // argv is captured inside the pipeline task
    let report =
        Pipeline::launch(settings.library_dir.clone(), components::builtin_registry()).await;

    observability::record_run(&report.outcome, report.duration);
    report.log();

    if settings.log_format == LogFormat::Json {
        info!(report = %report.to_json(), "run report");
    } else if report.is_success() {
        report.print_summary();
    }

    Ok(settings.exit_code(&report.outcome))
}
