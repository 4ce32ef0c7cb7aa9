//! Carecheck Runner
//!
//! Runs one pipeline against the configured scheduling service and exits
//! non-zero if any step failed fatally. Advisory rejections do not fail
//! the run.

use anyhow::{Context, Result};
use carecheck_core::domain::context::PipelineContext;
use carecheck_core::domain::run::RunReport;
use carecheck_core::domain::step::StepStatus;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carecheck_runner::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carecheck_runner=info,carecheck_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Carecheck Runner");

    let config = load_config()?;
    info!(
        "Loaded configuration: base_url={}, tenant={}, pipeline={}",
        config.base_url, config.tenant_id, config.variant
    );

    let executor = config.build_executor()?;
    let pipeline = config
        .variant
        .build(&config.pipeline_options())
        .context("Failed to build pipeline")?;

    let mut ctx = PipelineContext::new();
    let report = executor.run(&pipeline, &mut ctx).await?;

    log_summary(&report);

    if let Some(path) = &config.report_path {
        write_report(&report, path).await?;
        info!("Run report written to {}", path.display());
    }

    if !report.passed() {
        let label = report
            .halted_at()
            .map(|s| s.label.clone())
            .unwrap_or_default();
        anyhow::bail!("Pipeline '{}' failed at '{}'", report.pipeline, label);
    }

    Ok(())
}

/// Loads and validates configuration from environment variables
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

fn log_summary(report: &RunReport) {
    for step in &report.steps {
        match step.status {
            StepStatus::Passed => info!(
                "{} {}: {}",
                step.status,
                step.label,
                step.summary.as_deref().unwrap_or_default()
            ),
            StepStatus::Advisory => warn!(
                "{} {}: {}",
                step.status,
                step.label,
                step.diagnostic.as_ref().map(|d| d.to_string()).unwrap_or_default()
            ),
            StepStatus::Failed => error!(
                "{} {}: {}",
                step.status,
                step.label,
                step.diagnostic.as_ref().map(|d| d.to_string()).unwrap_or_default()
            ),
            StepStatus::Skipped => warn!("{} {}", step.status, step.label),
        }
    }

    info!(
        "Run {} finished in state {}: {} passed, {} advisory, {} failed, {} skipped",
        report.run_id,
        report.final_state,
        report.count(StepStatus::Passed),
        report.count(StepStatus::Advisory),
        report.count(StepStatus::Failed),
        report.count(StepStatus::Skipped)
    );
}

async fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write run report to {}", path.display()))
}
