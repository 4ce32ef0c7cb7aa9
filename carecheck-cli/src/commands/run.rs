//! Run command
//!
//! Builds one of the prebuilt pipelines and executes it.

use anyhow::{Context, Result};
use carecheck_core::domain::context::PipelineContext;
use carecheck_core::domain::entity::EntityRef;
use carecheck_core::domain::slot::SlotWindow;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

use carecheck_runner::service::PersonName;
use carecheck_runner::steps::{PLACEHOLDER_PATIENT_ID, PLACEHOLDER_PROVIDER_ID};
use carecheck_runner::{PipelineOptions, RunVariant};

use crate::commands::parse_instant;
use crate::config::Config;
use crate::output::{print_journal, print_report};

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline to run: standard or commit-only
    #[arg(long, env = "CARECHECK_PIPELINE", default_value = "standard")]
    pipeline: RunVariant,

    /// Fixed provider name, "First Last"
    #[arg(long)]
    provider_name: Option<String>,

    /// Fixed patient name, "First Last"
    #[arg(long)]
    patient_name: Option<String>,

    /// Timezone sent with availability, patient and booking requests
    #[arg(
        long,
        env = "CARECHECK_TIMEZONE",
        default_value = carecheck_runner::config::DEFAULT_TIMEZONE
    )]
    timezone: String,

    /// Slot discovery window start (RFC 3339), defaults to tomorrow
    #[arg(
        long,
        env = "CARECHECK_SLOT_WINDOW_START",
        value_parser = parse_instant,
        requires = "window_end"
    )]
    window_start: Option<DateTime<Utc>>,

    /// Slot discovery window end (RFC 3339)
    #[arg(
        long,
        env = "CARECHECK_SLOT_WINDOW_END",
        value_parser = parse_instant,
        requires = "window_start"
    )]
    window_end: Option<DateTime<Utc>>,

    /// Provider booked when none was resolved (commit-only pipeline)
    #[arg(
        long,
        env = "CARECHECK_PLACEHOLDER_PROVIDER_ID",
        default_value = PLACEHOLDER_PROVIDER_ID
    )]
    placeholder_provider: String,

    /// Patient booked when none was resolved (commit-only pipeline)
    #[arg(
        long,
        env = "CARECHECK_PLACEHOLDER_PATIENT_ID",
        default_value = PLACEHOLDER_PATIENT_ID
    )]
    placeholder_patient: String,

    /// Write the JSON run report here
    #[arg(long, env = "CARECHECK_REPORT_PATH")]
    report: Option<PathBuf>,

    /// Also print the run journal
    #[arg(short, long)]
    verbose: bool,
}

fn parse_name(flag: &str, value: Option<&str>) -> Result<Option<PersonName>> {
    value
        .map(|v| {
            PersonName::parse(v)
                .with_context(|| format!("--{} must be \"First Last\", got '{}'", flag, v))
        })
        .transpose()
}

impl RunArgs {
    /// Runner configuration for this invocation, validated
    pub(crate) fn runner_config(&self, config: &Config) -> Result<carecheck_runner::Config> {
        let mut runner_config = config.runner_config()?;
        runner_config.timezone = self.timezone.clone();
        runner_config.variant = self.pipeline;
        runner_config.placeholder_provider = EntityRef::new(self.placeholder_provider.clone());
        runner_config.placeholder_patient = EntityRef::new(self.placeholder_patient.clone());
        runner_config.report_path = self.report.clone();
        if let (Some(start), Some(end)) = (self.window_start, self.window_end) {
            runner_config.slot_window = SlotWindow::new(start, end);
        }
        runner_config.validate()?;
        Ok(runner_config)
    }

    /// Pipeline options with the fixed names, if any, applied
    pub(crate) fn pipeline_options(
        &self,
        runner_config: &carecheck_runner::Config,
    ) -> Result<PipelineOptions> {
        let mut opts = runner_config.pipeline_options();
        opts.provider_name = parse_name("provider-name", self.provider_name.as_deref())?;
        opts.patient_name = parse_name("patient-name", self.patient_name.as_deref())?;
        Ok(opts)
    }
}

/// Handle the run command
pub async fn handle_run_command(args: RunArgs, config: &Config) -> Result<()> {
    let runner_config = args.runner_config(config)?;
    debug!("Runner configuration: {:?}", runner_config);
    let opts = args.pipeline_options(&runner_config)?;

    let pipeline = runner_config
        .variant
        .build(&opts)
        .context("Failed to build pipeline")?;
    let executor = runner_config.build_executor()?;

    println!(
        "{}",
        format!(
            "Running '{}' against {} ({} steps)...",
            pipeline.name(),
            config.base_url,
            pipeline.steps().len()
        )
        .dimmed()
    );
    println!();

    let mut ctx = PipelineContext::new();
    let report = executor.run(&pipeline, &mut ctx).await?;

    print_report(&report);
    if args.verbose {
        println!();
        print_journal(&report.journal);
    }

    if let Some(path) = &runner_config.report_path {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!();
        println!("{} {}", "Report written to".dimmed(), path.display());
    }

    if !report.passed() {
        anyhow::bail!("pipeline '{}' failed", report.pipeline);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        let name = parse_name("provider-name", Some("Jordan Ellis")).unwrap();
        assert_eq!(name, Some(PersonName::new("Jordan", "Ellis")));
        assert!(parse_name("provider-name", None).unwrap().is_none());
        assert!(parse_name("provider-name", Some("Jordan")).is_err());
    }
}
