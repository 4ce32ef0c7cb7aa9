//! Slots command

use anyhow::{Context, Result};
use carecheck_client::SlotQuery;
use carecheck_core::domain::slot::SlotWindow;
use carecheck_core::dto::page::PageResponse;
use carecheck_core::dto::slot::SlotEntry;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::*;

use carecheck_runner::service::Authenticator;

use crate::commands::parse_instant;
use crate::config::Config;

#[derive(Args)]
pub struct SlotsArgs {
    /// Provider UUID
    provider_id: String,

    /// Window start (RFC 3339), defaults to tomorrow
    #[arg(long, value_parser = parse_instant, requires = "end")]
    start: Option<DateTime<Utc>>,

    /// Window end (RFC 3339)
    #[arg(long, value_parser = parse_instant, requires = "start")]
    end: Option<DateTime<Utc>>,
}

/// Handle the slots command
pub async fn handle_slots_command(args: SlotsArgs, config: &Config) -> Result<()> {
    let window = match (args.start, args.end) {
        (Some(start), Some(end)) => SlotWindow::new(start, end),
        _ => SlotWindow::day_after(Utc::now()),
    };
    if !window.is_valid() {
        anyhow::bail!("--start must be before --end");
    }

    let runner_config = config.runner_config()?;
    let client = runner_config.build_client()?;
    let token = runner_config
        .authenticator()
        .authenticate(&client)
        .await
        .context("Failed to obtain a token")?;

    let response = client
        .provider_slots(&token, &args.provider_id, &SlotQuery::virtual_new(window))
        .await?;
    if !response.is_success() {
        anyhow::bail!(
            "slot query failed with status {}: {}",
            response.status,
            response.body_excerpt()
        );
    }

    let page: PageResponse<SlotEntry> = response.parse().context("Unexpected slot response")?;
    let ranges = page.time_ranges();

    if ranges.is_empty() {
        println!(
            "{}",
            format!("No slots for provider {}.", args.provider_id).yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} slot(s) for provider {}:", ranges.len(), args.provider_id).bold()
    );
    for range in ranges {
        println!("  {} {}", "▸".cyan(), range);
    }

    Ok(())
}
