//! Search command

use anyhow::{Context, Result};
use carecheck_core::domain::entity::EntityKind;
use carecheck_core::dto::page::{EntitySummary, PageResponse};
use clap::{Args, ValueEnum};
use colored::*;

use carecheck_runner::service::Authenticator;

use crate::config::Config;

#[derive(Clone, Copy, ValueEnum)]
pub enum EntityArg {
    Provider,
    Patient,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Provider => EntityKind::Provider,
            EntityArg::Patient => EntityKind::Patient,
        }
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// Collection to search
    #[arg(value_enum)]
    kind: EntityArg,

    /// Display name, "First Last"
    name: String,

    /// Maximum number of results
    #[arg(long, default_value_t = 10)]
    size: u32,
}

/// Handle the search command
pub async fn handle_search_command(args: SearchArgs, config: &Config) -> Result<()> {
    let kind = EntityKind::from(args.kind);
    let runner_config = config.runner_config()?;
    let client = runner_config.build_client()?;
    let token = runner_config
        .authenticator()
        .authenticate(&client)
        .await
        .context("Failed to obtain a token")?;

    let response = client.search(kind, &token, &args.name, args.size).await?;
    if !response.is_success() {
        anyhow::bail!(
            "search failed with status {}: {}",
            response.status,
            response.body_excerpt()
        );
    }

    let page: PageResponse<EntitySummary> =
        response.parse().context("Unexpected search response")?;
    let matches = page.content();

    if matches.is_empty() {
        println!(
            "{}",
            format!("No {} named '{}' found.", kind, args.name).yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} {}(s) named '{}':", matches.len(), kind, args.name).bold()
    );
    for summary in matches {
        let name = summary
            .full_name()
            .unwrap_or_else(|| "(unnamed)".to_string());
        println!("  {} {}", "▸".cyan(), name);
        println!("    UUID: {}", summary.uuid.dimmed());
    }

    Ok(())
}
