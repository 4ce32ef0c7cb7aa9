//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod login;
mod run;
mod search;
mod slots;

pub use run::RunArgs;
pub use search::SearchArgs;
pub use slots::SlotsArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a pipeline end to end
    Run(RunArgs),
    /// Exchange credentials for a token and report on it
    Login,
    /// Search providers or patients by display name
    Search(SearchArgs),
    /// List a provider's bookable slots
    Slots(SlotsArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run_command(args, config).await,
        Commands::Login => login::handle_login_command(config).await,
        Commands::Search(args) => search::handle_search_command(args, config).await,
        Commands::Slots(args) => slots::handle_slots_command(args, config).await,
    }
}

/// Parses an RFC 3339 timestamp argument
pub(crate) fn parse_instant(value: &str) -> Result<chrono::DateTime<chrono::Utc>, String> {
    chrono::DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}
