//! Carecheck CLI
//!
//! Command-line interface for running scheduling pipelines and poking at
//! individual scheduling endpoints.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "carecheck")]
#[command(about = "Appointment scheduling API pipeline checks", long_about = None)]
struct Cli {
    /// Scheduling API base URL
    #[arg(
        long,
        env = "CARECHECK_BASE_URL",
        default_value = carecheck_runner::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Tenant selector sent as X-TENANT-ID
    #[arg(
        long,
        env = "CARECHECK_TENANT_ID",
        default_value = carecheck_runner::config::DEFAULT_TENANT_ID
    )]
    tenant: String,

    /// Account used for every credential exchange
    #[arg(long, env = "CARECHECK_USERNAME")]
    username: String,

    #[arg(long, env = "CARECHECK_PASSWORD", hide_env_values = true)]
    password: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CARECHECK_REQUEST_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Issued tokens shorter than this are rejected
    #[arg(
        long,
        env = "CARECHECK_MIN_TOKEN_LENGTH",
        default_value_t = carecheck_runner::service::DEFAULT_MIN_TOKEN_LENGTH
    )]
    min_token_length: usize,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            tenant_id: self.tenant.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout_secs: self.timeout,
            min_token_length: self.min_token_length,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Warnings only by default; the command prints its own results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carecheck_runner=warn,carecheck_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use carecheck_runner::RunVariant;
    use clap::CommandFactory;

    const CREDENTIALS: [&str; 5] = ["carecheck", "--username", "u", "--password", "p"];

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(CREDENTIALS.iter().chain(args).copied()).unwrap()
    }

    fn runner_config(cli: &Cli) -> carecheck_runner::Config {
        match &cli.command {
            Commands::Run(args) => args.runner_config(&cli.config()).unwrap(),
            _ => panic!("expected the run command"),
        }
    }

    #[test]
    fn test_run_flags_reach_runner_config() {
        let cli = parse(&[
            "--min-token-length",
            "64",
            "run",
            "--pipeline",
            "commit-only",
            "--placeholder-provider",
            "11111111-1111-1111-1111-111111111111",
            "--placeholder-patient",
            "22222222-2222-2222-2222-222222222222",
            "--window-start",
            "2025-08-06T00:00:00Z",
            "--window-end",
            "2025-08-06T23:59:59Z",
        ]);
        let config = runner_config(&cli);

        assert_eq!(config.min_token_length, 64);
        assert_eq!(config.variant, RunVariant::CommitOnly);
        assert_eq!(
            config.placeholder_provider.as_str(),
            "11111111-1111-1111-1111-111111111111"
        );
        assert_eq!(
            config.placeholder_patient.as_str(),
            "22222222-2222-2222-2222-222222222222"
        );
        assert_eq!(
            config.slot_window.start.to_rfc3339(),
            "2025-08-06T00:00:00+00:00"
        );
    }

    #[test]
    fn test_run_defaults_match_runner_defaults() {
        let config = runner_config(&parse(&["run"]));
        let defaults = carecheck_runner::Config::new("u", "p");

        assert_eq!(config.min_token_length, defaults.min_token_length);
        assert_eq!(config.placeholder_provider, defaults.placeholder_provider);
        assert_eq!(config.placeholder_patient, defaults.placeholder_patient);
    }

    #[test]
    fn test_runner_settings_have_env_fallbacks() {
        let cli = Cli::command();
        let env_of = |cmd: &clap::Command, id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };

        assert_eq!(
            env_of(&cli, "min_token_length").as_deref(),
            Some("CARECHECK_MIN_TOKEN_LENGTH")
        );

        let run = cli.find_subcommand("run").expect("run subcommand");
        for (id, var) in [
            ("pipeline", "CARECHECK_PIPELINE"),
            ("window_start", "CARECHECK_SLOT_WINDOW_START"),
            ("window_end", "CARECHECK_SLOT_WINDOW_END"),
            ("placeholder_provider", "CARECHECK_PLACEHOLDER_PROVIDER_ID"),
            ("placeholder_patient", "CARECHECK_PLACEHOLDER_PATIENT_ID"),
            ("timezone", "CARECHECK_TIMEZONE"),
            ("report", "CARECHECK_REPORT_PATH"),
        ] {
            assert_eq!(env_of(run, id).as_deref(), Some(var), "{}", id);
        }
    }
}
