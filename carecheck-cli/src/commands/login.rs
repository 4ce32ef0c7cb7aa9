//! Login command

use anyhow::Result;
use colored::*;

use carecheck_runner::service::Authenticator;

use crate::config::Config;

/// Handle the login command
///
/// Only a prefix of the token is printed.
pub async fn handle_login_command(config: &Config) -> Result<()> {
    let runner_config = config.runner_config()?;
    let client = runner_config.build_client()?;
    match runner_config.authenticator().authenticate(&client).await {
        Ok(token) => {
            let preview: String = token.chars().take(20).collect();
            println!("{}", "✓ Login successful".green());
            println!("  User:   {}", runner_config.username.cyan());
            println!("  Tenant: {}", runner_config.tenant_id.cyan());
            println!("  Token:  {}... ({} chars)", preview.dimmed(), token.len());
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Login failed".red());
            Err(e.into())
        }
    }
}
