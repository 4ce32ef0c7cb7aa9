//! Configuration module
//!
//! Connection and credential settings shared by every command.

use std::time::Duration;

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub tenant_id: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
    /// Issued tokens shorter than this are rejected
    pub min_token_length: usize,
}

impl Config {
    /// Runner configuration with these connection settings and defaults elsewhere
    pub fn runner_config(&self) -> anyhow::Result<carecheck_runner::Config> {
        let mut config =
            carecheck_runner::Config::new(self.username.clone(), self.password.clone());
        config.base_url = self.base_url.clone();
        config.tenant_id = self.tenant_id.clone();
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config.min_token_length = self.min_token_length;
        config.validate()?;
        Ok(config)
    }
}
