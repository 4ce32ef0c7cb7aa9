//! Runner configuration
//!
//! Defines the connection, credential and request-shaping settings for a
//! pipeline run. Everything can be supplied through the environment.

use anyhow::Context;
use carecheck_client::SchedulingClient;
use carecheck_core::domain::entity::EntityRef;
use carecheck_core::domain::slot::SlotWindow;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::pipeline::{PipelineExecutor, PipelineOptions, RunVariant};
use crate::service::{
    Credentials, DEFAULT_MIN_TOKEN_LENGTH, SessionAuthenticator, StaticCredentials,
};
use crate::steps::{PLACEHOLDER_PATIENT_ID, PLACEHOLDER_PROVIDER_ID};

pub const DEFAULT_BASE_URL: &str = "https://stage-api.ecarehealth.com";
pub const DEFAULT_TENANT_ID: &str = "stage_aithinkitive";
pub const DEFAULT_TIMEZONE: &str = "IST";

/// Runner configuration
#[derive(Clone)]
pub struct Config {
    /// Scheduling service base URL (e.g., "https://stage-api.ecarehealth.com")
    pub base_url: String,

    /// Tenant selector sent with every request
    pub tenant_id: String,

    pub username: String,
    pub password: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Issued tokens shorter than this are rejected
    pub min_token_length: usize,

    /// Absolute window searched for bookable slots
    pub slot_window: SlotWindow,

    pub timezone: String,

    /// References booked by the commit-only pipeline
    pub placeholder_provider: EntityRef,
    pub placeholder_patient: EntityRef,

    /// Pipeline to run
    pub variant: RunVariant,

    /// Where to write the JSON run report, if anywhere
    pub report_path: Option<PathBuf>,
}

impl Config {
    /// Creates a configuration with defaults for everything but credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            username: username.into(),
            password: password.into(),
            request_timeout: Duration::from_secs(30),
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            slot_window: SlotWindow::day_after(Utc::now()),
            timezone: DEFAULT_TIMEZONE.to_string(),
            placeholder_provider: EntityRef::new(PLACEHOLDER_PROVIDER_ID),
            placeholder_patient: EntityRef::new(PLACEHOLDER_PATIENT_ID),
            variant: RunVariant::Standard,
            report_path: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CARECHECK_USERNAME, CARECHECK_PASSWORD (required)
    /// - CARECHECK_BASE_URL, CARECHECK_TENANT_ID (optional)
    /// - CARECHECK_REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - CARECHECK_MIN_TOKEN_LENGTH (optional, default: 100)
    /// - CARECHECK_SLOT_WINDOW_START, CARECHECK_SLOT_WINDOW_END (optional, RFC 3339,
    ///   both or neither)
    /// - CARECHECK_TIMEZONE (optional, default: IST)
    /// - CARECHECK_PLACEHOLDER_PROVIDER_ID, CARECHECK_PLACEHOLDER_PATIENT_ID (optional)
    /// - CARECHECK_PIPELINE (optional, "standard" or "commit-only")
    /// - CARECHECK_REPORT_PATH (optional)
    pub fn from_env() -> anyhow::Result<Self> {
        let username = std::env::var("CARECHECK_USERNAME")
            .map_err(|_| anyhow::anyhow!("CARECHECK_USERNAME environment variable not set"))?;

        let password = std::env::var("CARECHECK_PASSWORD")
            .map_err(|_| anyhow::anyhow!("CARECHECK_PASSWORD environment variable not set"))?;

        let mut config = Self::new(username, password);

        if let Some(url) = env_var("CARECHECK_BASE_URL") {
            config.base_url = url;
        }

        if let Some(tenant) = env_var("CARECHECK_TENANT_ID") {
            config.tenant_id = tenant;
        }

        if let Some(secs) = env_var("CARECHECK_REQUEST_TIMEOUT") {
            let secs = secs
                .parse::<u64>()
                .context("CARECHECK_REQUEST_TIMEOUT must be a number of seconds")?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(len) = env_var("CARECHECK_MIN_TOKEN_LENGTH") {
            config.min_token_length = len
                .parse::<usize>()
                .context("CARECHECK_MIN_TOKEN_LENGTH must be a number")?;
        }

        match (
            env_var("CARECHECK_SLOT_WINDOW_START"),
            env_var("CARECHECK_SLOT_WINDOW_END"),
        ) {
            (Some(start), Some(end)) => {
                config.slot_window = SlotWindow::new(
                    parse_instant("CARECHECK_SLOT_WINDOW_START", &start)?,
                    parse_instant("CARECHECK_SLOT_WINDOW_END", &end)?,
                );
            }
            (None, None) => {}
            _ => anyhow::bail!(
                "CARECHECK_SLOT_WINDOW_START and CARECHECK_SLOT_WINDOW_END must be set together"
            ),
        }

        if let Some(tz) = env_var("CARECHECK_TIMEZONE") {
            config.timezone = tz;
        }

        if let Some(id) = env_var("CARECHECK_PLACEHOLDER_PROVIDER_ID") {
            config.placeholder_provider = EntityRef::new(id);
        }

        if let Some(id) = env_var("CARECHECK_PLACEHOLDER_PATIENT_ID") {
            config.placeholder_patient = EntityRef::new(id);
        }

        if let Some(variant) = env_var("CARECHECK_PIPELINE") {
            config.variant = variant.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }

        config.report_path = env_var("CARECHECK_REPORT_PATH").map(PathBuf::from);

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.username.trim().is_empty() {
            anyhow::bail!("username cannot be empty");
        }

        if self.password.is_empty() {
            anyhow::bail!("password cannot be empty");
        }

        if self.tenant_id.trim().is_empty() {
            anyhow::bail!("tenant_id cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.min_token_length == 0 {
            anyhow::bail!("min_token_length must be greater than 0");
        }

        if !self.slot_window.is_valid() {
            anyhow::bail!("slot window start must be before its end");
        }

        if self.placeholder_provider.is_empty() || self.placeholder_patient.is_empty() {
            anyhow::bail!("placeholder references cannot be empty");
        }

        Ok(())
    }

    /// Options for the prebuilt pipelines
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            timezone: self.timezone.clone(),
            slot_window: self.slot_window,
            placeholder_provider: self.placeholder_provider.clone(),
            placeholder_patient: self.placeholder_patient.clone(),
            provider_name: None,
            patient_name: None,
        }
    }

    /// Builds a client honoring the request timeout
    pub fn build_client(&self) -> anyhow::Result<SchedulingClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SchedulingClient::with_client(
            self.base_url.clone(),
            self.tenant_id.clone(),
            http,
        ))
    }

    /// Authenticator presenting this configuration's credentials
    pub fn authenticator(&self) -> SessionAuthenticator {
        let credentials = StaticCredentials::new(Credentials::new(
            self.username.clone(),
            self.password.clone(),
        ));
        SessionAuthenticator::new(Arc::new(credentials), self.min_token_length)
    }

    /// Builds an executor authenticating with this configuration's credentials
    pub fn build_executor(&self) -> anyhow::Result<PipelineExecutor> {
        let client = Arc::new(self.build_client()?);
        Ok(PipelineExecutor::new(client, Arc::new(self.authenticator())))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("tenant_id", &self.tenant_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("min_token_length", &self.min_token_length)
            .field("slot_window", &self.slot_window)
            .field("timezone", &self.timezone)
            .field("variant", &self.variant)
            .field("report_path", &self.report_path)
            .finish()
    }
}

/// Reads a variable, treating blank values as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_instant(name: &str, value: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("{} must be an RFC 3339 timestamp, got '{}'", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tenant_id, DEFAULT_TENANT_ID);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.min_token_length, 100);
        assert_eq!(config.variant, RunVariant::Standard);
        // No credentials by default.
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("rose.gomez@jourrapide.com", "Pass@123");
        assert!(config.validate().is_ok());

        config.base_url = "stage-api.ecarehealth.com".to_string();
        assert!(config.validate().is_err());
        config.base_url = DEFAULT_BASE_URL.to_string();

        config.tenant_id = "  ".to_string();
        assert!(config.validate().is_err());
        config.tenant_id = DEFAULT_TENANT_ID.to_string();

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
        config.request_timeout = Duration::from_secs(5);

        let now = Utc::now();
        config.slot_window = SlotWindow::new(now, now);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Config::new("user", "Pass@123"));
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("Pass@123"));
    }

    #[test]
    fn test_parse_instant() {
        let at = parse_instant("X", "2025-08-06T00:00:00.000Z").unwrap();
        assert_eq!(at.to_rfc3339(), "2025-08-06T00:00:00+00:00");
        assert!(parse_instant("X", "tomorrow").is_err());
    }

    #[test]
    fn test_pipeline_options_carry_settings() {
        let mut config = Config::new("u", "p");
        config.timezone = "EST".to_string();
        let opts = config.pipeline_options();
        assert_eq!(opts.timezone, "EST");
        assert_eq!(opts.placeholder_provider.as_str(), PLACEHOLDER_PROVIDER_ID);
    }
}
