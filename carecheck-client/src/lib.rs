//! Carecheck HTTP Client
//!
//! A typed HTTP client for the appointment-scheduling API driven by the
//! Carecheck pipeline.
//!
//! Every request carries the tenant selector header; every request except
//! login also carries a bearer token supplied by the caller. The client never
//! caches tokens.
//!
//! # Example
//!
//! ```no_run
//! use carecheck_client::SchedulingClient;
//! use carecheck_core::domain::entity::EntityKind;
//! use carecheck_core::dto::auth::LoginRequest;
//!
//! # async fn example() -> carecheck_client::Result<()> {
//! let client = SchedulingClient::new("https://stage-api.ecarehealth.com", "stage_aithinkitive");
//!
//! let token = client.login(&LoginRequest {
//!     username: "rose.gomez@jourrapide.com".to_string(),
//!     password: "secret".to_string(),
//! }).await?;
//!
//! let found = client.search(EntityKind::Provider, &token, "Jordan Ellis", 3).await?;
//! println!("search answered {}", found.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod response;

mod appointments;
mod auth;
mod patients;
mod providers;

pub use error::{ClientError, Result};
pub use providers::SlotQuery;
pub use response::ApiResponse;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying the tenant selector on every call
pub const TENANT_HEADER: &str = "X-TENANT-ID";

const ACCEPT: &str = "application/json, text/plain, */*";

/// HTTP client for the scheduling API
#[derive(Debug, Clone)]
pub struct SchedulingClient {
    /// Base URL of the API (e.g., "https://stage-api.ecarehealth.com")
    base_url: String,
    /// Tenant selector sent as `X-TENANT-ID`
    tenant_id: String,
    /// HTTP client instance
    client: Client,
}

impl SchedulingClient {
    /// Create a new scheduling client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API
    /// * `tenant_id` - The tenant selector
    pub fn new(base_url: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self::with_client(base_url, tenant_id, Client::new())
    }

    /// Create a new scheduling client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use carecheck_client::SchedulingClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SchedulingClient::with_client("http://localhost:8080", "tenant", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        tenant_id: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the tenant selector
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Starts a request to `path` with tenant and accept headers set
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header(TENANT_HEADER, &self.tenant_id)
            .header(reqwest::header::ACCEPT, ACCEPT)
    }

    /// Starts an authorized request to `path`
    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Returns an error for any non-2xx status.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Reads status and body without judging the status
    async fn read_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("Response status {} ({} bytes)", status, text.len());
        Ok(ApiResponse::from_text(status, &text))
    }
}
