//! Session authenticator
//!
//! Exchanges credentials for a short-lived bearer token. Tokens are never
//! cached: every step asks for a fresh one, so an expired or revoked token
//! only affects the step that requested it.

use async_trait::async_trait;
use carecheck_client::SchedulingClient;
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::service::credentials::CredentialProvider;

/// Default minimum token length; real tokens are signed JWTs well above it
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 100;

/// Service trait for obtaining bearer tokens
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Performs one credential exchange
    ///
    /// # Returns
    /// A token that passed the sanity checks, or why none could be obtained
    async fn authenticate(&self, client: &SchedulingClient) -> Result<String, AuthError>;
}

/// Authenticator backed by the login endpoint
pub struct SessionAuthenticator {
    credentials: Arc<dyn CredentialProvider>,
    /// Length sanity threshold, not a format check
    min_token_length: usize,
}

impl SessionAuthenticator {
    pub fn new(credentials: Arc<dyn CredentialProvider>, min_token_length: usize) -> Self {
        Self {
            credentials,
            min_token_length,
        }
    }

    /// Applies the emptiness and length checks to an issued token
    pub fn check_token(&self, token: &str) -> Result<(), AuthError> {
        let len = token.trim().chars().count();
        if len == 0 {
            return Err(AuthError::EmptyToken);
        }
        if len < self.min_token_length {
            return Err(AuthError::TokenTooShort {
                len,
                min: self.min_token_length,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, client: &SchedulingClient) -> Result<String, AuthError> {
        let request = self.credentials.credentials().to_login_request();
        debug!("Exchanging credentials for {}", request.username);

        let token = client.login(&request).await?;
        self.check_token(&token)?;

        debug!("Obtained bearer token ({} chars)", token.len());
        Ok(token)
    }
}
