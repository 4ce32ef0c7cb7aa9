//! Raw API responses
//!
//! Most steps must inspect the status and body of a response whatever the
//! status was, so these endpoints hand back the response as data instead of
//! turning non-2xx answers into errors.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{ClientError, Result};

/// Status and decoded body of an API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; a non-JSON body is kept as a JSON string
    pub body: JsonValue,
}

impl ApiResponse {
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// Builds a response from the raw body text
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 401 or 403: the request was refused on credentials, not on content
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Deserializes the body into `T`
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            ClientError::ParseError(format!(
                "Failed to parse JSON response (status {}): {}",
                self.status, e
            ))
        })
    }

    /// Short, single-line rendering of the body for diagnostics
    pub fn body_excerpt(&self) -> String {
        const MAX: usize = 300;
        let text = match &self.body {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.chars().count() > MAX {
            let cut: String = text.chars().take(MAX).collect();
            format!("{}...", cut)
        } else {
            text
        }
    }
}
