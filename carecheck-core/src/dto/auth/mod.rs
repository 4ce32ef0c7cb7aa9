//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Credential exchange request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Credential exchange response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub access_token: String,
}
