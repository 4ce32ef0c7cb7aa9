//! Patient DTOs

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/master/patient`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
    /// RFC 3339 timestamp, e.g. `1990-06-30T18:30:00.000Z`
    pub birth_date: String,
    pub gender: String,
    pub mobile_number: String,
    pub email: String,
    pub address: Address,
}

impl CreatePatient {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            line1: "123 Main St".to_string(),
            line2: String::new(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            country: "USA".to_string(),
            zipcode: "10001".to_string(),
        }
    }
}
