//! Provider DTOs

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/master/provider`
///
/// Licence and DEA blocks are mandatory in shape but may be blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvider {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub role_type: String,
    pub provider_type: String,
    pub gender: String,
    pub phone: String,
    pub npi: String,
    pub specialities: Option<Vec<String>>,
    pub licence_information: Vec<LicenceInformation>,
    pub dea_information: Vec<DeaInformation>,
}

impl CreateProvider {
    /// A provider of role `PROVIDER` and type `MD` with blank licence placeholders
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role: "PROVIDER".to_string(),
            role_type: "PROVIDER".to_string(),
            provider_type: "MD".to_string(),
            gender: gender.into(),
            phone: String::new(),
            npi: String::new(),
            specialities: None,
            licence_information: vec![LicenceInformation::default()],
            dea_information: vec![DeaInformation::default()],
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceInformation {
    pub uuid: String,
    pub license_state: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeaInformation {
    pub dea_state: String,
    pub dea_number: String,
    pub dea_term_date: String,
    pub dea_active_date: String,
}
