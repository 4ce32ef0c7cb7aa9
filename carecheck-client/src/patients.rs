//! Patient endpoints

use carecheck_core::dto::patient::CreatePatient;
use reqwest::Method;

use crate::error::Result;
use crate::{ApiResponse, SchedulingClient};

impl SchedulingClient {
    /// Register a patient
    ///
    /// Like provider creation, the response does not identify the patient.
    pub async fn create_patient(&self, token: &str, req: &CreatePatient) -> Result<ApiResponse> {
        let response = self
            .authorized(Method::POST, "/api/master/patient", token)
            .json(req)
            .send()
            .await?;

        self.read_response(response).await
    }

}
