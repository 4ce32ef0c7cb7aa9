//! Appointment endpoints

use carecheck_core::dto::appointment::CreateAppointment;
use reqwest::Method;

use crate::error::Result;
use crate::{ApiResponse, SchedulingClient};

impl SchedulingClient {
    /// Book an appointment
    ///
    /// Rejections come back as an [`ApiResponse`] so the caller can tell
    /// business-rule refusals from authentication failures.
    pub async fn create_appointment(
        &self,
        token: &str,
        req: &CreateAppointment,
    ) -> Result<ApiResponse> {
        let response = self
            .authorized(Method::POST, "/api/master/appointment", token)
            .json(req)
            .send()
            .await?;

        self.read_response(response).await
    }
}
