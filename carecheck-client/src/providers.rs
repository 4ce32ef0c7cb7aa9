//! Provider endpoints

use carecheck_core::domain::entity::EntityKind;
use carecheck_core::domain::slot::{SlotWindow, format_timestamp};
use carecheck_core::dto::availability::AvailabilitySetting;
use carecheck_core::dto::provider::CreateProvider;
use reqwest::Method;

use crate::error::{ClientError, Result};
use crate::{ApiResponse, SchedulingClient};

/// Parameters of a slot discovery query
#[derive(Debug, Clone)]
pub struct SlotQuery {
    pub window: SlotWindow,
    /// Appointment type path segment, e.g. `NEW`
    pub slot_type: String,
    /// Visit-mode filter, e.g. `VIRTUAL`
    pub availability_mode: String,
    pub page_size: u32,
}

impl SlotQuery {
    /// New-patient virtual slots within `window`, up to 1000 per page
    pub fn virtual_new(window: SlotWindow) -> Self {
        Self {
            window,
            slot_type: "NEW".to_string(),
            availability_mode: "VIRTUAL".to_string(),
            page_size: 1000,
        }
    }
}

impl SchedulingClient {
    // =============================================================================
    // Provider Management
    // =============================================================================

    /// Create a provider
    ///
    /// The creation response never carries the new provider's identifier;
    /// resolve it afterwards with [`SchedulingClient::search`].
    pub async fn create_provider(&self, token: &str, req: &CreateProvider) -> Result<ApiResponse> {
        let response = self
            .authorized(Method::POST, "/api/master/provider", token)
            .json(req)
            .send()
            .await?;

        self.read_response(response).await
    }

    /// Search an entity collection by display name, first page only
    pub async fn search(
        &self,
        kind: EntityKind,
        token: &str,
        name: &str,
        page_size: u32,
    ) -> Result<ApiResponse> {
        let path = format!("/api/master/{}", kind.collection());
        let page_size = page_size.to_string();
        let response = self
            .authorized(Method::GET, &path, token)
            .query(&[
                ("page", "0"),
                ("size", page_size.as_str()),
                ("searchString", name),
            ])
            .send()
            .await?;

        self.read_response(response).await
    }

    // =============================================================================
    // Availability
    // =============================================================================

    /// Configure a provider's weekly availability
    pub async fn set_availability(
        &self,
        token: &str,
        setting: &AvailabilitySetting,
    ) -> Result<ApiResponse> {
        let response = self
            .authorized(
                Method::POST,
                "/api/master/provider/availability-setting",
                token,
            )
            .json(setting)
            .send()
            .await?;

        self.read_response(response).await
    }

    /// Query bookable slots of a provider within an absolute window
    pub async fn provider_slots(
        &self,
        token: &str,
        provider_id: &str,
        query: &SlotQuery,
    ) -> Result<ApiResponse> {
        if provider_id.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "provider id must not be empty".to_string(),
            ));
        }

        let path = format!(
            "/api/master/provider/{}/slots/{}",
            provider_id, query.slot_type
        );
        let page_size = query.page_size.to_string();
        let start = format_timestamp(query.window.start);
        let end = format_timestamp(query.window.end);

        let response = self
            .authorized(Method::GET, &path, token)
            .query(&[
                ("page", "0"),
                ("size", page_size.as_str()),
                ("startDate", start.as_str()),
                ("endDate", end.as_str()),
                ("availabilityMode", query.availability_mode.as_str()),
            ])
            .send()
            .await?;

        self.read_response(response).await
    }
}
