//! Commit step
//!
//! Books an appointment with whatever the earlier steps resolved. Bookings
//! made with synthetic data are often refused on business grounds; such a
//! refusal is advisory because the step exists to prove that tokens,
//! identifiers and request shaping reach the service intact. A 401/403
//! means that mechanism is broken and is fatal.

use async_trait::async_trait;
use carecheck_client::{ApiResponse, ClientError};
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::entity::EntityRef;
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::slot::{RangeSource, TimeRange};
use carecheck_core::domain::step::StepOutcome;
use carecheck_core::dto::appointment::{BookingRequest, CreateAppointment};
use carecheck_core::dto::envelope;
use chrono::Utc;
use tracing::{info, warn};

use crate::service::StepJournal;
use crate::steps::{Step, StepEnv, auth_rejection, describe, require_envelope, require_status};

/// Provider used when no provider was resolved in this run
pub const PLACEHOLDER_PROVIDER_ID: &str = "eb860ebc-6aae-4704-a2ee-a6916a26b74c";

/// Patient used when no patient was resolved in this run
pub const PLACEHOLDER_PATIENT_ID: &str = "c6eb7881-f5fa-485a-b369-b84202f9fe56";

#[derive(Debug, Clone)]
pub struct CommitBookingStep {
    /// Whether resolved references are declared as required inputs
    require_resolved: bool,
    placeholder_provider: EntityRef,
    placeholder_patient: EntityRef,
    timezone: String,
}

impl CommitBookingStep {
    /// Books with the references resolved earlier in the same pipeline
    pub fn resolved(timezone: impl Into<String>) -> Self {
        Self {
            require_resolved: true,
            placeholder_provider: EntityRef::new(PLACEHOLDER_PROVIDER_ID),
            placeholder_patient: EntityRef::new(PLACEHOLDER_PATIENT_ID),
            timezone: timezone.into(),
        }
    }

    /// Books with the given references unless the context holds resolved ones
    pub fn with_placeholders(
        provider: EntityRef,
        patient: EntityRef,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            require_resolved: false,
            placeholder_provider: provider,
            placeholder_patient: patient,
            timezone: timezone.into(),
        }
    }

    /// First discovered slot, or the fallback range when discovery found none
    fn pick_range(ctx: &PipelineContext) -> (TimeRange, RangeSource) {
        match ctx.first_slot() {
            Some(range) => (range.clone(), RangeSource::Discovered),
            None => (TimeRange::fallback_from(Utc::now()), RangeSource::Fallback),
        }
    }
}

/// Classifies a booking response
///
/// - 401/403: fatal, whatever the body
/// - 2xx: must be 201 with `code`, `message` and `date`
/// - anything else: advisory when the body carries a `message`, fatal otherwise
pub fn classify_booking(response: &ApiResponse, booked: &str) -> StepOutcome {
    if let Some(outcome) = auth_rejection(response) {
        return outcome;
    }

    if response.is_success() {
        if let Some(outcome) = require_status(response, 201) {
            return outcome;
        }
        if let Some(outcome) = require_envelope(response) {
            return outcome;
        }
        return StepOutcome::Ok(format!("appointment booked for {}", booked));
    }

    if !envelope::has_message(&response.body) {
        return StepOutcome::fatal("a rejection carrying a message", describe(response));
    }

    let message = envelope::message(&response.body).unwrap_or_default();
    StepOutcome::advisory(
        format!("status 201 for {}", booked),
        format!("status {}: {}", response.status, message),
    )
}

#[async_trait]
impl Step for CommitBookingStep {
    fn label(&self) -> &str {
        "Create Appointment"
    }

    fn reads(&self) -> &[ContextKey] {
        if self.require_resolved {
            &[ContextKey::ProviderRef, ContextKey::PatientRef]
        } else {
            &[]
        }
    }

    fn reached(&self) -> RunState {
        RunState::CommitSucceeded
    }

    fn reached_on_advisory(&self) -> RunState {
        RunState::CommitAdvisoryRejected
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        _journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        let provider = ctx.provider_ref.as_ref().unwrap_or(&self.placeholder_provider);
        let patient = ctx.patient_ref.as_ref().unwrap_or(&self.placeholder_patient);
        let (range, source) = Self::pick_range(ctx);

        info!(
            "Booking provider {} with patient {} for {} ({} range)",
            provider, patient, range, source
        );

        let body = CreateAppointment::virtual_visit(BookingRequest {
            provider_id: provider.as_str(),
            patient_id: patient.as_str(),
            range: &range,
            timezone: &self.timezone,
            tenant_id: env.client.tenant_id(),
            now: Utc::now(),
        });
        let response = env.client.create_appointment(env.token, &body).await?;

        let booked = format!("{} ({} range)", range, source);
        let outcome = classify_booking(&response, &booked);
        if let StepOutcome::AdvisoryReject(d) = &outcome {
            warn!(
                "Appointment refused, expected for synthetic data: {}",
                d.actual
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carecheck_core::domain::step::Diagnostic;
    use serde_json::json;

    #[test]
    fn test_auth_statuses_are_fatal_whatever_the_body() {
        for status in [401, 403] {
            for body in [json!({"message": "Token expired"}), json!({}), json!("denied")] {
                let outcome = classify_booking(&ApiResponse::new(status, body), "slot");
                assert!(outcome.is_fatal(), "status {} should be fatal", status);
            }
        }
    }

    #[test]
    fn test_other_rejections_with_message_are_advisory() {
        for status in [400, 404, 409, 422, 500, 503] {
            let resp = ApiResponse::new(status, json!({"message": "Provider not available"}));
            assert_eq!(
                classify_booking(&resp, "slot"),
                StepOutcome::AdvisoryReject(Diagnostic::new(
                    "status 201 for slot",
                    format!("status {}: Provider not available", status)
                ))
            );
        }
    }

    #[test]
    fn test_rejection_without_message_is_fatal() {
        let resp = ApiResponse::new(400, json!({"error": "bad"}));
        assert!(classify_booking(&resp, "slot").is_fatal());
    }

    #[test]
    fn test_created_with_envelope_succeeds() {
        let resp = ApiResponse::new(
            201,
            json!({
                "code": "APPOINTMENT_CREATED",
                "message": "Appointment booked",
                "date": "2025-08-05"
            }),
        );
        assert!(matches!(classify_booking(&resp, "slot"), StepOutcome::Ok(_)));
    }

    #[test]
    fn test_success_other_than_201_is_fatal() {
        let resp = ApiResponse::new(200, json!({"code": 1, "message": "m", "date": "d"}));
        assert!(classify_booking(&resp, "slot").is_fatal());

        let resp = ApiResponse::new(201, json!({"message": "m"}));
        assert!(classify_booking(&resp, "slot").is_fatal());
    }

    #[test]
    fn test_pick_range_prefers_discovered_slot() {
        let mut ctx = PipelineContext::new();
        let (_, source) = CommitBookingStep::pick_range(&ctx);
        assert_eq!(source, RangeSource::Fallback);

        ctx.discovered_slots = vec![TimeRange::new("A", "B"), TimeRange::new("C", "D")];
        let (range, source) = CommitBookingStep::pick_range(&ctx);
        assert_eq!(source, RangeSource::Discovered);
        assert_eq!(range, TimeRange::new("A", "B"));
    }

    #[test]
    fn test_commit_ends_in_an_outcome_state() {
        for step in [
            CommitBookingStep::resolved("IST"),
            CommitBookingStep::with_placeholders(
                EntityRef::new(PLACEHOLDER_PROVIDER_ID),
                EntityRef::new(PLACEHOLDER_PATIENT_ID),
                "IST",
            ),
        ] {
            assert_eq!(step.reached(), RunState::CommitSucceeded);
            assert_eq!(step.reached_on_advisory(), RunState::CommitAdvisoryRejected);
        }
    }
}
