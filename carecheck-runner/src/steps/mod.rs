//! Pipeline steps
//!
//! A step is one remote operation plus the assertions that decide whether
//! the pipeline may continue. Steps read and write the shared
//! [`PipelineContext`] and declare which fields they touch so the pipeline
//! builder can reject an ordering mistake before the run starts.

mod availability;
mod commit;
mod create;
mod login;
mod resolve;
mod slots;

pub use availability::SetAvailabilityStep;
pub use commit::{
    CommitBookingStep, PLACEHOLDER_PATIENT_ID, PLACEHOLDER_PROVIDER_ID, classify_booking,
};
pub use create::CreateEntityStep;
pub use login::LoginStep;
pub use resolve::ResolveStep;
pub use slots::DiscoverSlotsStep;

use async_trait::async_trait;
use carecheck_client::{ApiResponse, ClientError, SchedulingClient};
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::step::StepOutcome;
use carecheck_core::dto::envelope;

use crate::service::StepJournal;

/// What the executor hands a step besides the context
#[derive(Debug, Clone, Copy)]
pub struct StepEnv<'a> {
    pub client: &'a SchedulingClient,
    /// Fresh bearer token obtained for this step only
    pub token: &'a str,
}

/// A unit of work in a linear pipeline
#[async_trait]
pub trait Step: Send + Sync {
    /// Human-readable name used in reports; never used for dispatch
    fn label(&self) -> &str;

    /// Context fields this step requires to be written by earlier steps
    fn reads(&self) -> &[ContextKey] {
        &[]
    }

    /// Context fields this step writes
    fn writes(&self) -> &[ContextKey] {
        &[]
    }

    /// Run state reached when the step succeeds
    fn reached(&self) -> RunState;

    /// Run state reached when the step ends in an advisory rejection
    fn reached_on_advisory(&self) -> RunState {
        self.reached()
    }

    /// Performs the remote operation and evaluates its assertions
    ///
    /// Transport failures are returned as errors; the executor treats them
    /// as fatal. Notes worth keeping in the run report go to `journal`.
    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError>;
}

/// Renders a response as `status N: body` for diagnostics
pub(crate) fn describe(response: &ApiResponse) -> String {
    format!("status {}: {}", response.status, response.body_excerpt())
}

/// Fatal outcome for a 401/403 on any step, whatever the body says
pub(crate) fn auth_rejection(response: &ApiResponse) -> Option<StepOutcome> {
    response
        .is_auth_rejection()
        .then(|| StepOutcome::fatal("an authorized request", describe(response)))
}

/// Fatal outcome unless the response has exactly `expected` status
pub(crate) fn require_status(response: &ApiResponse, expected: u16) -> Option<StepOutcome> {
    if let Some(outcome) = auth_rejection(response) {
        return Some(outcome);
    }
    (response.status != expected)
        .then(|| StepOutcome::fatal(format!("status {}", expected), describe(response)))
}

/// Fatal outcome unless the response has a 2xx status
pub(crate) fn require_success(response: &ApiResponse) -> Option<StepOutcome> {
    if let Some(outcome) = auth_rejection(response) {
        return Some(outcome);
    }
    (!response.is_success()).then(|| StepOutcome::fatal("a 2xx status", describe(response)))
}

/// Fatal outcome unless the body carries `code`, `message` and `date`
pub(crate) fn require_envelope(response: &ApiResponse) -> Option<StepOutcome> {
    let missing = envelope::missing_fields(&response.body);
    (!missing.is_empty()).then(|| {
        StepOutcome::fatal(
            "response fields code, message and date",
            format!("missing {} in {}", missing.join(", "), response.body_excerpt()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_status_prefers_auth_rejection() {
        let resp = ApiResponse::new(401, json!({"message": "expired"}));
        let outcome = require_status(&resp, 201).unwrap();
        match outcome {
            StepOutcome::FatalFailure(d) => assert_eq!(d.expected, "an authorized request"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_require_status_accepts_exact_match() {
        let resp = ApiResponse::new(201, json!({}));
        assert!(require_status(&resp, 201).is_none());
        assert!(require_status(&resp, 200).is_some());
    }

    #[test]
    fn test_require_envelope() {
        let ok = ApiResponse::new(201, json!({"code": 1, "message": "m", "date": "d"}));
        assert!(require_envelope(&ok).is_none());

        let missing = ApiResponse::new(201, json!({"message": "m"}));
        match require_envelope(&missing) {
            Some(StepOutcome::FatalFailure(d)) => {
                assert!(d.actual.starts_with("missing code, date"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_require_success() {
        assert!(require_success(&ApiResponse::new(204, json!(null))).is_none());
        assert!(require_success(&ApiResponse::new(500, json!(null))).is_some());
    }
}
