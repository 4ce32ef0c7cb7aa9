//! Availability step
//!
//! Configures weekday availability for the resolved provider so that slot
//! discovery has something to find.

use async_trait::async_trait;
use carecheck_client::ClientError;
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::step::StepOutcome;
use carecheck_core::dto::availability::AvailabilitySetting;
use carecheck_core::dto::envelope;

use crate::service::StepJournal;
use crate::steps::{Step, StepEnv, require_envelope, require_status};

/// Words the success message must contain
const SUCCESS_PHRASE: [&str; 2] = ["Availability", "successfully"];

#[derive(Debug, Clone)]
pub struct SetAvailabilityStep {
    timezone: String,
}

impl SetAvailabilityStep {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
        }
    }
}

#[async_trait]
impl Step for SetAvailabilityStep {
    fn label(&self) -> &str {
        "Set Provider Availability"
    }

    fn reads(&self) -> &[ContextKey] {
        &[ContextKey::ProviderRef]
    }

    fn reached(&self) -> RunState {
        RunState::AvailabilitySet
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        _journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        let Some(provider) = ctx.provider_ref.as_ref() else {
            return Ok(StepOutcome::fatal(
                "a resolved provider reference",
                "none in context",
            ));
        };

        let setting = AvailabilitySetting::weekdays(
            provider.as_str(),
            &self.timezone,
            env.client.tenant_id(),
        );
        let response = env.client.set_availability(env.token, &setting).await?;

        if let Some(outcome) = require_status(&response, 200) {
            return Ok(outcome);
        }
        if let Some(outcome) = require_envelope(&response) {
            return Ok(outcome);
        }

        let message = envelope::message(&response.body).unwrap_or_default();
        if !SUCCESS_PHRASE.iter().all(|word| message.contains(word)) {
            return Ok(StepOutcome::fatal(
                "a message containing 'Availability' and 'successfully'",
                format!("'{}'", message),
            ));
        }

        Ok(StepOutcome::Ok(format!(
            "availability set for {}: {}",
            provider, message
        )))
    }
}
