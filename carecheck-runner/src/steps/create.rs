//! Entity creation steps
//!
//! Creates a provider or patient from synthetic attributes. Creation answers
//! do not carry the new entity's identifier, so the step records the display
//! name for a later resolution step to search by.

use async_trait::async_trait;
use carecheck_client::ClientError;
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::entity::EntityKind;
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::step::StepOutcome;
use tracing::info;

use crate::service::{EntityFactory, PersonName, StepJournal};
use crate::steps::{Step, StepEnv, require_envelope, require_status};

/// Creates one provider or patient
#[derive(Debug, Clone)]
pub struct CreateEntityStep {
    kind: EntityKind,
    /// Fixed name; a random one is generated when absent
    name: Option<PersonName>,
    /// Only used for patients
    timezone: String,
}

impl CreateEntityStep {
    pub fn provider(name: Option<PersonName>) -> Self {
        Self {
            kind: EntityKind::Provider,
            name,
            timezone: String::new(),
        }
    }

    pub fn patient(name: Option<PersonName>, timezone: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Patient,
            name,
            timezone: timezone.into(),
        }
    }
}

#[async_trait]
impl Step for CreateEntityStep {
    fn label(&self) -> &str {
        match self.kind {
            EntityKind::Provider => "Create Provider",
            EntityKind::Patient => "Create Patient",
        }
    }

    fn writes(&self) -> &[ContextKey] {
        match self.kind {
            EntityKind::Provider => &[ContextKey::ProviderDisplayName],
            EntityKind::Patient => &[ContextKey::PatientDisplayName],
        }
    }

    fn reached(&self) -> RunState {
        match self.kind {
            EntityKind::Provider => RunState::ProviderCreated,
            EntityKind::Patient => RunState::PatientCreated,
        }
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        _journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        let (display_name, email, response) = match self.kind {
            EntityKind::Provider => {
                let req = EntityFactory::provider(self.name.as_ref());
                let response = env.client.create_provider(env.token, &req).await?;
                (req.display_name(), req.email, response)
            }
            EntityKind::Patient => {
                let req = EntityFactory::patient(self.name.as_ref(), &self.timezone);
                let response = env.client.create_patient(env.token, &req).await?;
                (req.display_name(), req.email, response)
            }
        };

        info!("{} creation answered status {}", self.kind, response.status);

        if let Some(outcome) = require_status(&response, 201) {
            return Ok(outcome);
        }
        if let Some(outcome) = require_envelope(&response) {
            return Ok(outcome);
        }

        ctx.set_display_name(self.kind, display_name.clone());
        Ok(StepOutcome::Ok(format!(
            "{} '{}' created with email {}",
            self.kind, display_name, email
        )))
    }
}
