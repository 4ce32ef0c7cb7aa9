//! Resolution steps
//!
//! Turns the display name of a just-created entity into its durable
//! identifier by searching for it. The first search result wins: under
//! duplicate display names the wrong entity may be picked, and nothing
//! stronger than name matching is attempted.

use async_trait::async_trait;
use carecheck_client::ClientError;
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::entity::EntityKind;
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::step::StepOutcome;
use carecheck_core::dto::page::{EntitySummary, PageResponse};
use tracing::info;

use crate::service::StepJournal;
use crate::steps::{Step, StepEnv, require_success};

/// Searches by display name and stores the first match's identifier
#[derive(Debug, Clone)]
pub struct ResolveStep {
    kind: EntityKind,
    page_size: u32,
}

impl ResolveStep {
    /// Provider searches fetch a page of 3
    pub fn provider() -> Self {
        Self::new(EntityKind::Provider, 3)
    }

    /// Patient searches fetch a page of 10
    pub fn patient() -> Self {
        Self::new(EntityKind::Patient, 10)
    }

    pub fn new(kind: EntityKind, page_size: u32) -> Self {
        Self { kind, page_size }
    }
}

#[async_trait]
impl Step for ResolveStep {
    fn label(&self) -> &str {
        match self.kind {
            EntityKind::Provider => "View Provider - Search by name",
            EntityKind::Patient => "View Patient - Search by name",
        }
    }

    fn reads(&self) -> &[ContextKey] {
        match self.kind {
            EntityKind::Provider => &[ContextKey::ProviderDisplayName],
            EntityKind::Patient => &[ContextKey::PatientDisplayName],
        }
    }

    fn writes(&self) -> &[ContextKey] {
        match self.kind {
            EntityKind::Provider => &[ContextKey::ProviderRef],
            EntityKind::Patient => &[ContextKey::PatientRef],
        }
    }

    fn reached(&self) -> RunState {
        match self.kind {
            EntityKind::Provider => RunState::ProviderResolved,
            EntityKind::Patient => RunState::PatientResolved,
        }
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        let Some(name) = ctx.display_name(self.kind).map(str::to_string) else {
            ctx.set_entity_ref(self.kind, None);
            return Ok(StepOutcome::fatal(
                format!("a {} display name to search for", self.kind),
                "no display name in context",
            ));
        };

        info!("Searching {} by name '{}'", self.kind, name);
        let response = env
            .client
            .search(self.kind, env.token, &name, self.page_size)
            .await?;

        if let Some(outcome) = require_success(&response) {
            ctx.set_entity_ref(self.kind, None);
            return Ok(outcome);
        }

        let page: PageResponse<EntitySummary> = match response.parse() {
            Ok(page) => page,
            Err(e) => {
                ctx.set_entity_ref(self.kind, None);
                return Ok(StepOutcome::fatal("a search result page", e.to_string()));
            }
        };

        let matches = page.content().len();
        let reference = page.first_ref();
        ctx.set_entity_ref(self.kind, reference.clone());

        match reference {
            Some(reference) => {
                if matches > 1 {
                    journal.warning(format!(
                        "{} matches for '{}', taking the first ({})",
                        matches, name, reference
                    ));
                }
                info!("{} found. UUID: {}", self.kind, reference);
                Ok(StepOutcome::Ok(format!(
                    "'{}' resolved to {} ({} match(es))",
                    name, reference, matches
                )))
            }
            None => Ok(StepOutcome::fatal(
                format!("a {} reference for '{}'", self.kind, name),
                format!("no usable search result ({} entries)", matches),
            )),
        }
    }
}
