//! Slot discovery step
//!
//! Lists the resolved provider's bookable ranges within a fixed window.
//! An empty result is fatal here: it means the availability configured
//! upstream did not take effect.

use async_trait::async_trait;
use carecheck_client::{ClientError, SlotQuery};
use carecheck_core::domain::context::{ContextKey, PipelineContext};
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::slot::{SlotWindow, format_timestamp};
use carecheck_core::domain::step::StepOutcome;
use carecheck_core::dto::page::PageResponse;
use carecheck_core::dto::slot::SlotEntry;
use tracing::info;

use crate::service::StepJournal;
use crate::steps::{Step, StepEnv, require_success};

#[derive(Debug, Clone)]
pub struct DiscoverSlotsStep {
    query: SlotQuery,
}

impl DiscoverSlotsStep {
    pub fn new(window: SlotWindow) -> Self {
        Self {
            query: SlotQuery::virtual_new(window),
        }
    }

    fn window_text(&self) -> String {
        format!(
            "{} and {}",
            format_timestamp(self.query.window.start),
            format_timestamp(self.query.window.end)
        )
    }
}

#[async_trait]
impl Step for DiscoverSlotsStep {
    fn label(&self) -> &str {
        "Get Provider Slots"
    }

    fn reads(&self) -> &[ContextKey] {
        &[ContextKey::ProviderRef]
    }

    fn writes(&self) -> &[ContextKey] {
        &[ContextKey::DiscoveredSlots]
    }

    fn reached(&self) -> RunState {
        RunState::SlotsDiscovered
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        ctx: &mut PipelineContext,
        journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        // Each run recomputes the sequence from scratch.
        ctx.discovered_slots.clear();

        let Some(provider) = ctx.provider_ref.clone() else {
            return Ok(StepOutcome::fatal(
                "a resolved provider reference",
                "none in context",
            ));
        };

        info!("Fetching slots for provider {}", provider);
        let response = env
            .client
            .provider_slots(env.token, provider.as_str(), &self.query)
            .await?;

        if let Some(outcome) = require_success(&response) {
            return Ok(outcome);
        }

        let page: PageResponse<SlotEntry> = match response.parse() {
            Ok(page) => page,
            Err(e) => return Ok(StepOutcome::fatal("a slot page", e.to_string())),
        };

        ctx.discovered_slots = page.time_ranges();

        let flat = page.flat_count();
        if flat > 0 {
            journal.debug(format!(
                "{} of {} slot(s) used the flat startTime/endTime shape",
                flat,
                ctx.discovered_slots.len()
            ));
        }

        match ctx.first_slot() {
            Some(first) => Ok(StepOutcome::Ok(format!(
                "{} slot(s) found, first {}",
                ctx.discovered_slots.len(),
                first
            ))),
            None => Ok(StepOutcome::fatal(
                format!("at least one slot between {}", self.window_text()),
                format!(
                    "no usable slots ({} entries returned)",
                    page.content().len()
                ),
            )),
        }
    }
}
