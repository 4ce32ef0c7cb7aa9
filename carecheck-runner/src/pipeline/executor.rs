//! Pipeline executor
//!
//! Runs a pipeline's steps in order against one context. Before every step
//! a fresh bearer token is obtained; no token outlives the step it was
//! issued for. The continuation policy is fixed:
//!
//! - `Ok`: record the summary, advance the run state, continue
//! - `AdvisoryReject`: record the diagnostic as a warning, continue
//! - `FatalFailure`: record the diagnostic, halt, report the rest as skipped
//!
//! Only one run may use an executor at a time.

use carecheck_client::SchedulingClient;
use carecheck_core::domain::context::PipelineContext;
use carecheck_core::domain::run::{RunReport, RunState};
use carecheck_core::domain::step::{StepOutcome, StepReport};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, PipelineStep};
use crate::service::{Authenticator, RunJournal, StepJournal};
use crate::steps::StepEnv;

/// Executes pipelines against one scheduling service
pub struct PipelineExecutor {
    client: Arc<SchedulingClient>,
    authenticator: Arc<dyn Authenticator>,
    /// Single permit guarding the one run allowed at a time
    permit: Arc<Semaphore>,
}

impl PipelineExecutor {
    pub fn new(client: Arc<SchedulingClient>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            client,
            authenticator,
            permit: Arc::new(Semaphore::new(1)),
        }
    }

    /// Runs every step of `pipeline` against `ctx`
    ///
    /// Step failures never surface as errors; they are part of the report.
    ///
    /// # Errors
    /// [`PipelineError::RunInProgress`] if another run holds this executor.
    /// The context is left untouched in that case.
    pub async fn run(
        &self,
        pipeline: &Pipeline,
        ctx: &mut PipelineContext,
    ) -> Result<RunReport, PipelineError> {
        let _permit = self
            .permit
            .try_acquire()
            .map_err(|_| PipelineError::RunInProgress)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut journal = RunJournal::new();
        let mut reports = Vec::with_capacity(pipeline.steps().len());
        let mut state = RunState::Init;

        journal.info(
            None,
            format!(
                "Starting pipeline '{}' with {} step(s) (run {})",
                pipeline.name(),
                pipeline.steps().len(),
                run_id
            ),
        );

        for entry in pipeline.steps() {
            let label = entry.label.as_str();

            if state == RunState::Halted {
                journal.warning(Some(label), "Skipped after an earlier fatal failure");
                reports.push(StepReport::skipped(label));
                continue;
            }

            journal.info(Some(label), "Starting step");
            let started = Instant::now();
            let outcome = self.run_step(entry, ctx, &mut journal).await;
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &outcome {
                StepOutcome::Ok(summary) => {
                    state = entry.step.reached();
                    journal.info(Some(label), format!("Passed: {}", summary));
                }
                StepOutcome::AdvisoryReject(diagnostic) => {
                    state = entry.step.reached_on_advisory();
                    journal.warning(
                        Some(label),
                        format!("Advisory rejection, continuing: {}", diagnostic),
                    );
                }
                StepOutcome::FatalFailure(diagnostic) => {
                    state = RunState::Halted;
                    journal.error(Some(label), format!("Failed: {}", diagnostic));
                }
            }

            reports.push(StepReport::from_outcome(label, &outcome, duration_ms));
        }

        let report = RunReport {
            run_id,
            pipeline: pipeline.name().to_string(),
            started_at,
            finished_at: Utc::now(),
            final_state: state,
            steps: reports,
            journal: Vec::new(),
        };

        match report.halted_at() {
            Some(step) => journal.error(None, format!("Pipeline halted at '{}'", step.label)),
            None => journal.info(
                None,
                format!("Pipeline completed in state {}", report.final_state),
            ),
        }

        Ok(RunReport {
            journal: journal.into_entries(),
            ..report
        })
    }

    /// Authenticates, then executes one step
    ///
    /// Token and transport failures become fatal outcomes for this step.
    async fn run_step(
        &self,
        entry: &PipelineStep,
        ctx: &mut PipelineContext,
        journal: &mut RunJournal,
    ) -> StepOutcome {
        let token = match self.authenticator.authenticate(&self.client).await {
            Ok(token) => token,
            Err(e) => return StepOutcome::fatal("a bearer token", e.to_string()),
        };

        let env = StepEnv {
            client: &self.client,
            token: &token,
        };

        let mut journal = StepJournal::new(journal, &entry.label);
        match entry.step.execute(env, ctx, &mut journal).await {
            Ok(outcome) => outcome,
            Err(e) => StepOutcome::fatal("a response from the scheduling service", e.to_string()),
        }
    }
}
