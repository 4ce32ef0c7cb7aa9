//! Prebuilt pipelines

use carecheck_core::domain::entity::EntityRef;
use carecheck_core::domain::slot::SlotWindow;
use chrono::Utc;
use std::str::FromStr;

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::service::PersonName;
use crate::steps::{
    CommitBookingStep, CreateEntityStep, DiscoverSlotsStep, LoginStep, PLACEHOLDER_PATIENT_ID,
    PLACEHOLDER_PROVIDER_ID, ResolveStep, SetAvailabilityStep,
};

/// Inputs shared by the prebuilt pipelines
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Sent with availability, patient and booking requests
    pub timezone: String,
    pub slot_window: SlotWindow,
    pub placeholder_provider: EntityRef,
    pub placeholder_patient: EntityRef,
    /// Fixed provider name; random when absent
    pub provider_name: Option<PersonName>,
    /// Fixed patient name; random when absent
    pub patient_name: Option<PersonName>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timezone: "IST".to_string(),
            slot_window: SlotWindow::day_after(Utc::now()),
            placeholder_provider: EntityRef::new(PLACEHOLDER_PROVIDER_ID),
            placeholder_patient: EntityRef::new(PLACEHOLDER_PATIENT_ID),
            provider_name: None,
            patient_name: None,
        }
    }
}

/// Which prebuilt pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunVariant {
    /// All eight steps from login to booking
    Standard,
    /// Login, then a booking against placeholder references
    CommitOnly,
}

impl RunVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunVariant::Standard => "standard",
            RunVariant::CommitOnly => "commit-only",
        }
    }

    pub fn build(&self, opts: &PipelineOptions) -> Result<Pipeline, PipelineError> {
        match self {
            RunVariant::Standard => Pipeline::standard(opts),
            RunVariant::CommitOnly => Pipeline::commit_only(opts),
        }
    }
}

impl FromStr for RunVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "standard" => Ok(RunVariant::Standard),
            "commit-only" => Ok(RunVariant::CommitOnly),
            other => Err(format!(
                "unknown pipeline '{}', expected 'standard' or 'commit-only'",
                other
            )),
        }
    }
}

impl std::fmt::Display for RunVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Pipeline {
    /// Login, provider setup, patient setup, slot discovery and booking
    pub fn standard(opts: &PipelineOptions) -> Result<Pipeline, PipelineError> {
        Pipeline::builder(RunVariant::Standard.as_str())
            .step(LoginStep::new())
            .step(CreateEntityStep::provider(opts.provider_name.clone()))
            .step(ResolveStep::provider())
            .step(SetAvailabilityStep::new(opts.timezone.clone()))
            .step(CreateEntityStep::patient(
                opts.patient_name.clone(),
                opts.timezone.clone(),
            ))
            .step(ResolveStep::patient())
            .step(DiscoverSlotsStep::new(opts.slot_window))
            .step(CommitBookingStep::resolved(opts.timezone.clone()))
            .build()
    }

    /// Exercises the booking path without creating any entity
    pub fn commit_only(opts: &PipelineOptions) -> Result<Pipeline, PipelineError> {
        Pipeline::builder(RunVariant::CommitOnly.as_str())
            .step(LoginStep::new())
            .step(CommitBookingStep::with_placeholders(
                opts.placeholder_provider.clone(),
                opts.placeholder_patient.clone(),
                opts.timezone.clone(),
            ))
            .build()
    }
}
