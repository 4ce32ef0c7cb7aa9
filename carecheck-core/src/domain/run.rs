//! Pipeline run state and report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::log::LogEntry;
use crate::domain::step::{StepReport, StepStatus};

/// Progress of a pipeline run
///
/// A run moves forward one state per successful step. `Halted` and the two
/// commit outcomes are terminal.
///
/// There is no in-between "commit attempted" state: the booking request and
/// its classification happen inside one step, so a run goes from
/// `SlotsDiscovered` straight to `CommitSucceeded`, `CommitAdvisoryRejected`
/// or `Halted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Init,
    Authenticated,
    ProviderCreated,
    ProviderResolved,
    AvailabilitySet,
    PatientCreated,
    PatientResolved,
    SlotsDiscovered,
    CommitSucceeded,
    CommitAdvisoryRejected,
    Halted,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunState::Init => "INIT",
            RunState::Authenticated => "AUTHENTICATED",
            RunState::ProviderCreated => "PROVIDER_CREATED",
            RunState::ProviderResolved => "PROVIDER_RESOLVED",
            RunState::AvailabilitySet => "AVAILABILITY_SET",
            RunState::PatientCreated => "PATIENT_CREATED",
            RunState::PatientResolved => "PATIENT_RESOLVED",
            RunState::SlotsDiscovered => "SLOTS_DISCOVERED",
            RunState::CommitSucceeded => "COMMIT_SUCCEEDED",
            RunState::CommitAdvisoryRejected => "COMMIT_ADVISORY_REJECTED",
            RunState::Halted => "HALTED",
        };
        write!(f, "{}", name)
    }
}

/// Report of a complete pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub pipeline: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub final_state: RunState,
    pub steps: Vec<StepReport>,
    pub journal: Vec<LogEntry>,
}

impl RunReport {
    /// A run fails only when some step hit a fatal condition
    pub fn passed(&self) -> bool {
        !self.steps.iter().any(|s| s.status == StepStatus::Failed)
    }

    /// The step that halted the run, if any
    pub fn halted_at(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    pub fn step(&self, label: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.label == label)
    }
}
