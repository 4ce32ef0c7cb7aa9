//! Step outcome and report types

use serde::{Deserialize, Serialize};

/// What a step expected and what it actually observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub expected: String,
    pub actual: String,
}

impl Diagnostic {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

/// Result of running one step, consumed by the executor's continuation policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every assertion held; carries a one-line summary for the report
    Ok(String),
    /// An advisory assertion failed; the run continues and still passes
    AdvisoryReject(Diagnostic),
    /// A fatal assertion failed; the run halts here
    FatalFailure(Diagnostic),
}

impl StepOutcome {
    pub fn fatal(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        StepOutcome::FatalFailure(Diagnostic::new(expected, actual))
    }

    pub fn advisory(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        StepOutcome::AdvisoryReject(Diagnostic::new(expected, actual))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StepOutcome::FatalFailure(_))
    }
}

/// Reported status of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Passed,
    Advisory,
    Failed,
    /// Never executed because an earlier step halted the run
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Passed => write!(f, "PASS"),
            StepStatus::Advisory => write!(f, "ADVISORY"),
            StepStatus::Failed => write!(f, "FAIL"),
            StepStatus::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// Per-step line of a run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub label: String,
    pub status: StepStatus,
    /// Summary on success, empty for skipped steps
    pub summary: Option<String>,
    /// Diagnostic for advisory and failed steps
    pub diagnostic: Option<Diagnostic>,
    pub duration_ms: u64,
}

impl StepReport {
    pub fn from_outcome(label: &str, outcome: &StepOutcome, duration_ms: u64) -> Self {
        let (status, summary, diagnostic) = match outcome {
            StepOutcome::Ok(summary) => (StepStatus::Passed, Some(summary.clone()), None),
            StepOutcome::AdvisoryReject(d) => (StepStatus::Advisory, None, Some(d.clone())),
            StepOutcome::FatalFailure(d) => (StepStatus::Failed, None, Some(d.clone())),
        };
        Self {
            label: label.to_string(),
            status,
            summary,
            diagnostic,
            duration_ms,
        }
    }

    pub fn skipped(label: &str) -> Self {
        Self {
            label: label.to_string(),
            status: StepStatus::Skipped,
            summary: None,
            diagnostic: None,
            duration_ms: 0,
        }
    }
}
