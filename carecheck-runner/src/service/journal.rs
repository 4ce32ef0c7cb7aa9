//! Run journal
//!
//! Collects the structured log of one pipeline run so the run report is
//! self-contained. Every entry is also emitted through `tracing`.

use carecheck_core::domain::log::{LogEntry, LogLevel};
use tracing::{debug, error, info, warn};

/// In-memory journal owned by a single run
#[derive(Debug, Default)]
pub struct RunJournal {
    entries: Vec<LogEntry>,
}

impl RunJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and mirrors it to `tracing`
    pub fn record(&mut self, level: LogLevel, step: Option<&str>, message: impl Into<String>) {
        let entry = LogEntry::new(level, step, message);
        let scope = entry.step.as_deref().unwrap_or("pipeline");
        match level {
            LogLevel::Debug => debug!("[{}] {}", scope, entry.message),
            LogLevel::Info => info!("[{}] {}", scope, entry.message),
            LogLevel::Warning => warn!("[{}] {}", scope, entry.message),
            LogLevel::Error => error!("[{}] {}", scope, entry.message),
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, step: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Info, step, message);
    }

    pub fn warning(&mut self, step: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Warning, step, message);
    }

    pub fn error(&mut self, step: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Error, step, message);
    }

    /// Consumes the journal, returning entries in recording order
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Journal handle lent to one running step
///
/// Entries are attributed to the step's label, so a step can leave notes in
/// the run report without knowing its position in the pipeline.
#[derive(Debug)]
pub struct StepJournal<'a> {
    journal: &'a mut RunJournal,
    label: &'a str,
}

impl<'a> StepJournal<'a> {
    pub fn new(journal: &'a mut RunJournal, label: &'a str) -> Self {
        Self { journal, label }
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.journal.record(LogLevel::Debug, Some(self.label), message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.journal.warning(Some(self.label), message);
    }
}
