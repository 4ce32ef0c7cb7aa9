//! Terminal rendering of run reports

use carecheck_core::domain::log::{LogEntry, LogLevel};
use carecheck_core::domain::run::{RunReport, RunState};
use carecheck_core::domain::step::{StepReport, StepStatus};
use colored::*;

/// Print one line per step followed by the run outcome
pub fn print_report(report: &RunReport) {
    println!(
        "{}",
        format!("Pipeline '{}' (run {})", report.pipeline, report.run_id).bold()
    );
    println!("{}", "─".repeat(80).dimmed());
    for step in &report.steps {
        print_step(step);
    }
    println!("{}", "─".repeat(80).dimmed());

    println!(
        "  {} passed, {} advisory, {} failed, {} skipped",
        report.count(StepStatus::Passed).to_string().green(),
        report.count(StepStatus::Advisory).to_string().yellow(),
        report.count(StepStatus::Failed).to_string().red(),
        report.count(StepStatus::Skipped).to_string().dimmed()
    );
    println!("  Final state: {}", colorize_state(report.final_state));
    let duration = report
        .finished_at
        .signed_duration_since(report.started_at)
        .num_milliseconds();
    println!("  Duration:    {}ms", duration);
    println!(
        "  Result:      {}",
        if report.passed() {
            "✓ PASSED".green()
        } else {
            "✗ FAILED".red()
        }
    );
}

fn print_step(step: &StepReport) {
    println!(
        "  {:<10} {} {}",
        colorize_status(step.status),
        step.label,
        format!("({}ms)", step.duration_ms).dimmed()
    );
    if let Some(summary) = &step.summary {
        println!("             {}", summary.dimmed());
    }
    if let Some(diagnostic) = &step.diagnostic {
        let line = diagnostic.to_string();
        match step.status {
            StepStatus::Failed => println!("             {}", line.red()),
            _ => println!("             {}", line.yellow()),
        }
    }
}

/// Print the run journal
pub fn print_journal(entries: &[LogEntry]) {
    println!("{}", "Journal:".bold());
    for entry in entries {
        print_log_entry(entry);
    }
}

fn print_log_entry(log: &LogEntry) {
    let level_str = log.level.to_string();
    let level_colored = match log.level {
        LogLevel::Debug => level_str.dimmed(),
        LogLevel::Info => level_str.cyan(),
        LogLevel::Warning => level_str.yellow(),
        LogLevel::Error => level_str.red(),
    };

    println!(
        "{} [{}] {}{}",
        log.timestamp.format("%H:%M:%S").to_string().dimmed(),
        level_colored,
        log.step
            .as_deref()
            .map(|s| format!("{}: ", s))
            .unwrap_or_default(),
        log.message
    );
}

fn colorize_status(status: StepStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        StepStatus::Passed => status_str.green(),
        StepStatus::Advisory => status_str.yellow(),
        StepStatus::Failed => status_str.red(),
        StepStatus::Skipped => status_str.dimmed(),
    }
}

fn colorize_state(state: RunState) -> ColoredString {
    let state_str = state.to_string();
    match state {
        RunState::CommitSucceeded => state_str.green(),
        RunState::CommitAdvisoryRejected => state_str.yellow(),
        RunState::Halted => state_str.red(),
        _ => state_str.cyan(),
    }
}
