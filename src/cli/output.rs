//! CLI output formatting
//!
//! Human-facing status lines go to stderr; stdout is reserved for the
//! log group markers and captured container output.

use crate::execution::RunEvent;
use console::Emoji;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a run event for display
pub fn format_run_event(event: &RunEvent) -> String {
    match event {
        RunEvent::PipelineStarted {
            run_id,
            total_steps,
            ..
        } => format!(
            "{} Starting pipeline ({}) with {} step{}",
            ROCKET,
            style(&run_id.to_string()[..8]).dim(),
            style(total_steps).cyan(),
            if *total_steps == 1 { "" } else { "s" }
        ),
        RunEvent::StepStarted { name, index } => {
            format!("{} [{}] {}", SPINNER, index + 1, style(name).cyan())
        }
        RunEvent::StepCompleted {
            name,
            index,
            duration,
        } => format!(
            "{} [{}] {} ({})",
            CHECK,
            index + 1,
            style(name).green(),
            style(format_duration(*duration)).dim()
        ),
        RunEvent::StepFailed { name, index, error } => {
            format!(
                "{} [{}] {}: {}",
                CROSS,
                index + 1,
                style(name).red(),
                style(error).dim()
            )
        }
        RunEvent::PipelineCompleted { run_id, success } => {
            let status = if *success {
                format!("{}", style("succeeded").green())
            } else {
                format!("{}", style("failed").red())
            };
            format!(
                "{} Pipeline ({}) {}",
                INFO,
                style(&run_id.to_string()[..8]).dim(),
                status
            )
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 1 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
