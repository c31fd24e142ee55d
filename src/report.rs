use anyhow::Result;
use colored::Colorize;

use crate::runner::state::{ScenarioReport, ScenarioStatus};

/// Print the human-readable summary block for a finished run
pub fn print_summary(report: &ScenarioReport) {
    let status = match report.status {
        ScenarioStatus::Passed => "PASSED".green().bold(),
        ScenarioStatus::Failed => "FAILED".red().bold(),
    };

    println!("\n{} Run summary", "■".blue().bold());
    println!("  Result: {}", status);
    println!("  Details: {}", report.message);
    println!("  Total time: {}", report.total_display());
    println!("  Loading wait: {}", report.wait_display());
    println!("  Started: {}", report.started_at);
    println!("  Finished: {}", report.finished_at);
}

/// Print the result record as pretty JSON on stdout
pub fn print_json(report: &ScenarioReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
