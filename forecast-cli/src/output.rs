//! Terminal output helpers

use anyhow::{Context, Result};
use colored::*;
use forecast_core::domain::job::{ForecastJob, JobStatus};
use forecast_runner::{RunPhase, RunState};
use std::path::Path;

/// Print detailed job information
pub fn print_job_details(job: &ForecastJob) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.to_string().cyan());
    println!("  Model:     {}", job.model_id);
    println!("  Targets:   {}", job.target_ids.join(", "));
    if let Some(scenario) = &job.scenario {
        println!("  Scenario:  {}", scenario);
    }
    println!("  Status:    {}", colorize_status(&job.status));
    println!("  Progress:  {:.0}%", job.progress_percent());
    if let Some(eta) = job.estimated_time_remaining {
        if !job.is_terminal() {
            println!("  Remaining: ~{}s", eta);
        }
    }
    println!(
        "  Created:   {}",
        job.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    println!(
        "  Updated:   {}",
        job.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );

    if !job.parameters.is_empty() {
        println!("\n{}", "Parameters:".bold());
        for (key, value) in &job.parameters {
            println!("  {} = {}", key.cyan(), value);
        }
    }

    if let Some(error) = &job.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// One progress line for a run
pub fn format_progress(state: &RunState) -> String {
    let mut line = format!("  {} {}", "▸".cyan(), state.phase);

    if let Some(job) = &state.job {
        line.push_str(&format!(
            "  {}  {:>3.0}%",
            colorize_status(&job.status),
            job.progress_percent()
        ));
        if let Some(eta) = job.estimated_time_remaining {
            if !job.is_terminal() {
                line.push_str(&format!("  ~{}s remaining", eta).dimmed().to_string());
            }
        }
    }

    line
}

/// Key used to avoid printing the same progress line twice
pub fn progress_key(state: &RunState) -> (RunPhase, Option<JobStatus>, u32) {
    let status = state.job.as_ref().map(|j| j.status);
    (state.phase, status, state.progress().round() as u32)
}

/// Write a JSON document to a file, or pretty-print it to stdout
pub fn write_json(value: &serde_json::Value, output: Option<&Path>) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize results")?;

    match output {
        Some(path) => {
            std::fs::write(path, pretty)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            println!(
                "{} Results written to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", pretty),
    }

    Ok(())
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> colored::ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Cancelled => status_str.dimmed(),
    }
}

/// Parse a `key=value` job parameter
///
/// The value is read as JSON when it parses, otherwise kept as a string.
pub fn parse_param(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name missing in '{}'", raw));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    Ok((key.to_string(), value))
}
