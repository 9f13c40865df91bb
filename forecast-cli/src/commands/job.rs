//! Job command handlers
//!
//! Single-request commands against an existing job.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use forecast_client::ForecastClient;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::Config;
use crate::output::{colorize_status, print_job_details, write_json};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Show the current state of a job
    Status {
        /// Job ID
        id: Uuid,
    },
    /// Fetch the results of a completed job
    Results {
        /// Job ID
        id: Uuid,

        /// Write the results to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Cancel a running job
    Cancel {
        /// Job ID
        id: Uuid,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = ForecastClient::new(&config.api_url);

    match command {
        JobCommands::Status { id } => {
            let job = client
                .get_job(id)
                .await
                .with_context(|| format!("Failed to get job {}", id))?;
            print_job_details(&job);
            Ok(())
        }
        JobCommands::Results { id, output } => {
            let results = client
                .get_job_results(id)
                .await
                .with_context(|| format!("Failed to get results of job {}", id))?;
            write_json(&results, output.as_deref())
        }
        JobCommands::Cancel { id } => {
            let job = client
                .cancel_job(id)
                .await
                .with_context(|| format!("Failed to cancel job {}", id))?;
            println!(
                "{} Job {} is now {}",
                "✓".green(),
                job.id.to_string().cyan(),
                colorize_status(&job.status)
            );
            Ok(())
        }
    }
}
