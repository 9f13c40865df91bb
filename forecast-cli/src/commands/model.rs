//! Model command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use forecast_client::ForecastClient;

use crate::config::Config;

/// Model subcommands
#[derive(Subcommand)]
pub enum ModelCommands {
    /// Show how many times a model has been run
    Usage {
        /// Model ID
        model_id: String,
    },
}

/// Handle model commands
pub async fn handle_model_command(command: ModelCommands, config: &Config) -> Result<()> {
    let client = ForecastClient::new(&config.api_url);

    match command {
        ModelCommands::Usage { model_id } => {
            let usage = client
                .model_usage(&model_id)
                .await
                .with_context(|| format!("Failed to get usage of model {}", model_id))?;
            println!(
                "Model {} has been used {} time(s)",
                usage.model_id.cyan(),
                usage.usage_count.to_string().bold()
            );
            Ok(())
        }
    }
}
