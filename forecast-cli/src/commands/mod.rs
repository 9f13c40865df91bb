//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod model;
mod run;

pub use job::JobCommands;
pub use model::ModelCommands;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a forecast job and wait for its results
    Run(RunArgs),
    /// Inspect or cancel an existing job
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Model usage
    Model {
        #[command(subcommand)]
        command: ModelCommands,
    },
}

/// Route a command to its handler module
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Model { command } => model::handle_model_command(command, config).await,
    }
}
