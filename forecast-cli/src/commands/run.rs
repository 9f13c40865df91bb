//! Run command handler
//!
//! Submits a forecast job, shows its progress while polling, and prints or
//! saves the results. Ctrl-C tears the run down.

use anyhow::Result;
use clap::Args;
use colored::*;
use forecast_client::ForecastClient;
use forecast_core::dto::job::CreateForecastJob;
use forecast_runner::{ForecastJobRunner, RunnerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::output::{format_progress, parse_param, progress_key, write_json};

/// Arguments of `forecast run`
#[derive(Args)]
pub struct RunArgs {
    /// Model to run
    #[arg(long)]
    model: String,

    /// Target entity id (repeatable)
    #[arg(long = "target", required = true)]
    targets: Vec<String>,

    /// Scenario name
    #[arg(long)]
    scenario: Option<String>,

    /// Job parameter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, serde_json::Value)>,

    /// Status polling interval in milliseconds
    #[arg(long, env = "FORECAST_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Give up after this many seconds without a terminal status
    #[arg(long, env = "FORECAST_TIMEOUT_SECS", default_value_t = 300)]
    timeout_secs: u64,

    /// Write the results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn runner_config(&self) -> Result<RunnerConfig> {
        let config = RunnerConfig::default()
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.validate()?;
        Ok(config)
    }

    fn request(&self) -> CreateForecastJob {
        let mut req = CreateForecastJob::new(self.model.clone(), self.targets.clone());
        if let Some(scenario) = &self.scenario {
            req = req.with_scenario(scenario.clone());
        }
        for (key, value) in &self.params {
            req = req.with_parameter(key.clone(), value.clone());
        }
        req
    }
}

/// Handle `forecast run`
pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let runner_config = args.runner_config()?;
    let client = ForecastClient::new(&config.api_url);
    let runner = ForecastJobRunner::new(Arc::new(client), runner_config);

    println!(
        "{}",
        format!(
            "Running model {} on {} target(s)...",
            args.model,
            args.targets.len()
        )
        .bold()
    );

    let handle = runner.spawn(args.request());
    let mut rx = handle.subscribe();
    let mut last_key = None;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                let key = progress_key(&state);
                if last_key != Some(key) {
                    println!("{}", format_progress(&state));
                    last_key = Some(key);
                }
                if state.phase.is_finished() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Interrupted, stopping run".yellow());
                handle.cancel();
                break;
            }
        }
    }

    match handle.wait().await {
        Ok(run) => {
            println!(
                "{} Job {} completed",
                "✓".green(),
                run.job.id.to_string().cyan()
            );
            write_json(&run.results.payload, args.output.as_deref())
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RunArgs,
    }

    #[test]
    fn test_request_from_args() {
        let cli = TestCli::try_parse_from([
            "forecast",
            "--model",
            "arima",
            "--target",
            "tech-1",
            "--target",
            "tech-2",
            "--scenario",
            "baseline",
            "--param",
            "horizon=6",
            "--poll-interval-ms",
            "1000",
            "--timeout-secs",
            "300",
        ])
        .unwrap();

        let req = cli.args.request();
        assert_eq!(req.model_id, "arima");
        assert_eq!(req.target_ids, vec!["tech-1", "tech-2"]);
        assert_eq!(req.scenario.as_deref(), Some("baseline"));
        assert_eq!(req.parameters["horizon"], 6);

        let config = cli.args.runner_config().unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_target_is_required() {
        assert!(TestCli::try_parse_from(["forecast", "--model", "arima"]).is_err());
    }

    #[test]
    fn test_invalid_timing_is_rejected() {
        let cli = TestCli::try_parse_from([
            "forecast",
            "--model",
            "arima",
            "--target",
            "tech-1",
            "--poll-interval-ms",
            "0",
        ])
        .unwrap();

        assert!(cli.args.runner_config().is_err());
    }
}
