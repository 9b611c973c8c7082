//! Loanwise - Main CLI Entry Point

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use loanwise::{
    cli::{Args, Commands, Config},
    server::{self, AppState},
    training::run_pipeline,
    types::{LoanApplication, PredictionResponse},
};

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merge file configuration with command-line overrides
fn effective_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.clone())?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = effective_config(&args)?;

    let filter = if args.verbose > 0 || args.quiet {
        args.verbosity().log_filter().to_string()
    } else {
        config.telemetry.log_filter.clone()
    };
    init_tracing(&filter);

    match args.command() {
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Commands::Train => {
            let dataset = args.require_dataset().map_err(anyhow::Error::msg)?;
            let settings = config.training.clone();
            let trained = tokio::task::spawn_blocking(move || run_pipeline(&dataset, &settings))
                .await
                .context("Training task panicked")??;
            println!(
                "Trained on {} rows ({} held out) in {}ms",
                trained.training_rows, trained.held_out_rows, trained.duration_ms
            );
            Ok(())
        }
        Commands::Predict { applicant } => {
            let dataset = args.require_dataset().map_err(anyhow::Error::msg)?;
            let applicant: LoanApplication =
                serde_json::from_str(&applicant).context("Failed to parse applicant JSON")?;
            applicant.validate()?;

            let settings = config.training.clone();
            let trained = tokio::task::spawn_blocking(move || run_pipeline(&dataset, &settings))
                .await
                .context("Training task panicked")??;
            let features = applicant.to_features();
            let response = PredictionResponse {
                loan_approval_prediction: trained.model.predict_one(&features)?,
            };
            println!("{}", serde_json::to_string(&response)?);
            info!(
                probability = trained.model.approval_probability(&features)?,
                "Approval probability"
            );
            Ok(())
        }
        Commands::Serve => {
            let dataset = args.require_dataset().map_err(anyhow::Error::msg)?;
            let state = Arc::new(AppState::new(dataset, config.training.clone()));

            // The initial model must exist before the listener accepts traffic.
            let version = state
                .retrain()
                .await
                .context("Initial training failed")?;
            info!(version = version.version, "Initial model ready");

            server::serve(state, &config.bind_addr()).await
        }
    }
}
