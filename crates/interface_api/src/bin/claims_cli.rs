//! Refund Claims - command-line adjudication
//!
//! Reads one claim submission as JSON, runs it through the adjudication
//! pipeline against the configured backends and prints the finalized record.
//!
//! ```bash
//! claims-cli claim.json
//! claims-cli --compact --warranty-days 30 claim.json
//! ```
//!
//! Configuration is read from the same environment variables as the API
//! server. Logs go to stderr.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use infra_inference::InferenceAdapters;
use interface_api::cli::{self, CliArgs, CliOutcome, EXIT_FAILURE};
use interface_api::config::ApiConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();
    init_tracing(&args.log_level);

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: invalid configuration: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let adapters = match InferenceAdapters::from_config(&config.inference) {
        Ok(adapters) => adapters,
        Err(e) => {
            eprintln!("error: failed to build inference adapters: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let pipeline = adapters.pipeline().with_window(args.window(&config));

    match cli::run(&pipeline, &args.submission, args.compact).await {
        Ok(outcome) => {
            match &outcome {
                CliOutcome::Adjudicated(output) => println!("{}", output),
                CliOutcome::Rejected(e) => eprintln!("rejected: {}", e),
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
