//! Command-line adjudication
//!
//! Backs the `claims-cli` binary: argument parsing, the single-claim run and
//! the exit-code contract. The binary only wires configuration and adapters.

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use core_kernel::WarrantyWindow;
use domain_claims::{AdjudicationPipeline, ClaimError, ClaimSubmission};

use crate::config::ApiConfig;
use crate::dto::claims::ClaimRecordResponse;

/// Exit code for a successfully adjudicated claim
pub const EXIT_OK: u8 = 0;
/// Exit code for I/O, configuration and rendering failures
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for a submission that is not a valid claim
pub const EXIT_MALFORMED: u8 = 2;

/// Adjudicate a refund claim from a JSON file
#[derive(Debug, Parser)]
#[command(name = "claims-cli", version, about)]
pub struct CliArgs {
    /// Path to the claim submission JSON
    pub submission: PathBuf,

    /// Print the record on a single line
    #[arg(long)]
    pub compact: bool,

    /// Override the warranty window in days
    #[arg(long, env = "API_WARRANTY_DAYS")]
    pub warranty_days: Option<u32>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl CliArgs {
    /// The window from `--warranty-days`, else the configured one
    pub fn window(&self, config: &ApiConfig) -> WarrantyWindow {
        self.warranty_days
            .map(WarrantyWindow::new)
            .unwrap_or_else(|| config.warranty_window())
    }
}

/// Failures that stop the CLI before a claim is adjudicated
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a claim submission: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot render claim record: {0}")]
    Render(#[source] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Decode { .. } => EXIT_MALFORMED,
            CliError::Read { .. } | CliError::Render(_) => EXIT_FAILURE,
        }
    }
}

/// Result of a CLI run that read a submission
#[derive(Debug)]
pub enum CliOutcome {
    /// The rendered claim record, ready for stdout
    Adjudicated(String),
    /// The submission failed validation
    Rejected(ClaimError),
}

impl CliOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliOutcome::Adjudicated(_) => EXIT_OK,
            CliOutcome::Rejected(_) => EXIT_MALFORMED,
        }
    }
}

/// Reads one submission from `path` and adjudicates it
pub async fn run(
    pipeline: &AdjudicationPipeline,
    path: &Path,
    compact: bool,
) -> Result<CliOutcome, CliError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let submission: ClaimSubmission =
        serde_json::from_str(&raw).map_err(|source| CliError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let claim = match pipeline.adjudicate(submission).await {
        Ok(claim) => claim,
        Err(e) => return Ok(CliOutcome::Rejected(e)),
    };

    let response = ClaimRecordResponse::from(&claim);
    let output = if compact {
        serde_json::to_string(&response)
    } else {
        serde_json::to_string_pretty(&response)
    }
    .map_err(CliError::Render)?;

    Ok(CliOutcome::Adjudicated(output))
}
