//! Command-line entry point.
//!
//! Loads configuration, initializes tracing, loads the dashboard and prints
//! its summary as JSON on stdout.
//!
//! # Usage
//!
//! ```text
//! courier-ops [CONFIG.toml]
//! ```
//!
//! # Environment
//!
//! Variables prefixed with `COURIER_OPS_` override the file, using the
//! lowercased remainder as the key:
//!
//! - `COURIER_OPS_LOG_LEVEL`, `COURIER_OPS_LOG_FILE`, `COURIER_OPS_FIXTURES_DIR`
//! - `COURIER_OPS_LATENCY_MODE`, `COURIER_OPS_LATENCY_SCALE`,
//!   `COURIER_OPS_LATENCY_FIXED_MS`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use courier_ops::app::pages::dashboard::fetch_summary;
use courier_ops::{initialize, observability, Config, CourierError};
use tracing::Instrument;

const ENV_PREFIX: &str = "COURIER_OPS_";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "courier-ops failed");
            eprintln!("courier-ops: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CourierError> {
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    observability::init_tracing(&config)?;

    let services = initialize(&config)?;
    let summary = fetch_summary(&services)
        .instrument(tracing::info_span!("dashboard_summary"))
        .await?;
    tracing::info!(
        recent_orders = summary.recent_orders.len(),
        "dashboard summary loaded"
    );

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| CourierError::Storage(format!("failed to encode summary: {e}")))?;
    println!("{json}");
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, CourierError> {
    let base = match path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    Ok(base.with_overrides(&env_overrides()))
}

fn env_overrides() -> BTreeMap<String, String> {
    std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|rest| (rest.to_ascii_lowercase(), value))
        })
        .collect()
}
