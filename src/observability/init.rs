//! Tracing subscriber setup.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::error::{CourierError, Result};
use crate::infrastructure::expand_tilde;
use crate::Config;

const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Builds an [`EnvFilter`] from `RUST_LOG`, falling back to
/// `config.log_level` and then `"info"`, and a `fmt` layer writing to stderr
/// or to `config.log_file`. Parent directories of the log file are created.
///
/// Calling this again after a subscriber is installed leaves the first one in
/// place and returns `Ok(())`.
///
/// # Errors
///
/// Returns [`CourierError::Config`] if the configured level is not a valid
/// filter directive and [`CourierError::Io`] if the log file cannot be opened.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = build_filter(config.log_level.as_deref())?;

    let (stderr_layer, file_layer) = match &config.log_file {
        Some(path) => {
            let file = open_log_file(&expand_tilde(path))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => (Some(fmt::layer().with_writer(std::io::stderr)), None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match installed {
        Ok(()) => tracing::debug!(log_file = ?config.log_file, "tracing initialized"),
        Err(e) => tracing::debug!(error = %e, "tracing subscriber already installed"),
    }
    Ok(())
}

fn build_filter(configured: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = configured.unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level)
        .map_err(|e| CourierError::Config(format!("invalid log level '{level}': {e}")))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
