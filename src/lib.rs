//! Courier Ops: data access and view-state core for a courier operations
//! dashboard.
//!
//! The crate provides:
//! - Asynchronous resource services for orders, drivers, route tasks,
//!   vehicles, analytics and settings, each backed by an in-memory collection
//!   seeded from JSON fixtures
//! - A simulated network delay on every service call, injectable so tests run
//!   instantly and deterministically
//! - Page view-state holders that load through the services, guard against
//!   stale results, and derive filtered lists, groupings and summaries

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← Prints the dashboard
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Page Layer (app/)                                  │  ← View state
//! │  - Loadable / LoadSlot / Notices                    │
//! │  - Dashboard, orders, fleet, routes, analytics,     │
//! │    tracking, settings, booking wizard               │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Services (services/)      │   │ View models (ui/)         │
//! │ - Repository trait        │   │ - Empty states, cards     │
//! │ - Per-resource services   │   │ - Search and counting     │
//! └───────────────────────────┘   └───────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/)                                 │
//! │  - Store trait, in-memory store, fixtures, latency  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain                            │
//! │  - Clock, id generator, paths (infrastructure/)     │
//! │  - Entities, patches, pricing, errors (domain/)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: page view state and notices
//! - [`domain`]: entities, typed patches, pricing, errors
//! - [`infrastructure`]: clock, identifiers, path expansion
//! - [`observability`]: tracing subscriber setup
//! - [`services`]: asynchronous resource services
//! - [`storage`]: record stores, fixtures and simulated latency
//! - [`ui`]: display-ready view models and search helpers
//!
//! # Configuration
//!
//! ```toml
//! log_level = "debug"
//! log_file = "~/.local/state/courier-ops/courier.log"
//! fixtures_dir = "~/courier/fixtures"
//!
//! [latency]
//! mode = "simulated"   # simulated | none | fixed
//! scale = 0.5
//! fixed_ms = 100
//! ```
//!
//! # Example
//!
//! ```
//! use courier_ops::{initialize, Config, LatencyMode, Repository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> courier_ops::Result<()> {
//! let mut config = Config::default();
//! config.latency.mode = LatencyMode::None;
//!
//! let services = initialize(&config)?;
//! let orders = services.orders.list().await?;
//! assert!(!orders.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod services;
pub mod storage;
pub mod ui;

pub use domain::{CourierError, Result};
pub use services::{Repository, ServiceContext, Services};
pub use storage::Fixtures;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use infrastructure::{expand_tilde, SystemClock};
use storage::{FixedLatency, Latency, NetworkLatency, NoLatency};

/// How service calls are delayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyMode {
    /// Per-call baseline delays, scaled by [`LatencyConfig::scale`].
    #[default]
    Simulated,
    /// Resolve immediately.
    None,
    /// [`LatencyConfig::fixed_ms`] for every call.
    Fixed,
}

impl LatencyMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" => Some(Self::Simulated),
            "none" | "off" => Some(Self::None),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub mode: LatencyMode,

    /// Multiplier for simulated delays. Default: `1.0`
    pub scale: f64,

    /// Delay used in `fixed` mode. Default: `0`
    pub fixed_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            mode: LatencyMode::Simulated,
            scale: 1.0,
            fixed_ms: 0,
        }
    }
}

/// Runtime configuration.
///
/// Read from TOML with [`Config::from_file`]; string overrides (for example
/// from environment variables) are layered on with [`Config::with_overrides`].
/// Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive, e.g. `info` or `courier_ops=debug`.
    ///
    /// `RUST_LOG` takes precedence. Default: `"info"`
    pub log_level: Option<String>,

    /// Append log lines to this file instead of stderr. `~` is expanded.
    pub log_file: Option<String>,

    /// Directory of JSON fixtures replacing the bundled set. `~` is expanded.
    pub fixtures_dir: Option<String>,

    pub latency: LatencyConfig,
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Io`] if the file cannot be read and
    /// [`CourierError::Config`] if it is not valid configuration TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("load_config", path = ?path).entered();

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| CourierError::Config(format!("{}: {e}", path.display())))
    }

    /// Builds a configuration from string pairs on top of the defaults.
    ///
    /// See [`Config::with_overrides`] for the recognized keys.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use courier_ops::{Config, LatencyMode};
    ///
    /// let mut pairs = BTreeMap::new();
    /// pairs.insert("latency_mode".to_string(), "fixed".to_string());
    /// pairs.insert("latency_fixed_ms".to_string(), "25".to_string());
    ///
    /// let config = Config::from_pairs(&pairs);
    /// assert_eq!(config.latency.mode, LatencyMode::Fixed);
    /// assert_eq!(config.latency.fixed_ms, 25);
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(pairs)
    }

    /// Applies string overrides.
    ///
    /// # Keys
    ///
    /// - `log_level`, `log_file`, `fixtures_dir`: taken as is (empty values ignored)
    /// - `latency_mode`: `simulated`, `none` or `fixed`
    /// - `latency_scale`: float
    /// - `latency_fixed_ms`: integer milliseconds
    ///
    /// Values that do not parse are logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, pairs: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            pairs
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        if let Some(level) = text("log_level") {
            self.log_level = Some(level);
        }
        if let Some(file) = text("log_file") {
            self.log_file = Some(file);
        }
        if let Some(dir) = text("fixtures_dir") {
            self.fixtures_dir = Some(dir);
        }

        if let Some(mode) = text("latency_mode") {
            match LatencyMode::parse(&mode) {
                Some(mode) => self.latency.mode = mode,
                None => tracing::debug!(value = %mode, "ignoring unknown latency mode"),
            }
        }
        if let Some(scale) = text("latency_scale") {
            match scale.parse::<f64>() {
                Ok(scale) => self.latency.scale = scale,
                Err(e) => tracing::debug!(value = %scale, error = %e, "ignoring latency scale"),
            }
        }
        if let Some(ms) = text("latency_fixed_ms") {
            match ms.parse::<u64>() {
                Ok(ms) => self.latency.fixed_ms = ms,
                Err(e) => tracing::debug!(value = %ms, error = %e, "ignoring fixed latency"),
            }
        }

        self
    }

    /// The latency strategy selected by `[latency]`.
    #[must_use]
    pub fn latency(&self) -> Arc<dyn Latency> {
        match self.latency.mode {
            LatencyMode::Simulated => Arc::new(NetworkLatency::scaled(self.latency.scale)),
            LatencyMode::None => Arc::new(NoLatency),
            LatencyMode::Fixed => {
                Arc::new(FixedLatency(Duration::from_millis(self.latency.fixed_ms)))
            }
        }
    }

    /// Loads the configured fixture directory, or the bundled set.
    ///
    /// # Errors
    ///
    /// Propagates fixture read and parse errors.
    pub fn fixtures(&self) -> Result<Fixtures> {
        match &self.fixtures_dir {
            Some(dir) => Fixtures::from_dir(&expand_tilde(dir)),
            None => Fixtures::bundled(),
        }
    }
}

/// Builds the services described by `config`.
///
/// Loads fixtures, selects the latency strategy and wires every service to a
/// wall clock. Tracing is not initialized here; call
/// [`observability::init_tracing`] first if log output is wanted.
///
/// # Errors
///
/// Returns an error if the fixtures cannot be loaded.
pub fn initialize(config: &Config) -> Result<Services> {
    let _span = tracing::debug_span!("initialize").entered();
    tracing::debug!(
        fixtures_dir = ?config.fixtures_dir,
        latency = ?config.latency.mode,
        "initializing courier ops"
    );

    let fixtures = config.fixtures()?;
    let ctx = ServiceContext::new(config.latency(), Arc::new(SystemClock));
    Ok(Services::from_fixtures(fixtures, &ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_simulate_baseline_latency() {
        let config = Config::default();
        assert_eq!(config.latency.mode, LatencyMode::Simulated);
        assert_eq!(
            config.latency().delay_for(Duration::from_millis(300)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn toml_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courier.toml");
        std::fs::write(
            &path,
            "log_level = \"debug\"\n\n[latency]\nmode = \"fixed\"\nfixed_ms = 40\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.latency.mode, LatencyMode::Fixed);
        assert_eq!(config.latency.scale, 1.0);
        assert_eq!(
            config.latency().delay_for(Duration::from_secs(5)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courier.toml");
        std::fs::write(&path, "[latency]\nmode = \"warp\"\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(CourierError::Config(_))));
    }

    #[test]
    fn overrides_ignore_unparseable_values() {
        let config = Config::from_pairs(&pairs(&[
            ("latency_mode", "none"),
            ("latency_scale", "fast"),
            ("log_level", "  "),
            ("fixtures_dir", "/srv/fixtures"),
        ]));

        assert_eq!(config.latency.mode, LatencyMode::None);
        assert_eq!(config.latency.scale, 1.0);
        assert_eq!(config.log_level, None);
        assert_eq!(config.fixtures_dir.as_deref(), Some("/srv/fixtures"));
    }

    #[test]
    fn initialize_reads_fixture_directory() {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in [
            ("orders.json", "[]"),
            ("drivers.json", "[]"),
            ("tasks.json", "[]"),
            ("vehicles.json", "[]"),
            ("saved_addresses.json", "[]"),
            (
                "analytics.json",
                include_str!("../fixtures/analytics.json"),
            ),
            (
                "notification_preferences.json",
                include_str!("../fixtures/notification_preferences.json"),
            ),
        ] {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }

        let config = Config {
            fixtures_dir: Some(dir.path().display().to_string()),
            ..Config::default()
        };
        let fixtures = config.fixtures().unwrap();
        assert!(fixtures.orders.is_empty());
        assert!(initialize(&config).is_ok());
    }

    #[test]
    fn missing_fixture_directory_fails() {
        let config = Config {
            fixtures_dir: Some("/nonexistent/courier-fixtures".to_string()),
            ..Config::default()
        };
        assert!(matches!(initialize(&config), Err(CourierError::Io(_))));
    }
}
