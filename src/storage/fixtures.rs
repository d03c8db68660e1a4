//! Fixture loading.
//!
//! Every resource collection is seeded from a JSON fixture. The default set is
//! compiled into the binary; a directory with the same file names can replace
//! it at startup (`fixtures_dir` in the configuration). Fixtures are read
//! once and never re-read.
//!
//! # File Layout
//!
//! ```text
//! fixtures/
//! ├── orders.json                     [Order, ...]
//! ├── drivers.json                    [Driver, ...]
//! ├── tasks.json                      [Task, ...]
//! ├── vehicles.json                   [Vehicle, ...]
//! ├── analytics.json                  AnalyticsReport
//! ├── notification_preferences.json   [NotificationPreferences]
//! └── saved_addresses.json            [Address, ...]
//! ```
//!
//! Notification preferences are stored as a one-element array; only the first
//! element is used.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::domain::error::{CourierError, Result};
use crate::domain::{
    Address, AnalyticsReport, Driver, NotificationPreferences, Order, Task, Vehicle,
};

const ORDERS: &str = "orders.json";
const DRIVERS: &str = "drivers.json";
const TASKS: &str = "tasks.json";
const VEHICLES: &str = "vehicles.json";
const ANALYTICS: &str = "analytics.json";
const PREFERENCES: &str = "notification_preferences.json";
const ADDRESSES: &str = "saved_addresses.json";

/// Seed data for every resource.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub orders: Vec<Order>,
    pub drivers: Vec<Driver>,
    pub tasks: Vec<Task>,
    pub vehicles: Vec<Vehicle>,
    pub analytics: AnalyticsReport,
    pub preferences: NotificationPreferences,
    pub addresses: Vec<Address>,
}

impl Fixtures {
    /// Parses the fixture set compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Fixture`] if a bundled file does not match the
    /// record types.
    pub fn bundled() -> Result<Self> {
        let _span = tracing::debug_span!("load_bundled_fixtures").entered();

        let fixtures = Self {
            orders: parse(ORDERS, include_str!("../../fixtures/orders.json"))?,
            drivers: parse(DRIVERS, include_str!("../../fixtures/drivers.json"))?,
            tasks: parse(TASKS, include_str!("../../fixtures/tasks.json"))?,
            vehicles: parse(VEHICLES, include_str!("../../fixtures/vehicles.json"))?,
            analytics: parse(ANALYTICS, include_str!("../../fixtures/analytics.json"))?,
            preferences: first_preferences(parse(
                PREFERENCES,
                include_str!("../../fixtures/notification_preferences.json"),
            )?),
            addresses: parse(ADDRESSES, include_str!("../../fixtures/saved_addresses.json"))?,
        };

        fixtures.log_counts();
        Ok(fixtures)
    }

    /// Reads a fixture set from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Io`] if a file cannot be read and
    /// [`CourierError::Fixture`] if it does not parse.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("load_fixture_dir", dir = ?dir).entered();

        let read = |name: &str| -> Result<String> {
            let path = dir.join(name);
            tracing::trace!(path = ?path, "reading fixture");
            Ok(std::fs::read_to_string(path)?)
        };

        let fixtures = Self {
            orders: parse(ORDERS, &read(ORDERS)?)?,
            drivers: parse(DRIVERS, &read(DRIVERS)?)?,
            tasks: parse(TASKS, &read(TASKS)?)?,
            vehicles: parse(VEHICLES, &read(VEHICLES)?)?,
            analytics: parse(ANALYTICS, &read(ANALYTICS)?)?,
            preferences: first_preferences(parse(PREFERENCES, &read(PREFERENCES)?)?),
            addresses: parse(ADDRESSES, &read(ADDRESSES)?)?,
        };

        fixtures.log_counts();
        Ok(fixtures)
    }

    fn log_counts(&self) {
        tracing::debug!(
            orders = self.orders.len(),
            drivers = self.drivers.len(),
            tasks = self.tasks.len(),
            vehicles = self.vehicles.len(),
            addresses = self.addresses.len(),
            "fixtures loaded"
        );
    }
}

fn parse<T: DeserializeOwned>(name: &str, contents: &str) -> Result<T> {
    serde_json::from_str(contents)
        .map_err(|e| CourierError::Fixture(format!("failed to parse {name}: {e}")))
}

fn first_preferences(records: Vec<NotificationPreferences>) -> NotificationPreferences {
    records.into_iter().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().unwrap();
        assert!(!fixtures.orders.is_empty());
        assert!(!fixtures.drivers.is_empty());
        assert!(!fixtures.tasks.is_empty());
        assert!(!fixtures.vehicles.is_empty());
        assert_eq!(fixtures.addresses.iter().filter(|a| a.is_default).count(), 1);
        assert!(!fixtures.analytics.driver_performance.is_empty());
    }

    #[test]
    fn bundled_fixtures_have_unique_ids() {
        let fixtures = Fixtures::bundled().unwrap();
        let mut ids: Vec<_> = fixtures.orders.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), fixtures.orders.len());
    }

    #[test]
    fn directory_fixtures_replace_bundled_ones() {
        let dir = tempfile::tempdir().unwrap();
        for name in [ORDERS, DRIVERS, TASKS, VEHICLES, ADDRESSES] {
            fs::write(dir.path().join(name), "[]").unwrap();
        }
        fs::write(dir.path().join(PREFERENCES), "[]").unwrap();
        fs::write(
            dir.path().join(ANALYTICS),
            include_str!("../../fixtures/analytics.json"),
        )
        .unwrap();

        let fixtures = Fixtures::from_dir(dir.path()).unwrap();
        assert!(fixtures.orders.is_empty());
        assert_eq!(fixtures.preferences, NotificationPreferences::default());
    }

    #[test]
    fn malformed_fixture_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ORDERS), "{ not json").unwrap();

        let err = Fixtures::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("orders.json"), "{err}");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Fixtures::from_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, CourierError::Io(_)));
    }
}
