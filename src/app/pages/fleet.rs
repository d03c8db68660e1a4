//! Fleet overview: driver roster, status tallies and map selection.

use parking_lot::Mutex;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::{Driver, DriverStatus};
use crate::services::{Repository, Services};
use crate::ui::{count_by, matches_query, EmptyState, StatusCount};

pub struct FleetPage {
    services: Services,
    notices: Notices,
    drivers: LoadSlot<Vec<Driver>>,
    query: Mutex<String>,
    selected: Mutex<Option<String>>,
}

impl FleetPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            drivers: LoadSlot::new(),
            query: Mutex::new(String::new()),
            selected: Mutex::new(None),
        }
    }

    pub async fn load(&self) {
        self.drivers
            .run(&self.notices, "Failed to load fleet data", self.services.drivers.list())
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn unmount(&self) {
        self.drivers.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<Vec<Driver>> {
        self.drivers.snapshot()
    }

    pub fn set_query(&self, query: &str) {
        *self.query.lock() = query.to_string();
    }

    /// Drivers whose name, vehicle type or plate contains the query.
    #[must_use]
    pub fn visible(&self) -> Vec<Driver> {
        let query = self.query.lock().clone();
        self.drivers
            .snapshot()
            .ready()
            .map(|drivers| {
                drivers
                    .iter()
                    .filter(|d| {
                        matches_query(
                            &query,
                            &[d.name.as_str(), d.vehicle_type.as_str(), d.license_plate.as_str()],
                        )
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn status_counts(&self) -> Vec<StatusCount<DriverStatus>> {
        self.drivers
            .snapshot()
            .ready()
            .map(|drivers| count_by(drivers, &DriverStatus::ALL, |d| d.status))
            .unwrap_or_default()
    }

    /// Deliveries completed today across the whole fleet.
    #[must_use]
    pub fn deliveries_today(&self) -> u32 {
        self.drivers
            .snapshot()
            .ready()
            .map(|drivers| drivers.iter().map(|d| d.today_stats.deliveries).sum())
            .unwrap_or(0)
    }

    /// Selects a driver on the map; selecting the same driver again clears
    /// the selection.
    pub fn toggle_selection(&self, driver_id: &str) {
        let mut selected = self.selected.lock();
        if selected.as_deref() == Some(driver_id) {
            *selected = None;
        } else {
            *selected = Some(driver_id.to_string());
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<Driver> {
        let id = self.selected.lock().clone()?;
        self.drivers
            .snapshot()
            .ready()
            .and_then(|drivers| drivers.iter().find(|d| d.id == id).cloned())
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        let state = self.drivers.snapshot();
        let drivers = state.ready()?;
        drivers.is_empty().then(|| {
            EmptyState::new(
                "No drivers found",
                "Add drivers to your fleet to start managing deliveries",
            )
            .with_action("Add Driver")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn loaded() -> FleetPage {
        let page = FleetPage::new(Services::immediate().unwrap(), Notices::new());
        page.load().await;
        page
    }

    #[tokio::test]
    async fn search_covers_name_vehicle_and_plate() {
        let page = loaded().await;

        page.set_query("elena");
        assert_eq!(page.visible().len(), 1);

        page.set_query("van");
        assert!(page.visible().iter().all(|d| d.vehicle_type == "Van"));

        page.set_query("8trk");
        assert_eq!(page.visible()[0].name, "Tom Bradley");

        page.set_query("no such driver");
        assert!(page.visible().is_empty());
        assert!(page.empty_state().is_none());
    }

    #[tokio::test]
    async fn tallies_statuses_and_deliveries() {
        let page = loaded().await;
        let drivers = page.state().ready().cloned().unwrap();

        let counts = page.status_counts();
        let busy = counts.iter().find(|c| c.status == DriverStatus::Busy).unwrap();
        assert_eq!(busy.count, drivers.iter().filter(|d| d.status == DriverStatus::Busy).count());
        assert_eq!(
            page.deliveries_today(),
            drivers.iter().map(|d| d.today_stats.deliveries).sum::<u32>()
        );
    }

    #[tokio::test]
    async fn selection_toggles() {
        let page = loaded().await;
        page.toggle_selection("2");
        assert_eq!(page.selected().map(|d| d.name), Some("Elena Rodriguez".to_string()));
        page.toggle_selection("2");
        assert!(page.selected().is_none());
    }
}
