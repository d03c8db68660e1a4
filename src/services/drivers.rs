//! Driver resource.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use super::collection::Collection;
use super::{Repository, ServiceContext};
use crate::domain::driver::INITIAL_RATING;
use crate::domain::error::Result;
use crate::domain::{Driver, DriverPatch, DriverStatus, GeoPoint, NewDriver, TodayStats};
use crate::storage::Store;

const LIST_DELAY: Duration = Duration::from_millis(300);
const GET_DELAY: Duration = Duration::from_millis(200);
const CREATE_DELAY: Duration = Duration::from_millis(400);
const UPDATE_DELAY: Duration = Duration::from_millis(300);
const DELETE_DELAY: Duration = Duration::from_millis(250);
const LOCATION_DELAY: Duration = Duration::from_millis(150);
const AVAILABLE_DELAY: Duration = Duration::from_millis(200);

pub struct DriverService {
    drivers: Collection<Driver>,
    ctx: ServiceContext,
}

impl DriverService {
    #[must_use]
    pub fn new(store: Arc<dyn Store<Driver>>, ctx: ServiceContext) -> Self {
        Self {
            drivers: Collection::new(store, ctx.latency.clone()),
            ctx,
        }
    }

    /// Moves a driver on the map and stamps `last_location_update`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown drivers.
    pub async fn update_location(&self, id: &str, location: GeoPoint) -> Result<Driver> {
        let span = tracing::debug_span!("driver_update_location",
            driver_id = %id,
            lat = location.lat,
            lng = location.lng
        );

        let mut location = Some(location);
        let clock = self.ctx.clock.clone();
        self.drivers
            .modify(&id.to_string(), LOCATION_DELAY, move |driver| {
                if let Some(location) = location.take() {
                    driver.current_location = Some(location);
                }
                driver.last_location_update = Some(clock.now());
            })
            .instrument(span)
            .await
    }

    /// Drivers whose status is `available`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn available(&self) -> Result<Vec<Driver>> {
        self.drivers
            .filter(AVAILABLE_DELAY, |d| d.status == DriverStatus::Available)
            .await
    }
}

#[async_trait]
impl Repository<Driver> for DriverService {
    type New = NewDriver;
    type Patch = DriverPatch;

    async fn list(&self) -> Result<Vec<Driver>> {
        self.drivers.list(LIST_DELAY).await
    }

    async fn get(&self, id: &String) -> Result<Driver> {
        self.drivers.get(id, GET_DELAY).await
    }

    async fn create(&self, input: NewDriver) -> Result<Driver> {
        self.drivers.wait(CREATE_DELAY).await;

        let now = self.ctx.clock.now();
        let driver = Driver {
            id: self.ctx.ids.next_string(now),
            name: input.name,
            phone: input.phone,
            email: input.email,
            vehicle_type: input.vehicle_type,
            license_plate: input.license_plate,
            status: DriverStatus::Available,
            rating: INITIAL_RATING,
            total_deliveries: 0,
            capacity: input.capacity,
            today_stats: TodayStats::default(),
            current_location: input.current_location,
            last_location_update: None,
            created_at: Some(now),
        };

        self.drivers.insert(driver)
    }

    async fn update(&self, id: &String, patch: DriverPatch) -> Result<Driver> {
        let mut patch = Some(patch);
        self.drivers
            .modify(id, UPDATE_DELAY, |driver| {
                if let Some(patch) = patch.take() {
                    patch.apply_to(driver);
                }
            })
            .await
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.drivers.remove(id, DELETE_DELAY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Capacity;
    use crate::infrastructure::{Clock, FixedClock};
    use crate::storage::{MemoryStore, NoLatency};
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn service() -> (DriverService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
        let ctx = ServiceContext::new(Arc::new(NoLatency), clock.clone());
        (DriverService::new(Arc::new(MemoryStore::default()), ctx), clock)
    }

    fn recruit(name: &str) -> NewDriver {
        NewDriver {
            name: name.into(),
            vehicle_type: "Van".into(),
            license_plate: "8XYZ321".into(),
            capacity: Capacity { current_load: 0.0, max_weight: 500.0 },
            ..NewDriver::default()
        }
    }

    #[tokio::test]
    async fn new_drivers_start_available_with_full_rating() {
        let (service, _clock) = service();
        let driver = service.create(recruit("Lena Ortiz")).await.unwrap();

        assert_eq!(driver.status, DriverStatus::Available);
        assert_eq!(driver.rating, 5.0);
        assert_eq!(driver.total_deliveries, 0);
        assert_eq!(driver.today_stats, TodayStats::default());
    }

    #[tokio::test]
    async fn location_update_stamps_time() {
        let (service, clock) = service();
        let driver = service.create(recruit("Lena Ortiz")).await.unwrap();
        clock.advance(ChronoDuration::minutes(7));

        let moved = service
            .update_location(&driver.id, GeoPoint { lat: 37.78, lng: -122.41, address: None })
            .await
            .unwrap();

        assert_eq!(moved.current_location.as_ref().map(|p| p.lat), Some(37.78));
        assert_eq!(moved.last_location_update, Some(clock.now()));
    }

    #[tokio::test]
    async fn location_update_for_unknown_driver_fails() {
        let (service, _clock) = service();
        let err = service
            .update_location("ghost", GeoPoint::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Driver not found");
    }

    #[tokio::test]
    async fn available_excludes_busy_and_offline() {
        let (service, _clock) = service();
        let a = service.create(recruit("A")).await.unwrap();
        let b = service.create(recruit("B")).await.unwrap();
        service.create(recruit("C")).await.unwrap();
        service.update(&a.id, DriverPatch::status(DriverStatus::Busy)).await.unwrap();
        service.update(&b.id, DriverPatch::status(DriverStatus::Offline)).await.unwrap();

        let names: Vec<_> = service.available().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["C"]);
    }
}
