//! Asynchronous resource services.
//!
//! Each service owns one in-memory collection and exposes CRUD plus a few
//! resource-specific queries. Every call suspends for a simulated network
//! delay before it resolves, then returns copies of the affected records.
//!
//! # Services
//!
//! - [`OrderService`]: orders, status filter, price quotes
//! - [`DriverService`]: drivers, location updates, availability
//! - [`TaskService`]: route tasks, per-driver listing, completion
//! - [`VehicleService`]: vehicle register
//! - [`SettingsService`]: notification preferences and saved addresses
//! - [`AnalyticsService`]: canned reports
//!
//! The CRUD half of the order, driver, task, vehicle and address services is
//! the [`Repository`] trait, so code that only needs CRUD can be written once
//! against `dyn Repository<T>`.

mod collection;

pub mod analytics;
pub mod drivers;
pub mod orders;
pub mod settings;
pub mod tasks;
pub mod vehicles;

pub use analytics::AnalyticsService;
pub use drivers::DriverService;
pub use orders::OrderService;
pub use settings::{AddressBook, SettingsService};
pub use tasks::TaskService;
pub use vehicles::VehicleService;

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::error::Result;
use crate::domain::record::Record;
use crate::infrastructure::{Clock, IdGenerator, SystemClock};
use crate::storage::{Fixtures, Latency, MemoryStore, NetworkLatency, NoLatency};

/// CRUD contract shared by the resource services.
///
/// `get`, `update` and `delete` fail with
/// [`CourierError::NotFound`](crate::CourierError::NotFound) for unknown ids
/// and leave the collection unchanged in that case.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Creation input; the service fills in identity, status and timestamps.
    type New: Send + 'static;

    /// Typed partial update.
    type Patch: Send + 'static;

    async fn list(&self) -> Result<Vec<T>>;

    async fn get(&self, id: &T::Id) -> Result<T>;

    async fn create(&self, input: Self::New) -> Result<T>;

    /// Applies the patch and returns the merged record.
    async fn update(&self, id: &T::Id, patch: Self::Patch) -> Result<T>;

    async fn delete(&self, id: &T::Id) -> Result<()>;
}

/// Collaborators shared by every service: the latency strategy, the clock
/// and the identifier generator.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub latency: Arc<dyn Latency>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<IdGenerator>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(latency: Arc<dyn Latency>, clock: Arc<dyn Clock>) -> Self {
        Self {
            latency,
            clock,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Wall clock with no simulated delay.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(Arc::new(NoLatency), Arc::new(SystemClock))
    }
}

impl Default for ServiceContext {
    /// Wall clock with the dashboard's baseline delays.
    fn default() -> Self {
        Self::new(Arc::new(NetworkLatency::default()), Arc::new(SystemClock))
    }
}

/// Every resource service, wired to its own collection.
///
/// Cloning is cheap and clones share the same collections.
#[derive(Clone)]
pub struct Services {
    pub orders: Arc<OrderService>,
    pub drivers: Arc<DriverService>,
    pub tasks: Arc<TaskService>,
    pub vehicles: Arc<VehicleService>,
    pub analytics: Arc<AnalyticsService>,
    pub settings: Arc<SettingsService>,
}

impl Services {
    /// Builds every service over fresh in-memory stores seeded from `fixtures`.
    #[must_use]
    pub fn from_fixtures(fixtures: Fixtures, ctx: &ServiceContext) -> Self {
        let _span = tracing::debug_span!("build_services").entered();

        Self {
            orders: Arc::new(OrderService::new(
                Arc::new(MemoryStore::seeded(fixtures.orders)),
                ctx.clone(),
            )),
            drivers: Arc::new(DriverService::new(
                Arc::new(MemoryStore::seeded(fixtures.drivers)),
                ctx.clone(),
            )),
            tasks: Arc::new(TaskService::new(
                Arc::new(MemoryStore::seeded(fixtures.tasks)),
                ctx.clone(),
            )),
            vehicles: Arc::new(VehicleService::new(
                Arc::new(MemoryStore::seeded(fixtures.vehicles)),
                ctx.clone(),
            )),
            analytics: Arc::new(AnalyticsService::new(fixtures.analytics, ctx.clone())),
            settings: Arc::new(SettingsService::new(
                fixtures.preferences,
                Arc::new(MemoryStore::seeded(fixtures.addresses)),
                ctx.clone(),
            )),
        }
    }

    /// Bundled fixtures, no simulated delay, wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixtures fail to parse.
    pub fn immediate() -> Result<Self> {
        Ok(Self::from_fixtures(Fixtures::bundled()?, &ServiceContext::immediate()))
    }
}
