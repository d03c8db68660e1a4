//! One view-state holder per dashboard page.
//!
//! Pages share the same shape: `new(services, notices)`, an async `load`
//! (re-run by `retry`), `unmount`, a `state()` snapshot, and pure accessors
//! for whatever the page derives from its data. The booking wizard is the
//! exception: it is a form flow owned by one caller, so it takes `&mut self`.

pub mod analytics;
pub mod booking;
pub mod dashboard;
pub mod fleet;
pub mod orders;
pub mod routes;
pub mod settings;
pub mod tracking;

pub use analytics::AnalyticsPage;
pub use booking::{BookingStep, BookingWizard};
pub use dashboard::{DashboardPage, DashboardSummary};
pub use fleet::FleetPage;
pub use orders::{OrderFilter, OrdersPage};
pub use routes::{DriverFilter, RoutesPage};
pub use settings::SettingsPage;
pub use tracking::TrackingPage;
