//! Domain layer for courier operations.
//!
//! This module contains the entity types and pure business rules, independent
//! of how records are stored or how long service calls take.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Identity trait implemented by every stored entity
//! - [`order`], [`driver`], [`task`], [`vehicle`], [`settings`]: entities, their
//!   creation inputs and typed update patches
//! - [`pricing`]: delivery price quotes
//! - [`analytics`]: canned report shapes
//!
//! # Examples
//!
//! ```
//! use courier_ops::domain::{Order, OrderPatch, OrderStatus};
//!
//! fn mark_delivered(order: &mut Order) {
//!     OrderPatch::status(OrderStatus::Delivered).apply_to(order);
//! }
//! ```

pub mod analytics;
pub mod driver;
pub mod error;
pub mod order;
pub mod pricing;
pub mod record;
pub mod settings;
pub mod task;
pub mod vehicle;

pub use analytics::{
    AnalyticsReport, DeliveryStats, DriverPerformance, Overview, Period, RevenueStats,
    RouteEfficiency,
};
pub use driver::{Capacity, Driver, DriverPatch, DriverStatus, GeoPoint, NewDriver, TodayStats};
pub use error::{CourierError, Result};
pub use order::{
    Dimensions, NewOrder, Order, OrderPatch, OrderStatus, PackageDetails, PostalAddress,
};
pub use pricing::PriceQuote;
pub use record::Record;
pub use settings::{
    Address, AddressPatch, EmailPreferences, NewAddress, NotificationPreferences,
    NotificationPreferencesPatch, PushPreferences, SmsPreferences,
};
pub use task::{
    NewTask, ProofOfDelivery, Task, TaskKind, TaskLocation, TaskPatch, TaskStatus, TimeWindow,
};
pub use vehicle::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
