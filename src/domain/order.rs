//! Order domain model.
//!
//! An order is a booked delivery: who booked it, where the package goes, what
//! the package is, what it costs, and where it is in its lifecycle. The
//! assigned driver is kept by name only; nothing enforces that the name matches
//! an existing driver record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    PickupScheduled,
    InTransit,
    Delivered,
    FailedDelivery,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::PickupScheduled,
        Self::InTransit,
        Self::Delivered,
        Self::FailedDelivery,
    ];

    /// Wire name, as stored in fixtures (`"in_transit"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PickupScheduled => "pickup_scheduled",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::FailedDelivery => "failed_delivery",
        }
    }

    /// Badge label shown in lists (`"IN TRANSIT"`).
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Street address used for pickup and delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl PostalAddress {
    /// Single-line rendering, e.g. `"123 Main St, San Francisco, CA 94105"`.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
            .trim_end()
            .to_string()
    }
}

/// Package dimensions in centimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// What is being shipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    /// Weight in kilograms.
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    /// Package category (`general`, `documents`, `electronics`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Declared value.
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub fragile: bool,
}

/// A booked delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub pickup_address: PostalAddress,
    pub delivery_address: PostalAddress,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pickup_notes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub delivery_notes: String,
    pub package_details: PackageDetails,
    pub price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_pickup: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<DateTime<Utc>>,
    /// Actual delivery time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Driver name, not a driver id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver: Option<String>,
}

impl Record for Order {
    type Id = String;
    const KIND: &'static str = "Order";

    fn id(&self) -> &String {
        &self.id
    }
}

/// Input for creating an order. The service assigns identity, status and
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub pickup_address: PostalAddress,
    pub delivery_address: PostalAddress,
    #[serde(default)]
    pub pickup_notes: String,
    #[serde(default)]
    pub delivery_notes: String,
    pub package_details: PackageDetails,
    pub price: f64,
    #[serde(default)]
    pub assigned_driver: Option<String>,
}

/// Fields an order update may change. `None` leaves the field untouched.
///
/// Nested optional fields use `Option<Option<_>>` so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub pickup_address: Option<PostalAddress>,
    pub delivery_address: Option<PostalAddress>,
    pub package_details: Option<PackageDetails>,
    pub price: Option<f64>,
    pub status: Option<OrderStatus>,
    pub estimated_delivery: Option<Option<DateTime<Utc>>>,
    pub scheduled_pickup: Option<Option<DateTime<Utc>>>,
    pub pickup_time: Option<Option<DateTime<Utc>>>,
    pub delivered_at: Option<Option<DateTime<Utc>>>,
    pub failed_at: Option<Option<DateTime<Utc>>>,
    pub failure_reason: Option<Option<String>>,
    pub assigned_driver: Option<Option<String>>,
}

impl OrderPatch {
    /// Patch that only changes the status.
    #[must_use]
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merges the set fields into `order`.
    pub fn apply_to(self, order: &mut Order) {
        if let Some(v) = self.customer_name {
            order.customer_name = v;
        }
        if let Some(v) = self.customer_phone {
            order.customer_phone = v;
        }
        if let Some(v) = self.customer_email {
            order.customer_email = v;
        }
        if let Some(v) = self.pickup_address {
            order.pickup_address = v;
        }
        if let Some(v) = self.delivery_address {
            order.delivery_address = v;
        }
        if let Some(v) = self.package_details {
            order.package_details = v;
        }
        if let Some(v) = self.price {
            order.price = v;
        }
        if let Some(v) = self.status {
            order.status = v;
        }
        if let Some(v) = self.estimated_delivery {
            order.estimated_delivery = v;
        }
        if let Some(v) = self.scheduled_pickup {
            order.scheduled_pickup = v;
        }
        if let Some(v) = self.pickup_time {
            order.pickup_time = v;
        }
        if let Some(v) = self.delivered_at {
            order.delivered_at = v;
        }
        if let Some(v) = self.failed_at {
            order.failed_at = v;
        }
        if let Some(v) = self.failure_reason {
            order.failure_reason = v;
        }
        if let Some(v) = self.assigned_driver {
            order.assigned_driver = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_labels_are_upper_case_words() {
        assert_eq!(OrderStatus::PickupScheduled.label(), "PICKUP SCHEDULED");
        assert_eq!(OrderStatus::Pending.label(), "PENDING");
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&OrderStatus::FailedDelivery).unwrap();
        assert_eq!(json, "\"failed_delivery\"");
    }
}
