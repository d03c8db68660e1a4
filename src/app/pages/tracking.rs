//! Package tracking: order lookup and delivery timeline.
//!
//! Orders are found by tracking number (case-insensitive) or by id. The
//! timeline always has four steps; a failed delivery replaces the last one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::error::{CourierError, Result};
use crate::domain::{Order, OrderStatus, Task};
use crate::services::{Repository, Services};
use crate::ui::EmptyState;

/// Failure text used when an order has no recorded reason.
pub const DEFAULT_FAILURE_REASON: &str = "Delivery attempt failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub completed: bool,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TimelineStep {
    fn new(
        id: &'static str,
        title: &'static str,
        description: &str,
        completed: bool,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            description: description.to_string(),
            completed,
            failed: false,
            timestamp,
        }
    }
}

/// Builds the tracking timeline for `order`.
#[must_use]
pub fn timeline(order: &Order) -> Vec<TimelineStep> {
    use OrderStatus::{Delivered, InTransit, PickupScheduled};

    let status = order.status;
    let mut steps = vec![
        TimelineStep::new(
            "placed",
            "Order Placed",
            "Your order has been confirmed",
            true,
            Some(order.created_at),
        ),
        TimelineStep::new(
            "pickup_scheduled",
            "Pickup Scheduled",
            "Driver assigned and pickup scheduled",
            matches!(status, PickupScheduled | InTransit | Delivered),
            order.scheduled_pickup.or(order.pickup_time),
        ),
        TimelineStep::new(
            "in_transit",
            "In Transit",
            "Package is on the way to destination",
            matches!(status, InTransit | Delivered),
            order.pickup_time,
        ),
        TimelineStep::new(
            "delivered",
            "Delivered",
            "Package delivered successfully",
            status == Delivered,
            order.delivered_at,
        ),
    ];

    if status == OrderStatus::FailedDelivery {
        steps.pop();
        steps.push(TimelineStep {
            id: "failed",
            title: "Delivery Failed",
            description: order
                .failure_reason
                .clone()
                .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string()),
            completed: true,
            failed: true,
            timestamp: order.failed_at,
        });
    }
    steps
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    pub order: Order,
    /// Tasks referencing the order.
    pub tasks: Vec<Task>,
    pub timeline: Vec<TimelineStep>,
}

/// Finds an order by tracking number (ignoring case) or exact id.
pub fn find_order<'a>(orders: &'a [Order], key: &str) -> Option<&'a Order> {
    orders
        .iter()
        .find(|o| o.tracking_number.eq_ignore_ascii_case(key) || o.id == key)
}

pub struct TrackingPage {
    services: Services,
    notices: Notices,
    result: LoadSlot<TrackingResult>,
}

impl TrackingPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            result: LoadSlot::new(),
        }
    }

    /// Looks up `input` and loads its tasks.
    ///
    /// Blank input raises a notice and leaves the page untouched.
    pub async fn track(&self, input: &str) {
        let key = input.trim();
        if key.is_empty() {
            self.notices.error("Please enter a tracking number");
            return;
        }

        self.result
            .run(&self.notices, "Failed to track package", fetch(&self.services, key))
            .await;
    }

    pub fn unmount(&self) {
        self.result.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<TrackingResult> {
        self.result.snapshot()
    }

    /// Prompt shown before the first lookup.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        matches!(self.result.snapshot(), Loadable::Idle).then(|| {
            EmptyState::new(
                "Enter a tracking number",
                "Start tracking your package by entering the tracking number above",
            )
        })
    }
}

async fn fetch(services: &Services, key: &str) -> Result<TrackingResult> {
    let orders = services.orders.list().await?;
    let order = find_order(&orders, key)
        .cloned()
        .ok_or_else(|| CourierError::not_found("Tracking number", key))?;

    let tasks = services
        .tasks
        .list()
        .await?
        .into_iter()
        .filter(|t| t.order_id == order.id)
        .collect();

    tracing::debug!(order_id = %order.id, status = %order.status, "package tracked");
    Ok(TrackingResult {
        timeline: timeline(&order),
        order,
        tasks,
    })
}
