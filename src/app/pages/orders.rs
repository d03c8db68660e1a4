//! Order list with search and status filter.

use parking_lot::Mutex;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::{Order, OrderStatus};
use crate::services::{Repository, Services};
use crate::ui::{count_by, matches_query, EmptyState, StatusCount};

/// Search text and status filter of the order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub query: String,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Whether `order` passes both the search and the status filter.
    ///
    /// Search looks at the tracking number and the customer name.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |s| order.status == s)
            && matches_query(&self.query, &[order.tracking_number.as_str(), order.customer_name.as_str()])
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.status.is_some()
    }
}

pub struct OrdersPage {
    services: Services,
    notices: Notices,
    orders: LoadSlot<Vec<Order>>,
    filter: Mutex<OrderFilter>,
}

impl OrdersPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            orders: LoadSlot::new(),
            filter: Mutex::new(OrderFilter::default()),
        }
    }

    pub async fn load(&self) {
        self.orders
            .run(&self.notices, "Failed to load orders", self.services.orders.list())
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn unmount(&self) {
        self.orders.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<Vec<Order>> {
        self.orders.snapshot()
    }

    pub fn set_query(&self, query: &str) {
        self.filter.lock().query = query.to_string();
    }

    pub fn set_status(&self, status: Option<OrderStatus>) {
        self.filter.lock().status = status;
    }

    pub fn clear_search(&self) {
        *self.filter.lock() = OrderFilter::default();
    }

    #[must_use]
    pub fn filter(&self) -> OrderFilter {
        self.filter.lock().clone()
    }

    /// Loaded orders passing the current filter, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<Order> {
        let filter = self.filter();
        self.orders
            .snapshot()
            .ready()
            .map(|orders| orders.iter().filter(|o| filter.matches(o)).cloned().collect())
            .unwrap_or_default()
    }

    /// Per-status totals over every loaded order, ignoring the filter.
    #[must_use]
    pub fn status_counts(&self) -> Vec<StatusCount<OrderStatus>> {
        self.orders
            .snapshot()
            .ready()
            .map(|orders| count_by(orders, &OrderStatus::ALL, |o| o.status))
            .unwrap_or_default()
    }

    /// Placeholder for an empty list.
    ///
    /// No orders at all and no orders matching the filter are reported
    /// differently. `None` while loading, on failure, or when something is
    /// visible.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        let state = self.orders.snapshot();
        let orders = state.ready()?;
        if orders.is_empty() {
            return Some(
                EmptyState::new(
                    "No orders found",
                    "Orders will appear here once customers start booking deliveries",
                )
                .with_action("Create Test Order"),
            );
        }

        let filter = self.filter();
        if filter.is_active() && !orders.iter().any(|o| filter.matches(o)) {
            return Some(
                EmptyState::new("No orders match your search", "Try adjusting your search terms or filters")
                    .with_action("Clear Search"),
            );
        }
        None
    }
}
