//! Dashboard: headline figures, latest orders and driver availability.

use futures_util::try_join;
use serde::Serialize;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::error::Result;
use crate::domain::{Driver, DriverStatus, Order, OrderStatus, Overview};
use crate::services::{Repository, Services};
use crate::ui::{count_by, StatCard, StatusCount};

/// Number of orders in the "recent orders" panel.
pub const RECENT_ORDER_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: Overview,
    /// Newest first, at most [`RECENT_ORDER_COUNT`].
    pub recent_orders: Vec<Order>,
    pub drivers: Vec<Driver>,
}

/// One row of the recent orders panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub tracking_number: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub price: f64,
}

/// Everything the dashboard shows, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub cards: Vec<StatCard>,
    pub recent_orders: Vec<RecentOrder>,
    pub driver_counts: Vec<StatusCount<DriverStatus>>,
}

pub struct DashboardPage {
    services: Services,
    notices: Notices,
    data: LoadSlot<DashboardData>,
}

impl DashboardPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            data: LoadSlot::new(),
        }
    }

    /// Fetches the overview, orders and drivers in parallel.
    pub async fn load(&self) {
        self.data
            .run(&self.notices, "Failed to load dashboard data", fetch(&self.services))
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn unmount(&self) {
        self.data.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<DashboardData> {
        self.data.snapshot()
    }

    /// Display-ready summary, once loaded.
    #[must_use]
    pub fn summary(&self) -> Option<DashboardSummary> {
        self.data.snapshot().ready().map(summarize)
    }
}

async fn fetch(services: &Services) -> Result<DashboardData> {
    let (overview, orders, drivers) = try_join!(
        services.analytics.overview(),
        services.orders.list(),
        services.drivers.list(),
    )?;
    Ok(DashboardData {
        overview,
        recent_orders: most_recent(orders, RECENT_ORDER_COUNT),
        drivers,
    })
}

fn most_recent(mut orders: Vec<Order>, count: usize) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders.truncate(count);
    orders
}

fn summarize(data: &DashboardData) -> DashboardSummary {
    let overview = &data.overview;
    let cards = vec![
        StatCard::new("Today's Orders", overview.today_orders.to_string())
            .with_change(overview.daily_change_percent()),
        StatCard::new("Active Drivers", overview.active_drivers.to_string()),
        StatCard::new("On-Time Rate", format!("{:.1}%", overview.on_time_deliveries)),
        StatCard::new("Total Revenue", format!("${:.2}", overview.total_revenue))
            .with_change(overview.weekly_growth),
    ];

    let recent_orders = data
        .recent_orders
        .iter()
        .map(|o| RecentOrder {
            tracking_number: o.tracking_number.clone(),
            customer_name: o.customer_name.clone(),
            status: o.status,
            status_label: o.status.label(),
            price: o.price,
        })
        .collect();

    DashboardSummary {
        cards,
        recent_orders,
        driver_counts: count_by(&data.drivers, &DriverStatus::ALL, |d| d.status),
    }
}

/// One-shot dashboard summary, without a page or its view state.
///
/// # Errors
///
/// Returns the first service error.
pub async fn fetch_summary(services: &Services) -> Result<DashboardSummary> {
    fetch(services).await.map(|data| summarize(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_five_newest_orders() {
        let page = DashboardPage::new(Services::immediate().unwrap(), Notices::new());
        page.load().await;

        let state = page.state();
        let data = state.ready().expect("dashboard loaded");
        assert_eq!(data.recent_orders.len(), RECENT_ORDER_COUNT);
        assert!(data
            .recent_orders
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn summary_reports_daily_change() {
        let page = DashboardPage::new(Services::immediate().unwrap(), Notices::new());
        page.load().await;

        let summary = page.summary().unwrap();
        let overview = page.state().ready().unwrap().overview.clone();
        assert_eq!(summary.cards[0].change_percent, Some(overview.daily_change_percent()));
        let counted: usize = summary.driver_counts.iter().map(|c| c.count).sum();
        assert_eq!(counted, page.state().ready().unwrap().drivers.len());
    }

    #[test]
    fn most_recent_orders_sort_newest_first() {
        let orders = crate::storage::Fixtures::bundled().unwrap().orders;
        let newest = most_recent(orders.clone(), 2);
        let max = orders.iter().map(|o| o.created_at).max().unwrap();
        assert_eq!(newest[0].created_at, max);
        assert_eq!(newest.len(), 2);
    }
}
