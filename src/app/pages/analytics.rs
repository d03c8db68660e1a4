//! Analytics page: overview, period-selected delivery chart and driver
//! leaderboard.

use futures_util::try_join;
use parking_lot::Mutex;
use serde::Serialize;
use std::cmp::Ordering;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::error::Result;
use crate::domain::{DeliveryStats, DriverPerformance, Overview, Period};
use crate::services::Services;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub period: Period,
    pub overview: Overview,
    pub delivery_stats: DeliveryStats,
    /// Ranked by efficiency, best first.
    pub driver_performance: Vec<DriverPerformance>,
}

pub struct AnalyticsPage {
    services: Services,
    notices: Notices,
    data: LoadSlot<AnalyticsData>,
    period: Mutex<Period>,
}

impl AnalyticsPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            data: LoadSlot::new(),
            period: Mutex::new(Period::Week),
        }
    }

    #[must_use]
    pub fn period(&self) -> Period {
        *self.period.lock()
    }

    /// Loads every panel for the current period.
    pub async fn load(&self) {
        let period = self.period();
        self.data
            .run(&self.notices, "Failed to load analytics data", fetch(&self.services, period))
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    /// Switches the period and reloads. A load still running for the old
    /// period is superseded.
    pub async fn set_period(&self, period: Period) {
        *self.period.lock() = period;
        self.load().await;
    }

    pub fn unmount(&self) {
        self.data.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<AnalyticsData> {
        self.data.snapshot()
    }
}

/// Sorts a leaderboard by efficiency, best first.
pub fn rank_by_efficiency(performance: &mut [DriverPerformance]) {
    performance.sort_by(|a, b| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(Ordering::Equal)
    });
}

async fn fetch(services: &Services, period: Period) -> Result<AnalyticsData> {
    let analytics = &services.analytics;
    let (overview, delivery_stats, mut driver_performance) = try_join!(
        analytics.overview(),
        analytics.delivery_stats(period),
        analytics.driver_performance(),
    )?;
    rank_by_efficiency(&mut driver_performance);
    Ok(AnalyticsData {
        period,
        overview,
        delivery_stats,
        driver_performance,
    })
}
