//! Canned analytics reports.
//!
//! The report is read once from the analytics fixture and served unchanged.
//! Nothing here is computed from live orders.

use std::time::Duration;

use super::ServiceContext;
use crate::domain::error::{CourierError, Result};
use crate::domain::{
    AnalyticsReport, DeliveryStats, DriverPerformance, Overview, Period, RevenueStats,
    RouteEfficiency,
};
use crate::storage::simulate;

const OVERVIEW_DELAY: Duration = Duration::from_millis(400);
const DELIVERY_STATS_DELAY: Duration = Duration::from_millis(300);
const PERFORMANCE_DELAY: Duration = Duration::from_millis(350);
const REVENUE_DELAY: Duration = Duration::from_millis(300);
const EFFICIENCY_DELAY: Duration = Duration::from_millis(400);

pub struct AnalyticsService {
    report: AnalyticsReport,
    ctx: ServiceContext,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(report: AnalyticsReport, ctx: ServiceContext) -> Self {
        Self { report, ctx }
    }

    async fn wait(&self, baseline: Duration) {
        simulate(self.ctx.latency.as_ref(), baseline).await;
    }

    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn overview(&self) -> Result<Overview> {
        self.wait(OVERVIEW_DELAY).await;
        Ok(self.report.overview.clone())
    }

    /// Delivery outcome series for `period`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the report has no series for `period`.
    pub async fn delivery_stats(&self, period: Period) -> Result<DeliveryStats> {
        self.wait(DELIVERY_STATS_DELAY).await;
        self.report
            .delivery_stats
            .get(&period)
            .cloned()
            .ok_or_else(|| CourierError::not_found("Delivery stats", period))
    }

    /// Driver leaderboard, in fixture order.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn driver_performance(&self) -> Result<Vec<DriverPerformance>> {
        self.wait(PERFORMANCE_DELAY).await;
        Ok(self.report.driver_performance.clone())
    }

    /// Revenue series for `period`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the report has no series for `period`.
    pub async fn revenue_stats(&self, period: Period) -> Result<RevenueStats> {
        self.wait(REVENUE_DELAY).await;
        self.report
            .revenue_stats
            .get(&period)
            .cloned()
            .ok_or_else(|| CourierError::not_found("Revenue stats", period))
    }

    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn route_efficiency(&self) -> Result<RouteEfficiency> {
        self.wait(EFFICIENCY_DELAY).await;
        Ok(self.report.route_efficiency.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Fixtures;

    fn bundled() -> AnalyticsService {
        AnalyticsService::new(Fixtures::bundled().unwrap().analytics, ServiceContext::immediate())
    }

    #[tokio::test]
    async fn every_period_has_series() {
        let service = bundled();
        for period in Period::ALL {
            let stats = service.delivery_stats(period).await.unwrap();
            assert_eq!(stats.labels.len(), stats.completed.len(), "{period}");
            let revenue = service.revenue_stats(period).await.unwrap();
            assert_eq!(revenue.labels.len(), revenue.revenue.len(), "{period}");
        }
    }

    #[tokio::test]
    async fn missing_period_is_not_found() {
        let service = AnalyticsService::new(AnalyticsReport::default(), ServiceContext::immediate());
        let err = service.delivery_stats(Period::Quarter).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Delivery stats not found");
    }

    #[tokio::test]
    async fn reports_are_served_unchanged() {
        let fixtures = Fixtures::bundled().unwrap();
        let service = AnalyticsService::new(fixtures.analytics.clone(), ServiceContext::immediate());
        assert_eq!(service.overview().await.unwrap(), fixtures.analytics.overview);
        assert_eq!(
            service.driver_performance().await.unwrap(),
            fixtures.analytics.driver_performance
        );
    }
}
