//! Analytics report shapes.
//!
//! Reports are canned: they are read from the analytics fixture and returned
//! unchanged. Period-keyed series are looked up by [`Period`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl Period {
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Quarter];

    /// Fixture key (`"7d"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
        }
    }

    /// Selector label (`"7 Days"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "7 Days",
            Self::Month => "30 Days",
            Self::Quarter => "90 Days",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown period: {s}"))
    }
}

/// Headline numbers for the dashboard and analytics pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_orders: u64,
    pub today_orders: u64,
    pub yesterday_orders: u64,
    /// Percent.
    pub weekly_growth: f64,
    pub active_drivers: u32,
    /// Percent of deliveries on time.
    pub on_time_deliveries: f64,
    pub total_revenue: f64,
    /// Minutes.
    pub average_delivery_time: f64,
    /// Out of 5.
    pub customer_satisfaction: f64,
}

impl Overview {
    /// Day-over-day order change in percent: `today / max(yesterday, 1) * 100 - 100`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn daily_change_percent(&self) -> f64 {
        let yesterday = if self.yesterday_orders == 0 { 1 } else { self.yesterday_orders };
        self.today_orders as f64 / yesterday as f64 * 100.0 - 100.0
    }
}

/// Chart series of delivery outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub labels: Vec<String>,
    pub completed: Vec<u32>,
    pub failed: Vec<u32>,
    pub pending: Vec<u32>,
}

/// One row of the driver leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPerformance {
    pub id: String,
    pub name: String,
    pub deliveries: u32,
    /// Percent.
    pub on_time_rate: f64,
    pub rating: f64,
    pub earnings: f64,
    /// Percent.
    pub efficiency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub total: f64,
    /// Percent versus the previous window.
    pub growth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEfficiency {
    pub average_stops_per_route: f64,
    pub average_distance_km: f64,
    /// Kilometres per litre.
    pub fuel_efficiency: f64,
    pub on_time_rate: f64,
    /// Percent saved by route optimization.
    pub optimization_savings: f64,
}

/// The whole analytics fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overview: Overview,
    #[serde(default)]
    pub delivery_stats: BTreeMap<Period, DeliveryStats>,
    #[serde(default)]
    pub driver_performance: Vec<DriverPerformance>,
    #[serde(default)]
    pub revenue_stats: BTreeMap<Period, RevenueStats>,
    #[serde(default)]
    pub route_efficiency: RouteEfficiency,
}
