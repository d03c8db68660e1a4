//! Driver domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

/// Rating given to a newly registered driver.
pub const INITIAL_RATING: f64 = 5.0;

/// Availability of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    Busy,
    Offline,
}

impl DriverStatus {
    pub const ALL: [Self; 3] = [Self::Available, Self::Busy, Self::Offline];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load currently carried versus what the vehicle can take, in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub current_load: f64,
    pub max_weight: f64,
}

/// Running totals for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TodayStats {
    pub deliveries: u32,
    pub earnings: f64,
}

/// A point on the map, optionally with a street address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A courier on the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub status: DriverStatus,
    pub rating: f64,
    #[serde(default)]
    pub total_deliveries: u32,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub today_stats: TodayStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location_update: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Driver {
    type Id = String;
    const KIND: &'static str = "Driver";

    fn id(&self) -> &String {
        &self.id
    }
}

/// Input for registering a driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub vehicle_type: String,
    pub license_plate: String,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub current_location: Option<GeoPoint>,
}

/// Fields a driver update may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub status: Option<DriverStatus>,
    pub rating: Option<f64>,
    pub capacity: Option<Capacity>,
    pub today_stats: Option<TodayStats>,
}

impl DriverPatch {
    #[must_use]
    pub fn status(status: DriverStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, driver: &mut Driver) {
        if let Some(v) = self.name {
            driver.name = v;
        }
        if let Some(v) = self.phone {
            driver.phone = v;
        }
        if let Some(v) = self.email {
            driver.email = v;
        }
        if let Some(v) = self.vehicle_type {
            driver.vehicle_type = v;
        }
        if let Some(v) = self.license_plate {
            driver.license_plate = v;
        }
        if let Some(v) = self.status {
            driver.status = v;
        }
        if let Some(v) = self.rating {
            driver.rating = v;
        }
        if let Some(v) = self.capacity {
            driver.capacity = v;
        }
        if let Some(v) = self.today_stats {
            driver.today_stats = v;
        }
    }
}
