//! Vehicle domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
}

/// A vehicle in the fleet register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub vehicle_type: String,
    pub license_plate: String,
    /// Kilograms.
    #[serde(default)]
    pub max_weight: f64,
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Vehicle {
    type Id = String;
    const KIND: &'static str = "Vehicle";

    fn id(&self) -> &String {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub name: String,
    pub vehicle_type: String,
    pub license_plate: String,
    #[serde(default)]
    pub max_weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub name: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub max_weight: Option<f64>,
    pub status: Option<VehicleStatus>,
}

impl VehiclePatch {
    pub fn apply_to(self, vehicle: &mut Vehicle) {
        if let Some(v) = self.name {
            vehicle.name = v;
        }
        if let Some(v) = self.vehicle_type {
            vehicle.vehicle_type = v;
        }
        if let Some(v) = self.license_plate {
            vehicle.license_plate = v;
        }
        if let Some(v) = self.max_weight {
            vehicle.max_weight = v;
        }
        if let Some(v) = self.status {
            vehicle.status = v;
        }
    }
}
