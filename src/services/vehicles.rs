//! Vehicle resource.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::collection::Collection;
use super::{Repository, ServiceContext};
use crate::domain::error::Result;
use crate::domain::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
use crate::storage::Store;

const LIST_DELAY: Duration = Duration::from_millis(300);
const GET_DELAY: Duration = Duration::from_millis(200);
const CREATE_DELAY: Duration = Duration::from_millis(400);
const UPDATE_DELAY: Duration = Duration::from_millis(300);
const DELETE_DELAY: Duration = Duration::from_millis(250);

pub struct VehicleService {
    vehicles: Collection<Vehicle>,
    ctx: ServiceContext,
}

impl VehicleService {
    #[must_use]
    pub fn new(store: Arc<dyn Store<Vehicle>>, ctx: ServiceContext) -> Self {
        Self {
            vehicles: Collection::new(store, ctx.latency.clone()),
            ctx,
        }
    }
}

#[async_trait]
impl Repository<Vehicle> for VehicleService {
    type New = NewVehicle;
    type Patch = VehiclePatch;

    async fn list(&self) -> Result<Vec<Vehicle>> {
        self.vehicles.list(LIST_DELAY).await
    }

    async fn get(&self, id: &String) -> Result<Vehicle> {
        self.vehicles.get(id, GET_DELAY).await
    }

    async fn create(&self, input: NewVehicle) -> Result<Vehicle> {
        self.vehicles.wait(CREATE_DELAY).await;

        let now = self.ctx.clock.now();
        let vehicle = Vehicle {
            id: self.ctx.ids.next_string(now),
            name: input.name,
            vehicle_type: input.vehicle_type,
            license_plate: input.license_plate,
            max_weight: input.max_weight,
            status: VehicleStatus::Active,
            created_at: Some(now),
        };

        self.vehicles.insert(vehicle)
    }

    async fn update(&self, id: &String, patch: VehiclePatch) -> Result<Vehicle> {
        let mut patch = Some(patch);
        self.vehicles
            .modify(id, UPDATE_DELAY, |vehicle| {
                if let Some(patch) = patch.take() {
                    patch.apply_to(vehicle);
                }
            })
            .await
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.vehicles.remove(id, DELETE_DELAY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn new_vehicles_are_active() {
        let service = VehicleService::new(Arc::new(MemoryStore::default()), ServiceContext::immediate());
        let vehicle = service
            .create(NewVehicle {
                name: "Cargo Bike 3".into(),
                vehicle_type: "Bike".into(),
                license_plate: "BK-03".into(),
                max_weight: 40.0,
            })
            .await
            .unwrap();

        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert!(vehicle.created_at.is_some());

        let parked = service
            .update(&vehicle.id, VehiclePatch { status: Some(VehicleStatus::Inactive), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(parked.status, VehicleStatus::Inactive);
        assert_eq!(parked.license_plate, "BK-03");
    }
}
