//! Service contracts exercised through the public API.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use courier_ops::domain::{
    Address, Driver, DriverPatch, DriverStatus, NewAddress, NewOrder, NewVehicle, Order, OrderPatch, OrderStatus,
    ProofOfDelivery, Record, Task, TaskStatus, Vehicle, VehiclePatch,
};
use courier_ops::infrastructure::{Clock, FixedClock};
use courier_ops::storage::{NetworkLatency, NoLatency};
use courier_ops::{CourierError, Fixtures, Repository, ServiceContext, Services};

fn services() -> Services {
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    let ctx = ServiceContext::new(Arc::new(NoLatency), Arc::new(clock));
    Services::from_fixtures(Fixtures::bundled().unwrap(), &ctx)
}

async fn assert_missing_delete_is_harmless<T, R>(repo: &R, missing: T::Id)
where
    T: Record + PartialEq + Debug,
    R: Repository<T>,
{
    let before = repo.list().await.unwrap();

    let err = repo.delete(&missing).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");
    assert_eq!(err.to_string(), format!("{} not found", T::KIND));

    assert_eq!(repo.list().await.unwrap(), before);
}

#[tokio::test]
async fn deleting_unknown_ids_fails_without_side_effects() {
    let services = services();

    assert_missing_delete_is_harmless::<Order, _>(services.orders.as_ref(), "nope".to_string()).await;
    assert_missing_delete_is_harmless::<Driver, _>(services.drivers.as_ref(), "nope".to_string()).await;
    assert_missing_delete_is_harmless::<Task, _>(services.tasks.as_ref(), "nope".to_string()).await;
    assert_missing_delete_is_harmless::<Vehicle, _>(services.vehicles.as_ref(), "nope".to_string()).await;
    assert_missing_delete_is_harmless::<Address, _>(services.settings.addresses(), 404_i64).await;
}

#[tokio::test]
async fn updates_are_visible_to_later_reads() {
    let services = services();

    let order = services
        .orders
        .update(&"2".to_string(), OrderPatch::status(OrderStatus::Delivered))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert_eq!(services.orders.get(&"2".to_string()).await.unwrap(), order);

    let driver = services
        .drivers
        .update(&"5".to_string(), DriverPatch::status(DriverStatus::Available))
        .await
        .unwrap();
    assert_eq!(services.drivers.get(&"5".to_string()).await.unwrap(), driver);

    let vehicle = services
        .vehicles
        .update(
            &"1".to_string(),
            VehiclePatch {
                name: Some("Van 1 (refit)".to_string()),
                ..VehiclePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(vehicle.name, "Van 1 (refit)");
    assert_eq!(services.vehicles.get(&"1".to_string()).await.unwrap(), vehicle);
}

#[tokio::test]
async fn updating_unknown_ids_is_not_found() {
    let services = services();
    let err = services
        .orders
        .update(&"missing".to_string(), OrderPatch::status(OrderStatus::Delivered))
        .await
        .unwrap_err();
    assert!(matches!(err, CourierError::NotFound { kind: "Order", .. }));
}

#[tokio::test]
async fn at_most_one_address_is_default() {
    let services = services();
    let book = services.settings.addresses();

    let created = book
        .create(NewAddress {
            label: "Warehouse".to_string(),
            street: "500 Terry Francois Blvd".to_string(),
            city: "San Francisco".to_string(),
            is_default: true,
            ..NewAddress::default()
        })
        .await
        .unwrap();

    let all = book.list().await.unwrap();
    let defaults: Vec<_> = all.iter().filter(|a| a.is_default).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, created.id);
}

#[tokio::test]
async fn completing_a_task_records_proof_and_time() {
    let services = services();
    let assigned = services
        .tasks
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.status == TaskStatus::Assigned)
        .unwrap();

    let proof = ProofOfDelivery(serde_json::json!({ "signature": "N. Brooks" }));
    let done = services.tasks.complete(&assigned.id, proof.clone()).await.unwrap();

    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.completed_at, Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()));
    assert_eq!(done.proof_of_delivery, Some(proof));
}

fn assert_waited(start: tokio::time::Instant, ms: u64) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(ms) && elapsed < Duration::from_millis(ms + 10),
        "waited {elapsed:?}, expected {ms}ms"
    );
}

#[tokio::test(start_paused = true)]
async fn calls_wait_their_baseline_delay() {
    let ctx = ServiceContext::new(
        Arc::new(NetworkLatency::default()),
        Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())),
    );
    let services = Services::from_fixtures(Fixtures::bundled().unwrap(), &ctx);

    let start = tokio::time::Instant::now();
    services.orders.list().await.unwrap();
    assert_waited(start, 300);

    let start = tokio::time::Instant::now();
    let _ = services.drivers.get(&"missing".to_string()).await;
    assert_waited(start, 200);
}

/// Wall clock that follows tokio's paused time.
#[derive(Debug)]
struct PausedClock {
    base: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl Clock for PausedClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.started.elapsed()).unwrap();
        self.base + elapsed
    }
}

#[tokio::test(start_paused = true)]
async fn created_records_are_stamped_after_the_delay() {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let clock = PausedClock {
        base,
        started: tokio::time::Instant::now(),
    };
    let ctx = ServiceContext::new(Arc::new(NetworkLatency::default()), Arc::new(clock));
    let services = Services::from_fixtures(Fixtures::bundled().unwrap(), &ctx);

    let order = services
        .orders
        .create(NewOrder {
            customer_name: "Dana Whitfield".to_string(),
            customer_phone: "(415) 555-0110".to_string(),
            price: 12.0,
            ..NewOrder::default()
        })
        .await
        .unwrap();
    assert!(order.created_at >= base + chrono::Duration::milliseconds(400));
    assert_eq!(order.id, order.created_at.timestamp_millis().to_string());

    let before = ctx.clock.now();
    let vehicle = services
        .vehicles
        .create(NewVehicle {
            name: "Van 9".to_string(),
            vehicle_type: "Van".to_string(),
            license_plate: "9VAN999".to_string(),
            max_weight: 400.0,
        })
        .await
        .unwrap();
    assert!(vehicle.created_at.unwrap() >= before + chrono::Duration::milliseconds(400));
}
