//! Order resource.

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use super::collection::Collection;
use super::{Repository, ServiceContext};
use crate::domain::error::Result;
use crate::domain::{
    pricing, NewOrder, Order, OrderPatch, OrderStatus, PackageDetails, PostalAddress, PriceQuote,
};
use crate::storage::Store;

const LIST_DELAY: Duration = Duration::from_millis(300);
const GET_DELAY: Duration = Duration::from_millis(200);
const CREATE_DELAY: Duration = Duration::from_millis(400);
const UPDATE_DELAY: Duration = Duration::from_millis(300);
const DELETE_DELAY: Duration = Duration::from_millis(250);
const FILTER_DELAY: Duration = Duration::from_millis(200);
const QUOTE_DELAY: Duration = Duration::from_millis(500);

/// Provisional delivery estimate given to new orders.
pub const DELIVERY_ESTIMATE_HOURS: i64 = 2;

pub struct OrderService {
    orders: Collection<Order>,
    ctx: ServiceContext,
}

impl OrderService {
    #[must_use]
    pub fn new(store: Arc<dyn Store<Order>>, ctx: ServiceContext) -> Self {
        Self {
            orders: Collection::new(store, ctx.latency.clone()),
            ctx,
        }
    }

    /// Orders currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        self.orders
            .filter(FILTER_DELAY, |o| o.status == status)
            .instrument(tracing::debug_span!("orders_by_status", status = %status))
            .await
    }

    /// Quotes a delivery price after the quote delay.
    ///
    /// See [`pricing::quote`] for the formula.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the other service calls.
    pub async fn quote(
        &self,
        pickup: &PostalAddress,
        delivery: &PostalAddress,
        package: &PackageDetails,
    ) -> Result<PriceQuote> {
        self.orders.wait(QUOTE_DELAY).await;
        let quote = pricing::quote(pickup, delivery, package);
        tracing::debug!(
            weight = package.weight,
            urgent = package.urgent,
            total = quote.total,
            "price quoted"
        );
        Ok(quote)
    }
}

/// Tracking numbers are `TRK` followed by the whole id, zero-padded to at
/// least eight digits. Ids are unique, so tracking numbers are too.
fn tracking_number(id: i64) -> String {
    format!("TRK{id:08}")
}

#[async_trait]
impl Repository<Order> for OrderService {
    type New = NewOrder;
    type Patch = OrderPatch;

    async fn list(&self) -> Result<Vec<Order>> {
        self.orders.list(LIST_DELAY).await
    }

    async fn get(&self, id: &String) -> Result<Order> {
        self.orders.get(id, GET_DELAY).await
    }

    async fn create(&self, input: NewOrder) -> Result<Order> {
        self.orders.wait(CREATE_DELAY).await;

        let now = self.ctx.clock.now();
        let id = self.ctx.ids.next(now);

        let order = Order {
            id: id.to_string(),
            tracking_number: tracking_number(id),
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            customer_email: input.customer_email,
            pickup_address: input.pickup_address,
            delivery_address: input.delivery_address,
            pickup_notes: input.pickup_notes,
            delivery_notes: input.delivery_notes,
            package_details: input.package_details,
            price: input.price,
            status: OrderStatus::Pending,
            created_at: now,
            estimated_delivery: Some(now + ChronoDuration::hours(DELIVERY_ESTIMATE_HOURS)),
            scheduled_pickup: None,
            pickup_time: None,
            delivered_at: None,
            failed_at: None,
            failure_reason: None,
            assigned_driver: input.assigned_driver,
        };

        self.orders.insert(order)
    }

    async fn update(&self, id: &String, patch: OrderPatch) -> Result<Order> {
        let mut patch = Some(patch);
        self.orders
            .modify(id, UPDATE_DELAY, |order| {
                if let Some(patch) = patch.take() {
                    patch.apply_to(order);
                }
            })
            .await
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.orders.remove(id, DELETE_DELAY).await
    }
}
