//! Shared CRUD core for the resource services.
//!
//! Every resource service wraps one [`Collection`]: a store plus the latency
//! strategy. Each operation first waits the simulated delay, then touches the
//! store once, so all mutation happens synchronously after the last
//! suspension point.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::{CourierError, Result};
use crate::domain::record::Record;
use crate::storage::{simulate, Latency, Store};

pub(crate) struct Collection<T: Record> {
    store: Arc<dyn Store<T>>,
    latency: Arc<dyn Latency>,
}

impl<T: Record> Collection<T> {
    pub(crate) fn new(store: Arc<dyn Store<T>>, latency: Arc<dyn Latency>) -> Self {
        Self { store, latency }
    }

    pub(crate) async fn wait(&self, baseline: Duration) {
        simulate(self.latency.as_ref(), baseline).await;
    }

    pub(crate) fn store(&self) -> &dyn Store<T> {
        self.store.as_ref()
    }

    pub(crate) async fn list(&self, baseline: Duration) -> Result<Vec<T>> {
        self.wait(baseline).await;
        self.store.all()
    }

    pub(crate) async fn filter<P>(&self, baseline: Duration, predicate: P) -> Result<Vec<T>>
    where
        P: Fn(&T) -> bool + Send,
    {
        self.wait(baseline).await;
        Ok(self.store.all()?.into_iter().filter(|r| predicate(r)).collect())
    }

    pub(crate) async fn get(&self, id: &T::Id, baseline: Duration) -> Result<T> {
        self.wait(baseline).await;
        self.store
            .find(id)?
            .ok_or_else(|| CourierError::not_found(T::KIND, id))
    }

    /// Stores a new record. Callers wait their create delay first and stamp
    /// the record afterwards.
    pub(crate) fn insert(&self, record: T) -> Result<T> {
        self.store.insert(record.clone())?;
        tracing::debug!(kind = T::KIND, id = %record.id(), "record created");
        Ok(record)
    }

    pub(crate) async fn modify<F>(&self, id: &T::Id, baseline: Duration, mut f: F) -> Result<T>
    where
        F: FnMut(&mut T) + Send,
    {
        self.wait(baseline).await;
        let updated = self
            .store
            .modify(id, &mut f)?
            .ok_or_else(|| CourierError::not_found(T::KIND, id))?;
        tracing::debug!(kind = T::KIND, id = %id, "record updated");
        Ok(updated)
    }

    pub(crate) async fn remove(&self, id: &T::Id, baseline: Duration) -> Result<()> {
        self.wait(baseline).await;
        self.store
            .remove(id)?
            .ok_or_else(|| CourierError::not_found(T::KIND, id))?;
        tracing::debug!(kind = T::KIND, id = %id, "record deleted");
        Ok(())
    }
}
