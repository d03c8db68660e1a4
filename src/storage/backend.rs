//! Store abstraction behind every resource service.
//!
//! This module defines the [`Store`] trait that the resource services are
//! written against. Services receive an `Arc<dyn Store<T>>`, so a test can hand
//! each service its own isolated collection instead of sharing process-wide
//! state.
//!
//! The trait is deliberately small: it maps directly onto what the services
//! need (list, lookup, insert, in-place mutation, removal) rather than being a
//! general query interface. Filtering happens in the services over `all()`.

use crate::domain::error::Result;
use crate::domain::record::Record;

/// A mutable collection of records of one kind.
///
/// Every method runs to completion under a single lock acquisition, so a
/// mutation is never observed half-applied by another caller.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): `Vec`-backed, seeded from fixtures
///
/// # Examples
///
/// ```
/// use courier_ops::storage::{MemoryStore, Store};
/// use courier_ops::domain::{Vehicle, VehicleStatus};
///
/// let store = MemoryStore::<Vehicle>::default();
/// store.insert(Vehicle {
///     id: "v1".into(),
///     name: "Van 1".into(),
///     vehicle_type: "Van".into(),
///     license_plate: "7ABC123".into(),
///     max_weight: 800.0,
///     status: VehicleStatus::Active,
///     created_at: None,
/// })?;
/// assert_eq!(store.all()?.len(), 1);
/// # Ok::<(), courier_ops::CourierError>(())
/// ```
pub trait Store<T: Record>: Send + Sync {
    /// Returns a copy of every record, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn all(&self) -> Result<Vec<T>>;

    /// Returns a copy of the record with `id`, or `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn find(&self, id: &T::Id) -> Result<Option<T>>;

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&self, record: T) -> Result<()>;

    /// Mutates the record with `id` in place and returns the updated copy.
    ///
    /// Returns `Ok(None)` without calling `f` when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn modify(&self, id: &T::Id, f: &mut dyn FnMut(&mut T)) -> Result<Option<T>>;

    /// Runs `f` against the whole collection as one atomic mutation.
    ///
    /// Used where an operation must touch several records together, such as
    /// moving the default flag between saved addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails, or whatever `f` returns.
    fn apply(&self, f: &mut dyn FnMut(&mut Vec<T>) -> Result<()>) -> Result<()>;

    /// Removes the record with `id` and returns it, or `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove(&self, id: &T::Id) -> Result<Option<T>>;
}
