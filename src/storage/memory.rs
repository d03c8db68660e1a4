//! In-memory store.
//!
//! Records live in a `Vec` behind a `parking_lot::RwLock` for the lifetime of
//! the store. Nothing is written anywhere; dropping the store discards every
//! mutation, and a new store built from the same fixture starts from the same
//! baseline.

use parking_lot::RwLock;

use crate::domain::error::Result;
use crate::domain::record::Record;
use crate::storage::backend::Store;

/// `Vec`-backed [`Store`].
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryStore<T> {
    /// Creates a store seeded with `records`.
    #[must_use]
    pub fn seeded(records: Vec<T>) -> Self {
        tracing::debug!(kind = T::KIND, count = records.len(), "seeding memory store");
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T: Record> Store<T> for MemoryStore<T> {
    fn all(&self) -> Result<Vec<T>> {
        Ok(self.records.read().clone())
    }

    fn find(&self, id: &T::Id) -> Result<Option<T>> {
        Ok(self.records.read().iter().find(|r| r.id() == id).cloned())
    }

    fn insert(&self, record: T) -> Result<()> {
        self.records.write().push(record);
        Ok(())
    }

    fn modify(&self, id: &T::Id, f: &mut dyn FnMut(&mut T)) -> Result<Option<T>> {
        let mut records = self.records.write();
        Ok(records.iter_mut().find(|r| r.id() == id).map(|record| {
            f(record);
            record.clone()
        }))
    }

    fn apply(&self, f: &mut dyn FnMut(&mut Vec<T>) -> Result<()>) -> Result<()> {
        let mut records = self.records.write();
        let mut working = records.clone();
        f(&mut working)?;
        *records = working;
        Ok(())
    }

    fn remove(&self, id: &T::Id) -> Result<Option<T>> {
        let mut records = self.records.write();
        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }
}
