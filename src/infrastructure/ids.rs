//! Timestamp-derived record identifiers.
//!
//! New records are identified by the creation time in Unix milliseconds. When
//! two records are created within the same millisecond, or the clock steps
//! backwards, the generator hands out the next integer after the last issued
//! id so identifiers stay unique and increasing.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<i64>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next numeric identifier for a record created at `now`.
    pub fn next(&self, now: DateTime<Utc>) -> i64 {
        let mut last = self.last.lock();
        let candidate = now.timestamp_millis();
        let id = if candidate > *last { candidate } else { *last + 1 };
        *last = id;
        id
    }

    /// [`next`](Self::next) rendered as a decimal string.
    pub fn next_string(&self, now: DateTime<Utc>) -> String {
        self.next(now).to_string()
    }
}
