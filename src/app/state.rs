//! Page view-state primitives.
//!
//! Every page keeps its fetched data in a [`Loadable`] guarded by a
//! [`LoadTracker`]. A load takes a ticket before its first suspension point
//! and only writes its result back if the ticket is still current, so a
//! response that arrives after the page was unmounted, or after a newer load
//! started, is dropped instead of overwriting fresher state.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ── load ──► Loading ──► Ready(T)
//!                     │
//!                     └──────► Failed(message) ── retry ──► Loading
//! ```
//!
//! [`Notices`] collects the transient success and error notifications pages
//! raise along the way. The embedding shell drains and displays them.

use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::error::Result;

/// Fetch state of one page's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Message of a failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that a load was started; compared against the tracker when the
/// result comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Request-generation counter.
///
/// [`begin`](Self::begin) and [`unmount`](Self::unmount) both advance the
/// generation, which invalidates every ticket issued before.
#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: AtomicU64,
}

impl LoadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn unmount(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// A [`Loadable`] plus the tracker that guards writes to it.
#[derive(Debug)]
pub struct LoadSlot<T> {
    tracker: LoadTracker,
    value: Mutex<Loadable<T>>,
}

impl<T: Clone> LoadSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: LoadTracker::new(),
            value: Mutex::new(Loadable::Idle),
        }
    }

    /// Runs `fetch` and stores its outcome if no newer load or unmount
    /// happened meanwhile.
    ///
    /// On failure the error is stored as [`Loadable::Failed`] and `notice` is
    /// raised on `notices`. Returns `false` when the result was discarded as
    /// stale.
    pub async fn run<F>(&self, notices: &Notices, notice: &str, fetch: F) -> bool
    where
        F: Future<Output = Result<T>>,
    {
        let ticket = self.tracker.begin();
        *self.value.lock() = Loadable::Loading;

        let outcome = fetch.await;

        if !self.tracker.is_current(ticket) {
            tracing::debug!("discarding stale load result");
            return false;
        }

        *self.value.lock() = match outcome {
            Ok(value) => Loadable::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "page load failed");
                notices.error(notice);
                Loadable::Failed(e.to_string())
            }
        };
        true
    }

    /// Invalidates in-flight loads.
    pub fn unmount(&self) {
        self.tracker.unmount();
    }

    #[must_use]
    pub fn snapshot(&self) -> Loadable<T> {
        self.value.lock().clone()
    }

    /// Edits loaded data in place; a no-op unless the slot is ready.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        if let Some(value) = self.value.lock().ready_mut() {
            f(value);
        }
    }
}

impl<T: Clone> Default for LoadSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Shared queue of transient notifications.
///
/// Clones share one queue, so every page can raise into the same place.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: Arc<Mutex<Vec<Notice>>>,
}

impl Notices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        tracing::debug!(?level, %message, "notice raised");
        self.queue.lock().push(Notice { level, message });
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.lock())
    }
}
