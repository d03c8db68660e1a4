//! Route task domain model.
//!
//! A task is one stop on a driver's route: picking a package up or dropping it
//! off. Tasks reference orders and drivers by id without referential checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

/// Whether the stop collects or drops off a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Pickup,
    Delivery,
}

/// Progress of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Assigned,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub const ALL: [Self; 4] = [Self::Assigned, Self::InProgress, Self::Completed, Self::Failed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the stop is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskLocation {
    pub address: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// Window in which the stop should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Evidence attached to a completed task (signature, photo reference, ...).
///
/// The payload is opaque and stored exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofOfDelivery(pub serde_json::Value);

/// One stop on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub order_id: String,
    pub driver_id: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub location: TaskLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_of_delivery: Option<ProofOfDelivery>,
}

impl Record for Task {
    type Id = String;
    const KIND: &'static str = "Task";

    fn id(&self) -> &String {
        &self.id
    }
}

/// Input for scheduling a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub order_id: String,
    pub driver_id: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub location: TaskLocation,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
    #[serde(default)]
    pub estimated_duration: Option<u32>,
}

/// Fields a task update may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub driver_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub location: Option<TaskLocation>,
    pub time_window: Option<Option<TimeWindow>>,
    pub estimated_duration: Option<Option<u32>>,
}

impl TaskPatch {
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(v) = self.driver_id {
            task.driver_id = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = self.location {
            task.location = v;
        }
        if let Some(v) = self.time_window {
            task.time_window = v;
        }
        if let Some(v) = self.estimated_duration {
            task.estimated_duration = v;
        }
    }
}
