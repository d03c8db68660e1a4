//! Route board: tasks grouped by driver.

use futures_util::try_join;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::app::state::{LoadSlot, Loadable, Notices};
use crate::domain::error::Result;
use crate::domain::{Driver, Task, TaskStatus};
use crate::services::{Repository, Services};
use crate::ui::{count_by, EmptyState, StatusCount};

/// Group name for tasks whose driver is not on the roster.
pub const UNKNOWN_DRIVER: &str = "Unknown Driver";

/// Which driver's tasks the board shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DriverFilter {
    #[default]
    All,
    Driver(String),
}

impl DriverFilter {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Driver(id) => &task.driver_id == id,
        }
    }
}

impl FromStr for DriverFilter {
    type Err = std::convert::Infallible;

    /// `"all"` selects every driver; anything else is a driver id.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "all" { Self::All } else { Self::Driver(s.to_string()) })
    }
}

impl fmt::Display for DriverFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Driver(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutesData {
    pub tasks: Vec<Task>,
    pub drivers: Vec<Driver>,
}

impl RoutesData {
    #[must_use]
    pub fn driver_name(&self, driver_id: &str) -> &str {
        self.drivers
            .iter()
            .find(|d| d.id == driver_id)
            .map_or(UNKNOWN_DRIVER, |d| d.name.as_str())
    }
}

/// Tasks of one driver, in list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    pub driver_name: String,
    pub tasks: Vec<Task>,
}

pub struct RoutesPage {
    services: Services,
    notices: Notices,
    data: LoadSlot<RoutesData>,
    filter: Mutex<DriverFilter>,
}

impl RoutesPage {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            data: LoadSlot::new(),
            filter: Mutex::new(DriverFilter::All),
        }
    }

    pub async fn load(&self) {
        self.data
            .run(&self.notices, "Failed to load routes data", fetch(&self.services))
            .await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    pub fn unmount(&self) {
        self.data.unmount();
    }

    #[must_use]
    pub fn state(&self) -> Loadable<RoutesData> {
        self.data.snapshot()
    }

    pub fn select_driver(&self, filter: DriverFilter) {
        *self.filter.lock() = filter;
    }

    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        let filter = self.filter.lock().clone();
        self.data
            .snapshot()
            .ready()
            .map(|data| data.tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
            .unwrap_or_default()
    }

    /// Visible tasks grouped by driver name, groups in order of first
    /// appearance. Each group is sorted by time window start; tasks without a
    /// window come first.
    #[must_use]
    pub fn groups(&self) -> Vec<RouteGroup> {
        let filter = self.filter.lock().clone();
        let state = self.data.snapshot();
        let Some(data) = state.ready() else {
            return Vec::new();
        };

        let mut groups: Vec<RouteGroup> = Vec::new();
        for task in data.tasks.iter().filter(|t| filter.matches(t)) {
            let name = data.driver_name(&task.driver_id);
            match groups.iter_mut().find(|g| g.driver_name == name) {
                Some(group) => group.tasks.push(task.clone()),
                None => groups.push(RouteGroup {
                    driver_name: name.to_string(),
                    tasks: vec![task.clone()],
                }),
            }
        }
        for group in &mut groups {
            group.tasks.sort_by_key(|t| t.time_window.map(|w| w.start));
        }
        groups
    }

    /// Per-status totals over every loaded task, whichever driver is
    /// selected.
    #[must_use]
    pub fn status_counts(&self) -> Vec<StatusCount<TaskStatus>> {
        self.data
            .snapshot()
            .ready()
            .map(|data| count_by(&data.tasks, &TaskStatus::ALL, |t| t.status))
            .unwrap_or_default()
    }

    /// Starts an assigned task and refreshes it on the board.
    pub async fn start_task(&self, task_id: &str) {
        match self.services.tasks.start(task_id).await {
            Ok(started) => {
                self.data.update(|data| {
                    if let Some(task) = data.tasks.iter_mut().find(|t| t.id == started.id) {
                        *task = started;
                    }
                });
                self.notices.success("Task started");
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "failed to start task");
                self.notices.error("Failed to start task");
            }
        }
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        let state = self.data.snapshot();
        let data = state.ready()?;
        data.tasks.is_empty().then(|| {
            EmptyState::new(
                "No routes found",
                "Routes will appear here when orders are assigned to drivers",
            )
            .with_action("View Orders")
        })
    }
}

/// Whether the board offers a "Start" action for `task`.
#[must_use]
pub fn can_start(task: &Task) -> bool {
    task.status == TaskStatus::Assigned
}

async fn fetch(services: &Services) -> Result<RoutesData> {
    let (tasks, drivers) = try_join!(services.tasks.list(), services.drivers.list())?;
    Ok(RoutesData { tasks, drivers })
}
