//! Route task resource.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

use super::collection::Collection;
use super::{Repository, ServiceContext};
use crate::domain::error::Result;
use crate::domain::{NewTask, ProofOfDelivery, Task, TaskPatch, TaskStatus};
use crate::storage::Store;

const LIST_DELAY: Duration = Duration::from_millis(300);
const GET_DELAY: Duration = Duration::from_millis(200);
const CREATE_DELAY: Duration = Duration::from_millis(400);
const UPDATE_DELAY: Duration = Duration::from_millis(300);
const DELETE_DELAY: Duration = Duration::from_millis(250);
const BY_DRIVER_DELAY: Duration = Duration::from_millis(200);
const COMPLETE_DELAY: Duration = Duration::from_millis(400);

pub struct TaskService {
    tasks: Collection<Task>,
    ctx: ServiceContext,
}

impl TaskService {
    #[must_use]
    pub fn new(store: Arc<dyn Store<Task>>, ctx: ServiceContext) -> Self {
        Self {
            tasks: Collection::new(store, ctx.latency.clone()),
            ctx,
        }
    }

    /// Tasks assigned to `driver_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn by_driver(&self, driver_id: &str) -> Result<Vec<Task>> {
        self.tasks
            .filter(BY_DRIVER_DELAY, |t| t.driver_id == driver_id)
            .await
    }

    /// Marks a task completed, stamps `completed_at` and stores the proof of
    /// delivery unchanged.
    ///
    /// Any task can be completed, whatever its current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown tasks.
    pub async fn complete(&self, id: &str, proof: ProofOfDelivery) -> Result<Task> {
        let mut proof = Some(proof);
        let clock = self.ctx.clock.clone();
        self.tasks
            .modify(&id.to_string(), COMPLETE_DELAY, move |task| {
                if task.status != TaskStatus::Assigned && task.status != TaskStatus::InProgress {
                    tracing::warn!(task_id = %task.id, status = %task.status, "completing task from unexpected status");
                }
                task.status = TaskStatus::Completed;
                task.completed_at = Some(clock.now());
                task.proof_of_delivery = proof.take();
            })
            .instrument(tracing::debug_span!("task_complete", task_id = %id))
            .await
    }

    /// Moves a task to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown tasks.
    pub async fn start(&self, id: &str) -> Result<Task> {
        self.update(&id.to_string(), TaskPatch::status(TaskStatus::InProgress))
            .await
    }
}

#[async_trait]
impl Repository<Task> for TaskService {
    type New = NewTask;
    type Patch = TaskPatch;

    async fn list(&self) -> Result<Vec<Task>> {
        self.tasks.list(LIST_DELAY).await
    }

    async fn get(&self, id: &String) -> Result<Task> {
        self.tasks.get(id, GET_DELAY).await
    }

    async fn create(&self, input: NewTask) -> Result<Task> {
        self.tasks.wait(CREATE_DELAY).await;

        let now = self.ctx.clock.now();
        let task = Task {
            id: self.ctx.ids.next_string(now),
            order_id: input.order_id,
            driver_id: input.driver_id,
            kind: input.kind,
            status: TaskStatus::Assigned,
            location: input.location,
            time_window: input.time_window,
            estimated_duration: input.estimated_duration,
            created_at: Some(now),
            completed_at: None,
            proof_of_delivery: None,
        };

        self.tasks.insert(task)
    }

    async fn update(&self, id: &String, patch: TaskPatch) -> Result<Task> {
        let mut patch = Some(patch);
        self.tasks
            .modify(id, UPDATE_DELAY, |task| {
                if let Some(patch) = patch.take() {
                    patch.apply_to(task);
                }
            })
            .await
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.tasks.remove(id, DELETE_DELAY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskKind, TaskLocation};
    use crate::infrastructure::{Clock, FixedClock};
    use crate::storage::{MemoryStore, NoLatency};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn service() -> (TaskService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()));
        let ctx = ServiceContext::new(Arc::new(NoLatency), clock.clone());
        (TaskService::new(Arc::new(MemoryStore::default()), ctx), clock)
    }

    fn stop(driver: &str) -> NewTask {
        NewTask {
            order_id: "1".into(),
            driver_id: driver.into(),
            kind: TaskKind::Delivery,
            location: TaskLocation { address: "200 Mission St".into(), lat: 37.79, lng: -122.39 },
            time_window: None,
            estimated_duration: Some(15),
        }
    }

    #[tokio::test]
    async fn new_tasks_are_assigned() {
        let (service, _clock) = service();
        let task = service.create(stop("d1")).await.unwrap();
        assert_eq!(task.status, TaskStatus::Assigned);
        assert!(task.completed_at.is_none());
    }

    #[tokio::test]
    async fn complete_stores_proof_unchanged() {
        let (service, clock) = service();
        let task = service.create(stop("d1")).await.unwrap();
        let proof = ProofOfDelivery(json!({ "signature": "sig-8841", "photo": "pod/8841.jpg", "notes": null }));

        let done = service.complete(&task.id, proof.clone()).await.unwrap();

        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at, Some(clock.now()));
        assert_eq!(done.proof_of_delivery, Some(proof));
    }

    #[tokio::test]
    async fn completion_is_accepted_from_any_status() {
        let (service, _clock) = service();
        let task = service.create(stop("d1")).await.unwrap();
        service.update(&task.id, TaskPatch::status(TaskStatus::Failed)).await.unwrap();

        let done = service.complete(&task.id, ProofOfDelivery(json!("retry"))).await.unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn start_moves_to_in_progress() {
        let (service, _clock) = service();
        let task = service.create(stop("d1")).await.unwrap();
        assert_eq!(service.start(&task.id).await.unwrap().status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn by_driver_filters_on_driver_reference() {
        let (service, _clock) = service();
        service.create(stop("d1")).await.unwrap();
        service.create(stop("d2")).await.unwrap();
        service.create(stop("d1")).await.unwrap();

        assert_eq!(service.by_driver("d1").await.unwrap().len(), 2);
        assert!(service.by_driver("d9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completing_unknown_task_fails() {
        let (service, _clock) = service();
        let err = service.complete("missing", ProofOfDelivery(json!({}))).await.unwrap_err();
        assert_eq!(err.to_string(), "Task not found");
    }
}
