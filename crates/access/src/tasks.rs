//! Task operations.
//!
//! A task always lives under a project owned by the same user. Creating a
//! task under someone else's project is `Forbidden`; every other foreign
//! access is indistinguishable from a missing record.

use chrono::Utc;
use tracker_core::error::CoreError;
use tracker_core::ownership::{ensure_owned, ensure_parent_owned};
use tracker_core::patch::merge_text;
use tracker_core::project::PROJECT_ENTITY;
use tracker_core::task::{completed_at_after, initial_completed_at, TASK_ENTITY};
use tracker_core::types::DbId;
use tracker_core::validation::validate_input;
use tracker_db::models::task::{CreateTask, NewTask, Task, TaskChanges, UpdateTask};
use tracker_db::TrackerStore;

use crate::error::AccessResult;
use crate::Removed;

/// Message returned when adding a task to a project the requester does not own.
pub const FOREIGN_PROJECT_DENIAL: &str = "Not authorized to add tasks to this project";

/// Ownership-scoped task operations.
pub struct TaskAccess;

impl TaskAccess {
    /// Create a task under one of the requester's projects.
    pub async fn create(
        store: &dyn TrackerStore,
        requester: DbId,
        input: &CreateTask,
    ) -> AccessResult<Task> {
        validate_input(input)?;
        let Some(project_id) = input.project_id else {
            return Err(CoreError::Validation("Project is required".to_string()).into());
        };

        let project = store.find_project(project_id).await?;
        ensure_parent_owned(
            project,
            requester,
            PROJECT_ENTITY,
            project_id,
            FOREIGN_PROJECT_DENIAL,
        )
        .inspect_err(|e| {
            if matches!(e, CoreError::Forbidden(_)) {
                tracing::warn!(project_id, user_id = requester, "Task create on foreign project");
            }
        })?;

        let status = input.status.unwrap_or_default();
        let new_task = NewTask {
            title: input.title.clone(),
            description: input.description.clone(),
            status,
            project_id,
            completed_at: initial_completed_at(status, Utc::now()),
        };
        let task = store.create_task(requester, &new_task).await?;

        tracing::info!(task_id = task.id, project_id, user_id = requester, "Task created");
        Ok(task)
    }

    /// The requester's tasks, optionally narrowed to one of their projects.
    ///
    /// Filtering by a project the requester does not own is `NotFound`.
    pub async fn list(
        store: &dyn TrackerStore,
        requester: DbId,
        project_id: Option<DbId>,
    ) -> AccessResult<Vec<Task>> {
        if let Some(project_id) = project_id {
            let project = store.find_project(project_id).await?;
            ensure_owned(project, requester, PROJECT_ENTITY, project_id)?;
        }
        Ok(store.list_tasks(requester, project_id).await?)
    }

    pub async fn get(store: &dyn TrackerStore, requester: DbId, id: DbId) -> AccessResult<Task> {
        let task = store.find_task(id).await?;
        Ok(ensure_owned(task, requester, TASK_ENTITY, id)?)
    }

    /// Apply the provided fields of `input`.
    ///
    /// Moving into `Completed` stamps `completed_at`; moving out clears it.
    pub async fn update(
        store: &dyn TrackerStore,
        requester: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> AccessResult<Task> {
        let task = Self::get(store, requester, id).await?;

        let changes = TaskChanges {
            title: merge_text(input.title.as_deref(), &task.title),
            description: merge_text(input.description.as_deref(), &task.description),
            status: input.status.unwrap_or(task.status),
            completed_at: completed_at_after(task.status, task.completed_at, input.status, Utc::now()),
        };

        let updated = store
            .update_task(id, &changes)
            .await?
            .ok_or(CoreError::NotFound {
                entity: TASK_ENTITY,
                id,
            })?;

        tracing::info!(task_id = id, status = %updated.status, user_id = requester, "Task updated");
        Ok(updated)
    }

    pub async fn delete(store: &dyn TrackerStore, requester: DbId, id: DbId) -> AccessResult<Removed> {
        Self::get(store, requester, id).await?;

        if !store.delete_task(id).await? {
            return Err(CoreError::NotFound {
                entity: TASK_ENTITY,
                id,
            }
            .into());
        }

        tracing::info!(task_id = id, user_id = requester, "Task deleted");
        Ok(Removed {
            entity: TASK_ENTITY,
            id,
        })
    }
}
