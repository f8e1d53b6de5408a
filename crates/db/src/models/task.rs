//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::ownership::Owned;
use tracker_core::patch::blank_as_none;
use tracker_core::task::TaskStatus;
use tracker_core::types::{DbId, Timestamp};
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub project_id: DbId,
    pub owner_id: DbId,
    /// Set exactly when `status` is `Completed`.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Task {
    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for creating a new task.
///
/// `project_id` also accepts the `projectId` and `project` keys.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Title is required"
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Description is required"
    ))]
    pub description: String,
    /// Defaults to `To Do` if omitted.
    pub status: Option<TaskStatus>,
    #[serde(alias = "projectId", alias = "project")]
    pub project_id: Option<DbId>,
}

/// Fully resolved values for inserting a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub project_id: DbId,
    pub completed_at: Option<Timestamp>,
}

/// DTO for updating an existing task. Blank or missing fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<TaskStatus>,
}

/// Column values written by a task update.
#[derive(Debug, Clone)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub completed_at: Option<Timestamp>,
}

/// Query parameters for `GET /tasks`. An empty `project_id` means no filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    #[serde(alias = "projectId", default, deserialize_with = "blank_as_none")]
    pub project_id: Option<DbId>,
}
