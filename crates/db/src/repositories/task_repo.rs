//! Repository for the `tasks` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::task::{NewTask, Task, TaskChanges};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, project_id, owner_id, \
                       completed_at, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task owned by `owner_id`, returning the created row.
    pub async fn create(pool: &PgPool, owner_id: DbId, input: &NewTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, status, project_id, owner_id, completed_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.project_id)
            .bind(owner_id)
            .bind(input.completed_at)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's tasks in creation order, optionally limited to one
    /// project.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE owner_id = $1 AND ($2::BIGINT IS NULL OR project_id = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(owner_id)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a task's editable columns and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                completed_at = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status.as_str())
            .bind(changes.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
