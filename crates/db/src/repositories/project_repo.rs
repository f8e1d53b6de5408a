//! Repository for the `projects` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectChanges};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for `owner_id` unless the owner already has `cap`
    /// projects.
    ///
    /// The owner's `users` row is locked for the duration of the transaction,
    /// so concurrent creations for the same owner are serialized and cannot
    /// both slip under the cap. Returns `None` when the cap is reached.
    pub async fn create_within_cap(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
        cap: i64,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        let (owned,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        if owned >= cap {
            tracing::debug!(owner_id, owned, cap, "Project cap reached, skipping insert");
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO projects (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Count the projects owned by `owner_id`.
    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's projects in creation order.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a project's editable columns and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                description = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Its tasks go with it through the
    /// `ON DELETE CASCADE` foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
