//! Storage seam consumed by the access layer.
//!
//! [`TrackerStore`] exposes the record-level primitives the access layer
//! needs. It never checks ownership itself; callers fetch, check, then write.
//! Two implementations ship:
//!
//! - [`PgStore`] -- PostgreSQL through the repositories.
//! - [`MemoryStore`] -- process-local maps, used by tests.

mod memory;
mod pg;

use async_trait::async_trait;
use tracker_core::types::DbId;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::models::project::{CreateProject, Project, ProjectChanges};
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Errors surfaced by a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Holds the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    Duplicate(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return StoreError::Duplicate(constraint.to_string());
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Name of the unique index on `users.email`.
pub const UQ_USERS_EMAIL: &str = "uq_users_email";

/// Record-level storage for users, projects and tasks.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a user. Fails with [`StoreError::Duplicate`] on a taken email.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>>;

    // =========================================================================
    // Projects
    // =========================================================================

    /// Atomically count the owner's projects and insert a new one if fewer
    /// than `cap` exist. Returns `None` when the cap is reached.
    async fn create_project_within_cap(
        &self,
        owner_id: DbId,
        input: &CreateProject,
        cap: i64,
    ) -> StoreResult<Option<Project>>;

    async fn count_projects(&self, owner_id: DbId) -> StoreResult<i64>;

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;

    async fn list_projects(&self, owner_id: DbId) -> StoreResult<Vec<Project>>;

    async fn update_project(
        &self,
        id: DbId,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>>;

    /// Delete a project together with its tasks.
    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    // =========================================================================
    // Tasks
    // =========================================================================

    async fn create_task(&self, owner_id: DbId, input: &NewTask) -> StoreResult<Task>;

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>>;

    async fn list_tasks(&self, owner_id: DbId, project_id: Option<DbId>)
        -> StoreResult<Vec<Task>>;

    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>>;

    async fn delete_task(&self, id: DbId) -> StoreResult<bool>;

    // =========================================================================
    // Health
    // =========================================================================

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
