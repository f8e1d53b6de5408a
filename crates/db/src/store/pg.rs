//! PostgreSQL-backed [`TrackerStore`].

use async_trait::async_trait;
use tracker_core::types::DbId;

use super::{StoreResult, TrackerStore};
use crate::models::project::{CreateProject, Project, ProjectChanges};
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::{ProjectRepo, TaskRepo, UserRepo};
use crate::DbPool;

/// Store that delegates to the sqlx repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TrackerStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn create_project_within_cap(
        &self,
        owner_id: DbId,
        input: &CreateProject,
        cap: i64,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::create_within_cap(&self.pool, owner_id, input, cap).await?)
    }

    async fn count_projects(&self, owner_id: DbId) -> StoreResult<i64> {
        Ok(ProjectRepo::count_by_owner(&self.pool, owner_id).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_projects(&self, owner_id: DbId) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn create_task(&self, owner_id: DbId, input: &NewTask) -> StoreResult<Task> {
        Ok(TaskRepo::create(&self.pool, owner_id, input).await?)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks(
        &self,
        owner_id: DbId,
        project_id: Option<DbId>,
    ) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::list_by_owner(&self.pool, owner_id, project_id).await?)
    }

    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(TaskRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
