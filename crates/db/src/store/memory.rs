//! In-memory [`TrackerStore`] for tests.
//!
//! All tables sit behind one lock, so compound operations (cap check plus
//! insert, project delete plus task cascade) are atomic just like their
//! PostgreSQL counterparts.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracker_core::types::DbId;

use super::{StoreError, StoreResult, TrackerStore, UQ_USERS_EMAIL};
use crate::models::project::{CreateProject, Project, ProjectChanges};
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::models::user::{CreateUser, UpdateUser, User};

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    projects: BTreeMap<DbId, Project>,
    tasks: BTreeMap<DbId, Task>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

/// Process-local store. Ids are assigned from one shared sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackerStore for MemoryStore {
    // =========================================================================
    // Users
    // =========================================================================

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(StoreError::Duplicate(UQ_USERS_EMAIL.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: tables.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            country: input.country.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &input.email {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::Duplicate(UQ_USERS_EMAIL.to_string()));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            user.name = name.clone();
        }
        if let Some(email) = &input.email {
            user.email = email.clone();
        }
        if let Some(country) = &input.country {
            user.country = country.clone();
        }
        if let Some(hash) = &input.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    // =========================================================================
    // Projects
    // =========================================================================

    async fn create_project_within_cap(
        &self,
        owner_id: DbId,
        input: &CreateProject,
        cap: i64,
    ) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .count() as i64;
        if owned >= cap {
            return Ok(None);
        }

        let now = Utc::now();
        let project = Project {
            id: tables.allocate_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.projects.insert(project.id, project.clone());
        Ok(Some(project))
    }

    async fn count_projects(&self, owner_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .count() as i64)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables.projects.get(&id).cloned())
    }

    async fn list_projects(&self, owner_id: DbId) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_project(
        &self,
        id: DbId,
        changes: &ProjectChanges,
    ) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        let Some(project) = tables.projects.get_mut(&id) else {
            return Ok(None);
        };
        project.title = changes.title.clone();
        project.description = changes.description.clone();
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, t| t.project_id != id);
        Ok(true)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    async fn create_task(&self, owner_id: DbId, input: &NewTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let task = Task {
            id: tables.allocate_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            project_id: input.project_id,
            owner_id,
            completed_at: input.completed_at,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn list_tasks(
        &self,
        owner_id: DbId,
        project_id: Option<DbId>,
    ) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .filter(|t| project_id.map_or(true, |p| t.project_id == p))
            .cloned()
            .collect())
    }

    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.title = changes.title.clone();
        task.description = changes.description.clone();
        task.status = changes.status;
        task.completed_at = changes.completed_at;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.remove(&id).is_some())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
