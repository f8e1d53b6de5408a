//! Project operations.

use tracker_core::error::CoreError;
use tracker_core::ownership::ensure_owned;
use tracker_core::patch::merge_text;
use tracker_core::project::{project_limit_error, MAX_PROJECTS_PER_USER, PROJECT_ENTITY};
use tracker_core::types::DbId;
use tracker_core::validation::validate_input;
use tracker_db::models::project::{CreateProject, Project, ProjectChanges, UpdateProject};
use tracker_db::TrackerStore;

use crate::error::AccessResult;
use crate::Removed;

/// Ownership-scoped project operations.
pub struct ProjectAccess;

impl ProjectAccess {
    /// Create a project owned by `requester`.
    ///
    /// Fails with `Validation` for a blank title/description and with
    /// `LimitExceeded` once the requester already owns the maximum number of
    /// projects. The count and insert happen atomically in the store.
    pub async fn create(
        store: &dyn TrackerStore,
        requester: DbId,
        input: &CreateProject,
    ) -> AccessResult<Project> {
        validate_input(input)?;

        let Some(project) = store
            .create_project_within_cap(requester, input, MAX_PROJECTS_PER_USER)
            .await?
        else {
            tracing::warn!(user_id = requester, "Project cap reached");
            return Err(project_limit_error().into());
        };

        tracing::info!(project_id = project.id, user_id = requester, "Project created");
        Ok(project)
    }

    /// All projects owned by `requester`.
    pub async fn list(store: &dyn TrackerStore, requester: DbId) -> AccessResult<Vec<Project>> {
        Ok(store.list_projects(requester).await?)
    }

    /// Fetch one project. Missing and foreign projects are both `NotFound`.
    pub async fn get(store: &dyn TrackerStore, requester: DbId, id: DbId) -> AccessResult<Project> {
        let project = store.find_project(id).await?;
        Ok(ensure_owned(project, requester, PROJECT_ENTITY, id)?)
    }

    /// Apply the provided (present and non-blank) fields of `input`.
    pub async fn update(
        store: &dyn TrackerStore,
        requester: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> AccessResult<Project> {
        let project = Self::get(store, requester, id).await?;

        let changes = ProjectChanges {
            title: merge_text(input.title.as_deref(), &project.title),
            description: merge_text(input.description.as_deref(), &project.description),
        };

        let updated = store
            .update_project(id, &changes)
            .await?
            .ok_or(CoreError::NotFound {
                entity: PROJECT_ENTITY,
                id,
            })?;

        tracing::info!(project_id = id, user_id = requester, "Project updated");
        Ok(updated)
    }

    /// Delete a project and, with it, all of its tasks.
    pub async fn delete(store: &dyn TrackerStore, requester: DbId, id: DbId) -> AccessResult<Removed> {
        Self::get(store, requester, id).await?;

        if !store.delete_project(id).await? {
            return Err(CoreError::NotFound {
                entity: PROJECT_ENTITY,
                id,
            }
            .into());
        }

        tracing::info!(project_id = id, user_id = requester, "Project deleted");
        Ok(Removed {
            entity: PROJECT_ENTITY,
            id,
        })
    }
}
