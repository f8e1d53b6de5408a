//! Handlers for the `/projects` resource.
//!
//! Thin wrappers over [`ProjectAccess`]; ownership and the project cap are
//! enforced there.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracker_access::ProjectAccess;
use tracker_core::types::DbId;
use tracker_db::models::project::{CreateProject, Project, UpdateProject};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectAccess::create(state.store.as_ref(), auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectAccess::list(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectAccess::get(state.store.as_ref(), auth.user_id, id).await?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectAccess::update(state.store.as_ref(), auth.user_id, id, &input).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Also removes every task in the project.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let removed = ProjectAccess::delete(state.store.as_ref(), auth.user_id, id).await?;
    Ok(Json(MessageResponse::new(removed.message())))
}
