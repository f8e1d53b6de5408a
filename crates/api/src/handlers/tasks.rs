//! Handlers for the `/tasks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracker_access::TaskAccess;
use tracker_core::types::DbId;
use tracker_db::models::task::{CreateTask, Task, TaskListQuery, UpdateTask};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/tasks
///
/// The target project must belong to the caller (403 otherwise).
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = TaskAccess::create(state.store.as_ref(), auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks?project_id={id}
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<TaskListQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskAccess::list(state.store.as_ref(), auth.user_id, params.project_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskAccess::get(state.store.as_ref(), auth.user_id, id).await?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = TaskAccess::update(state.store.as_ref(), auth.user_id, id, &input).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let removed = TaskAccess::delete(state.store.as_ref(), auth.user_id, id).await?;
    Ok(Json(MessageResponse::new(removed.message())))
}
