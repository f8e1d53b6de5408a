pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                  register (public)
/// /users/login            login (public)
/// /users/logout           logout (public)
/// /users/profile          get, update (auth required)
///
/// /projects               list, create (auth required)
/// /projects/{id}          get, update, delete (auth required)
///
/// /tasks                  list (?project_id=), create (auth required)
/// /tasks/{id}             get, update, delete (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
}
