use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /            -> register
/// POST   /login       -> login
/// POST   /logout      -> logout
/// GET    /profile     -> get_profile
/// PUT    /profile     -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
}
