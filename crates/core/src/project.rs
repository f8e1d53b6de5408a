//! Project constants and the per-user project cap.

use crate::error::CoreError;

/// Entity name used in `NotFound` errors and log lines.
pub const PROJECT_ENTITY: &str = "Project";

/// Maximum number of projects a single user may own at once.
///
/// Enforced by the store together with the insert, so two concurrent
/// creates cannot both slip under the cap.
pub const MAX_PROJECTS_PER_USER: i64 = 4;

/// The error reported when the cap is already reached.
pub fn project_limit_error() -> CoreError {
    CoreError::LimitExceeded(format!(
        "Maximum of {MAX_PROJECTS_PER_USER} projects allowed per user"
    ))
}
