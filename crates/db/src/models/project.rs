//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::ownership::Owned;
use tracker_core::types::{DbId, Timestamp};
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Project {
    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// DTO for creating a new project. The owner comes from the session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Title is required"
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Description is required"
    ))]
    pub description: String,
}

/// DTO for updating an existing project. Blank or missing fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Column values written by a project update.
#[derive(Debug, Clone)]
pub struct ProjectChanges {
    pub title: String,
    pub description: String,
}
