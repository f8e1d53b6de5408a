//! Task status and the `completed_at` transition rule.
//!
//! `completed_at` is present exactly when a task is `Completed`. It is
//! stamped when the status moves into `Completed`, cleared when it moves
//! out, and left alone otherwise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Entity name used in `NotFound` errors and log lines.
pub const TASK_ENTITY: &str = "Task";

pub const STATUS_TO_DO: &str = "To Do";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

/// All valid task status strings, in board order.
pub const VALID_TASK_STATUSES: &[&str] = &[STATUS_TO_DO, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Workflow state of a task. Serialized as the display strings above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// The stored and serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => STATUS_TO_DO,
            TaskStatus::InProgress => STATUS_IN_PROGRESS,
            TaskStatus::Completed => STATUS_COMPLETED,
        }
    }

    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_TO_DO => Ok(TaskStatus::ToDo),
            STATUS_IN_PROGRESS => Ok(TaskStatus::InProgress),
            STATUS_COMPLETED => Ok(TaskStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid task status '{other}'. Must be one of: {}",
                VALID_TASK_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `completed_at` for a task created with `status`.
pub fn initial_completed_at(status: TaskStatus, now: Timestamp) -> Option<Timestamp> {
    status.is_completed().then_some(now)
}

/// `completed_at` after an update.
///
/// `next` is the status supplied by the update, if any.
pub fn completed_at_after(
    current: TaskStatus,
    current_completed_at: Option<Timestamp>,
    next: Option<TaskStatus>,
    now: Timestamp,
) -> Option<Timestamp> {
    let Some(next) = next else {
        return current_completed_at;
    };

    match (current.is_completed(), next.is_completed()) {
        (false, true) => Some(now),
        (true, false) => None,
        _ => current_completed_at,
    }
}
