//! Ownership-scoped access layer.
//!
//! The single authority over Project and Task reads and writes. Every call
//! takes the requesting user's id explicitly; there is no ambient "current
//! user". Each non-create operation fetches the record first and then applies
//! the ownership check from [`tracker_core::ownership`].
//!
//! - [`ProjectAccess`] -- create (capped), list, get, update, delete.
//! - [`TaskAccess`] -- create under an owned project, list (optionally by
//!   project), get, update (with `completed_at` transitions), delete.

pub mod error;
pub mod projects;
pub mod tasks;

use tracker_core::types::DbId;

pub use error::{AccessError, AccessResult};
pub use projects::ProjectAccess;
pub use tasks::TaskAccess;

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub entity: &'static str,
    pub id: DbId,
}

impl Removed {
    /// Human-readable confirmation, e.g. `"Project removed"`.
    pub fn message(&self) -> String {
        format!("{} removed", self.entity)
    }
}
