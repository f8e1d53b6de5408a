//! The ownership check that gates every Project and Task operation.
//!
//! A record belongs to exactly one user. There is no sharing and no role
//! that bypasses the check. Two flavours exist:
//!
//! - [`ensure_owned`] for read/update/delete paths, where a record owned by
//!   someone else is reported exactly like a missing one.
//! - [`ensure_parent_owned`] for the create-under-parent path (a task under a
//!   project), which reports a foreign parent as `Forbidden`.

use crate::error::CoreError;
use crate::types::DbId;

/// A record with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> DbId;
}

/// Whether `record` belongs to `requester`.
pub fn is_owned_by<T: Owned + ?Sized>(record: &T, requester: DbId) -> bool {
    record.owner_id() == requester
}

/// Resolve a fetched record on behalf of `requester`.
///
/// Returns `NotFound` both when the record does not exist and when it is
/// owned by another user, so callers never learn whether someone else's
/// record exists.
pub fn ensure_owned<T: Owned>(
    record: Option<T>,
    requester: DbId,
    entity: &'static str,
    id: DbId,
) -> Result<T, CoreError> {
    match record {
        Some(record) if is_owned_by(&record, requester) => Ok(record),
        _ => Err(CoreError::NotFound { entity, id }),
    }
}

/// Resolve the parent record a new child is being created under.
///
/// Unlike [`ensure_owned`], a parent that exists but belongs to another user
/// yields `Forbidden` with `denial` as the message.
pub fn ensure_parent_owned<T: Owned>(
    parent: Option<T>,
    requester: DbId,
    entity: &'static str,
    id: DbId,
    denial: &str,
) -> Result<T, CoreError> {
    let parent = parent.ok_or(CoreError::NotFound { entity, id })?;
    if !is_owned_by(&parent, requester) {
        return Err(CoreError::Forbidden(denial.to_string()));
    }
    Ok(parent)
}
