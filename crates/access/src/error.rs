use tracker_core::error::CoreError;
use tracker_db::StoreError;

/// Failure of an access-layer operation.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// A rule was violated (not found, validation, cap, forbidden).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AccessResult<T> = Result<T, AccessError>;
