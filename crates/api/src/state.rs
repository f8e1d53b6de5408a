use std::sync::Arc;

use tracker_db::TrackerStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Record storage (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn TrackerStore>,
    /// Server configuration (session settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
