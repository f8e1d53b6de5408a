//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement, used by deletes and logout.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
