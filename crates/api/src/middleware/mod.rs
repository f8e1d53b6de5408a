//! Request extractors shared by the handlers.
//!
//! - [`auth::AuthUser`] -- Resolves the authenticated user from the session token.

pub mod auth;
