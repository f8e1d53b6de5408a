//! Domain rules for the task tracker.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db`,
//! `access` and `api` crates build on these types and checks.

pub mod error;
pub mod ownership;
pub mod patch;
pub mod project;
pub mod task;
pub mod types;
pub mod user;
pub mod validation;
