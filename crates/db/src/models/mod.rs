//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO validated with `validator`
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates
//! - A resolved "changes" struct with the exact column values to write

pub mod project;
pub mod task;
pub mod user;
